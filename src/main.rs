fn main() {
    if let Err(e) = stackbrush::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
