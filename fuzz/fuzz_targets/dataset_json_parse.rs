//! Fuzz target for canonical dataset JSON parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stackbrush::model::io_json::from_json_str;
use stackbrush::validation::validate;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must also pass typed validation.
    if let Ok(dataset) = from_json_str(text) {
        assert!(validate(&dataset).is_ok());
    }
});
