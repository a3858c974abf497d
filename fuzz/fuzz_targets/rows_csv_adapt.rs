//! Fuzz target for CSV row reading and the format adapter.
//!
//! This fuzzer feeds arbitrary bytes to the CSV row reader and adapts whatever
//! rows come out, checking for panics, crashes, or hangs. The adapter must
//! never fail on malformed rows.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stackbrush::model::io_rows::fuzz_adapt_csv_bytes;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_adapt_csv_bytes(data);
});
