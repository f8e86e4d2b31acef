#![no_main]

use libfuzzer_sys::fuzz_target;
use rofi_tracker::index::cursor::decode_rows;

fuzz_target!(|data: &[u8]| {
    // Malformed endpoint output is an error, never a panic
    let _ = decode_rows(data, 3);
});
