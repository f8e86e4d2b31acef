#![no_main]

use libfuzzer_sys::fuzz_target;
use rofi_tracker::context::{Context, InfoToken};

fuzz_target!(|data: &str| {
    // Whatever rofi hands back, decoding must not panic
    let _ = Context::decode(Some(data));

    // Anything that decodes must re-encode to the same string
    if let Some(token) = InfoToken::decode(data) {
        assert_eq!(token.encode(), data);
    }
});
