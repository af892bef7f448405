#![no_main]
use huffman::Compression;
use libfuzzer_sys::fuzz_target;

// Arbitrary wire input must fail cleanly, never panic or overflow the stack.
fuzz_target!(|data: &[u8]| {
    if let Ok(compressed) = Compression::read_json(data) {
        let _ = compressed.decompress();
    }
});
