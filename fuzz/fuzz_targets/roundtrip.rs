#![no_main]
use huffman::Compression;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    if text.is_empty() {
        return;
    }

    let compressed = Compression::compress(&text).unwrap();
    let packed = 8 * compressed.data().len();
    assert!(compressed.data_len() <= packed && packed - compressed.data_len() < 8);

    let restored = Compression::from_json(&compressed.to_json().unwrap()).unwrap();
    assert_eq!(restored.decompress().unwrap(), text);
});
