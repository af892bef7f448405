use huffman::{tree::frequencies, Compression, Error, Tree};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_roundtrip(text in "\\PC{1,200}") {
        let compressed = huffman::compress(&text).unwrap();
        prop_assert_eq!(huffman::decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_small_alphabet(text in "[ab]{1,64}") {
        let compressed = Compression::compress(&text).unwrap();
        prop_assert_eq!(compressed.decompress().unwrap(), text);
    }

    #[test]
    fn test_single_symbol_runs(symbol in any::<char>(), n in 1..500usize) {
        let text: String = std::iter::repeat(symbol).take(n).collect();
        let compressed = Compression::compress(&text).unwrap();
        prop_assert_eq!(compressed.data_len(), n);
        prop_assert_eq!(compressed.decompress().unwrap(), text);
    }

    #[test]
    fn test_prefix_free(text in "\\PC{1,200}") {
        let codes = Tree::from_text(&text).unwrap().codes();
        prop_assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_bit_accounting(text in "\\PC{1,200}") {
        let compressed = Compression::compress(&text).unwrap();
        let packed = 8 * compressed.data().len();
        prop_assert!(compressed.data_len() <= packed);
        prop_assert!(packed - compressed.data_len() < 8);
        prop_assert_eq!(compressed.bits().len(), compressed.data_len());
    }

    #[test]
    fn test_data_len_matches_code_lengths(text in "[a-f]{2,100}") {
        prop_assume!(frequencies(&text).len() > 1);
        let codes = Tree::from_text(&text).unwrap().codes();
        let compressed = Compression::compress(&text).unwrap();
        prop_assert_eq!(compressed.data_len(), codes.encoded_len(&frequencies(&text)));
    }

    #[test]
    fn test_deterministic(text in "\\PC{1,100}") {
        prop_assert_eq!(
            Compression::compress(&text).unwrap(),
            Compression::compress(&text).unwrap()
        );
    }

    #[test]
    fn test_json_roundtrip(text in "\\PC{1,100}") {
        let compressed = Compression::compress(&text).unwrap();
        let restored = Compression::from_json(&compressed.to_json().unwrap()).unwrap();
        prop_assert_eq!(&restored, &compressed);
        prop_assert_eq!(restored.decompress().unwrap(), text);
    }

    #[test]
    fn test_tree_roundtrip(text in "\\PC{1,100}") {
        let tree = Tree::from_text(&text).unwrap();
        let decoded = Tree::decode(&tree.encode()).unwrap();
        prop_assert_eq!(decoded.encode(), tree.encode());
        prop_assert_eq!(decoded.codes(), tree.codes());
    }

    #[test]
    fn test_numeric_markers_other_than_zero_are_malformed(marker in any::<i64>()) {
        prop_assume!(marker != 0);
        let json = format!(r#"{{"tree":[0,{marker},null,null,"b",null,null],"data":[0],"data_len":1}}"#);
        let c = Compression::from_json(&json).unwrap();
        let is_malformed = matches!(
            c.decompress(),
            Err(Error::MalformedTree { position: 1, reason: "unknown marker" })
        );
        prop_assert!(is_malformed);
    }

    #[test]
    fn test_truncation_never_panics(text in "[a-z ]{2,100}", cut in 0..64usize) {
        let (tree, data, data_len) = Compression::compress(&text).unwrap().into_parts();
        let c = Compression::from_parts(tree, data, data_len.saturating_sub(cut));
        match c.decompress() {
            Ok(out) => prop_assert!(text.starts_with(&out)),
            Err(e) => prop_assert!(matches!(e, Error::TruncatedStream { .. }), "unexpected error: {:?}", e),
        }
    }
}

#[test]
fn test_empty_input() {
    assert!(matches!(huffman::compress(""), Err(Error::EmptyInput)));
}

#[test]
fn test_malformed_tree_from_json() {
    let c = Compression::from_json(r#"{"tree":[],"data":[0],"data_len":1}"#).unwrap();
    assert!(matches!(c.decompress(), Err(Error::MalformedTree { .. })));
}
