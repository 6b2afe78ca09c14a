use symbol_trie::{Alphabet, NodeLayout, TrieConfig, TrieSet};

#[test]
fn test_set_mirrors_map_operations() {
    let mut set = TrieSet::new();
    for key in &["she", "sells", "sea", "shells", "by", "the", "sea", "shore"] {
        set.add(*key).unwrap();
    }

    assert_eq!(set.len(), 7);
    assert!(set.contains("shells"));
    assert!(!set.contains("shell"));

    assert_eq!(set.keys_with_prefix("sh"), vec!["she", "shells", "shore"]);
    assert_eq!(set.shortest_prefix_of("shellsort").as_deref(), Some("she"));
    assert_eq!(set.longest_prefix_of("shellsort").as_deref(), Some("shells"));
    assert_eq!(set.keys_with_pattern(".he").unwrap(), vec!["she", "the"]);
    assert!(set.has_key_with_pattern("s.a").unwrap());

    assert!(set.remove("shells"));
    assert!(!set.contains("shells"));
    assert!(set.contains("she"));
    assert_eq!(set.len(), 6);
}

#[test]
fn test_set_over_byte_keys() {
    let mut set = TrieSet::<Vec<u8>>::from_config(TrieConfig::default());
    set.add(&[3u8, 1][..]).unwrap();
    set.add(&[1u8][..]).unwrap();
    set.add(&[3u8][..]).unwrap();

    let keys: Vec<Vec<u8>> = set.iter().collect();
    assert_eq!(keys, vec![vec![1], vec![3], vec![3, 1]]);
}

#[test]
fn test_string_set_rejects_invalid_utf8() {
    let mut set = TrieSet::new();
    assert!(set.add(&[b'o', b'k', 0xc3][..]).is_err());
    assert!(set.is_empty());
    assert!(!set.has_key_with_prefix("ok"));
}

#[test]
fn test_set_dense_lowercase() {
    let config = TrieConfig::default()
        .alphabet(Alphabet::lowercase())
        .layout(NodeLayout::Dense);
    let mut set = TrieSet::with_config(config);

    assert!(set.add("abc").unwrap());
    assert!(set.add("ABC").is_err());
    assert!(set.has_key_with_prefix("ab"));

    set.clear();
    assert!(set.is_empty());
    assert!(!set.has_key_with_prefix("ab"));
}
