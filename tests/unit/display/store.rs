use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "minimal_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA::from_raw(2, 1, px.repeat(2), true).unwrap()
}

#[test]
fn put_then_get_round_trips_pixels() {
    let root = temp_dir("store_round_trip");
    let store = FrameStore::open(&root).unwrap();
    let f = frame([1, 2, 3, 4]);
    store.put("scenes/intro", "f0", &f).unwrap();
    assert!(store.contains("scenes/intro", "f0"));
    assert!(!store.contains("scenes", "f0"));
    assert_eq!(store.get("/scenes/intro/", "f0").unwrap(), f);
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn existing_keys_are_never_overwritten() {
    let root = temp_dir("store_append_only");
    let store = FrameStore::open(&root).unwrap();
    store.put("/", "a", &frame([1, 1, 1, 1])).unwrap();
    let err = store.put("", "a", &frame([9, 9, 9, 9])).unwrap_err();
    assert!(matches!(err, MinimalError::Validation(_)));
    assert_eq!(store.get("/", "a").unwrap(), frame([1, 1, 1, 1]));
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn names_are_listed_sorted() {
    let root = temp_dir("store_names");
    let store = FrameStore::open(&root).unwrap();
    store.put("g", "b", &frame([0; 4])).unwrap();
    store.put("g", "a", &frame([0; 4])).unwrap();
    assert_eq!(store.names("g").unwrap(), vec!["a", "b"]);
    assert!(store.names("missing").unwrap().is_empty());
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn bad_names_and_missing_keys_fail() {
    let root = temp_dir("store_bad_names");
    let store = FrameStore::open(&root).unwrap();
    assert!(store.put("../up", "x", &frame([0; 4])).is_err());
    assert!(store.put("g", "", &frame([0; 4])).is_err());
    assert!(store.get("g", "nope").is_err());
    assert!(!store.contains("..", "x"));
    std::fs::remove_dir_all(&root).unwrap();
}
