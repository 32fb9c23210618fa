//! Tests for the paths module.

use super::*;
use std::path::Path;

#[test]
fn test_remove_path_prefix() {
    let path = Path::new("/data/bases/leak1.csv");
    assert_eq!(
        remove_path_prefix(path, Path::new("/data/bases")),
        PathBuf::from("leak1.csv")
    );

    // Not a real path prefix, only a string prefix
    let path = Path::new("/data/bases2/leak1.csv");
    assert_eq!(
        remove_path_prefix(path, Path::new("/data/bases")),
        PathBuf::from("/data/bases2/leak1.csv")
    );

    // Relative paths work too
    let path = Path::new("bases/nested/x.csv");
    assert_eq!(
        remove_path_prefix(path, "bases"),
        PathBuf::from("nested/x.csv")
    );

    // Empty prefix leaves the path alone
    let path = Path::new("/data/x.csv");
    assert_eq!(remove_path_prefix(path, ""), PathBuf::from("/data/x.csv"));
}

#[test]
fn test_dataset_name() {
    assert_eq!(dataset_name(Path::new("/data/bases/leak1.csv")), "leak1.csv");
    assert_eq!(dataset_name(Path::new("leak2.csv")), "leak2.csv");
    assert_eq!(dataset_name(Path::new("/")), "/");
}
