use super::*;
use tempfile::TempDir;

fn setup() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("b.csv"), "user\nbob\n")?;
    fs::write(temp_dir.path().join("a.csv"), vec![b'x'; 3 * 1024])?;
    fs::write(temp_dir.path().join("readme.txt"), "not a dataset")?;
    Ok(temp_dir)
}

#[test]
fn test_list_datasets() -> Result<()> {
    let temp_dir = setup()?;
    let datasets = list_datasets(temp_dir.path(), &DiscoverOptions::default())?;

    let names: Vec<_> = datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
    assert_eq!(datasets[0].size_bytes, 3 * 1024);
    assert!(datasets[0].modified.is_some());
    Ok(())
}

#[test]
fn test_remove_dataset_by_number() -> Result<()> {
    let temp_dir = setup()?;
    let removed = remove_dataset(temp_dir.path(), &DiscoverOptions::default(), 2)?;

    assert_eq!(removed.name, "b.csv");
    assert!(!temp_dir.path().join("b.csv").exists());
    assert!(temp_dir.path().join("a.csv").exists());
    assert!(temp_dir.path().join("readme.txt").exists());
    Ok(())
}

#[test]
fn test_remove_dataset_out_of_range() -> Result<()> {
    let temp_dir = setup()?;
    for number in [0, 3, 99] {
        assert!(remove_dataset(temp_dir.path(), &DiscoverOptions::default(), number).is_err());
    }
    assert_eq!(list_datasets(temp_dir.path(), &DiscoverOptions::default())?.len(), 2);
    Ok(())
}

#[test]
fn test_remove_from_empty_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let err = remove_dataset(temp_dir.path(), &DiscoverOptions::default(), 1).unwrap_err();
    assert!(err.to_string().contains("No datasets available"));
    Ok(())
}

#[test]
fn test_ensure_dir_creates_nested_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().join("one").join("bases");
    ensure_dir(&dir)?;
    assert!(dir.is_dir());
    // Idempotent
    ensure_dir(&dir)?;
    Ok(())
}

#[test]
fn test_render_listing() -> Result<()> {
    let temp_dir = setup()?;
    let datasets = list_datasets(temp_dir.path(), &DiscoverOptions::default())?;
    let renderer = TableRenderer {
        color: false,
        ..TableRenderer::default()
    };

    let listing = render_listing(&datasets, &renderer);
    assert!(listing.contains("Available datasets:"));
    assert!(listing.contains("a.csv"));
    assert!(listing.contains("3 KB"));
    assert!(listing.contains("0 KB"));
    Ok(())
}
