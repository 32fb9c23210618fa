use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn test_load_config_file() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.yaml");
    fs::write(
        &config_path,
        r#"
bases_dir: "/srv/leaks"
extension: "tsv"
max_cell_width: 12
color: false
log_level: "debug"
"#,
    )?;

    let settings = Settings::load_from(Some(&config_path))?;
    assert_eq!(settings.bases_dir, PathBuf::from("/srv/leaks"));
    assert_eq!(settings.extension, "tsv");
    assert_eq!(settings.max_cell_width, 12);
    assert!(!settings.color);
    assert_eq!(settings.log_level, "debug");
    Ok(())
}

#[test]
#[serial]
fn test_partial_file_keeps_defaults() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, "bases_dir: \"data\"\n")?;

    let settings = Settings::load_from(Some(&config_path))?;
    assert_eq!(settings.bases_dir, PathBuf::from("data"));
    assert_eq!(settings.extension, "csv");
    assert_eq!(settings.max_cell_width, 30);
    assert!(settings.color);
    assert_eq!(settings.log_level, "error");
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides_file() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, "bases_dir: \"from_file\"\nmax_cell_width: 10\n")?;

    // SAFETY: serialized with every other test touching the environment
    unsafe {
        std::env::set_var("ROWSEEK_BASES_DIR", "from_env");
        std::env::set_var("ROWSEEK_MAX_CELL_WIDTH", "44");
    }
    let result = Settings::load_from(Some(&config_path));
    unsafe {
        std::env::remove_var("ROWSEEK_BASES_DIR");
        std::env::remove_var("ROWSEEK_MAX_CELL_WIDTH");
    }

    let settings = result?;
    assert_eq!(settings.bases_dir, PathBuf::from("from_env"));
    assert_eq!(settings.max_cell_width, 44);
    Ok(())
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    let result = Settings::load_from(Some(Path::new("definitely/not/here.yaml")));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.yaml");

    fs::write(&config_path, "max_cell_width: 0\n")?;
    assert!(Settings::load_from(Some(&config_path)).is_err());

    fs::write(&config_path, "max_cell_width: \"wide\"\n")?;
    assert!(Settings::load_from(Some(&config_path)).is_err());

    fs::write(&config_path, "log_level: \"chatty\"\n")?;
    assert!(Settings::load_from(Some(&config_path)).is_err());
    Ok(())
}

#[test]
fn test_merge_with_cli() -> Result<()> {
    let settings = Settings::default().merge_with_cli(&CliOverrides {
        bases_dir: Some(PathBuf::from("elsewhere")),
        max_cell_width: Some(8),
        no_color: true,
        log_level: Some("info".to_string()),
    })?;

    assert_eq!(settings.bases_dir, PathBuf::from("elsewhere"));
    assert_eq!(settings.max_cell_width, 8);
    assert!(!settings.color);
    assert_eq!(settings.log_level, "info");

    let untouched = Settings::default().merge_with_cli(&CliOverrides::default())?;
    assert_eq!(untouched, Settings::default());

    let zero_width = Settings::default().merge_with_cli(&CliOverrides {
        max_cell_width: Some(0),
        ..CliOverrides::default()
    });
    assert!(zero_width.is_err());
    Ok(())
}

#[test]
fn test_derived_options() {
    let settings = Settings {
        extension: ".TSV".to_string(),
        max_cell_width: 5,
        color: false,
        ..Settings::default()
    };

    assert_eq!(settings.discover_options().extension, "TSV");
    assert_eq!(settings.search_options().bases_dir, PathBuf::from("bases"));
    let renderer = settings.renderer();
    assert_eq!(renderer.max_cell_width, 5);
    assert!(!renderer.color);
}
