use std::path::PathBuf;

use auitheme_project::{
    from_bytes, read_project_bytes, Color, Icon, LoadConfig, ProjectError, ProjectFile,
};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "auitheme-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn save_and_load_round_trip() {
    let dir = unique_temp_dir("save-load");
    let mut file = ProjectFile::create(dir.join("dark"));
    file.set_asset_directory(&dir.join("svg"));
    file.project_mut()
        .push(Color::new("accent", 0.2, 0.4, 0.8, 1.0));
    file.project_mut().push(Icon {
        file_name: "close.svg".into(),
    });
    file.save().expect("save should succeed");

    assert!(dir.join("dark.tui").is_file());

    let loaded = ProjectFile::load(dir.join("dark.tui"), &LoadConfig::default())
        .expect("load should succeed");
    assert_eq!(loaded.name(), "dark");
    assert_eq!(loaded.project(), file.project());
    assert_eq!(loaded.project().asset_directory, "svg/");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_as_keeps_assets_in_place() {
    let dir = unique_temp_dir("save-as");
    let nested = dir.join("themes").join("light");
    std::fs::create_dir_all(&nested).expect("nested dir should be creatable");

    let mut file = ProjectFile::create(dir.join("base.tui"));
    file.set_asset_directory(&dir.join("svg"));
    file.save().expect("save should succeed");

    file.save_as(nested.join("light.tui"))
        .expect("save_as should succeed");
    assert_eq!(file.project().asset_directory, "../../svg/");
    assert_eq!(file.name(), "light");

    let loaded = ProjectFile::load(nested.join("light.tui"), &LoadConfig::default())
        .expect("load should succeed");
    assert_eq!(loaded.project().asset_directory, "../../svg/");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_file_is_rejected() {
    let dir = unique_temp_dir("too-large");
    let path = dir.join("big.tui");
    std::fs::write(&path, vec![0u8; 128]).expect("file should be writable");

    let config = LoadConfig::default().with_max_file_size(64);
    let err = ProjectFile::load(&path, &config).unwrap_err();
    assert!(matches!(err, ProjectError::FileTooLarge { size: 128, max: 64, .. }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn raw_bytes_honor_size_limit() {
    let dir = unique_temp_dir("raw-bytes");
    let mut file = ProjectFile::create(dir.join("raw"));
    file.project_mut().push(Color::new("red", 1.0, 0.0, 0.0, 1.0));
    file.save().expect("save should succeed");

    let bytes = read_project_bytes(file.path(), &LoadConfig::default())
        .expect("bytes should read");
    assert_eq!(&from_bytes(&bytes), file.project());

    let config = LoadConfig::default().with_max_file_size(8);
    let err = read_project_bytes(file.path(), &config).unwrap_err();
    assert!(matches!(err, ProjectError::FileTooLarge { max: 8, .. }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_honors_record_limit() {
    let dir = unique_temp_dir("record-limit");
    let mut file = ProjectFile::create(dir.join("many"));
    for i in 0..5 {
        file.project_mut()
            .push(Color::new(format!("c{i}"), 0.0, 0.0, 0.0, 1.0));
    }
    file.save().expect("save should succeed");

    let config = LoadConfig::default().with_max_records(3);
    let (loaded, stats) =
        ProjectFile::load_with_stats(file.path(), &config).expect("load should succeed");
    assert_eq!(loaded.project().colors.len(), 3);
    assert_eq!(stats.clamped_sections, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_reports_path() {
    let dir = unique_temp_dir("missing");
    let path = dir.join("nope.tui");

    let err = ProjectFile::load(&path, &LoadConfig::default()).unwrap_err();
    match err {
        ProjectError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_loads_with_stats() {
    let dir = unique_temp_dir("corrupt");
    let path = dir.join("broken.tui");
    std::fs::write(&path, [0xFF, 0xFF, 0xFF, 0xFF, b'x']).expect("file should be writable");

    let (file, stats) = ProjectFile::load_with_stats(&path, &LoadConfig::default())
        .expect("corrupt files still load");
    assert!(file.project().is_empty());
    assert!(!stats.is_clean());

    let _ = std::fs::remove_dir_all(&dir);
}
