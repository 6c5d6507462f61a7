use std::io::Write;

use anyhow::Result;

use petcare_hub::models::Role;
use petcare_hub::seed::SeedData;
use petcare_hub::{create_app, AppConfig};

#[test]
fn app_loads_seed_from_file() -> Result<()> {
    let mut seed = SeedData::builtin()?;
    seed.services.retain(|s| s.id.starts_with('h'));

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(serde_json::to_string_pretty(&seed)?.as_bytes())?;

    let app = create_app(AppConfig {
        seed_path: Some(file.path().to_path_buf()),
        ..Default::default()
    })?;

    assert_eq!(app.catalog().all().len(), 4);
    assert_eq!(app.users().len(), 5);
    let session = app.login("3")?;
    assert_eq!(session.role(), Role::ClinicAdmin);

    Ok(())
}

#[test]
fn malformed_seed_reports_its_path() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(br#"{"users": [{"id": "1", "name": "Ana", "email": "ana@x.com", "role": "OWNER"}]}"#)?;

    let err = create_app(AppConfig {
        seed_path: Some(file.path().to_path_buf()),
        ..Default::default()
    })
    .unwrap_err();

    assert_eq!(err.kind(), "seed");
    assert!(err.to_string().contains("users[0].role"), "got: {err}");
    Ok(())
}

#[test]
fn missing_seed_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = create_app(AppConfig {
        seed_path: Some(dir.path().join("absent.json")),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.kind(), "io");
}

#[test]
fn duplicate_ids_are_rejected() -> Result<()> {
    let mut seed = SeedData::builtin()?;
    let duplicate = seed.services[0].clone();
    seed.services.push(duplicate);

    let err = SeedData::from_json(&serde_json::to_string(&seed)?).unwrap_err();
    assert_eq!(err.kind(), "configuration");
    Ok(())
}
