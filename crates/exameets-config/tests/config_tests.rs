use exameets_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_sensible_endpoints() {
    let cfg = Config::default();

    assert!(!cfg.api_base_url.is_empty());
    assert_eq!(cfg.success_dwell_ms, 3_000);
    assert_eq!(cfg.login_route, "/login");
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.media.cloud_name = "exameets".to_string();
    cfg.session.role = Some("manager".to_string());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.media.cloud_name, "exameets");
    assert_eq!(loaded.session.role.as_deref(), Some("manager"));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_config_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.config_path(), r#"{ "request_timeout_secs": 5 }"#).expect("write");

    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.request_timeout_secs, 5);
    assert_eq!(loaded.success_dwell_ms, 3_000);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn upload_url_is_derived_from_cloud_name() {
    let mut cfg = Config::default();
    cfg.media.cloud_name = "demo".into();
    assert_eq!(
        cfg.media.resolve_upload_url(),
        "https://api.cloudinary.com/v1_1/demo/image/upload"
    );
    cfg.media.upload_url = Some("http://localhost:9000/upload".into());
    assert_eq!(cfg.media.resolve_upload_url(), "http://localhost:9000/upload");
}
