use okwu_config::Config;

use crate::profile::ProfileStore;

#[test]
fn test_init_creates_main_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    assert!(!store.exists("main"));
    store.init().unwrap();
    assert!(store.exists("main"));
    assert!(dir.path().join("profiles").join("main.json").is_file());
}

#[test]
fn test_save_and_load_preferences() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let mut config = Config::default();
    config.audio.enabled = false;
    config.session.countdown_start = 5;
    store.save("study", &config).unwrap();

    assert_eq!(store.load("study").unwrap(), config);
}

#[test]
fn test_missing_profile_falls_back_to_main() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let mut main = Config::default();
    main.share.base_url = "http://localhost:8080/#/".to_string();
    store.save("main", &main).unwrap();

    assert_eq!(store.load("nobody").unwrap(), main);

    let path = store.add_profile_from_default("copy").unwrap();
    assert!(path.is_file());
    assert_eq!(store.load("copy").unwrap(), main);
}

#[test]
fn test_malformed_profile_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());
    std::fs::create_dir_all(store.profiles_dir()).unwrap();
    std::fs::write(store.profiles_dir().join("broken.json"), "{ nope").unwrap();

    let err = store.load("broken").unwrap_err();
    assert!(format!("{err:#}").contains("Malformed profile"));
}
