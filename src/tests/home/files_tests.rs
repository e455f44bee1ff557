use crate::session::CollectionState;

use super::*;

#[test]
fn init_writes_defaults_and_refuses_to_clobber() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join(HOME_DIR);
    let home = ClientHome::init(&dir, false).expect("init");

    let cfg = home.read_config().expect("config");
    assert!(cfg.remote.is_none());
    assert!(cfg.account.is_none());
    assert_eq!(home.read_settings().expect("settings"), ClientSettings::default());

    assert!(ClientHome::init(&dir, false).is_err());
    assert!(ClientHome::init(&dir, true).is_ok());
}

#[test]
fn settings_and_session_survive_reopen() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join(HOME_DIR);
    let home = ClientHome::init(&dir, false).expect("init");
    home.update_settings(|s| {
        s.is_dark_mode = true;
        s.selected_language = "tr".to_string();
    })
    .expect("update settings");
    home.write_session(&SessionState {
        catalog: CollectionState::Loaded,
        ..SessionState::default()
    })
    .expect("write session");

    let reopened = ClientHome::open(&dir).expect("open");
    let settings = reopened.read_settings().expect("settings");
    assert!(settings.is_dark_mode);
    assert_eq!(settings.selected_language, "tr");
    assert_eq!(
        reopened.read_session().expect("session").catalog,
        CollectionState::Loaded
    );
}

#[test]
fn coordinator_requires_login() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join(HOME_DIR);
    let home = ClientHome::init(&dir, false).expect("init");
    let err = home.coordinator().err().expect("no remote configured");
    assert!(err.to_string().contains("subtrack login"), "{err:#}");
}

#[test]
fn open_without_init_points_at_init() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = ClientHome::open(&tmp.path().join(HOME_DIR)).expect_err("not initialised");
    assert!(err.to_string().contains("subtrack init"), "{err:#}");
}
