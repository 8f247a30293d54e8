//! Session and theme persistence against a temporary on-disk store.

use paywave::domain::session::Identity;
use paywave::domain::theme::{ThemePreference, THEME_KEY};
use paywave::infra::store::Store;

fn identity() -> Identity {
    Identity {
        id: "demo-user".to_string(),
        first_name: "Alex".to_string(),
        last_name: "Morgan".to_string(),
        email: "alex.morgan@example.com".to_string(),
    }
}

#[test]
fn session_save_load_clear_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_path(dir.path().join("paywave.mdb")).unwrap();

    assert!(store.load_session().unwrap().is_none());

    store.save_session(&identity()).unwrap();
    let restored = store.load_session().unwrap().unwrap();
    assert_eq!(restored, identity());

    store.clear_session().unwrap();
    assert!(store.load_session().unwrap().is_none());
}

#[test]
fn corrupt_session_record_reads_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_path(dir.path().join("paywave.mdb")).unwrap();

    store.save_metadata("session", "{not json").unwrap();
    assert!(store.load_session().unwrap().is_none());
}

#[test]
fn theme_toggle_writes_through_and_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paywave.mdb");

    {
        let store = Store::with_path(&path).unwrap();
        store.save_metadata(THEME_KEY, "dark").unwrap();
        let mut theme = ThemePreference::load(&store);
        assert!(theme.is_dark());

        theme.toggle(&store).unwrap();
        assert!(!theme.is_dark());
        assert_eq!(
            store.load_metadata(THEME_KEY).unwrap().as_deref(),
            Some("light")
        );

        theme.toggle(&store).unwrap();
        assert!(theme.is_dark());
    }

    let store = Store::with_path(&path).unwrap();
    let theme = ThemePreference::load(&store);
    assert!(theme.is_dark());
}
