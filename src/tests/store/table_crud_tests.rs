use crate::model::{Service, UserSubscription};

use super::*;

fn service(name: &str, category: &str) -> Service {
    Service {
        name: name.to_string(),
        category: category.to_string(),
    }
}

fn sub(service: &str, persons: u32) -> UserSubscription {
    UserSubscription {
        service_name: service.to_string(),
        plan_name: "Standard".to_string(),
        plan_price: 100.0,
        person_count: persons,
    }
}

#[test]
fn insert_rejects_duplicate_keys() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mirror = JsonMirror::open(tmp.path()).expect("open mirror");

    mirror.insert(service("Spotify", "Music")).expect("first insert");
    let err = mirror
        .insert(service("Spotify", "Other"))
        .expect_err("duplicate insert");
    assert!(matches!(err, MirrorError::DuplicateKey { table: Table::Services, .. }));

    let rows: Vec<Service> = mirror.query(QueryOrder::Stored).expect("query");
    assert_eq!(rows, vec![service("Spotify", "Music")]);
}

#[test]
fn unsaved_changes_are_not_visible_after_reopen() {
    let tmp = tempfile::tempdir().expect("tempdir");
    {
        let mirror = JsonMirror::open(tmp.path()).expect("open mirror");
        mirror.insert(sub("Netflix", 2)).expect("insert");
        mirror.save().expect("save");
        mirror.insert(sub("Spotify", 1)).expect("insert unsaved");
    }

    let reopened = JsonMirror::open(tmp.path()).expect("reopen mirror");
    let rows: Vec<UserSubscription> = reopened.query(QueryOrder::Stored).expect("query");
    assert_eq!(rows, vec![sub("Netflix", 2)]);
}

#[test]
fn update_and_delete_require_an_existing_row() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mirror = JsonMirror::open(tmp.path()).expect("open mirror");

    assert!(matches!(
        mirror.update(sub("Netflix", 4)),
        Err(MirrorError::Missing { .. })
    ));
    assert!(matches!(
        mirror.delete::<UserSubscription>("Netflix"),
        Err(MirrorError::Missing { .. })
    ));

    mirror.insert(sub("Netflix", 2)).expect("insert");
    mirror.update(sub("Netflix", 4)).expect("update");
    let found: Option<UserSubscription> = mirror.find("Netflix").expect("find");
    assert_eq!(found.map(|s| s.person_count), Some(4));

    mirror.delete::<UserSubscription>("Netflix").expect("delete");
    assert!(mirror.find::<UserSubscription>("Netflix").expect("find").is_none());
}

#[test]
fn query_by_key_sorts_rows() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mirror = JsonMirror::open(tmp.path()).expect("open mirror");
    mirror.insert(service("YouTube", "Video")).expect("insert");
    mirror.insert(service("Amazon", "Shopping")).expect("insert");

    let stored: Vec<Service> = mirror.query(QueryOrder::Stored).expect("query");
    let by_key: Vec<Service> = mirror.query(QueryOrder::ByKey).expect("query");
    assert_eq!(stored[0].name, "YouTube");
    assert_eq!(by_key[0].name, "Amazon");
}

#[test]
fn delete_all_only_touches_one_table() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mirror = JsonMirror::open(tmp.path()).expect("open mirror");
    mirror.insert(service("Spotify", "Music")).expect("insert");
    mirror.insert(sub("Spotify", 1)).expect("insert");
    mirror.insert(sub("Netflix", 2)).expect("insert");

    assert_eq!(mirror.delete_all::<UserSubscription>().expect("delete all"), 2);
    mirror.save().expect("save");

    let reopened = JsonMirror::open(tmp.path()).expect("reopen");
    assert!(reopened.query::<UserSubscription>(QueryOrder::Stored).expect("query").is_empty());
    assert_eq!(reopened.query::<Service>(QueryOrder::Stored).expect("query").len(), 1);
}
