mod common;

use common::record;
use serde_json::json;
use slaq_core::{FieldIssue, Presence, PresenceObserver, User};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct PresenceLog {
    changes: RefCell<Vec<(String, Presence)>>,
}

impl PresenceObserver for PresenceLog {
    fn presence_changed(&self, user_id: &str, presence: Presence) {
        self.changes
            .borrow_mut()
            .push((user_id.to_string(), presence));
    }
}

#[test]
fn builds_user_from_full_record() {
    let user = User::create(&record(json!({
        "id": "U1",
        "name": "Ann",
        "presence": "active",
        "profile": {"image_512": "http://x/y.png"}
    })));

    assert_eq!(user.user_id(), "U1");
    assert_eq!(user.full_name(), "Ann");
    assert_eq!(user.presence(), Presence::Active);
    assert_eq!(
        user.avatar_url().map(|url| url.as_str()),
        Some("http://x/y.png")
    );
    assert!(!user.is_bot());
    assert!(user.is_valid());
}

#[test]
fn presence_strings_map_to_known_values_only() {
    let cases = [
        (json!("active"), Presence::Active),
        (json!("away"), Presence::Away),
        (json!("Active"), Presence::Unknown),
        (json!("dnd"), Presence::Unknown),
        (json!(""), Presence::Unknown),
        (json!(1), Presence::Unknown),
        (json!(null), Presence::Unknown),
    ];
    for (raw, expected) in cases {
        let user = User::create(&record(json!({"id": "U1", "presence": raw.clone()})));
        assert_eq!(user.user_id(), "U1");
        assert_eq!(user.presence(), expected, "presence input {raw}");
    }

    let absent = User::create(&record(json!({"id": "U1"})));
    assert_eq!(absent.presence(), Presence::Unknown);
}

#[test]
fn empty_record_yields_invalid_user_and_fatal_report() {
    let parsed = User::parse(&record(json!({})));

    assert!(parsed.report.is_fatal());
    assert_eq!(parsed.report.issue_for("id"), Some(&FieldIssue::Missing));
    assert_eq!(parsed.value.user_id(), "");
    assert!(!parsed.value.is_valid());
    assert_eq!(parsed.value.full_name(), "");
    assert!(parsed.value.avatar_url().is_none());
    assert_eq!(parsed.value.presence(), Presence::Unknown);
}

#[test]
fn empty_id_string_is_rejected() {
    let parsed = User::parse(&record(json!({"id": "", "name": "Ann"})));
    assert_eq!(parsed.report.issue_for("id"), Some(&FieldIssue::Empty));
    assert_eq!(parsed.value.full_name(), "");
}

#[test]
fn soft_failures_keep_the_user_usable() {
    let parsed = User::parse(&record(json!({"id": "U7", "profile": {}})));

    assert!(!parsed.report.is_fatal());
    assert!(parsed.value.is_valid());
    assert_eq!(parsed.report.issue_for("name"), Some(&FieldIssue::Missing));
    assert_eq!(
        parsed.report.issue_for("profile.image_512"),
        Some(&FieldIssue::Missing)
    );
    assert_eq!(parsed.report.warnings().len(), 3);
}

#[test]
fn presence_notifications_fire_only_on_transitions() {
    let log = Rc::new(PresenceLog::default());
    let mut user = User::create(&record(json!({"id": "U1", "presence": "active"})));
    user.connect(log.clone());

    assert!(!user.set_presence(Presence::Active));
    assert!(log.changes.borrow().is_empty());

    assert!(user.set_presence(Presence::Away));
    assert!(user.set_presence(Presence::Unknown));
    assert!(!user.set_presence(Presence::Unknown));

    assert_eq!(
        *log.changes.borrow(),
        vec![
            ("U1".to_string(), Presence::Away),
            ("U1".to_string(), Presence::Unknown),
        ]
    );
}

#[test]
fn presence_serializes_with_wire_names() {
    assert_eq!(serde_json::to_value(Presence::Away).unwrap(), json!("away"));
    let decoded: Presence = serde_json::from_value(json!("active")).unwrap();
    assert_eq!(decoded, Presence::Active);
    assert_eq!(Presence::Unknown.as_str(), "unknown");
}
