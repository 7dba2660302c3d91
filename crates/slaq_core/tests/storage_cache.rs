mod common;

use common::record;
use serde_json::json;
use slaq_core::{Chat, Storage};

#[test]
fn save_user_is_idempotent_and_last_write_wins() {
    let mut storage = Storage::new();
    let ann = record(json!({"id": "U1", "name": "ann"}));

    storage.save_user(ann.clone());
    storage.save_user(ann.clone());
    assert_eq!(storage.users().len(), 1);
    assert_eq!(storage.user("U1"), ann);

    storage.save_user(record(json!({"id": "U2", "name": "bob"})));
    storage.save_user(record(json!({"id": "U1", "name": "ann b."})));
    assert_eq!(storage.users().len(), 2);
    assert_eq!(storage.user_count(), 2);
    assert_eq!(storage.user("U1")["name"], "ann b.");
}

#[test]
fn snapshot_length_tracks_distinct_ids() {
    let mut storage = Storage::new();
    for id in ["U3", "U1", "U3", "U2", "U1"] {
        storage.save_user(record(json!({"id": id})));
    }
    assert_eq!(storage.users().len(), 3);
}

#[test]
fn channel_lookup_and_listing() {
    let mut storage = Storage::new();
    storage.save_channel(record(json!({
        "id": "C1",
        "name": "general",
        "is_member": true,
        "unread_count_display": 3
    })));
    storage.save_channel(record(json!({"id": "C0", "name": "announcements"})));

    let general = Chat::create(&storage.channel("C1"));
    assert_eq!(general.unread_count(), 3);
    assert!(general.is_open());

    let names: Vec<String> = storage
        .channels()
        .iter()
        .map(|channel| channel["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["announcements", "general"]);

    assert!(storage.channel("C404").is_empty());
    assert!(Chat::create(&storage.channel("C404")).id().is_empty());
}

#[test]
fn append_channel_message_preserves_order() {
    let mut storage = Storage::new();
    let initial: Vec<_> = (0..3)
        .map(|n| record(json!({"ts": format!("{n}.0"), "text": format!("m{n}")})))
        .collect();
    storage.set_channel_messages("C1", initial.clone());

    storage.append_channel_message("C1", record(json!({"ts": "3.0", "text": "m3"})));

    let messages = storage.channel_messages("C1");
    assert_eq!(messages.len(), 4);
    assert_eq!(&messages[..3], initial.as_slice());
    assert_eq!(messages[3]["text"], "m3");
}

#[test]
fn append_creates_list_for_unknown_channel() {
    let mut storage = Storage::new();
    assert!(!storage.channel_messages_exist("D1"));

    storage.append_channel_message("D1", record(json!({"text": "first"})));

    assert!(storage.channel_messages_exist("D1"));
    assert_eq!(storage.channel_messages("D1").len(), 1);
    assert_eq!(storage.channel_count(), 0);
}

#[test]
fn set_channel_messages_replaces_list_and_clear_drops_all() {
    let mut storage = Storage::new();
    storage.set_channel_messages("C1", vec![record(json!({"text": "a"}))]);
    storage.set_channel_messages("C2", vec![record(json!({"text": "b"}))]);
    storage.set_channel_messages("C1", Vec::new());

    assert!(storage.channel_messages_exist("C1"));
    assert!(storage.channel_messages("C1").is_empty());

    storage.clear_channel_messages();
    assert!(!storage.channel_messages_exist("C1"));
    assert!(!storage.channel_messages_exist("C2"));
}
