//! WASM-target tests for chat-types.
//!
//! Covers the parts that touch wasm-specific code paths (uuid's `js`
//! feature, chrono's `wasmbind` clock) via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_types::message::*;
use chat_types::thread::*;

#[wasm_bindgen_test]
fn message_user_has_clock_timestamp() {
    let msg = Message::user("Hello").unwrap();
    assert!(msg.timestamp.timestamp() > 1_600_000_000);
}

#[wasm_bindgen_test]
fn thread_ids_are_uuids() {
    let thread = ChatThread::new("Hello", Vec::new());
    assert!(uuid::Uuid::parse_str(&thread.id).is_ok());
}

#[wasm_bindgen_test]
fn thread_json_roundtrip() {
    let thread = ChatThread::new(
        "Hello there",
        vec![Message::user("Hello there").unwrap(), Message::assistant("Hi")],
    );
    let json = serde_json::to_string(&vec![thread.clone()]).unwrap();
    let back: Vec<ChatThread> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![thread]);
}

#[wasm_bindgen_test]
fn title_truncation() {
    let input = "x".repeat(80);
    assert_eq!(derive_title(&input), format!("{}...", "x".repeat(50)));
}
