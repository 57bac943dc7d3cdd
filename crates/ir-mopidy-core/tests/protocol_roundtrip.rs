//! Integration tests for the ir-mopidy-core JSON-RPC envelopes and binding
//! table, exercised through the public API only.

use ir_mopidy_core::{
    Action, BindingSpec, JsonRpcError, JsonRpcRequest, JsonRpcResponse, KeyDirection, KeyMapTable,
    KeyPress, RequestIdCounter,
};
use serde_json::{json, Value};

// ── JSON-RPC round trips ──────────────────────────────────────────────────────

#[test]
fn test_get_volume_request_response_pair_preserves_integer() {
    // Arrange: the client side builds the request with a fresh id
    let ids = RequestIdCounter::new();
    let request = JsonRpcRequest::new(ids.next(), "core.mixer.get_volume", None);

    // Act: serialize and parse the request as the server would
    let wire = serde_json::to_string(&request).expect("serialize request");
    let parsed: JsonRpcRequest = serde_json::from_str(&wire).expect("parse request");

    // The server answers with the current volume
    let response = JsonRpcResponse::success(parsed.id, json!(73));
    let wire = serde_json::to_string(&response).expect("serialize response");
    let parsed_response: JsonRpcResponse = serde_json::from_str(&wire).expect("parse response");

    // Assert
    assert_eq!(parsed, request);
    assert_eq!(parsed_response.id, Some(Value::from(request.id)));
    let value = parsed_response.into_result().expect("no error").expect("a value");
    assert_eq!(value.as_i64(), Some(73));
}

#[test]
fn test_error_response_survives_round_trip() {
    let response = JsonRpcResponse::failure(
        5,
        JsonRpcError {
            code: -32602,
            message: "Invalid params".to_string(),
            data: Some(json!({"volume": "must be an integer"})),
        },
    );

    let wire = serde_json::to_string(&response).unwrap();
    let parsed: JsonRpcResponse = serde_json::from_str(&wire).unwrap();

    assert_eq!(parsed, response);
    assert!(parsed.into_result().is_err());
}

#[test]
fn test_seek_request_carries_time_position_param() {
    let request = JsonRpcRequest::new(
        11,
        "core.playback.seek",
        Some(json!({"time_position": 61_000})),
    );

    let value: Value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], 11);
    assert_eq!(value["params"]["time_position"], 61_000);
}

// ── Binding table ─────────────────────────────────────────────────────────────

#[test]
fn test_table_built_from_typical_remote_layout() {
    // Arrange: a left/right scan layout with release suppression
    let specs = vec![
        BindingSpec {
            key: KeyPress::new(KeyDirection::Release, "KEY_LEFT"),
            callback: Some("previous_track".to_string()),
            skip_next: None,
        },
        BindingSpec {
            key: KeyPress::new(KeyDirection::Repeat, "KEY_LEFT"),
            callback: Some("scan_backward".to_string()),
            skip_next: Some(KeyPress::new(KeyDirection::Release, "KEY_LEFT")),
        },
        BindingSpec {
            key: KeyPress::new(KeyDirection::Release, "KEY_RIGHT"),
            callback: Some("next_track".to_string()),
            skip_next: None,
        },
        BindingSpec {
            key: KeyPress::new(KeyDirection::Repeat, "KEY_RIGHT"),
            callback: Some("scan_forward".to_string()),
            skip_next: Some(KeyPress::new(KeyDirection::Release, "KEY_RIGHT")),
        },
    ];

    // Act
    let table = KeyMapTable::build(specs).expect("valid layout");

    // Assert
    assert_eq!(table.len(), 4);
    assert_eq!(
        table.lookup(KeyDirection::Repeat, "KEY_RIGHT").unwrap().action,
        Some(Action::ScanForward)
    );
    assert_eq!(
        table.lookup(KeyDirection::Release, "KEY_LEFT").unwrap().action,
        Some(Action::PreviousTrack)
    );
}

#[test]
fn test_every_configured_pair_resolves_to_its_last_binding() {
    // Arrange: interleaved duplicates across several keys
    let entries = [
        (KeyDirection::Press, "KEY_A", "next_track"),
        (KeyDirection::Press, "KEY_B", "volume_up"),
        (KeyDirection::Press, "KEY_A", "previous_track"),
        (KeyDirection::Release, "KEY_A", "mute_unmute"),
        (KeyDirection::Press, "KEY_B", "volume_down"),
    ];
    let specs = entries.iter().map(|(dir, key, cb)| BindingSpec {
        key: KeyPress::new(*dir, *key),
        callback: Some(cb.to_string()),
        skip_next: None,
    });

    // Act
    let table = KeyMapTable::build(specs).unwrap();

    // Assert: for each pair, the last entry in file order wins
    for (dir, key, _) in entries {
        let expected = entries
            .iter()
            .rev()
            .find(|(d, k, _)| *d == dir && *k == key)
            .map(|(_, _, cb)| cb.parse::<Action>().unwrap());
        assert_eq!(table.lookup(dir, key).unwrap().action, expected);
    }
}
