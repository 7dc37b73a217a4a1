use crate::interface_adapters::handlers::{
    ack_command, ack_message, add_unit, generate_key, get_mesh, get_network, issue_command,
    list_commands, list_messages, list_units, read_messages, send_message, toggle_network,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/units", get(list_units).post(add_unit))
        .route("/mesh", get(get_mesh))
        .route("/messages", get(list_messages).post(send_message))
        .route("/messages/read", post(read_messages))
        .route("/messages/{id}/ack", post(ack_message))
        .route("/commands", get(list_commands).post(issue_command))
        .route("/commands/{id}/ack", post(ack_command))
        .route("/network", get(get_network))
        .route("/network/toggle", post(toggle_network))
        .route("/keys", post(generate_key))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crypto::encrypt;
    use crate::domain::tuning::drift::DriftTuning;
    use crate::domain::{ConnectionStatus, MessagePriority, Operator, SystemClock};
    use crate::use_cases::{EntityStore, StoreSettings, UNREADABLE_PLACEHOLDER, demo_seed};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn build_test_state(default_key: Option<&str>) -> Arc<AppState> {
        let store = Arc::new(EntityStore::new(
            StoreSettings {
                operator: Operator {
                    id: "unit-1".to_string(),
                    callsign: "Alpha-1".to_string(),
                },
                initial_mode: ConnectionStatus::Online,
                drift: DriftTuning::default(),
            },
            Arc::new(SystemClock),
        ));
        store
            .seed(demo_seed(10 * 60 * 60 * 1000))
            .expect("expected demo seed to load");
        Arc::new(AppState::new(store, default_key.map(str::to_string)))
    }

    fn build_test_app() -> Router {
        router(build_test_state(None))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("expected request to build")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("expected request to build")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn when_mesh_is_requested_then_returns_units_and_derived_nodes() {
        let app = build_test_app();

        let response = app
            .oneshot(empty_request("GET", "/mesh"))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["units"].as_array().map(Vec::len), Some(5));
        assert_eq!(payload["mesh"].as_array().map(Vec::len), Some(5));
        assert_eq!(payload["mesh"][3]["unitId"], "unit-4");
        assert_eq!(payload["mesh"][3]["isActive"], false);
        assert_eq!(payload["mesh"][0]["signalStrength"], 90);
        assert_eq!(payload["network"]["mode"], "ONLINE");
    }

    #[tokio::test]
    async fn when_unit_is_added_then_returns_201_with_generated_id() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/units",
                json!({ "callsign": "Foxtrot-6", "type": "ARMOR" }),
            ))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = body_json(response).await;
        assert_eq!(payload["callsign"], "Foxtrot-6");
        assert_eq!(payload["type"], "ARMOR");
        assert_eq!(payload["connectionStatus"], "ONLINE");
        assert!(
            payload["id"]
                .as_str()
                .is_some_and(|id| id.starts_with("unit-"))
        );
    }

    #[tokio::test]
    async fn when_unit_id_already_exists_then_returns_409_and_error_message() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/units",
                json!({ "id": "unit-1", "callsign": "Impostor" }),
            ))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let payload = body_json(response).await;
        assert_eq!(payload["error"], "unit already exists");
    }

    #[tokio::test]
    async fn when_unit_callsign_is_blank_then_returns_400() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request("POST", "/units", json!({ "callsign": "  " })))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn when_message_is_sent_then_returns_201_and_is_listed_first() {
        let state = build_test_state(None);

        let response = router(state.clone())
            .oneshot(json_request(
                "POST",
                "/messages",
                json!({ "content": "Moving to grid 7", "priority": "HIGH" }),
            ))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = body_json(response).await;
        assert_eq!(payload["senderCallsign"], "Alpha-1");
        assert_eq!(payload["priority"], "HIGH");
        assert_eq!(payload["acknowledged"], false);
        assert_eq!(payload["deliveredTo"], json!([]));

        let messages = state.store.messages();
        assert_eq!(messages[0].content, "Moving to grid 7");
        assert_eq!(messages.len(), 4);
    }

    #[tokio::test]
    async fn when_encrypted_send_has_no_key_then_returns_400_and_nothing_is_stored() {
        let state = build_test_state(None);

        let response = router(state.clone())
            .oneshot(json_request(
                "POST",
                "/messages",
                json!({ "content": "secret", "encrypt": true }),
            ))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert_eq!(payload["error"], "encryption key is required");
        assert_eq!(state.store.messages().len(), 3);
    }

    #[tokio::test]
    async fn when_encrypted_send_uses_default_key_then_read_decrypts_it() {
        let state = build_test_state(Some("sharedkey123"));

        let response = router(state.clone())
            .oneshot(json_request(
                "POST",
                "/messages",
                json!({ "content": "Enemy at ridge", "encrypt": true, "priority": "CRITICAL" }),
            ))
            .await
            .expect("expected response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = body_json(response).await;
        assert_ne!(stored["content"], "Enemy at ridge");

        let response = router(state)
            .oneshot(json_request("POST", "/messages/read", json!({})))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::OK);
        let views = body_json(response).await;
        assert_eq!(views[0]["content"], "Enemy at ridge");
        assert_eq!(views[0]["encrypted"], true);
        assert_eq!(views[1]["content"], "Enemy movement detected at north ridge.");
    }

    #[tokio::test]
    async fn when_read_uses_wrong_key_then_only_envelopes_get_placeholder() {
        let state = build_test_state(None);
        let envelope = encrypt("Hold at bridge", "right").expect("encrypt");
        state
            .store
            .send_message(envelope, MessagePriority::Medium)
            .expect("send");

        let response = router(state)
            .oneshot(json_request("POST", "/messages/read", json!({ "key": "wrong" })))
            .await
            .expect("expected response");

        let views = body_json(response).await;
        assert_eq!(views[0]["content"], UNREADABLE_PLACEHOLDER);
        assert_eq!(views[0]["readable"], false);
        assert_eq!(views[1]["readable"], true);
    }

    #[tokio::test]
    async fn when_command_has_no_targets_then_returns_400_and_error_message() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/commands",
                json!({ "type": "HOLD", "targetUnitIds": [], "description": "Hold" }),
            ))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert_eq!(payload["error"], "targetUnitIds must not be empty");
    }

    #[tokio::test]
    async fn when_command_is_issued_then_returns_201_and_can_be_acknowledged() {
        let state = build_test_state(None);

        let response = router(state.clone())
            .oneshot(json_request(
                "POST",
                "/commands",
                json!({
                    "type": "MOVE",
                    "targetUnitIds": ["unit-2", "unit-3"],
                    "description": "Proceed to hill 42",
                    "coordinates": { "lat": 28.22, "lng": 94.74 }
                }),
            ))
            .await
            .expect("expected response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let issued = body_json(response).await;
        assert_eq!(issued["type"], "MOVE");
        assert_eq!(issued["issuerId"], "unit-1");
        let id = issued["id"].as_str().expect("command id").to_string();

        let response = router(state)
            .oneshot(empty_request("POST", &format!("/commands/{id}/ack")))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["acknowledged"], true);
    }

    #[tokio::test]
    async fn when_unknown_message_is_acknowledged_then_returns_404() {
        let app = build_test_app();

        let response = app
            .oneshot(empty_request("POST", "/messages/missing/ack"))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn when_network_is_toggled_then_mode_advances_through_cycle() {
        let state = build_test_state(None);
        let mut modes = Vec::new();
        let mut last = Value::Null;

        for _ in 0..4 {
            let response = router(state.clone())
                .oneshot(empty_request("POST", "/network/toggle"))
                .await
                .expect("expected response");
            last = body_json(response).await;
            modes.push(last["mode"].clone());
        }

        assert_eq!(
            modes,
            vec![
                json!("MESH_ONLY"),
                json!("DEGRADED"),
                json!("OFFLINE"),
                json!("ONLINE")
            ]
        );
        // Returning to ONLINE stamps the sync time in the same response.
        assert_eq!(
            last["lastSync"].as_u64(),
            state.store.network().last_sync
        );
        assert!(last["lastSync"].is_u64());
    }

    #[tokio::test]
    async fn when_key_is_generated_then_returns_32_hex_chars() {
        let app = build_test_app();

        let response = app
            .oneshot(empty_request("POST", "/keys"))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = body_json(response).await;
        let key = payload["key"].as_str().expect("key string");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn when_mesh_route_is_called_with_post_then_returns_405() {
        let app = build_test_app();

        let response = app
            .oneshot(empty_request("POST", "/mesh"))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn when_message_payload_is_missing_content_then_returns_422() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request("POST", "/messages", json!({})))
            .await
            .expect("expected response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
