//! [`HttpTransport`] against a local axum backend: URL building, method
//! mapping, JSON bodies and how non-2xx or non-JSON answers surface.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{Method as HttpMethod, StatusCode, Uri};
use axum::Router;
use roster_client::transport::{ApiRequest, HttpTransport, Transport};
use roster_client::{ApiConfig, ClientError, PersonnelClient, TaskClient};
use roster_core::models::personnel::PersonnelDraft;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    method: String,
    path: String,
    body: String,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn task_json(completed: bool) -> serde_json::Value {
    json!({
        "id": 6,
        "titre": "Développer l'API REST",
        "realisee": completed,
        "personnelId": 3
    })
}

async fn answer(
    State(backend): State<Backend>,
    method: HttpMethod,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    backend.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: body.clone(),
    });

    match (method.as_str(), uri.path()) {
        ("GET", "/api/tasks") => (StatusCode::OK, json!([task_json(false)]).to_string()),
        ("PUT", "/api/tasks/6/complete") => (StatusCode::OK, task_json(true).to_string()),
        ("DELETE", "/api/tasks/6") => (StatusCode::OK, json!({ "success": true }).to_string()),
        ("POST", "/api/personnels") => {
            let mut created: serde_json::Value = serde_json::from_str(&body).unwrap();
            created["id"] = json!(9);
            (StatusCode::CREATED, created.to_string())
        }
        ("GET", "/api/personnels") => (StatusCode::OK, "<html>maintenance</html>".to_string()),
        _ => (StatusCode::NOT_FOUND, "Task not found".to_string()),
    }
}

/// Serve the canned backend on an ephemeral port. The base URL carries a
/// trailing slash on purpose.
async fn spawn_backend() -> (Backend, HttpTransport) {
    let backend = Backend::default();
    let app = Router::new().fallback(answer).with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let transport = HttpTransport::new(&ApiConfig::new(format!("http://{addr}/api/"))).unwrap();
    (backend, transport)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn methods_and_paths_reach_the_server() {
    let (backend, transport) = spawn_backend().await;
    let tasks = TaskClient::new(Arc::new(transport));

    assert_eq!(tasks.get_all().await.unwrap().len(), 1);
    assert!(tasks.mark_as_completed(6).await.unwrap().completed);
    assert!(tasks.delete(6).await.unwrap().success);

    let seen = backend.seen();
    let calls: Vec<_> = seen
        .iter()
        .map(|s| (s.method.as_str(), s.path.as_str()))
        .collect();
    assert_eq!(
        calls,
        [
            ("GET", "/api/tasks"),
            ("PUT", "/api/tasks/6/complete"),
            ("DELETE", "/api/tasks/6"),
        ]
    );
    assert_eq!(seen[1].body, "", "completion sends no body");
}

#[tokio::test]
async fn create_sends_the_draft_as_json() {
    let (backend, transport) = spawn_backend().await;
    let personnel = PersonnelClient::new(Arc::new(transport));

    let created = personnel
        .create(&PersonnelDraft {
            family_name: Some("Bernard".into()),
            given_name: Some("Chloé".into()),
            email: Some("chloe.bernard@example.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(9));
    let sent: serde_json::Value = serde_json::from_str(&backend.seen()[0].body).unwrap();
    assert_eq!(
        sent,
        json!({ "nom": "Bernard", "prenom": "Chloé", "email": "chloe.bernard@example.com" })
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_keeps_status_and_body() {
    let (_, transport) = spawn_backend().await;

    let err = transport
        .send(ApiRequest::get("/tasks/99"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_transport());
    assert_matches!(err, ClientError::Server { status: 404, body } if body == "Task not found");
}

#[tokio::test]
async fn success_with_non_json_body_is_a_decode_error() {
    let (_, transport) = spawn_backend().await;
    let personnel = PersonnelClient::new(Arc::new(transport));

    assert_matches!(personnel.get_all().await, Err(ClientError::Decode(_)));
}

#[tokio::test]
async fn closed_port_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(&ApiConfig::new(format!("http://{addr}/api"))).unwrap();
    let err = transport.send(ApiRequest::get("/tasks")).await.unwrap_err();

    assert_matches!(err, ClientError::Request(_));
    assert!(err.is_transport());
}
