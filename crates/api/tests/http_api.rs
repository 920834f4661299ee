//! End-to-End-Tests der HTTP-Schnittstelle ueber `tower::ServiceExt::oneshot`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pforte_api::{router, AppState};
use pforte_auth::{Argon2Hasher, Argon2Parameter, SessionConfig, SessionManager};
use pforte_cache::SpeicherCache;
use pforte_db::SpeicherDb;
use pforte_observability::HealthState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let hasher = Argon2Hasher::neu(Argon2Parameter {
        speicher_kib: 256,
        iterationen: 1,
        parallelitaet: 1,
    })
    .unwrap();
    let manager = SessionManager::neu(
        Arc::new(SpeicherDb::neu()),
        SpeicherCache::neu(),
        Arc::new(hasher),
        SessionConfig::default(),
    )
    .unwrap();
    let state = AppState::neu(Arc::new(manager), Duration::from_secs(5));
    router(state, HealthState::neu())
}

async fn senden(app: &Router, methode: Method, pfad: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut anfrage = Request::builder().method(methode).uri(pfad);
    let body = match body {
        Some(v) => {
            anfrage = anfrage.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let antwort = app
        .clone()
        .oneshot(anfrage.body(body).unwrap())
        .await
        .unwrap();
    let status = antwort.status();
    let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
        .await
        .unwrap();
    let wert = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, wert)
}

fn registrierung(email: &str, passwort: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": passwort,
    })
}

#[tokio::test]
async fn registrieren_anmelden_pruefen() {
    let app = app();

    let (status, grant) = senden(
        &app,
        Method::POST,
        "/v1/auth/register",
        Some(registrierung("ada@x.com", "pw1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = grant["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(grant["user"]["email"], "ada@x.com");
    assert!(grant["user"].get("password_hash").is_none());

    let (status, login) = senden(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "ada@x.com", "password": "pw1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(login["token"], grant["token"]);

    let (status, auth) = senden(
        &app,
        Method::POST,
        "/v1/auth/authenticate",
        Some(json!({ "token": login["token"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(auth["user_id"], user_id.as_str());

    let (status, profil) = senden(&app, Method::GET, &format!("/v1/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profil["user"], grant["user"]);
}

#[tokio::test]
async fn fehler_werden_auf_status_abgebildet() {
    let app = app();
    senden(&app, Method::POST, "/v1/auth/register", Some(registrierung("dup@x.com", "pw"))).await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/v1/auth/register",
        Some(registrierung("DUP@x.com", "pw")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "duplicate_email");

    let (status, falsch) = senden(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "dup@x.com", "password": "falsch" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unbekannt) = senden(
        &app,
        Method::POST,
        "/v1/auth/login",
        Some(json!({ "email": "niemand@x.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(falsch, unbekannt);

    let (status, _) = senden(&app, Method::GET, "/v1/users/keine-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = senden(
        &app,
        Method::GET,
        "/v1/users/6f1c2a4e-8d3b-4f5a-9c7e-1b2d3e4f5a6b",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn ungueltiger_body_ist_validierungsfehler() {
    let app = app();

    let (status, body) = senden(
        &app,
        Method::POST,
        "/v1/auth/register",
        Some(json!({ "email": "nur@email.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = senden(
        &app,
        Method::POST,
        "/v1/auth/register",
        Some(registrierung("kein-at", "pw")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn abmelden_entwertet_token() {
    let app = app();
    let (_, grant) = senden(
        &app,
        Method::POST,
        "/v1/auth/register",
        Some(registrierung("out@x.com", "pw")),
    )
    .await;
    let token = json!({ "token": grant["token"] });

    let (status, _) = senden(&app, Method::POST, "/v1/auth/logout", Some(token.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = senden(&app, Method::POST, "/v1/auth/authenticate", Some(token.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "authentication_failed");

    // Erneutes Abmelden ist kein Fehler
    let (status, _) = senden(&app, Method::POST, "/v1/auth/logout", Some(token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn health_antwortet() {
    let app = app();
    let (status, body) = senden(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
