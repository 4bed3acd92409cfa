//! End-to-end tests against an in-process mock PBX.
//!
//! The mock serves both the token endpoint and the business endpoints, so
//! these tests exercise the whole pipeline: credentials exchange, token
//! caching across calls, bearer decoration, and the typed wrappers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Credentials;
use crate::call_control::MakeCallParameters;
use crate::client::{Error, ThreeCxClient};

#[derive(Debug, Default)]
struct MockPbx {
    token_hits: AtomicUsize,
    /// When set, the token endpoint answers with this status instead of a
    /// token.
    token_failure: Option<StatusCode>,
}

#[derive(Debug, Deserialize)]
struct TokenForm {
    client_id: String,
    client_secret: String,
    grant_type: String,
}

const VALID_TOKEN: &str = "valid-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {VALID_TOKEN}"))
}

fn guard(headers: &HeaderMap) -> Result<(), Response> {
    if authorized(headers) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid credentials").into_response())
    }
}

async fn token_handler(
    State(pbx): State<Arc<MockPbx>>,
    Form(form): Form<TokenForm>,
) -> Response {
    pbx.token_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = pbx.token_failure {
        return (status, "token failure").into_response();
    }
    assert_eq!(form.client_id, "client-id");
    assert_eq!(form.client_secret, "client-secret");
    assert_eq!(form.grant_type, "client_credentials");
    Json(json!({
        "token_type": "Bearer",
        "expires_in": 60,
        "access_token": VALID_TOKEN,
        "refresh_token": null,
    }))
    .into_response()
}

fn router(pbx: Arc<MockPbx>) -> Router {
    Router::new()
        .route("/connect/token", post(token_handler))
        .route(
            "/callcontrol",
            get(|headers: HeaderMap| async move {
                guard(&headers)?;
                Ok::<_, Response>(Json(json!([
                    { "dn": "100", "type": "Extension" },
                    { "dn": "8000", "type": "Queue" },
                ])))
            }),
        )
        .route(
            "/callcontrol/{dn}",
            get(|Path(dn): Path<String>, headers: HeaderMap| async move {
                guard(&headers)?;
                Ok::<_, Response>(Json(json!({ "dn": dn, "type": "Extension" })))
            }),
        )
        .route(
            "/callcontrol/{dn}/makecall",
            post(
                |Path(dn): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<serde_json::Value>| async move {
                    guard(&headers)?;
                    assert_eq!(body["destination"], "200");
                    Ok::<_, Response>(Json(json!({
                        "finalstatus": "Success",
                        "reason": "None",
                        "reasontext": "",
                        "result": { "id": 1, "dn": dn },
                    })))
                },
            ),
        )
        .route(
            "/callcontrol/{dn}/participants/{id}/{action}",
            post(
                |Path((_dn, id, action)): Path<(String, i32, String)>,
                 headers: HeaderMap,
                 Json(body): Json<serde_json::Value>| async move {
                    guard(&headers)?;
                    assert_eq!(body["reason"], "None");
                    Ok::<_, Response>(Json(json!({
                        "finalstatus": "Success",
                        "reason": action,
                        "reasontext": "",
                        "result": { "id": id },
                    })))
                },
            ),
        )
        .route(
            "/xapi/v1/Defs",
            get(|headers: HeaderMap| async move {
                guard(&headers)?;
                Ok::<_, Response>(([("X-3CX-Version", "20.0.1234")], Json(json!({ "value": [] }))))
            }),
        )
        .with_state(pbx)
}

async fn start_pbx(pbx: Arc<MockPbx>) -> anyhow::Result<ThreeCxClient> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(pbx);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server running");
    });

    let client = ThreeCxClient::builder()
        .with_base_url(format!("http://{addr}"))
        .with_credentials(Credentials::new("client-id", "client-secret"))
        .build()?;
    Ok(client)
}

#[tokio::test]
async fn should_authenticate_and_list_dn_states() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx::default());
    let client = start_pbx(Arc::clone(&pbx)).await?;

    let states = client.call_control().state().await?;

    assert_eq!(states.len(), 2);
    assert_eq!(states[0].dn, "100");
    assert_eq!(states[1].dn_type, "Queue");
    assert_eq!(pbx.token_hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn should_reuse_cached_token_across_calls() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx::default());
    let client = start_pbx(Arc::clone(&pbx)).await?;

    client.call_control().state().await?;
    client.call_control().dn_state("100").await?;
    let version = client.configuration().version().await?;

    assert_eq!(version, "20.0.1234");
    // Three business calls, one token exchange.
    assert_eq!(pbx.token_hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn should_share_token_cache_between_clones() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx::default());
    let client = start_pbx(Arc::clone(&pbx)).await?;
    let clone = client.clone();

    let api = client.call_control();
    let cloned_api = clone.call_control();
    let (first, second) = tokio::join!(api.state(), cloned_api.state());
    first?;
    second?;

    assert_eq!(pbx.token_hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn should_escape_dn_path_segments() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx::default());
    let client = start_pbx(pbx).await?;

    // Reserved characters must stay inside their path segment; axum
    // decodes them back for the handler.
    let state = client.call_control().dn_state("10 0#1").await?;
    assert_eq!(state.dn, "10 0#1");
    Ok(())
}

#[tokio::test]
async fn should_make_call_and_drop_participant() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx::default());
    let client = start_pbx(pbx).await?;

    let response = client
        .call_control()
        .make_call("100", &MakeCallParameters::to_destination("200"))
        .await?;
    assert_eq!(response.final_status, "Success");
    assert_eq!(response.result.expect("participant").dn, "100");

    let response = client.call_control().drop_participant("100", 1).await?;
    assert_eq!(response.reason, "drop");
    Ok(())
}

#[tokio::test]
async fn should_surface_unauthorized_when_token_endpoint_fails() -> anyhow::Result<()> {
    let pbx = Arc::new(MockPbx {
        token_failure: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..MockPbx::default()
    });
    let client = start_pbx(Arc::clone(&pbx)).await?;

    // Token acquisition collapses to the empty token; the business call
    // proceeds unauthenticated and the PBX's rejection is what surfaces.
    let result = client.call_control().state().await;
    match result {
        Err(Error::UnexpectedStatus { status, .. }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }

    // Failures are not sticky: the next call retries the exchange.
    let _ = client.call_control().state().await;
    assert_eq!(pbx.token_hits.load(Ordering::SeqCst), 2);
    Ok(())
}
