//! Drives the client, and the `profile-submit` binary, against a real HTTP
//! endpoint served by axum on an ephemeral port.

use std::{
    collections::HashMap,
    net::SocketAddr,
    process::{Command, Output},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use profile_client::{
    Collaborators, HeadlessPage, HttpTransport, ProfileUpdateClient,
    StaticTokenProvider, SubmitError,
};
use profile_config::{ClientConfig, constants};
use profile_contracts::transport::TransportError;
use profile_model::{AcknowledgePolicy, Notice, SubmitEvent};
use serde_json::json;
use url::Url;

const TOKEN: &str = "Zx81kQpL";

#[derive(Debug, Clone)]
struct Captured {
    form: HashMap<String, String>,
    csrf_header: Option<String>,
    requested_with: Option<String>,
    accept: Option<String>,
}

#[derive(Clone, Default)]
struct ServerState {
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl ServerState {
    fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn edit_profile(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let csrf_header = header(&headers, "x-csrftoken");
    let token_matches = csrf_header.as_deref() == Some(TOKEN)
        && form.get("csrfmiddlewaretoken").map(String::as_str) == Some(TOKEN);

    state.captured.lock().unwrap().push(Captured {
        form,
        csrf_header,
        requested_with: header(&headers, "x-requested-with"),
        accept: header(&headers, "accept"),
    });

    if !token_matches {
        return (StatusCode::FORBIDDEN, "CSRF verification failed")
            .into_response();
    }
    Json(json!({ "status": "ok" })).into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(2)).await;
    "late"
}

async fn expired_session() -> Redirect {
    Redirect::to("/login/")
}

async fn spawn_server(state: ServerState) -> Result<SocketAddr> {
    let app = Router::new()
        .route("/stream/edit_profile/", post(edit_profile))
        .route("/slow/", post(slow))
        .route("/expired/", post(expired_session))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn build_client(
    config: &ClientConfig,
    token: &str,
    page: &Arc<HeadlessPage>,
) -> Result<ProfileUpdateClient> {
    let collaborators = Collaborators {
        tokens: Arc::new(StaticTokenProvider::from_raw(token)),
        transport: Arc::new(HttpTransport::from_config(config)?),
        view: page.clone(),
        notifier: page.clone(),
    };
    Ok(ProfileUpdateClient::new(config, collaborators))
}

fn endpoint(addr: SocketAddr, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!("http://{addr}{path}"))?)
}

#[tokio::test]
async fn accepted_update_is_echoed_on_the_page() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;
    let config = ClientConfig::new(endpoint(addr, "/stream/edit_profile/")?);
    let page = Arc::new(HeadlessPage::new("a@b.com", ""));
    let client = build_client(&config, TOKEN, &page)?;

    let ack = client.on_submit_triggered(&mut SubmitEvent::new()).await?;
    assert_eq!(ack.status, 200);
    assert_eq!(ack.policy, AcknowledgePolicy::InlineEcho);

    let captured = state.captured();
    assert_eq!(captured.len(), 1);
    let request = &captured[0];
    assert_eq!(request.form.get("email").map(String::as_str), Some("a@b.com"));
    assert_eq!(request.form.get("bio").map(String::as_str), Some(""));
    assert_eq!(request.csrf_header.as_deref(), Some(TOKEN));
    assert_eq!(request.requested_with.as_deref(), Some("XMLHttpRequest"));
    assert_eq!(request.accept.as_deref(), Some("application/json"));

    let page_state = page.snapshot();
    assert_eq!(page_state.shown_email, "a@b.com");
    assert_eq!(page_state.email, "");
    assert_eq!(page_state.notices, vec![Notice::ProfileUpdated]);
    Ok(())
}

#[tokio::test]
async fn rejected_token_surfaces_a_failure() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;
    let config = ClientConfig::new(endpoint(addr, "/stream/edit_profile/")?);
    let page = Arc::new(HeadlessPage::new("a@b.com", "bio"));
    let client = build_client(&config, "stale-token", &page)?;

    let err = client
        .on_submit_triggered(&mut SubmitEvent::new())
        .await
        .unwrap_err();

    match err {
        SubmitError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("CSRF"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(state.captured().len(), 1);

    let page_state = page.snapshot();
    assert_eq!(page_state.email, "a@b.com");
    assert_eq!(page_state.bio, "bio");
    assert_eq!(page_state.notices, vec![Notice::UpdateFailed]);
    Ok(())
}

#[tokio::test]
async fn invalid_email_sends_nothing() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;
    let config = ClientConfig::new(endpoint(addr, "/stream/edit_profile/")?);
    let page = Arc::new(HeadlessPage::new("not-an-email", "x"));
    let client = build_client(&config, TOKEN, &page)?;

    let err = client
        .on_submit_triggered(&mut SubmitEvent::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::InvalidEmail { .. }));
    assert!(state.captured().is_empty());
    assert_eq!(page.notices(), vec![Notice::EmailInvalid]);
    Ok(())
}

#[tokio::test]
async fn slow_server_times_out() -> Result<()> {
    let addr = spawn_server(ServerState::default()).await?;
    let config = ClientConfig::new(endpoint(addr, "/slow/")?)
        .with_request_timeout(Duration::from_millis(100));
    let page = Arc::new(HeadlessPage::new("", "bio"));
    let client = build_client(&config, TOKEN, &page)?;

    let err = client
        .on_submit_triggered(&mut SubmitEvent::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Transport(TransportError::Timeout)));
    assert_eq!(page.notices(), vec![Notice::UpdateFailed]);
    assert_eq!(client.in_flight(), 0);
    Ok(())
}

#[tokio::test]
async fn redirect_counts_as_failure() -> Result<()> {
    let addr = spawn_server(ServerState::default()).await?;
    let config = ClientConfig::new(endpoint(addr, "/expired/")?);
    let page = Arc::new(HeadlessPage::new("a@b.com", ""));
    let client = build_client(&config, TOKEN, &page)?;

    let err = client
        .on_submit_triggered(&mut SubmitEvent::new())
        .await
        .unwrap_err();

    match err {
        SubmitError::Transport(transport) => {
            assert_eq!(transport.status(), Some(303))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(page.snapshot().shown_email, "");
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_connect_error() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = ClientConfig::new(endpoint(addr, "/stream/edit_profile/")?);
    let page = Arc::new(HeadlessPage::new("a@b.com", ""));
    let client = build_client(&config, TOKEN, &page)?;

    let err = client
        .on_submit_triggered(&mut SubmitEvent::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Transport(TransportError::Connect { .. })
    ));
    assert_eq!(page.notices(), vec![Notice::UpdateFailed]);
    Ok(())
}

/// Runs `profile-submit` in an empty directory with only `endpoint`
/// configured.
async fn run_profile_submit(endpoint: Url, args: &[&str]) -> Result<Output> {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    let output = tokio::task::spawn_blocking(move || {
        let workdir = tempfile::tempdir()?;
        let mut command = Command::new(env!("CARGO_BIN_EXE_profile-submit"));
        command
            .args(&args)
            .arg("--env-file")
            .arg(workdir.path().join("absent.env"))
            .current_dir(workdir.path())
            .env(constants::ENV_ENDPOINT, endpoint.as_str())
            .env("RUST_LOG", "off");
        for name in [
            constants::ENV_CONFIG_PATH,
            constants::ENV_TOKEN_FIELD,
            constants::ENV_TOKEN_HEADER,
            constants::ENV_TOKEN_COOKIE,
            constants::ENV_REQUEST_TIMEOUT,
            constants::ENV_ACKNOWLEDGE,
        ] {
            command.env_remove(name);
        }
        command.output()
    })
    .await??;
    Ok(output)
}

#[tokio::test]
async fn cli_submits_and_prints_the_echo() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;

    let output = run_profile_submit(
        endpoint(addr, "/stream/edit_profile/")?,
        &["--email", "a@b.com", "--bio", "hello", "--token", TOKEN],
    )
    .await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("email: a@b.com"), "stdout: {stdout}");
    assert!(stdout.contains("bio: hello"), "stdout: {stdout}");
    assert!(stderr.contains("[ok] Profile Updated"), "stderr: {stderr}");

    let captured = state.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0].form.get("bio").map(String::as_str),
        Some("hello")
    );
    Ok(())
}

#[tokio::test]
async fn cli_exits_non_zero_when_the_server_refuses() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;

    let output = run_profile_submit(
        endpoint(addr, "/stream/edit_profile/")?,
        &["--email", "a@b.com", "--token", "stale-token"],
    )
    .await?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("[error] Update failed, please retry"));
    assert_eq!(state.captured().len(), 1);
    Ok(())
}

#[tokio::test]
async fn cli_sends_nothing_without_email_or_token() -> Result<()> {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await?;
    let url = endpoint(addr, "/stream/edit_profile/")?;

    let invalid =
        run_profile_submit(url.clone(), &["--email", "nope", "--token", TOKEN])
            .await?;
    assert_eq!(invalid.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&invalid.stderr).contains("Email invalid")
    );

    let tokenless = run_profile_submit(url, &["--email", "a@b.com"]).await?;
    assert_eq!(tokenless.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&tokenless.stderr)
            .contains("Security token missing")
    );

    assert!(state.captured().is_empty());
    Ok(())
}
