//! Submit one profile update from the terminal.
//!
//! The email and bio flags play the part of the form inputs; notices are
//! printed to stderr. Exits non-zero when the update was not acknowledged.

use std::{fs, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use profile_client::{
    Collaborators, CookieTokenProvider, HeadlessPage, HttpTransport,
    MarkupTokenProvider, ProfileUpdateClient, StaticTokenProvider,
    TerminalNotifier,
};
use profile_config::{ConfigLoader, TokenConfig};
use profile_contracts::token::TokenProvider;
use profile_model::SubmitEvent;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "profile-submit", version, about)]
struct Cli {
    /// New email address; leave empty to keep the current one
    #[arg(long, default_value = "")]
    email: String,

    /// New bio; leave empty to keep the current one
    #[arg(long, default_value = "")]
    bio: String,

    /// Path to profile.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a .env file applied before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    #[command(flatten)]
    token: TokenArgs,
}

/// Where the anti-forgery token comes from. At most one source.
#[derive(Debug, Args)]
#[group(multiple = false)]
struct TokenArgs {
    /// Token value as-is
    #[arg(long)]
    token: Option<String>,

    /// Cookie header string holding the token cookie
    #[arg(long)]
    cookie: Option<String>,

    /// Saved page markup containing the hidden token field
    #[arg(long)]
    page_file: Option<PathBuf>,
}

/// The token source chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenSource {
    Literal(String),
    Cookies(String),
    PageFile(PathBuf),
    Absent,
}

impl From<TokenArgs> for TokenSource {
    fn from(args: TokenArgs) -> Self {
        if let Some(raw) = args.token {
            TokenSource::Literal(raw)
        } else if let Some(cookies) = args.cookie {
            TokenSource::Cookies(cookies)
        } else if let Some(path) = args.page_file {
            TokenSource::PageFile(path)
        } else {
            TokenSource::Absent
        }
    }
}

/// Without a source the provider yields no token, so the submission stops
/// with the missing-token notice.
fn token_provider(
    source: TokenSource,
    names: &TokenConfig,
) -> Result<Arc<dyn TokenProvider>> {
    let provider: Arc<dyn TokenProvider> = match source {
        TokenSource::Literal(raw) => {
            Arc::new(StaticTokenProvider::from_raw(&raw))
        }
        TokenSource::Cookies(cookies) => {
            Arc::new(CookieTokenProvider::new(names.cookie.clone(), cookies))
        }
        TokenSource::PageFile(path) => {
            let markup = fs::read_to_string(&path).with_context(|| {
                format!("failed to read page markup {}", path.display())
            })?;
            Arc::new(MarkupTokenProvider::from_html(&markup, &names.field))
        }
        TokenSource::Absent => Arc::new(StaticTokenProvider::empty()),
    };
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = cli.env_file {
        loader = loader.with_env_file(path);
    }
    let config = loader.load().context("failed to load configuration")?.config;

    let page = Arc::new(HeadlessPage::new(cli.email, cli.bio));
    let collaborators = Collaborators {
        tokens: token_provider(cli.token.into(), &config.token)?,
        transport: Arc::new(HttpTransport::from_config(&config)?),
        view: page.clone(),
        notifier: Arc::new(TerminalNotifier),
    };
    let client = ProfileUpdateClient::new(&config, collaborators);

    let mut event = SubmitEvent::new();
    match client.on_submit_triggered(&mut event).await {
        Ok(ack) => {
            let state = page.snapshot();
            info!(
                submission_id = %ack.submission_id,
                status = ack.status,
                policy = %ack.policy,
                "profile update acknowledged"
            );
            if !state.shown_email.is_empty() {
                println!("email: {}", state.shown_email);
            }
            if !state.shown_bio.is_empty() {
                println!("bio: {}", state.shown_bio);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "profile update not applied");
            Ok(ExitCode::FAILURE)
        }
    }
}
