//! Remote word-frequency source with a single fallback.
//!
//! The generator downloads a newline-delimited word-frequency list. If the
//! primary location fails for any reason we try the fallback exactly once;
//! a second failure is returned to the caller.

use std::time::Duration;

use fivelist_shared::{FivelistError, Result, SourceOptions};
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Maximum number of redirects to follow per request.
const MAX_REDIRECTS: usize = 3;

/// User-Agent string for source requests.
const USER_AGENT: &str = concat!("fivelist/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// FetchedSource
// ---------------------------------------------------------------------------

/// Which configured location served the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Primary,
    Fallback,
}

impl std::fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A downloaded word-frequency list, split into raw lines.
#[derive(Debug, Clone)]
pub struct FetchedSource {
    /// URL the content was read from.
    pub url: String,
    /// Whether that was the primary or fallback location.
    pub origin: SourceOrigin,
    /// Body lines, surrounding whitespace of the whole body stripped.
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch the word-frequency list, falling back once on any failure.
#[instrument(skip_all, fields(primary = %opts.primary_url))]
pub async fn fetch_word_source(opts: &SourceOptions) -> Result<FetchedSource> {
    let client = build_client(opts)?;

    info!(url = %opts.primary_url, "downloading word frequency data");
    let (url, origin, body) = match fetch_text(&client, &opts.primary_url).await {
        Ok(body) => (opts.primary_url.clone(), SourceOrigin::Primary, body),
        Err(e) => {
            warn!(error = %e, "primary source failed, trying alternate source");
            let body = fetch_text(&client, &opts.fallback_url).await?;
            (opts.fallback_url.clone(), SourceOrigin::Fallback, body)
        }
    };

    let lines = split_lines(&body);
    info!(%url, %origin, lines = lines.len(), "downloaded word list");

    Ok(FetchedSource { url, origin, lines })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
fn build_client(opts: &SourceOptions) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| FivelistError::Network(format!("failed to build HTTP client: {e}")))
}

/// GET a URL and return its body, treating non-2xx as failure.
async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FivelistError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FivelistError::Network(format!("{url}: HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| FivelistError::Network(format!("{url}: failed to read body: {e}")))
}

fn split_lines(body: &str) -> Vec<String> {
    body.trim().split('\n').map(str::to_string).collect()
}
