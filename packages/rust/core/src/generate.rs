//! `generate` pipeline: download → filter → write the full word list.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use fivelist_shared::{Result, SourceOptions, Word};
use fivelist_source::SourceOrigin;
use tracing::{info, instrument};

use crate::{filter, lists};

/// Configuration for [`generate_list`].
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Where to download the frequency list from.
    pub source: SourceOptions,
    /// Destination list file, overwritten unconditionally.
    pub output_path: PathBuf,
    /// Maximum number of words to keep.
    pub max_words: usize,
}

/// Result of the `generate` pipeline.
#[derive(Debug)]
pub struct GenerateResult {
    pub output_path: PathBuf,
    /// Which source location served the data.
    pub origin: SourceOrigin,
    pub source_url: String,
    /// Lines in the downloaded list.
    pub downloaded: usize,
    /// Accepted words, in source order.
    pub words: Vec<Word>,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once the source list has been downloaded.
    fn downloaded(&self, url: &str, lines: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn downloaded(&self, _url: &str, _lines: usize) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full `generate` pipeline.
///
/// 1. Download the frequency list (primary, then fallback)
/// 2. Keep up to `max_words` five-letter words
/// 3. Write them uppercase, one per line
#[instrument(skip_all, fields(output = %config.output_path.display(), max_words = config.max_words))]
pub async fn generate_list(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateResult> {
    let start = Instant::now();

    progress.phase("Downloading word frequency data");
    let fetched = fivelist_source::fetch_word_source(&config.source).await?;
    progress.downloaded(&fetched.url, fetched.lines.len());

    progress.phase("Filtering for five-letter words");
    let words = filter::filter_five_letter_words(&fetched.lines, config.max_words);
    info!(found = words.len(), "filtered five-letter words");

    progress.phase("Writing word list");
    lists::write_word_list(&config.output_path, &words)?;

    let result = GenerateResult {
        output_path: config.output_path.clone(),
        origin: fetched.origin,
        source_url: fetched.url,
        downloaded: fetched.lines.len(),
        words,
        elapsed: start.elapsed(),
    };

    info!(
        words = result.words.len(),
        origin = %result.origin,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "word list generated"
    );
    progress.done(&result);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fivelist-generate-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_config(server: &MockServer, output_path: PathBuf, max_words: usize) -> GenerateConfig {
        GenerateConfig {
            source: SourceOptions {
                primary_url: format!("{}/primary.txt", server.uri()),
                fallback_url: format!("{}/fallback.txt", server.uri()),
                timeout_secs: 5,
            },
            output_path,
            max_words,
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        phases: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, name: &str) {
            self.phases.lock().unwrap().push(name.to_string());
        }
        fn downloaded(&self, _url: &str, _lines: usize) {}
        fn done(&self, _result: &GenerateResult) {
            self.phases.lock().unwrap().push("done".to_string());
        }
    }

    #[tokio::test]
    async fn writes_filtered_uppercase_words() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/primary.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("the\nResume\nRadio\nmp3s\nworld\nhouses\nmusic\n"),
            )
            .mount(&server)
            .await;

        let dir = temp_dir();
        let output = dir.join("lists").join("ALL.TXT");
        let config = make_config(&server, output.clone(), 2500);
        let progress = RecordingProgress::default();

        let result = generate_list(&config, &progress).await.unwrap();
        assert_eq!(result.origin, SourceOrigin::Primary);
        assert_eq!(result.downloaded, 7);
        assert_eq!(result.words.len(), 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "RADIO\nWORLD\nMUSIC\n"
        );

        let phases = progress.phases.lock().unwrap();
        assert_eq!(phases.len(), 4);
        assert_eq!(phases.last().map(String::as_str), Some("done"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn caps_output_at_max_words() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/primary.txt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("alpha\nbravo\ndelta\ngamma\nomega\n"),
            )
            .mount(&server)
            .await;

        let dir = temp_dir();
        let output = dir.join("ALL.TXT");
        let config = make_config(&server, output.clone(), 2);

        let result = generate_list(&config, &SilentProgress).await.unwrap();
        assert_eq!(result.words.len(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "ALPHA\nBRAVO\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn uses_fallback_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/primary.txt"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fallback.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("crane\n"))
            .mount(&server)
            .await;

        let dir = temp_dir();
        let output = dir.join("ALL.TXT");
        let config = make_config(&server, output.clone(), 10);

        let result = generate_list(&config, &SilentProgress).await.unwrap();
        assert_eq!(result.origin, SourceOrigin::Fallback);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "CRANE\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn failed_download_leaves_existing_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = temp_dir();
        let output = dir.join("ALL.TXT");
        std::fs::write(&output, "KEPT!\n").unwrap();
        let config = make_config(&server, output.clone(), 10);

        assert!(generate_list(&config, &SilentProgress).await.is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "KEPT!\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
