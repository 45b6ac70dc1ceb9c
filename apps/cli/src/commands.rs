//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use fivelist_core::embed::{EmbedConfig, generate_embedded_data};
use fivelist_core::generate::{GenerateConfig, GenerateResult, ProgressReporter, generate_list};
use fivelist_core::reconcile::{ReconcileOutcome, reconcile_lists};
use fivelist_shared::{
    AppConfig, ListPaths, SourceOptions, Word, init_config, init_config_at, load_config,
    load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Words shown at each end of the generated list.
const PREVIEW_LEN: usize = 10;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// fivelist — build and maintain five-letter word lists.
#[derive(Parser)]
#[command(
    name = "fivelist",
    version,
    about = "Build and maintain the word lists for a five-letter word game.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.fivelist/fivelist.toml.
    #[arg(long, env = "FIVELIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Download a word-frequency list and write the common five-letter words.
    Generate {
        /// Maximum number of words to keep.
        #[arg(long)]
        max_words: Option<usize>,

        /// Output list file (defaults to the configured full list).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Add solution words missing from the full list.
    Reconcile {
        /// Full accepted-word list.
        #[arg(long)]
        all: Option<PathBuf>,

        /// Solution-word list.
        #[arg(long)]
        solution: Option<PathBuf>,
    },

    /// Generate the embedded C word list data (Bloom filter + packed solutions).
    Embed {
        /// Full accepted-word list.
        #[arg(long)]
        all: Option<PathBuf>,

        /// Solution-word list.
        #[arg(long)]
        solution: Option<PathBuf>,

        /// Output C source file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "fivelist=info",
        1 => "fivelist=debug",
        _ => "fivelist=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate { max_words, out } => cmd_generate(config_path, max_words, out).await,
        Command::Reconcile { all, solution } => cmd_reconcile(config_path, all, solution),
        Command::Embed { all, solution, out } => cmd_embed(config_path, all, solution, out),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Config list locations with per-command overrides applied.
fn resolve_lists(
    config: &AppConfig,
    all: Option<PathBuf>,
    solution: Option<PathBuf>,
) -> ListPaths {
    let defaults = ListPaths::from(config);
    ListPaths {
        all: all.unwrap_or(defaults.all),
        solution: solution.unwrap_or(defaults.solution),
    }
}

fn print_banner(title: &str) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("{title}");
    println!("{rule}");
}

fn join_words(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

async fn cmd_generate(
    config_path: Option<&Path>,
    max_words: Option<usize>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path)?;

    let generate_config = GenerateConfig {
        source: SourceOptions::from(&config),
        output_path: out.unwrap_or_else(|| ListPaths::from(&config).all),
        max_words: max_words.unwrap_or(config.generate.max_words),
    };

    info!(
        output = %generate_config.output_path.display(),
        max_words = generate_config.max_words,
        "generating word list"
    );

    print_banner("Five-Letter Word Dictionary Generator");

    let reporter = CliProgress::new();
    let result = generate_list(&generate_config, &reporter).await?;

    let words = &result.words;
    println!();
    println!("  Downloaded {} words ({} source)", result.downloaded, result.origin);
    println!("  Found {} common five-letter words", words.len());
    println!(
        "  Saved {} words to {}",
        words.len(),
        result.output_path.display()
    );
    println!();
    println!(
        "  First {PREVIEW_LEN} words: {}",
        join_words(&words[..words.len().min(PREVIEW_LEN)])
    );
    println!(
        "  Last {PREVIEW_LEN} words: {}",
        join_words(&words[words.len().saturating_sub(PREVIEW_LEN)..])
    );
    println!("  Time: {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(format!("{name}..."));
    }

    fn downloaded(&self, url: &str, lines: usize) {
        self.spinner
            .set_message(format!("Downloaded {lines} words from {url}"));
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

fn cmd_reconcile(
    config_path: Option<&Path>,
    all: Option<PathBuf>,
    solution: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let paths = resolve_lists(&config, all, solution);

    info!(
        all = %paths.all.display(),
        solution = %paths.solution.display(),
        "reconciling word lists"
    );

    let all_name = file_label(&paths.all);
    let solution_name = file_label(&paths.solution);

    match reconcile_lists(&paths)? {
        ReconcileOutcome::AlreadyComplete { .. } => {
            println!("All words in {solution_name} already exist in {all_name} ✓");
        }
        ReconcileOutcome::Added { missing, total } => {
            println!(
                "Found {} words in {solution_name} that are missing from {all_name}:",
                missing.len()
            );
            for word in &missing {
                println!("  {word}");
            }
            println!();
            println!("Added {} missing words to {all_name}", missing.len());
            println!("{all_name} has been updated and re-sorted ({total} words).");
        }
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// embed
// ---------------------------------------------------------------------------

fn cmd_embed(
    config_path: Option<&Path>,
    all: Option<PathBuf>,
    solution: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let mut embed_config =
        EmbedConfig::new(resolve_lists(&config, all, solution), &config.embed);
    if let Some(out) = out {
        embed_config.output_path = out;
    }

    let result = generate_embedded_data(&embed_config)?;

    println!("Processed {} words for bloom filter", result.all_count);
    println!("Processed {} solution words", result.solution_count);
    println!(
        "Bloom filter: {}/{} bits set ({:.1}%)",
        result.bits_set,
        result.bloom_bits,
        result.fill_percent()
    );
    println!("Generated {}", result.output_path.display());
    println!("Memory usage:");
    println!("  Bloom filter: {} bytes", result.bloom_bytes);
    println!("  Solutions: {} bytes", result.solution_bytes);
    println!("  Total: {} bytes", result.total_bytes());

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(p) => init_config_at(p)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
