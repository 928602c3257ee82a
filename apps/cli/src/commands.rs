//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use profiler_core::{ParseJob, ProgressReporter, analyze_document, scan_document};
use profiler_shared::{
    AppConfig, BatchSummary, ContentScope, ParseConfig, Resolution, init_config, load_config,
    load_config_from,
};
use profiler_storage::VocabularyStore;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Profiler: find academic degree mentions in biography pages.
#[derive(Parser)]
#[command(
    name = "profiler",
    version,
    about = "Extract degree-mention sentences from biography pages with a self-expanding section vocabulary.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.profiler/profiler.toml.
    #[arg(long, global = true, env = "PROFILER_CONFIG")]
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
    /// Run a batch: extract degree sentences for every input row.
    Parse {
        /// JSON Lines input rows `{id, name, source}`.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON Lines output file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vocabulary file.
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Treat row sources as file names under this directory.
        #[arg(long)]
        markup_dir: Option<PathBuf>,

        /// Documents parsed at once.
        #[arg(short, long)]
        concurrency: Option<u32>,

        /// Section text extent: section or own.
        #[arg(long)]
        scope: Option<ContentScope>,
    },

    /// Print the section tree of one page as JSON.
    Tree {
        /// HTML file.
        file: PathBuf,

        /// Section text extent: section or own.
        #[arg(long)]
        scope: Option<ContentScope>,
    },

    /// Scan every section of one page for degree mentions.
    Scan {
        /// HTML file.
        file: PathBuf,

        /// Print Markdown instead of JSON.
        #[arg(long)]
        markdown: bool,
    },

    /// Vocabulary file management.
    Vocab {
        /// Vocabulary subcommand.
        #[command(subcommand)]
        action: VocabAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Vocabulary subcommands.
#[derive(Subcommand)]
pub(crate) enum VocabAction {
    /// Create the vocabulary file with seed keywords if it does not exist.
    Init {
        /// Vocabulary file (defaults to the configured path).
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },
    /// List the vocabulary terms.
    Show {
        /// Vocabulary file (defaults to the configured path).
        #[arg(long)]
        vocabulary: Option<PathBuf>,
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
        0 => "profiler=info",
        1 => "profiler=debug",
        _ => "profiler=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries command output; logs go to stderr.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
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
        Command::Parse {
            input,
            output,
            vocabulary,
            markup_dir,
            concurrency,
            scope,
        } => {
            let config = resolve_config(config_path)?;
            let mut parse = ParseConfig::from(&config);
            if let Some(concurrency) = concurrency {
                parse.concurrency = concurrency.max(1);
            }
            if let Some(scope) = scope {
                parse.content_scope = scope;
            }
            let job = ParseJob {
                input: input.unwrap_or_else(|| config.paths.input.clone().into()),
                output: output.unwrap_or_else(|| config.paths.output.clone().into()),
                vocabulary: vocabulary_path(vocabulary, &config),
                markup_dir: markup_dir.or_else(|| config.paths.markup_dir.clone().map(PathBuf::from)),
                parse,
            };
            cmd_parse(&job).await
        }
        Command::Tree { file, scope } => cmd_tree(&file, &resolve_config(config_path)?, scope),
        Command::Scan { file, markdown } => {
            cmd_scan(&file, &resolve_config(config_path)?, markdown)
        }
        Command::Vocab { action } => {
            let config = resolve_config(config_path)?;
            match action {
                VocabAction::Init { vocabulary } => {
                    cmd_vocab_init(&vocabulary_path(vocabulary, &config))
                }
                VocabAction::Show { vocabulary } => {
                    cmd_vocab_show(&vocabulary_path(vocabulary, &config))
                }
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn vocabulary_path(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.paths.vocabulary.clone().into())
}

fn read_markup(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).wrap_err_with(|| format!("cannot read {}", file.display()))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_parse(job: &ParseJob) -> Result<()> {
    info!(
        input = %job.input.display(),
        output = %job.output.display(),
        vocabulary = %job.vocabulary.display(),
        "running batch"
    );

    let reporter = CliProgress::new();
    let summary = profiler_core::run_parse_job(job, &reporter).await?;

    println!();
    println!("  Batch complete.");
    println!("  Run:        {}", summary.run_id);
    println!("  Documents:  {}", summary.documents);
    println!("  Matched:    {}", summary.matched);
    println!("  Relearned:  {}", summary.relearned);
    println!("  Probe only: {}", summary.probe_only);
    println!("  Failed:     {}", summary.failed);
    println!("  Empty:      {}", summary.empty);
    if !summary.learned_terms.is_empty() {
        println!("  Learned:    {}", summary.learned_terms.join(", "));
    }
    println!("  Output:     {}", job.output.display());
    println!("  Time:       {:.1}s", summary.elapsed_ms as f64 / 1000.0);
    println!();

    Ok(())
}

fn cmd_tree(file: &Path, config: &AppConfig, scope: Option<ContentScope>) -> Result<()> {
    let mut parse = ParseConfig::from(config);
    if let Some(scope) = scope {
        parse.content_scope = scope;
    }
    let parsed = analyze_document(&read_markup(file)?, &parse)?;
    println!("{}", serde_json::to_string_pretty(&parsed.forest)?);
    Ok(())
}

fn cmd_scan(file: &Path, config: &AppConfig, markdown: bool) -> Result<()> {
    let report = scan_document(&read_markup(file)?, &ParseConfig::from(config))?;
    if markdown {
        print!("{}", report.markdown());
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn cmd_vocab_init(path: &Path) -> Result<()> {
    let store = VocabularyStore::new(path);
    if store.init()? {
        println!("Vocabulary initialized at: {}", store.path().display());
    } else {
        println!("Vocabulary already exists at: {}", store.path().display());
    }
    Ok(())
}

fn cmd_vocab_show(path: &Path) -> Result<()> {
    let store = VocabularyStore::new(path);
    let vocabulary = store.load()?;
    info!(path = %store.path().display(), terms = vocabulary.len(), "vocabulary");
    for term in vocabulary.iter() {
        println!("{term}");
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
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
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_done(&self, name: &str, resolution: Resolution, current: usize, total: usize) {
        let tag = match resolution {
            Resolution::Matched => "matched",
            Resolution::Relearned => "relearned",
            Resolution::ProbeOnly => "probe",
            Resolution::Failed => "failed",
        };
        self.spinner
            .set_message(format!("Resolving [{current}/{total}] {name} ({tag})"));
    }

    fn done(&self, _summary: &BatchSummary) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parse_flags() {
        let cli = Cli::try_parse_from([
            "profiler",
            "-vv",
            "parse",
            "--input",
            "rows.jsonl",
            "--concurrency",
            "8",
            "--scope",
            "own",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Parse {
                input,
                concurrency,
                scope,
                output,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("rows.jsonl")));
                assert_eq!(concurrency, Some(8));
                assert_eq!(scope, Some(ContentScope::Own));
                assert!(output.is_none());
            }
            _ => panic!("expected parse"),
        }
    }

    #[test]
    fn rejects_unknown_scope() {
        assert!(Cli::try_parse_from(["profiler", "tree", "page.html", "--scope", "all"]).is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["profiler", "vocab", "show", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
