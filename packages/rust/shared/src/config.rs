//! Application configuration for Profiler.
//!
//! User config lives at `~/.profiler/profiler.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProfilerError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "profiler.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".profiler";

// ---------------------------------------------------------------------------
// Config structs (matching profiler.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Batch file locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Section extraction and classification settings.
    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Line-delimited keyword vocabulary, read at batch start and rewritten at the end.
    #[serde(default = "default_vocabulary_path")]
    pub vocabulary: String,

    /// JSON Lines batch input (`{id, name, source}` per line).
    #[serde(default = "default_input_path")]
    pub input: String,

    /// JSON Lines batch output (`{id, name, sentences}` per line).
    #[serde(default = "default_output_path")]
    pub output: String,

    /// When set, row `source` values name files under this directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup_dir: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary_path(),
            input: default_input_path(),
            output: default_output_path(),
            markup_dir: None,
        }
    }
}

fn default_vocabulary_path() -> String {
    "data/keywords/keywords.txt".into()
}
fn default_input_path() -> String {
    "data/processed/subjects.jsonl".into()
}
fn default_output_path() -> String {
    "data/results/degrees.jsonl".into()
}

/// `[parsing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Documents parsed in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// How far a section's text extends: "section" or "own". With "own", the
    /// fallback cannot see mentions that appear only under nested headings.
    #[serde(default)]
    pub content_scope: ContentScope,

    /// Decode backslash escape sequences in the source payload before parsing.
    #[serde(default)]
    pub unescape_source: bool,

    /// CSS selectors removed from every document before analysis.
    #[serde(default = "default_strip_selectors")]
    pub strip_selectors: Vec<String>,

    /// Lowercase markers matched against infobox row headers.
    #[serde(default = "default_infobox_markers")]
    pub infobox_markers: Vec<String>,

    /// Section titles ignored by the every-mention scan.
    #[serde(default = "default_skip_sections")]
    pub skip_sections: Vec<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            content_scope: ContentScope::default(),
            unescape_source: false,
            strip_selectors: default_strip_selectors(),
            infobox_markers: default_infobox_markers(),
            skip_sections: default_skip_sections(),
        }
    }
}

fn default_concurrency() -> u32 {
    4
}

fn default_strip_selectors() -> Vec<String> {
    [
        "style",
        "script",
        "table.navbox",
        "sup.reference",
        "span.mw-cite-backlink",
        "span.mw-editsection",
        "ol.references",
        "div.reflist",
        "div.hatnote",
        "div#toc",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_infobox_markers() -> Vec<String> {
    vec!["education".into(), "alma mater".into()]
}

fn default_skip_sections() -> Vec<String> {
    [
        "References",
        "External links",
        "See also",
        "Notes",
        "Further reading",
        "Bibliography",
        "Works",
        "Publications",
        "Sources",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Where a heading's collected text stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentScope {
    /// Stop at the next heading of equal or higher priority; subsection text is included.
    #[default]
    Section,
    /// Stop at the next heading of any level.
    ///
    /// The fallback probes only root sections, so under this scope a degree
    /// mention that sits only under a nested heading is never found or learned.
    Own,
}

impl std::str::FromStr for ContentScope {
    type Err = ProfilerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "section" => Ok(Self::Section),
            "own" => Ok(Self::Own),
            other => Err(ProfilerError::config(format!(
                "unknown content scope '{other}': expected 'section' or 'own'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime document-processing configuration.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Maximum documents parsed at once.
    pub concurrency: u32,
    /// Section text extent.
    pub content_scope: ContentScope,
    /// Decode escape sequences in payloads.
    pub unescape_source: bool,
    /// Selectors stripped before analysis.
    pub strip_selectors: Vec<String>,
    /// Infobox header markers (lowercase).
    pub infobox_markers: Vec<String>,
    /// Titles skipped by the every-mention scan.
    pub skip_sections: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ParseConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            concurrency: config.parsing.concurrency.max(1),
            content_scope: config.parsing.content_scope,
            unescape_source: config.parsing.unescape_source,
            strip_selectors: config.parsing.strip_selectors.clone(),
            infobox_markers: config
                .parsing
                .infobox_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            skip_sections: config.parsing.skip_sections.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.profiler/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ProfilerError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.profiler/profiler.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ProfilerError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ProfilerError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ProfilerError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ProfilerError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ProfilerError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("vocabulary"));
        assert!(toml_str.contains("alma mater"));
        assert!(toml_str.contains("content_scope = \"section\""));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.parsing.concurrency, 4);
        assert_eq!(parsed.paths.vocabulary, "data/keywords/keywords.txt");
        assert_eq!(parsed.parsing.content_scope, ContentScope::Section);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[paths]
vocabulary = "/tmp/keywords.txt"

[parsing]
content_scope = "own"
infobox_markers = ["Education"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.paths.vocabulary, "/tmp/keywords.txt");
        assert_eq!(config.paths.output, "data/results/degrees.jsonl");
        assert_eq!(config.parsing.content_scope, ContentScope::Own);
        assert!(config.parsing.strip_selectors.contains(&"table.navbox".to_string()));
    }

    #[test]
    fn parse_config_from_app_config() {
        let mut app = AppConfig::default();
        app.parsing.concurrency = 0;
        app.parsing.infobox_markers = vec!["Alma Mater".into()];
        let parse = ParseConfig::from(&app);
        assert_eq!(parse.concurrency, 1);
        assert_eq!(parse.infobox_markers, ["alma mater"]);
    }

    #[test]
    fn content_scope_from_str() {
        assert_eq!("own".parse::<ContentScope>().unwrap(), ContentScope::Own);
        let err = "subtree".parse::<ContentScope>().unwrap_err();
        assert!(err.to_string().contains("unknown content scope"));
    }
}
