use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::builder::page_object_builder::BuilderOptions;

pub const DEFAULT_CONFIG_FILE: &str = "page-object-gen.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "page-object-gen",
    version,
    about = "Generate e2e page objects from UI element snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: page-object-gen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a page object from one or more snapshots and write its files
    Generate(GenerateArgs),

    /// Print the resolved element tree of a snapshot
    Inspect(FilterArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Snapshot file (JSON or YAML). Repeat to merge successive snapshots.
    #[arg(long = "snapshot", required = true)]
    pub snapshots: Vec<String>,

    /// Display id to drop with its subtree (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Display id to keep; everything else is pruned (repeatable)
    #[arg(long)]
    pub include: Vec<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page object class name
    #[arg(long)]
    pub name: String,

    /// Sub-directory below the page-object roots
    #[arg(long)]
    pub path: Option<String>,

    /// Route recorded for navigateTo
    #[arg(long)]
    pub route: Option<String>,

    /// Add fillForm / clearForm methods
    #[arg(long)]
    pub fill_form: bool,

    /// Look elements up through the page object's browser instance
    #[arg(long)]
    pub custom_browser: bool,

    /// Root directory for page objects (default: from config, else "e2e")
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Build everything but write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the accumulated element tree as a JSON snapshot
    #[arg(long)]
    pub save_tree: Option<String>,

    /// Append one JSON line per builder operation to this file
    #[arg(long)]
    pub trace: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `page-object-gen.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_tab")]
    pub tab: String,

    #[serde(default)]
    pub custom_browser: bool,

    /// Ids excluded on every run, in addition to `--exclude`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tab: default_tab(),
            custom_browser: false,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    pub file: Option<String>,
}

// Serde default helpers
fn default_output_dir() -> String { "e2e".to_string() }
fn default_tab() -> String { "  ".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve builder options: CLI > config > defaults.
pub fn build_builder_options(args: &GenerateArgs, config: &AppConfig) -> BuilderOptions {
    BuilderOptions {
        tab: config.generate.tab.clone(),
        e2e_test_path: PathBuf::from(
            args.output_dir
                .as_deref()
                .unwrap_or(&config.generate.output_dir),
        ),
        custom_browser: args.custom_browser || config.generate.custom_browser,
        trace_file: args
            .trace
            .as_ref()
            .or(config.trace.file.as_ref())
            .map(PathBuf::from),
    }
}

/// `--exclude` values followed by the configured ones.
pub fn effective_excludes(filter: &FilterArgs, config: &AppConfig) -> Vec<String> {
    let mut exclude = filter.exclude.clone();
    for id in &config.generate.exclude {
        if !exclude.contains(id) {
            exclude.push(id.clone());
        }
    }
    exclude
}
