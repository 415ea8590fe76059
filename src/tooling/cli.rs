//! CLI Tooling
//!
//! Command-line interface over the heavy list search: `find` runs a search on
//! a directory or region file, `regions` shows what a root gathers to.

use crate::config::{ConfigLoader, HeavylistConfig};
use crate::error::ApiError;
use crate::search::{
    gather, ExpandFailurePolicy, NameMatch, SearchOptions, SearchOutcome, SearchQuery,
    SearchReport, Searcher,
};
use crate::source::directory::root_seed;
use crate::tree::NodeTree;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Heavylist CLI - find oversized tag lists in world snapshots
#[derive(Parser)]
#[command(name = "heavylist")]
#[command(about = "Find oversized tag lists in world snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides ./heavylist.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Find the first list named NAME with more than THRESHOLD entries
    Find {
        /// World directory or single .region file
        root: PathBuf,
        /// List name to look for
        #[arg(long)]
        name: String,
        /// Lists qualify only with strictly more entries than this
        #[arg(long)]
        threshold: usize,
        /// Accept a name fingerprint match without comparing the strings
        #[arg(long)]
        fingerprint_only: bool,
        /// Skip unreadable regions and chunks instead of failing
        #[arg(long)]
        skip_unreadable: bool,
        /// Fail when tags nest deeper than this below a chunk
        #[arg(long)]
        max_depth: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the regions under a root
    Regions {
        /// World directory or single .region file
        root: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context holding the resolved configuration
pub struct CliContext {
    config: HeavylistConfig,
}

impl CliContext {
    pub fn new(config: HeavylistConfig) -> Self {
        Self { config }
    }

    /// Load configuration for `cli` and apply its logging overrides
    pub fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        let working_dir = std::env::current_dir()
            .map_err(|e| ApiError::ConfigError(format!("Failed to read working directory: {}", e)))?;
        let mut config = ConfigLoader::load(cli.config.as_deref(), &working_dir)?;

        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &HeavylistConfig {
        &self.config
    }

    /// Execute a command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Find {
                root,
                name,
                threshold,
                fingerprint_only,
                skip_unreadable,
                max_depth,
                format,
            } => {
                let format = OutputFormat::parse(format)?;
                let mut options = self.config.search.clone();
                if *fingerprint_only {
                    options.name_match = NameMatch::FingerprintOnly;
                }
                if *skip_unreadable {
                    options.on_expand_error = ExpandFailurePolicy::SkipSubtree;
                }
                if max_depth.is_some() {
                    options.max_depth = *max_depth;
                }
                self.find(root, SearchQuery::new(name.clone(), *threshold), options, format)
            }
            Commands::Regions { root, format } => {
                let format = OutputFormat::parse(format)?;
                self.regions(root, format)
            }
        }
    }

    fn find(
        &self,
        root: &Path,
        query: SearchQuery,
        options: SearchOptions,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let mut tree = NodeTree::new();
        let root_id = tree.insert_root(root_seed(root)?);
        info!(root = %root.display(), name = %query.name, threshold = query.count_threshold, "Find");

        let report = Searcher::new(options).search(&mut tree, root_id, &query)?;
        render_find(&tree, &query, &report, format)
    }

    fn regions(&self, root: &Path, format: OutputFormat) -> Result<String, ApiError> {
        let mut tree = NodeTree::new();
        let root_id = tree.insert_root(root_seed(root)?);
        let regions = gather(&mut tree, root_id)?;

        let mut rows = Vec::with_capacity(regions.len());
        for region in regions {
            let chunks = match tree.expand(region) {
                Ok(()) => Some(tree.children(region)?.len()),
                Err(e) => {
                    tracing::warn!(region = %tree.display_path(region), error = %e, "Unreadable region");
                    None
                }
            };
            tree.collapse(region)?;
            rows.push(RegionRow {
                name: tree.name(region)?.unwrap_or_default().to_string(),
                path: tree.display_path(region),
                chunks,
            });
        }

        match format {
            OutputFormat::Json => {
                let items: Vec<_> = rows
                    .iter()
                    .map(|row| json!({ "name": row.name, "path": row.path, "chunks": row.chunks }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({ "regions": items, "total": rows.len() }))?)
            }
            OutputFormat::Text => {
                if rows.is_empty() {
                    return Ok("No regions found".to_string());
                }
                let mut table = Table::new();
                table.set_header(vec!["Region", "Path", "Chunks"]);
                for row in &rows {
                    table.add_row(vec![
                        row.name.clone(),
                        row.path.clone(),
                        row.chunks
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "unreadable".to_string()),
                    ]);
                }
                Ok(table.to_string())
            }
        }
    }
}

struct RegionRow {
    name: String,
    path: String,
    chunks: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

fn render_find(
    tree: &NodeTree,
    query: &SearchQuery,
    report: &SearchReport,
    format: OutputFormat,
) -> Result<String, ApiError> {
    let found = match report.outcome {
        SearchOutcome::Found(id) => Some((tree.path_of(id)?, tree.list_count(id)?.unwrap_or_default())),
        SearchOutcome::NotFound => None,
    };

    match format {
        OutputFormat::Json => {
            let value = json!({
                "found": found.is_some(),
                "name": query.name,
                "threshold": query.count_threshold,
                "path": found.as_ref().map(|(path, _)| path),
                "count": found.as_ref().map(|(_, count)| count),
                "stats": report.stats,
                "duration_ms": report.duration_ms,
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Text => {
            let stats = &report.stats;
            let summary = format!(
                "searched {} regions, {} chunks, {} tags in {} ms",
                stats.regions, stats.chunks, stats.nodes_visited, report.duration_ms
            );
            Ok(match found {
                Some((path, count)) => format!(
                    "Found '{}' with {} entries\n  at {}\n  {}",
                    query.name,
                    count,
                    path.join("/"),
                    summary
                ),
                None => format!(
                    "No list named '{}' with more than {} entries\n  {}",
                    query.name, query.count_threshold, summary
                ),
            })
        }
    }
}
