use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use taxonomy_core::config::Config;
use taxonomy_core::loader::{load_configured, load_site_content};
use taxonomy_core::{ContentStore, StaticStore, TaxonomyIndex};

#[derive(Parser, Debug)]
#[command(name = "taxonomy", about = "Query categories and tags in a taxonomy snapshot")]
struct Cli {
    /// Snapshot file (.json or .toml); defaults to `source.path` from config
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print records as compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every category with its tags
    List,
    CategoryExists { category: String },
    Category { category: String },
    CategoryLabel { category: String },
    Tags { category: String },
    TagExists { category: String, tag: String },
    Tag { category: String, tag: String },
    TagLabel { category: String, tag: String },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

// Unresolved records render as `{}`.
fn to_json<T: Serialize>(value: &T, empty: bool, compact: bool) -> anyhow::Result<String> {
    Ok(if empty {
        "{}".to_string()
    } else if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}

/// Output of one command, without the trailing newline.
fn render<S: ContentStore>(
    index: &TaxonomyIndex<S>,
    command: &Command,
    compact: bool,
) -> anyhow::Result<String> {
    let out = match command {
        Command::List => {
            let content = index.store().site_content();
            let mut lines = Vec::new();
            for category in &content.taxonomy().categories {
                lines.push(format!("{}\t{}", category.slug, category.label));
                for tag in &category.tags {
                    lines.push(format!("  {}\t{}", tag.slug, tag.label));
                }
            }
            lines.join("\n")
        }
        Command::CategoryExists { category } => index.category_exists(category).to_string(),
        Command::Category { category } => {
            let found = index.get_category(category);
            to_json(&found, found.is_empty(), compact)?
        }
        Command::CategoryLabel { category } => index.get_category_label(category),
        Command::Tags { category } => {
            to_json(&index.get_tags_by_category(category), false, compact)?
        }
        Command::TagExists { category, tag } => index.tag_exists(category, tag).to_string(),
        Command::Tag { category, tag } => {
            let found = index.get_tag(category, tag);
            to_json(&found, found.is_empty(), compact)?
        }
        Command::TagLabel { category, tag } => index.get_tag_label(category, tag),
    };
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config);

    let content = match &cli.snapshot {
        Some(path) => {
            load_site_content(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => load_configured(&config, &std::env::current_dir()?)
            .context("no --snapshot given; falling back to `source.path` from config")?,
    };
    let index = TaxonomyIndex::new(StaticStore::new(content));

    println!("{}", render(&index, &cli.command, cli.compact)?);
    Ok(())
}
