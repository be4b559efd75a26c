//! udbdoc — generate script API documentation from the binding layer's
//! annotated source files.
//!
//! Two modes:
//!
//! - **file mode** (default): walk the topic table, write one Markdown page
//!   per topic plus the TypeScript declaration file
//! - **single-topic mode**: `udbdoc --topic Plane API/PlaneWrapper.cs` —
//!   render one topic's Markdown page to stdout, write nothing

mod config;
mod model;
mod parser;
mod render;
mod topic;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use config::DocConfig;
use parser::FileRecords;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "udbdoc",
    about = "Generate script API reference pages and the TypeScript declaration file"
)]
struct Cli {
    /// Topic table (JSON). Defaults to the built-in table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the topic file paths resolve against.
    #[arg(long, default_value = ".")]
    source_root: PathBuf,

    /// Output directory for the Markdown pages.
    #[arg(short = 'o', long, default_value = "docs")]
    output: PathBuf,

    /// Path of the generated declaration file.
    #[arg(short = 'd', long, default_value = "udbscript.d.ts")]
    decls: PathBuf,

    /// Render a single topic from the given files to stdout.
    #[arg(long, value_name = "NAME")]
    topic: Option<String>,

    /// Source files for --topic mode.
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(name) = &cli.topic {
        return topic_mode(name, &cli.files);
    }
    if !cli.files.is_empty() {
        anyhow::bail!("file arguments require --topic");
    }
    file_mode(&cli)
}

/// single-topic mode: parse the given files as one class-like topic and
/// print its Markdown page to stdout.
fn topic_mode(name: &str, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        anyhow::bail!("at least one file is required with --topic");
    }
    let records = parse_files(files)?;
    let topic = topic::collect(name, false, records);
    print!("{}", render::markdown::render_topic(&topic));
    Ok(())
}

/// file mode: process every topic in the table. Pages are written as each
/// topic completes; the declaration file covers the whole run.
fn file_mode(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DocConfig::load(path)?,
        None => DocConfig::builtin(),
    };

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;

    let mut topics = Vec::new();
    for entry in &config.topics {
        let files = config::resolve_files(&cli.source_root, &entry.files)?;
        let records = parse_files(&files)?;
        let topic = topic::collect(&entry.name, entry.as_namespace, records);

        let page_path = cli.output.join(format!("{}.md", topic.name));
        fs::write(&page_path, render::markdown::render_topic(&topic))
            .with_context(|| format!("failed to write {}", page_path.display()))?;
        topics.push(topic);
    }

    let decls = render::decls::render_decls(&config.namespace, &topics);
    for note in &decls.notes {
        eprintln!("{note}");
    }
    fs::write(&cli.decls, decls.text)
        .with_context(|| format!("failed to write {}", cli.decls.display()))?;

    Ok(())
}

fn parse_files(paths: &[PathBuf]) -> Result<Vec<FileRecords>> {
    let mut records = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = parser::parse_source(&content)
            .with_context(|| format!("bad documentation in {}", path.display()))?;
        records.push(parsed);
    }
    Ok(records)
}
