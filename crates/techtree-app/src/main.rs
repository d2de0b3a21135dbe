mod tech_file;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tech_file::{LayoutDump, TechFile};
use techtree_layout::LayoutConfig;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Ron,
}

/// Lay out a tech tree read from a RON file
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// RON file listing techs, their categories, sizes and prerequisites
    input: PathBuf,

    /// Width of one column in pixels
    #[arg(long, default_value_t = 250.0)]
    column_width: f32,

    /// Height of one tech row in pixels
    #[arg(long, default_value_t = 80.0)]
    row_height: f32,

    /// Horizontal gap between edges and node borders
    #[arg(long, default_value_t = 10.0)]
    x_margin: f32,

    /// Cap on placement optimization sweeps
    #[arg(long, default_value_t = LayoutConfig::default().max_wobble_sweeps)]
    max_wobble_sweeps: usize,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let file = TechFile::load(&args.input)?;
    let mut graph = file.to_graph(LayoutConfig {
        max_wobble_sweeps: args.max_wobble_sweeps,
        ..Default::default()
    })?;

    debug!("Laying out {}", args.input.display());
    graph
        .do_layout(args.column_width, args.row_height, args.x_margin)
        .context("Layout failed")?;
    info!(
        "Laid out {} techs in {} columns",
        file.techs.len(),
        graph.column_count()
    );

    let dump = LayoutDump::from_graph(&graph);
    match args.format {
        Format::Text => print!("{}", dump.to_text()),
        Format::Ron => println!("{}", dump.to_ron()?),
    }

    Ok(())
}
