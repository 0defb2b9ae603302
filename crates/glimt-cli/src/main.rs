#![forbid(unsafe_code)]

//! Glimt CLI
//!
//! JSON request documents in, query strings or annotation lists out.
//! The request shapes are the serde forms of [`glimt_solr::FragmentRequest`]
//! and [`glimt_iiif::MapRequest`]; pass `-` to read from stdin.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::OutputFormat;

/// Glimt - Solr join fragments and IIIF highlight mapping
#[derive(Parser, Debug)]
#[command(name = "glimt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a Solr join sub-query fragment from a request document
    Fragment {
        /// Request JSON file ("-" for stdin)
        #[arg(short, long)]
        request: PathBuf,

        /// Print only the query string instead of the full result
        #[arg(long)]
        raw: bool,

        /// Wrap the fragment in a {!join} clause with these from/to
        /// fields (format: "from,to")
        #[arg(long)]
        join: Option<String>,
    },
    /// Map highlight snippets onto IIIF canvases
    Map {
        /// Request JSON file ("-" for stdin)
        #[arg(short, long)]
        request: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "raw")]
        format: OutputFormat,

        /// Base identifier for generated annotation ids
        #[arg(long, default_value = "urn:glimt:search")]
        base_id: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = match args.command {
        Command::Fragment { request, raw, join } => {
            commands::run_fragment(&request, raw, join.as_deref())?
        }
        Command::Map {
            request,
            format,
            base_id,
        } => commands::run_map(&request, format, &base_id)?,
    };

    println!("{output}");
    Ok(())
}
