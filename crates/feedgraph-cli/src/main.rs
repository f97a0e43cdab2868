//! feedgraph CLI
//!
//! - `normalize`: run one response envelope through the normalizer and print
//!   page info, root records and (optionally) the populated record cache
//! - `tables`: list registered tables and their link declarations

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

mod normalize;

#[derive(Parser)]
#[command(name = "feedgraph")]
#[command(
    author,
    version,
    about = "feedgraph: normalize nested API responses into typed entity records"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// The result key holds a single fragment.
    One,
    /// The result key holds an array of fragments.
    Many,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a response envelope (JSON file, or `-` for stdin).
    Normalize {
        input: PathBuf,

        /// Table of the root fragment(s): posts, users, assets, categories, comments.
        #[arg(short, long, default_value = "posts")]
        table: String,

        #[arg(short, long, value_enum, default_value_t = Shape::Many)]
        shape: Shape,

        /// JSON file holding a `NormalizeConfig`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Envelope key holding the root fragment(s); overrides `--config`.
        #[arg(long)]
        result_key: Option<String>,

        /// Include every cached record in the output, not only the roots.
        #[arg(long)]
        dump_cache: bool,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// List registered tables and their link declarations.
    Tables,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Normalize {
            input,
            table,
            shape,
            config,
            result_key,
            dump_cache,
            pretty,
        } => {
            let options = normalize::NormalizeOptions {
                table: table.parse()?,
                shape,
                config,
                result_key,
                dump_cache,
            };
            let report = normalize::cmd_normalize(&input, &options)?;
            normalize::render(&report, pretty)?
        }
        Commands::Tables => normalize::render(&normalize::cmd_tables(), true)?,
    };
    println!("{output}");
    Ok(())
}
