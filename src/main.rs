use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use otbn_consts::cli;
use otbn_consts::cli::track::OutputFormat;

#[derive(Parser)]
#[command(name = "otbn-consts")]
#[command(about = "Known-constant GPR tracking for OTBN instruction streams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report known GPR constants at each point of a decoded trace
    Track {
        /// Input trace file (JSON)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only report the given program point (program length = exit)
        #[arg(long)]
        at: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track {
            input,
            output,
            format,
            at,
        } => {
            let args = cli::track::TrackArgs {
                input_path: input,
                output_path: output,
                format,
                at,
            };
            cli::track::track(&args).map_err(|e| miette!("{}", e))
        }
    }
}
