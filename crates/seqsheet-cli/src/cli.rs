//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "seqsheet",
    version,
    about = "Inspect, validate, merge and demultiplex sequencing sample sheets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a sample sheet, reporting every finding.
    Validate(ValidateArgs),

    /// Merge the samples of several compatible sheets into one.
    Merge(MergeArgs),

    /// Split a plate-replicate sheet into one sheet per quadrant.
    Demux(DemuxArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the sample sheet.
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Where to write the merged sheet.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// The sheet whose run-wide sections the merge keeps.
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Additional sheets to merge in, in order.
    #[arg(value_name = "SHEET", required = true)]
    pub sheets: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct DemuxArgs {
    /// Directory the per-quadrant sheets are written into.
    #[arg(short = 'd', long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to the replicate sample sheet.
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,
}
