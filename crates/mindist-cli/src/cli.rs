use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mindist - minimum distance between atomic clusters under translation, rotation and permutation of identical atoms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align one structure onto another and report the minimum distance.
    Align(AlignArgs),
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    // --- Core Arguments ---
    /// Reference structure (XYZ). It is centered but never rotated.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Structure to rotate and relabel onto the reference (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub moving: PathBuf,

    /// Write the aligned moving structure to this XYZ file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Symmetry ---
    /// Interchangeable atoms: 'all', 'species' (group by element label), or
    /// explicit index groups such as '0-19;20-24'. Unlisted indices stay fixed.
    #[arg(short, long, value_name = "SPEC")]
    pub groups: Option<String>,

    // --- Search Overrides ---
    /// Override the number of basin-hopping steps.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Seed for the random rotation search. A random seed is drawn and logged if omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the width of the overlap kernel.
    #[arg(long, value_name = "FLOAT")]
    pub length_scale: Option<f64>,

    /// Override the assignment solver: 'hungarian', 'greedy' or 'auto'.
    #[arg(long, value_name = "METHOD")]
    pub assignment: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.temperature=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
