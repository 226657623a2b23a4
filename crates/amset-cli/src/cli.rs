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
    author = "Alex Ganose",
    version,
    about = "AMSET CLI - Elastic electron scattering rates (acoustic deformation potential, ionized impurity, piezoelectric) from band energies on a k-point mesh.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate elastic scattering rates for every band and k-point.
    Rates(RatesArgs),
    /// Print inverse screening lengths and impurity concentrations.
    Screening(ScreeningArgs),
    /// List the scattering mechanisms and whether their material properties are set.
    Mechanisms(MechanismsArgs),
}

/// Arguments for the `rates` subcommand.
#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Path to the band data file in TOML format.
    #[arg(short = 'd', long = "band-data", required = true, value_name = "PATH")]
    pub band_data: PathBuf,

    /// Path to the settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a material properties file in TOML format. Values from the
    /// settings file and -S take precedence.
    #[arg(long, value_name = "PATH")]
    pub materials: Option<PathBuf>,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the scattering mechanisms, as a comma-separated list (e.g., 'ADP,IMP') or 'auto'.
    #[arg(short, long, value_name = "LIST")]
    pub mechanisms: Option<String>,

    /// Override the Gaussian broadening of the delta function, in eV.
    #[arg(short = 'w', long, value_name = "EV")]
    pub gaussian_width: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S materials.static-dielectric=12.18
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `screening` subcommand.
#[derive(Args, Debug)]
pub struct ScreeningArgs {
    /// Path to the band data file in TOML format.
    #[arg(short = 'd', long = "band-data", required = true, value_name = "PATH")]
    pub band_data: PathBuf,

    /// Path to the settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a material properties file in TOML format. Values from the
    /// settings file and -S take precedence.
    #[arg(long, value_name = "PATH")]
    pub materials: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `mechanisms` subcommand.
#[derive(Args, Debug)]
pub struct MechanismsArgs {
    /// Path to the settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a material properties file in TOML format. Values from the
    /// settings file and -S take precedence.
    #[arg(long, value_name = "PATH")]
    pub materials: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
