use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::metadata::MatchMode;

#[derive(Debug, Parser)]
#[command(
    name = "tendon-biomech",
    version,
    about = "Tendon mechanical testing: metadata reshaping, batch analysis and plots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize the per-date metadata workbook into one CSV table
    Reshape(ReshapeArgs),
    /// Analyse every test-run file under the root directory
    Analyse(AnalyseArgs),
    /// Render diagnostic plots for analysed samples
    Plot(PlotArgs),
}

#[derive(Debug, Args)]
pub struct ReshapeArgs {
    #[arg(long, help = "Metadata workbook (.xlsx)")]
    pub workbook: PathBuf,

    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[arg(long, help = "Output table (default: <root>/tendon_data_formatted.csv)")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = MatchModeArg::Substring)]
    pub match_mode: MatchModeArg,
}

#[derive(Debug, Args)]
pub struct AnalyseArgs {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[arg(long, help = "Metadata table (default: <root>/tendon_data_formatted.csv)")]
    pub metadata: Option<PathBuf>,

    #[arg(long, help = "Name of the sample-length column (default: fourth column)")]
    pub length_column: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Report smoothed hysteresis from the smoothed areas"
    )]
    pub corrected_smoothed_hysteresis: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchModeArg {
    Substring,
    Exact,
}

impl From<MatchModeArg> for MatchMode {
    fn from(value: MatchModeArg) -> Self {
        match value {
            MatchModeArg::Substring => MatchMode::Substring,
            MatchModeArg::Exact => MatchMode::Exact,
        }
    }
}
