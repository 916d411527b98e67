use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stackscore",
    version,
    about = "Personalized supplement relevance scoring and tiering"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and tier every supplement in a catalog
    Score(ScoreCommand),
    /// Show the score breakdown for one supplement
    Explain(ExplainCommand),
    /// Check a catalog for authoring mistakes
    Lint(LintCommand),
    /// Print the scoring context derived from a profile file
    Context(ContextCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TierFilter {
    Essential,
    Optimizer,
    Niche,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Catalog file or directory of catalog files
    pub catalog: PathBuf,
    /// User profile and lab records
    #[arg(short, long)]
    pub context: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long, value_enum, default_value = "all")]
    pub tier: TierFilter,
    /// Directory holding stackscore.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct ExplainCommand {
    pub catalog: PathBuf,
    pub id: String,
    #[arg(short, long)]
    pub context: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct LintCommand {
    pub catalog: PathBuf,
}

#[derive(Args)]
pub struct ContextCommand {
    pub path: PathBuf,
}
