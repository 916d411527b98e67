mod cli;

use clap::Parser;
use stackscore::catalog;
use stackscore::config;
use stackscore::context;
use stackscore::error::StackError;
use stackscore::inventory::{self, ScoredSupplement, TieredInventory};
use stackscore::report;
use stackscore::types::context::UserRelevanceContext;
use stackscore::types::scoring::Tier;
use stackscore::RelevanceScorer;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn load_optional_context(path: Option<&Path>) -> Result<Option<UserRelevanceContext>, StackError> {
    match path {
        Some(path) => {
            let context = context::load_context(path)?;
            tracing::info!(
                goal = ?context.goal,
                flags = context.bloodwork_flags.len(),
                protocols = context.active_protocols.len(),
                "context loaded"
            );
            Ok(Some(context))
        }
        None => {
            tracing::info!("no context given, scoring without personalization");
            Ok(None)
        }
    }
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, StackError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let loaded = config::load_config(&cmd.root)?;
            let scorer = RelevanceScorer::new(loaded.scorer_config());
            let catalog = catalog::load_catalog(&cmd.catalog)?;
            let context = load_optional_context(cmd.context.as_deref())?;

            let ranked = inventory::rank(&catalog, context.as_ref(), &scorer);
            let personalized = ranked.iter().any(|item| item.result.is_personalized);
            let mut tiers = TieredInventory::from_ranked(ranked);
            match cmd.tier {
                cli::TierFilter::Essential => tiers.retain_tier(Tier::Essential),
                cli::TierFilter::Optimizer => tiers.retain_tier(Tier::Optimizer),
                cli::TierFilter::Niche => tiers.retain_tier(Tier::Niche),
                cli::TierFilter::All => {}
            }

            let rendered = report::render(
                &report::InventoryReport::new(&catalog.digest, personalized, tiers),
                output_format(cmd.format),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Explain(cmd) => {
            let loaded = config::load_config(&cmd.root)?;
            let scorer = RelevanceScorer::new(loaded.scorer_config());
            let catalog = catalog::load_catalog(&cmd.catalog)?;
            let supplement = catalog.find(&cmd.id)?;
            let context = load_optional_context(cmd.context.as_deref())?;

            let item = ScoredSupplement::score(supplement, context.as_ref(), &scorer);
            let rendered = report::render_item(&item, output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Lint(cmd) => {
            let catalog = catalog::load_catalog(&cmd.catalog)?;
            let findings = catalog.lint();

            if findings.is_empty() {
                println!(
                    "lint: no findings ({} supplements)",
                    catalog.supplements.len()
                );
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Context(cmd) => {
            let context = context::load_context(&cmd.path)?;
            println!("{}", serde_json::to_string_pretty(&context)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
