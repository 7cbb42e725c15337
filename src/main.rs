use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swearjar::{
    analyze_script, ensure_working_dir, write_parsed_script, write_report_json, write_results,
    BuiltinLexicon, ExtractorRegistry, FileLexicon, LexiconProvider, ScanConfig,
};

#[derive(Parser, Debug)]
#[command(name = "swearjar")]
#[command(about = "Split a podcast script into speakers and count the swearing")]
#[command(version)]
struct Args {
    /// Script to analyze (.docx or .txt)
    script: PathBuf,

    /// Also scan episode info, content warnings, scenes, and actions
    #[arg(long)]
    parse_all: bool,

    /// Directory for saved outputs; created if missing
    #[arg(long, default_value = ".")]
    working_dir: PathBuf,

    /// Save the plain report to results.txt in the working directory
    #[arg(long)]
    save_profanity_results: bool,

    /// Save the parsed script to parsed_script.json in the working directory
    #[arg(long)]
    save_parsed_script: bool,

    /// Save the structured scan result to report.json in the working directory
    #[arg(long)]
    save_report_json: bool,

    /// Newline-separated word list to use instead of the built-in lexicon
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Print the report without terminal emphasis
    #[arg(long)]
    plain: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if args.working_dir.exists() && !args.working_dir.is_dir() {
        anyhow::bail!(
            "Working directory path is not a directory: {}",
            args.working_dir.display()
        );
    }
    ensure_working_dir(&args.working_dir)
        .await
        .with_context(|| format!("Cannot prepare working directory {}", args.working_dir.display()))?;

    let lexicon: Box<dyn LexiconProvider> = match &args.lexicon {
        Some(path) => Box::new(
            FileLexicon::open(path)
                .await
                .with_context(|| format!("Cannot read lexicon {}", path.display()))?,
        ),
        None => Box::new(BuiltinLexicon),
    };

    let config = if args.parse_all {
        ScanConfig::scan_all()
    } else {
        ScanConfig::dialogue_only()
    }
    .with_progress(!args.no_progress);

    let registry = ExtractorRegistry::default();
    let analysis = analyze_script(&args.script, &registry, lexicon.as_ref(), config)
        .await
        .with_context(|| format!("Failed to analyze {}", args.script.display()))?;

    if args.plain {
        println!("{}", analysis.formatted.plain);
    } else {
        println!("{}", analysis.formatted.emphasized);
    }

    if args.save_profanity_results {
        write_results(&args.working_dir, &analysis.formatted.plain)
            .await
            .context("Failed to save profanity results")?;
    }

    if args.save_parsed_script {
        write_parsed_script(&args.working_dir, &analysis.parsed)
            .await
            .context("Failed to save parsed script")?;
    }

    if args.save_report_json {
        write_report_json(&args.working_dir, &analysis.report)
            .await
            .context("Failed to save JSON report")?;
    }

    info!(
        "Finished {}: {} sections, {} occurrences",
        analysis.title,
        analysis.parsed.section_count(),
        analysis.report.total()
    );
    Ok(())
}
