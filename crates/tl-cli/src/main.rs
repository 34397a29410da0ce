//! ThreatLens CLI
//!
//! Command-line interface for the ThreatLens alert-hunting pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tl_actions::generate_recommendations;
use tl_connectors::{provider_for, AlertEnricher, MockEnricher};
use tl_core::{read_alerts, read_snapshot, HuntPipeline, ScoredAlert, Severity};
use tl_observability::{init_logging_with_config, LoggingConfig, PipelineMetrics};
use tracing::{error, info, Level};

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "threatlens")]
#[command(version)]
#[command(about = "Staged alert-hunting pipeline: IOC matching, TTP mapping, threat scoring", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hunting pipeline over a batch of enriched alerts
    Hunt {
        /// Alerts JSON file (overrides config)
        #[arg(short, long)]
        alerts: Option<PathBuf>,

        /// Threat-intel tables JSON file (defaults to the builtin mock feed)
        #[arg(short, long)]
        intel: Option<PathBuf>,

        /// Output path for the scored snapshot (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run the mock enrichment stage before hunting
        #[arg(long)]
        enrich: bool,

        /// Print mitigation recommendations after scoring
        #[arg(long)]
        recommend: bool,
    },

    /// Summarize a scored snapshot: severity distribution and result table
    Summary {
        /// Scored snapshot JSON file (defaults to the configured output path)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only include these threat scores (repeatable)
        #[arg(long = "score")]
        scores: Vec<Severity>,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} {:#}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    init_logging_from(&app_config, cli.verbose);

    let result = match cli.command {
        Commands::Hunt {
            alerts,
            intel,
            output,
            enrich,
            recommend,
        } => {
            let opts = HuntOptions {
                alerts_path: alerts.unwrap_or_else(|| app_config.alerts_path.clone()),
                intel_path: intel.or_else(|| app_config.intel_path.clone()),
                output_path: output.unwrap_or_else(|| app_config.output_path.clone()),
                enrich: enrich || app_config.enrich,
                recommend,
            };
            cmd_hunt(&app_config, opts, cli.format).await
        }
        Commands::Summary { input, scores } => {
            let path = input.unwrap_or_else(|| app_config.output_path.clone());
            cmd_summary(&path, &scores, cli.format)
        }
        Commands::Validate { file } => cmd_validate(&file),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging_from(config: &AppConfig, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse::<Level>()
            .unwrap_or(Level::INFO)
    };
    init_logging_with_config(LoggingConfig {
        level,
        json_format: config.logging.json,
        ..LoggingConfig::default()
    });
}

struct HuntOptions {
    alerts_path: PathBuf,
    intel_path: Option<PathBuf>,
    output_path: PathBuf,
    enrich: bool,
    recommend: bool,
}

async fn cmd_hunt(app_config: &AppConfig, opts: HuntOptions, format: OutputFormat) -> Result<()> {
    let provider = provider_for(opts.intel_path.as_ref())
        .context("Failed to initialize threat-intel provider")?;
    let tables = provider
        .load_tables()
        .await
        .with_context(|| format!("Failed to load intel tables from '{}'", provider.name()))?;
    info!(provider = provider.name(), "intel tables loaded");

    let mut alerts = read_alerts(&opts.alerts_path)
        .with_context(|| format!("Failed to load alerts from {}", opts.alerts_path.display()))?;

    if opts.enrich {
        let enricher = MockEnricher;
        alerts = enricher
            .enrich(alerts)
            .await
            .context("Enrichment stage failed")?;
    }

    let pipeline = HuntPipeline::new(tables).with_lattice(app_config.lattice.clone());
    let report = pipeline
        .run(&alerts)
        .context("Hunting pipeline aborted")?;

    report
        .write_snapshot(&opts.output_path)
        .with_context(|| format!("Failed to write snapshot to {}", opts.output_path.display()))?;

    let mut collector = PipelineMetrics::new();
    collector.record_alerts(report.alerts_seen as u64);
    collector.record_matches(report.results.len() as u64);
    for result in &report.results {
        collector.record_result(&result.threat_score.to_string());
    }
    let kpis = collector.kpis();
    info!(
        total_alerts = kpis.total_alerts,
        total_matches = kpis.total_matches,
        match_rate = kpis.match_rate,
        "run KPIs"
    );

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", "Hunt complete".green().bold());
            println!("  Run ID:    {}", report.run_id);
            println!("  Alerts:    {}", report.alerts_seen);
            println!("  Matches:   {}", report.results.len());
            println!("  Snapshot:  {}", opts.output_path.display());
            print_distribution(&report.results);
        }
    }

    if opts.recommend {
        let recommendations = generate_recommendations(&report.results);
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            }
            OutputFormat::Text => {
                println!("\n{}", "Recommendations".bold());
                for rec in &recommendations {
                    println!(
                        "  [{}] {} - {}",
                        colorize_score(rec.threat_score),
                        rec.alert_id,
                        rec.instruction
                    );
                }
            }
        }
    }

    Ok(())
}

fn cmd_summary(path: &Path, scores: &[Severity], format: OutputFormat) -> Result<()> {
    let results = read_snapshot(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;

    let filtered: Vec<ScoredAlert> = if scores.is_empty() {
        results
    } else {
        results
            .into_iter()
            .filter(|r| scores.contains(&r.threat_score))
            .collect()
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    println!("{}", "Threat Score Distribution".bold());
    print_distribution(&filtered);

    println!("\n{}", "TTP Mappings and Threat Scores".bold());
    println!(
        "  {:<10} {:<16} {:<28} {:<32} {}",
        "ALERT", "SOURCE IP", "IOC", "TECHNIQUE", "SCORE"
    );
    for r in &filtered {
        println!(
            "  {:<10} {:<16} {:<28} {:<32} {}",
            r.alert_id,
            r.source_ip,
            r.ioc,
            r.technique,
            colorize_score(r.threat_score)
        );
    }
    if filtered.is_empty() {
        println!("  {}", "no results".dimmed());
    }

    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let config = AppConfig::load(path)?;
    println!("{} {}", "valid:".green().bold(), path.display());
    println!("  alerts:   {}", config.alerts_path.display());
    println!("  output:   {}", config.output_path.display());
    println!(
        "  intel:    {}",
        config
            .intel_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin mock feed".to_string())
    );
    println!("  lattice:  {} entries", config.lattice.entries.len());
    Ok(())
}

/// Prints a per-severity count with a proportional bar, highest first.
fn print_distribution(results: &[ScoredAlert]) {
    for severity in [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ] {
        let count = results
            .iter()
            .filter(|r| r.threat_score == severity)
            .count();
        if count == 0 {
            continue;
        }
        let bar = "#".repeat(count.min(40));
        println!("  {:<9} {:>4}  {}", colorize_score(severity), count, bar);
    }
}

fn colorize_score(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Critical => "Critical".red().bold(),
        Severity::High => "High".yellow().bold(),
        Severity::Medium => "Medium".cyan(),
        Severity::Low => "Low".dimmed(),
    }
}
