//! Browser Extension Permission Analyzer CLI

use clap::{Parser, Subcommand};
use colored::*;
use extlint::catalog::{ApiCatalog, Lookup};
use extlint::models::{AnalyzerConfig, Severity};
use extlint::report::{generate_report, ReportFormat};
use extlint::{analyze_path, AnalysisReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "extlint")]
#[command(about = "Reconcile declared extension permissions against observed API usage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an extension and print findings to the console
    Analyze {
        /// Path to the extension (directory, .zip, or .crx)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to an extlint.json config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Analyze an extension and write a report file
    Report {
        /// Path to the extension (directory, .zip, or .crx)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Path to an extlint.json config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format: markdown or json
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },

    /// Print the built-in API catalog
    Catalog,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, config, json } => {
            let config = match load_config(config.as_deref()) {
                Ok(c) => c,
                Err(e) => exit_with_error(e),
            };

            let spinner = scan_spinner(&input);
            let report = analyze_path(&input, &config);
            spinner.finish_and_clear();

            match report {
                Ok(report) => {
                    if json {
                        match generate_report(&report, ReportFormat::Json) {
                            Ok(text) => println!("{}", text),
                            Err(e) => exit_with_error(e),
                        }
                    } else {
                        print_console_report(&report);
                    }

                    if report.reconciliation.has_errors() {
                        std::process::exit(1);
                    }
                }
                Err(e) => exit_with_error(e),
            }
        }

        Commands::Report {
            input,
            output,
            config,
            format,
        } => {
            let format = match format.as_str() {
                "markdown" | "md" => ReportFormat::Markdown,
                "json" => ReportFormat::Json,
                other => {
                    eprintln!("{}", format!("Unknown report format: {}", other).red());
                    std::process::exit(2);
                }
            };

            let config = match load_config(config.as_deref()) {
                Ok(c) => c,
                Err(e) => exit_with_error(e),
            };

            let result = analyze_path(&input, &config)
                .and_then(|report| generate_report(&report, format))
                .and_then(|text| {
                    std::fs::write(&output, text)?;
                    Ok(())
                });

            match result {
                Ok(()) => println!("Report written to {}", output.display()),
                Err(e) => exit_with_error(e),
            }
        }

        Commands::Catalog => {
            let catalog = ApiCatalog::global();
            println!("{}", "Built-in API Catalog".bold().blue());
            println!("{}", "=".repeat(50).blue());
            println!();

            for signature in catalog.signatures() {
                match catalog.lookup(signature) {
                    Lookup::Requires(permission) => {
                        println!("{:<48} {}", signature, permission.yellow())
                    }
                    Lookup::NoPermission => {
                        println!("{:<48} {}", signature, "(no permission)".dimmed())
                    }
                    Lookup::Unknown => {}
                }
            }
            println!();
            println!("{} APIs cataloged", catalog.len());
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AnalyzerConfig> {
    match path {
        Some(p) => AnalyzerConfig::from_file(p),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn scan_spinner(input: &std::path::Path) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static spinner template"),
    );
    spinner.set_message(format!("Analyzing {}", input.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_console_report(report: &AnalysisReport) {
    println!("{}", "📊 Permission Analysis".bold().blue());
    println!("{}", "=".repeat(50).blue());
    println!();

    println!(
        "Extension: {} v{}",
        report.metadata.name, report.metadata.version
    );
    println!("Manifest Version: {}", report.metadata.manifest_version);
    println!(
        "Source files scanned: {} (of {} files)",
        report.files_scanned, report.metadata.file_count
    );
    println!();

    if report.reconciliation.is_clean() {
        println!("{}", "✅ Declared permissions match observed usage".green());
    } else {
        for rec in &report.reconciliation.recommendations {
            let severity_str = match rec.severity {
                Severity::Error => "⛔ ERROR".red(),
                Severity::Warning => "⚠️  WARNING".yellow(),
                Severity::Info => "💡 INFO".white(),
            };
            println!("{} [{}]", severity_str, rec.kind);
            println!("  {}", rec.message);
            println!("  💡 {}", rec.suggestion.dimmed());
            println!();
        }
    }

    if !report.profile.api_usage.is_empty() {
        println!("{}", "API usage:".bold());
        let catalog = ApiCatalog::global();
        for (signature, count) in &report.profile.api_usage {
            let permission = match catalog.lookup(signature) {
                Lookup::Requires(p) => format!("requires {}", p).yellow(),
                _ => "no permission needed".dimmed(),
            };
            println!("  {:<44} ×{:<4} {}", signature, count, permission);
        }
        println!();
    }

    if !report.profile.host_patterns.is_empty() {
        println!("{}", "Observed hosts:".bold());
        for host in &report.profile.host_patterns {
            println!("  {}", host);
        }
        println!();
    }
}

fn exit_with_error(e: anyhow::Error) -> ! {
    eprintln!("{}", "❌ Analysis failed!".red().bold());
    eprintln!("{}", format!("Error: {}", e).red());
    std::process::exit(2);
}
