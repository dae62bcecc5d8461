use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use toolshed::{
    analyze_packages, discover_packages, evaluate, parse_lcov, Config, CoverageError, ToolCommand,
};

#[derive(Parser)]
#[command(name = "toolshed")]
#[command(about = "Coverage gate and tool wrappers for Dart/Flutter repositories")]
#[command(version)]
struct Cli {
    /// Runs `coverage` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file (default: toolshed.toml, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check LCOV line coverage against the minimum threshold
    Coverage {
        /// LCOV tracefile (default: coverage/lcov.info)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Minimum overall line coverage in percent (default: 78)
        #[arg(long)]
        minimum: Option<f64>,
    },

    /// Run the formatter with git worktree variables removed
    #[command(disable_help_flag = true)]
    Format {
        /// Arguments passed through unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run the analyzer with git worktree variables removed
    #[command(disable_help_flag = true)]
    Analyze {
        /// Arguments passed through unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Analyze every package under the packages directory
    AnalyzePackages,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            if let Some(CoverageError::NotFound(_)) = e.downcast_ref::<CoverageError>() {
                eprintln!("Run 'flutter test --coverage' first.");
            }
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let (config, base_dir) = Config::locate(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Coverage {
        file: None,
        minimum: None,
    }) {
        Commands::Coverage { file, minimum } => cmd_coverage(&config, &base_dir, file, minimum),
        Commands::Format { args } => cmd_passthrough(&config, &config.tools.format, args),
        Commands::Analyze { args } => cmd_passthrough(&config, &config.tools.analyze, args),
        Commands::AnalyzePackages => cmd_analyze_packages(&config, &base_dir),
    }
}

fn cmd_coverage(
    config: &Config,
    base_dir: &Path,
    file: Option<PathBuf>,
    minimum: Option<f64>,
) -> Result<i32> {
    let path = base_dir.join(file.as_deref().unwrap_or(config.coverage.file.as_path()));
    let minimum = minimum.unwrap_or(config.coverage.minimum);
    if !(0.0..=100.0).contains(&minimum) {
        anyhow::bail!("--minimum must be between 0 and 100, got {}", minimum);
    }

    // Nothing reaches stdout unless parsing and evaluation both succeed
    let report = parse_lcov(&path)?;
    let result = evaluate(&report, minimum)?;

    print!("{}", result.render());

    if result.passed {
        println!("{}", result.verdict().green());
        Ok(0)
    } else {
        eprintln!("\n{}", result.verdict().red().bold());
        Ok(1)
    }
}

fn cmd_passthrough(config: &Config, command_line: &[String], args: Vec<String>) -> Result<i32> {
    let tool = ToolCommand::from_command_line(command_line)?
        .args(args)
        .env_remove_all(config.tools.strip_env.iter().cloned());

    tool.status()
}

fn cmd_analyze_packages(config: &Config, base_dir: &Path) -> Result<i32> {
    let packages_dir = base_dir.join(&config.packages.dir);
    let packages = discover_packages(&packages_dir, &config.packages.manifest)?;

    if packages.is_empty() {
        println!(
            "  {}",
            format!("No packages found in {}", packages_dir.display()).dimmed()
        );
        return Ok(0);
    }

    let analyzer = ToolCommand::from_command_line(&config.packages.analyzer)
        .context("Invalid packages.analyzer command")?;
    let analysis = analyze_packages(&packages, &analyzer)?;

    if analysis.passed() {
        println!(
            "{} All {} package(s) analyzed cleanly",
            "✓".green().bold(),
            analysis.analyzed.len()
        );
        return Ok(0);
    }

    eprintln!(
        "\n{} Analysis failed for: {}",
        "✗".red().bold(),
        analysis.failed.join(", ")
    );
    Ok(1)
}
