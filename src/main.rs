//! keydiff CLI - compare keybindings across platforms

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use keydiff::error::FixSuggestion;
use keydiff::loader::{read_bindings, read_platform_bindings};
use keydiff::{Comparison, KeydiffError, PlatformTable, ReportPrinter, Settings};

/// Exit status for every fatal error
const EXIT_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "keydiff")]
#[command(about = "Compare editor keybindings across platforms and emit override bindings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the reference platform against the others and write overrides
    Compare {
        /// Directory containing <platform>.keybindings.json files
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Reference platform (drives iteration, source of overrides)
        #[arg(short, long)]
        reference: Option<String>,

        /// Comparison platform, repeatable, in priority order
        #[arg(short, long = "compare", value_name = "PLATFORM")]
        compare: Vec<String>,

        /// Additional key to ignore, repeatable
        #[arg(short, long, value_name = "KEY")]
        ignore: Vec<String>,

        /// Do not apply the built-in ignored keys
        #[arg(long)]
        no_default_ignores: bool,

        /// Where to write the override bindings
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./keydiff.yaml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check keybindings files without comparing them
    Validate {
        /// Keybindings files (JSON with // line comments)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => exit_with_report(&e.into(), false),
    };

    // Initialize tracing (RUST_LOG wins over the debug level)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compare { no_color, .. } => {
            if no_color {
                colored::control::set_override(false);
            }
            run_compare(&settings, !no_color)
        }
        Commands::Validate { files } => validate_files(&files),
    };

    if let Err(e) = result {
        exit_with_report(&e, settings.show_error_chain());
    }
}

/// Config file, then environment, then flags
fn load_settings(cli: &Cli) -> Result<Settings, KeydiffError> {
    let Commands::Compare {
        dir,
        reference,
        compare,
        ignore,
        no_default_ignores,
        output,
        config,
        ..
    } = &cli.command
    else {
        return Settings::default().with_env();
    };

    let mut settings = Settings::load(config.as_deref())?.with_env()?;

    if let Some(dir) = dir {
        settings.dir = dir.clone();
    }
    if let Some(reference) = reference {
        settings.reference = reference.clone();
    }
    if !compare.is_empty() {
        settings.compare = compare.clone();
    }
    settings.ignore.extend(ignore.iter().cloned());
    if *no_default_ignores {
        settings.default_ignores = false;
    }
    if let Some(output) = output {
        settings.output = output.clone();
    }

    Ok(settings)
}

fn run_compare(settings: &Settings, color: bool) -> anyhow::Result<()> {
    let reference_platform = settings.reference_platform();
    let reference = PlatformTable::new(
        reference_platform.clone(),
        read_platform_bindings(&settings.dir, &reference_platform)?,
    );

    let comparisons = settings
        .comparison_platforms()
        .into_iter()
        .map(|platform| {
            let table = read_platform_bindings(&settings.dir, &platform)?;
            Ok(PlatformTable::new(platform, table))
        })
        .collect::<Result<Vec<_>, KeydiffError>>()?;

    let comparison = Comparison::run(reference, comparisons, &settings.ignore_rules())?;

    let printer = ReportPrinter::new(color && io::stdout().is_terminal());
    let mut stdout = io::stdout().lock();
    printer
        .write(&comparison, &mut stdout)
        .and_then(|_| stdout.flush())
        .context("Failed to write report to stdout")?;

    comparison.overrides().write_to(&settings.output)?;
    println!(
        "{} Wrote {} override bindings to {}",
        "✓".green(),
        comparison.overrides().len(),
        settings.output.display()
    );

    Ok(())
}

fn validate_files(files: &[PathBuf]) -> anyhow::Result<()> {
    for file in files {
        let table = read_bindings(file)?;
        println!(
            "{} {}: {} bindings, {} keys",
            "✓".green(),
            file.display(),
            table.binding_count(),
            table.len()
        );
    }
    Ok(())
}

/// Print a one-line error (plus the cause chain when debugging) and exit
fn exit_with_report(e: &anyhow::Error, show_chain: bool) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    if show_chain {
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".dimmed(), cause);
        }
        eprintln!("  {} {:?}", "Debug:".dimmed(), e);
    }
    if let Some(suggestion) = e
        .downcast_ref::<KeydiffError>()
        .and_then(|err| err.fix_suggestion())
    {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(EXIT_FAILURE);
}
