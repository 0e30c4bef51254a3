//! macropad-launcher - installs the toolchain if needed, then starts Macropad Editor Pro.
//!
//! Usage:
//!   macropad-launcher [launch]          Check the toolchain and start the editor GUI
//!   macropad-launcher check             Report toolchain and package manager status
//!   macropad-launcher install           Install the toolchain and native dependencies
//!   macropad-launcher validate [FILE]   Validate a mapping file
//!   macropad-launcher print [FILE]      Print a mapping file

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use macropad_launcher::launcher::launch;
use macropad_launcher::mapping::Mapping;
use macropad_launcher::runner::{CommandRunner, DryRunRunner, SystemRunner};
use macropad_launcher::utils::dependencies::{PackageManager, SystemProbe};
use macropad_launcher::utils::downloads::{Downloader, HttpDownloader, NoopDownloader};
use macropad_launcher::{Bootstrap, LauncherConfig, Outcome};

const EXIT_MISSING_TOOLCHAIN: u8 = 2;

/// Bootstrap launcher for Macropad Editor Pro
#[derive(Parser)]
#[command(name = "macropad-launcher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (overrides the user config directory)
    #[arg(short, long, global = true, env = "MACROPAD_LAUNCHER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing the editor's Cargo.toml (overrides config file)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Only print instructions when the toolchain is missing
    #[arg(long, global = true)]
    no_install: bool,

    /// Launch a debug build instead of the release build
    #[arg(long, global = true)]
    debug_build: bool,

    /// Show what would run without running it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the toolchain, then start the editor GUI
    Launch,

    /// Report platform, package manager and toolchain status
    Check,

    /// Install the toolchain and native build dependencies
    Install,

    /// Validate a mapping file
    Validate {
        /// Mapping file (default: next to the built editor binary)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Product id to validate against, e.g. 0x8840
        #[arg(long, value_parser = parse_pid)]
        pid: Option<u16>,
    },

    /// Print a mapping file as RON
    Print {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn parse_pid(s: &str) -> std::result::Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid product id `{}`: {}", s, e))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<LauncherConfig> {
    let mut config =
        LauncherConfig::load(cli.config.as_deref()).context("loading launcher config")?;
    if let Some(dir) = &cli.project_dir {
        config.project_dir = dir.clone();
    }
    if cli.no_install {
        config.auto_install = false;
    }
    if cli.debug_build {
        config.release = false;
    }
    Ok(config)
}

fn mapping_file(config: &LauncherConfig, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| config.mapping_path())
}

fn run_launch(cli: &Cli, config: &LauncherConfig) -> Result<ExitCode> {
    let bootstrap = Bootstrap::for_host(config).with_dry_run(cli.dry_run);
    let (mut runner, downloader) = executors(cli.dry_run);

    match bootstrap.prepare(&SystemProbe, runner.as_mut(), downloader.as_ref())? {
        Outcome::Ready(spec) => {
            if cli.dry_run {
                println!("{}", spec);
                return Ok(ExitCode::SUCCESS);
            }
            let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
            let code = runtime.block_on(launch(&spec))?;
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        Outcome::MissingToolchain { instructions } => {
            if cli.dry_run {
                eprintln!("{} was not found. Dry run, would install with:", config.toolchain);
            } else {
                eprintln!("{} was not found. Install it with:", config.toolchain);
            }
            for line in instructions {
                eprintln!("  - {}", line);
            }
            Ok(ExitCode::from(EXIT_MISSING_TOOLCHAIN))
        }
        Outcome::Installed { manual_steps } => {
            report_manual_steps(&manual_steps);
            println!("Toolchain installed. Open a new terminal and run macropad-launcher again.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_check(config: &LauncherConfig) -> ExitCode {
    let bootstrap = Bootstrap::for_host(config);
    let probe = SystemProbe;
    let pm = PackageManager::detect(&probe, bootstrap.platform());
    println!("platform:        {}", bootstrap.platform().as_str());
    println!("package manager: {}", pm.as_str());
    match bootstrap.locate_toolchain(&probe) {
        Some(toolchain) => {
            println!("toolchain:       {}", toolchain);
            ExitCode::SUCCESS
        }
        None => {
            println!("toolchain:       missing ({})", config.toolchain);
            ExitCode::from(EXIT_MISSING_TOOLCHAIN)
        }
    }
}

fn run_install(cli: &Cli, config: &LauncherConfig) -> Result<ExitCode> {
    let bootstrap = Bootstrap::for_host(config);
    let (mut runner, downloader) = executors(cli.dry_run);
    let manual = bootstrap.install(&SystemProbe, runner.as_mut(), downloader.as_ref())?;
    report_manual_steps(&manual);
    Ok(ExitCode::SUCCESS)
}

fn run_validate(path: &Path, pid: Option<u16>) -> Result<ExitCode> {
    let cfg = Mapping::read(path).with_context(|| format!("reading {}", path.display()))?;
    match Mapping::validate(&cfg, pid) {
        Ok(()) => {
            println!("{}: ok", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}: {}", path.display(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_print(path: &Path) -> Result<ExitCode> {
    let cfg = Mapping::read(path).with_context(|| format!("reading {}", path.display()))?;
    println!("{}", Mapping::to_pretty_string(&cfg)?);
    Ok(ExitCode::SUCCESS)
}

fn executors(dry_run: bool) -> (Box<dyn CommandRunner>, Box<dyn Downloader>) {
    if dry_run {
        (Box::new(DryRunRunner::default()), Box::new(NoopDownloader))
    } else {
        (Box::new(SystemRunner), Box::new(HttpDownloader))
    }
}

fn report_manual_steps(steps: &[String]) {
    for step in steps {
        warn!("still to do by hand: {}", step);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(&cli).and_then(|config| {
        info!(project_dir = %config.project_dir.display(), "launcher starting");
        match &cli.command {
            None | Some(Commands::Launch) => run_launch(&cli, &config),
            Some(Commands::Check) => Ok(run_check(&config)),
            Some(Commands::Install) => run_install(&cli, &config),
            Some(Commands::Validate { file, pid }) => {
                run_validate(&mapping_file(&config, file.clone()), *pid)
            }
            Some(Commands::Print { file }) => run_print(&mapping_file(&config, file.clone())),
        }
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
