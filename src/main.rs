use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use echo_pass::config::Config;
use echo_pass::{pipeline, report};

#[derive(Parser)]
#[command(name = "echo-pass")]
#[command(about = "Find self-echoes in WSJT-X logs and group them into satellite passes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the logs and export per-pass CSV and JSON files
    Run(RunArgs),
    /// Analyze the logs and print the report without writing files
    Report(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Callsign a received message must contain
    #[arg(long)]
    callsign: Option<String>,
    /// WSJT-X log of the transmitting instance
    #[arg(long)]
    tx_log: Option<PathBuf>,
    /// WSJT-X log of the receiving instance
    #[arg(long)]
    rx_log: Option<PathBuf>,
    /// Satellite tracker log
    #[arg(long)]
    telemetry_log: Option<PathBuf>,
    /// Directory for exported passes
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run(args) => run(args, true),
        Commands::Report(args) => run(args, false),
    }
}

fn run(args: RunArgs, write_files: bool) -> ExitCode {
    let config = match build_config(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Loading and processing logs...\n");

    let analysis = match pipeline::run(&config, write_files) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", report::render(&analysis));
    if write_files {
        println!("\nFiles saved to: {}", config.output_dir.display());
    }
    ExitCode::SUCCESS
}

fn build_config(args: RunArgs) -> Result<Config, echo_pass::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::with_callsign(String::new()),
    };

    if let Some(callsign) = args.callsign {
        config.callsign = callsign;
    }
    if let Some(path) = args.tx_log {
        config.logs.tx = path;
    }
    if let Some(path) = args.rx_log {
        config.logs.rx = path;
    }
    if let Some(path) = args.telemetry_log {
        config.logs.telemetry = path;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    config.validate()?;
    Ok(config)
}
