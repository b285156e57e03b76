// ABOUTME: Command-line entry point for listing and querying hosts in an SSH client config
// ABOUTME: Resolves paths from settings and flags, then prints results as text or JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sshcfg::config::{Config, OutputFormat};
use sshcfg::ssh::{self, Host, SshPaths};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// sshcfg - inspect hosts defined in an OpenSSH client config
#[derive(Parser)]
#[command(name = "sshcfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (default: <config dir>/sshcfg/config.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// SSH config file to read instead of the configured one
    #[arg(short = 'F', long, global = true)]
    file: Option<PathBuf>,

    /// Directory that relative Include patterns are resolved against
    #[arg(long, global = true)]
    ssh_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List host names in file order
    List,

    /// Show the options of a host
    Show {
        /// Host name as written after `Host`
        host: String,
    },

    /// Print one option value of a host
    Get {
        host: String,
        /// Option keyword, matched case-insensitively
        key: String,
    },

    /// Print every host with its options
    Dump,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn settings_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.settings {
        Some(path) => Ok(path.clone()),
        None => Config::default_config_path(),
    }
}

fn load_settings(cli: &Cli) -> Result<Config> {
    let path = settings_path(cli)?;
    let mut config = match &cli.settings {
        Some(_) => Config::load_from_file(&path)?,
        None => Config::load_or_default(&path)?,
    };
    config.expand_path()?;
    config.validate()?;
    Ok(config)
}

fn resolve_paths(cli: &Cli, config: &Config) -> SshPaths {
    let configured = config.ssh_paths();
    SshPaths {
        ssh_dir: cli.ssh_dir.clone().unwrap_or(configured.ssh_dir),
        config_path: cli.file.clone().unwrap_or(configured.config_path),
    }
}

fn print_host(host: &Host) {
    println!("Host {}", host.name);
    for option in &host.options {
        println!("    {} {}", option.name, option.value);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn init_settings(cli: &Cli, force: bool) -> Result<ExitCode> {
    let path = settings_path(cli)?;
    if path.exists() && !force {
        anyhow::bail!("Settings file already exists: {} (use --force)", path.display());
    }
    Config::save_default_config(&path)?;
    println!("Wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn load_hosts(cli: &Cli, config: &Config) -> Result<Vec<Host>> {
    let paths = resolve_paths(cli, config);
    ssh::parse_ssh_config_with_depth(
        &paths.config_path,
        &paths.ssh_dir,
        config.parsing.max_include_depth,
    )
    .with_context(|| format!("Failed to load SSH config: {}", paths.config_path.display()))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Commands::Init { force } = cli.command {
        return init_settings(cli, force);
    }

    let config = load_settings(cli)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    let hosts = load_hosts(cli, &config)?;

    match &cli.command {
        Commands::List => {
            let names: Vec<&str> = hosts.iter().map(|h| h.name.as_str()).collect();
            match format {
                OutputFormat::Json => print_json(&names)?,
                OutputFormat::Text => names.iter().for_each(|name| println!("{name}")),
            }
        }
        Commands::Show { host } => {
            let Some(found) = ssh::find_host(&hosts, host) else {
                eprintln!("Host not found: {host}");
                return Ok(ExitCode::FAILURE);
            };
            match format {
                OutputFormat::Json => print_json(found)?,
                OutputFormat::Text => print_host(found),
            }
        }
        Commands::Get { host, key } => {
            let value = ssh::find_host(&hosts, host).and_then(|h| h.value(key));
            let Some(value) = value else {
                tracing::debug!("No '{}' option for host '{}'", key, host);
                return Ok(ExitCode::FAILURE);
            };
            match format {
                OutputFormat::Json => print_json(&value)?,
                OutputFormat::Text => println!("{value}"),
            }
        }
        Commands::Dump => match format {
            OutputFormat::Json => print_json(&hosts)?,
            OutputFormat::Text => {
                for (i, host) in hosts.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print_host(host);
                }
            }
        },
        // Written before any settings are read
        Commands::Init { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
