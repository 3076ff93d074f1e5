use agentloki_config::config::{self, AppConfig};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agentloki-config")]
#[command(about = "Inspect the AgentLoki front-end configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration (default)
    Show {
        /// Config file to layer over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Ignore AGENTLOKI_* environment overrides
        #[arg(long)]
        no_env: bool,
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Print the built-in defaults
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Print the config file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => show(None, false, Format::Toml),
        Some(Commands::Show {
            config,
            no_env,
            format,
        }) => show(config, no_env, format),
        Some(Commands::Defaults { format }) => print(AppConfig::defaults(), format),
        Some(Commands::Path) => {
            println!("{}", config::config_path()?.display());
            Ok(())
        }
    }
}

fn show(path: Option<PathBuf>, no_env: bool, format: Format) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => config::config_path()?,
    };

    tracing::info!("Resolving configuration from {}", path.display());
    let effective = config::load_from(Some(&path), !no_env)?;
    print(&effective, format)
}

fn print(config: &AppConfig, format: Format) -> anyhow::Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

fn render(config: &AppConfig, format: Format) -> anyhow::Result<String> {
    let rendered = match format {
        Format::Toml => toml::to_string_pretty(config).context("Failed to render TOML")?,
        Format::Json => serde_json::to_string_pretty(config).context("Failed to render JSON")?,
    };
    Ok(rendered.trim_end().to_string())
}
