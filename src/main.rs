use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use overseer_check::session::parse_port;
use overseer_check::{Config, OverseerClient, ReportFormatter};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "Please supply port as the only argument";

#[derive(Parser)]
#[command(name = "overseer-check")]
#[command(about = "Print the current status and history of an overseer server")]
struct Cli {
    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Exit without waiting for Enter")]
    no_pause: bool,

    #[arg(value_name = "PORT_NUM", help = "Port the overseer server listens on")]
    ports: Vec<String>,
}

impl Cli {
    /// The port argument, if exactly one was given.
    fn port(&self) -> Option<&str> {
        match self.ports.as_slice() {
            [port] => Some(port.as_str()),
            _ => None,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = dispatch(&cli).await?;

    if config.pause_on_exit && !cli.no_pause {
        wait_for_enter().await?;
    }

    Ok(())
}

/// Runs the check, or prints usage when the port argument is missing or
/// repeated. Returns the config that governs the exit pause.
async fn dispatch(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    match cli.port() {
        Some(port) => {
            let config = Config::load(&config_path)?;
            run(port, &config).await?;
            Ok(config)
        }
        None => {
            println!("{}", USAGE);
            Ok(Config::load(&config_path).unwrap_or_else(|e| {
                warn!("Ignoring config: {:#}", e);
                Config::default()
            }))
        }
    }
}

async fn run(port: &str, config: &Config) -> Result<()> {
    let port = parse_port(port)?;
    info!("Checking overseer on port {}", port);

    let snapshot = OverseerClient::check(port, config.read_timeout()).await?;
    let lines = ReportFormatter::local().render(&snapshot.status, &snapshot.history)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

async fn wait_for_enter() -> Result<()> {
    print!("\nPress Enter to continue...");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_port() {
        let cli = Cli::try_parse_from(["overseer-check", "8080"]).unwrap();
        assert_eq!(cli.port(), Some("8080"));
        assert!(!cli.no_pause);
    }

    #[test]
    fn test_wrong_argument_count() {
        let none = Cli::try_parse_from(["overseer-check"]).unwrap();
        assert_eq!(none.port(), None);

        let two = Cli::try_parse_from(["overseer-check", "8080", "8081"]).unwrap();
        assert_eq!(two.port(), None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "overseer-check",
            "--no-pause",
            "--config",
            "/tmp/check.toml",
            "8080",
        ])
        .unwrap();
        assert!(cli.no_pause);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/check.toml")));
        assert_eq!(cli.port(), Some("8080"));
    }

    #[tokio::test]
    async fn test_usage_ignores_invalid_config() {
        let path = std::env::temp_dir().join(format!(
            "overseer-check-usage-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "pause_on_exit = \"x\"\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let none = Cli::try_parse_from(["overseer-check", "--config", path_arg.as_str()]).unwrap();
        let none_result = dispatch(&none).await;

        let two = Cli::try_parse_from([
            "overseer-check",
            "--no-pause",
            "--config",
            path_arg.as_str(),
            "1",
            "2",
        ])
        .unwrap();
        let two_result = dispatch(&two).await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(none_result.unwrap(), Config::default());
        assert_eq!(two_result.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_check_rejects_invalid_config() {
        let path = std::env::temp_dir().join(format!(
            "overseer-check-run-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "pause_on_exit = \"x\"\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["overseer-check", "--config", path_arg.as_str(), "8080"])
            .unwrap();
        let result = dispatch(&cli).await;
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
