use std::{error::Error, fs, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use zengge_light_client::{Bulb, BulbConfig, Color};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with a bulb configuration; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Bulb address, required unless given in the config file
    #[arg(short = 'H', long)]
    host: Option<String>,
    #[arg(short, long)]
    port: Option<u16>,
    #[arg(short, long)]
    attempts: Option<u32>,
    #[arg(short, long)]
    timeout_ms: Option<u64>,
    #[arg(long)]
    retry_delay_ms: Option<u64>,
    /// Repeat for more output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    On,
    Off,
    Brightness { level: u8 },
    /// Accepts #rrggbb, rrggbb or r,g,b
    Color { color: Color },
    Status,
}

impl Cli {
    fn bulb_config(&self) -> Result<BulbConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Using bulb configuration from {}", path.display());
                serde_json::from_slice(&fs::read(path)?)?
            }
            None => match &self.host {
                Some(host) => BulbConfig::new(host.clone()),
                None => Err("either --host or --config must be given")?,
            },
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(attempts) = self.attempts {
            config = config.with_max_attempts(attempts);
        }
        if let Some(timeout) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(timeout));
        }
        if let Some(delay) = self.retry_delay_ms {
            config = config.with_retry_delay(Duration::from_millis(delay));
        }

        config.validate()?;
        Ok(config)
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        log_level(cli.verbose),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut bulb = Bulb::connect(cli.bulb_config()?)?;

    match cli.command {
        Commands::On => bulb.turn_on()?,
        Commands::Off => bulb.turn_off()?,
        Commands::Brightness { level } => bulb.set_brightness(level)?,
        Commands::Color { color } => bulb.set_color(color)?,
        Commands::Status => match bulb.status()? {
            Some(status) => println!("{}", serde_json::to_string_pretty(&status)?),
            None => println!("no status available"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_a_config() {
        let cli = Cli::parse_from([
            "zengge",
            "--host",
            "10.0.0.7",
            "--attempts",
            "5",
            "--timeout-ms",
            "300",
            "color",
            "#ff8000",
        ]);
        let config = cli.bulb_config().unwrap();
        assert_eq!(config.host, "10.0.0.7");
        assert_eq!(config.port, 5577);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.timeout, Duration::from_millis(300));
        assert!(matches!(
            cli.command,
            Commands::Color { color } if color == Color::rgb(255, 128, 0)
        ));
    }

    #[test]
    fn host_or_config_is_required() {
        let cli = Cli::parse_from(["zengge", "status"]);
        assert!(cli.bulb_config().is_err());
    }

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(3), LevelFilter::Debug);
    }
}
