//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pomodoro-timer")]
#[command(about = "A Pomodoro countdown timer served to the browser")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work interval length in minutes
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=1440))]
    pub work: u64,

    /// Break interval length in minutes
    #[arg(short = 'b', long = "break", default_value = "5", value_parser = clap::value_parser!(u64).range(1..=1440))]
    pub break_minutes: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro-timer"]).unwrap();
        assert_eq!(config.work, 25);
        assert_eq!(config.break_minutes, 5);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_overrides() {
        let config =
            Config::try_parse_from(["pomodoro-timer", "-w", "50", "--break", "10", "-v"]).unwrap();
        assert_eq!(config.work, 50);
        assert_eq!(config.break_minutes, 10);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_zero_minutes_rejected() {
        assert!(Config::try_parse_from(["pomodoro-timer", "--work", "0"]).is_err());
        assert!(Config::try_parse_from(["pomodoro-timer", "-b", "0"]).is_err());
    }
}
