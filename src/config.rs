//! Configuration and CLI argument handling

use clap::{Args, Parser, Subcommand};

use crate::page::DEFAULT_DEADLINE_HOUR;

/// Session length of the countdown page, in seconds
pub const DEFAULT_SESSION_SECONDS: i64 = 15;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "session-countdown")]
#[command(about = "A session countdown timer that fires a terminal action exactly once")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a countdown, render mm:ss every second and fire the terminal action at zero
    Countdown(CountdownArgs),
    /// Show which navigation link a cookie header selects
    Nav(NavArgs),
    /// Check whether the integer input filter accepts a key
    Key(KeyArgs),
}

#[derive(Args, Debug)]
pub struct CountdownArgs {
    /// Countdown duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_SESSION_SECONDS, allow_negative_numbers = true)]
    pub seconds: i64,

    /// Count down to tomorrow at --hour (local time) instead of --seconds
    #[arg(long, conflicts_with = "seconds")]
    pub until_tomorrow: bool,

    /// Hour of day for --until-tomorrow
    #[arg(long, default_value_t = DEFAULT_DEADLINE_HOUR)]
    pub hour: u32,

    /// Print a JSON snapshot per tick instead of mm:ss
    #[arg(long)]
    pub json: bool,

    /// Shell command to run when the countdown reaches zero
    #[arg(long, value_name = "CMD")]
    pub on_expire: Option<String>,
}

#[derive(Args, Debug)]
pub struct NavArgs {
    /// Cookie header, e.g. "theme=dark; is_logged_in=1"
    #[arg(long, default_value = "")]
    pub cookies: String,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Key name as reported by the browser ("5", "-", "Backspace")
    #[arg(long, allow_hyphen_values = true)]
    pub key: String,

    /// Ctrl was held
    #[arg(long)]
    pub ctrl: bool,

    /// Current field value
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub value: String,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
