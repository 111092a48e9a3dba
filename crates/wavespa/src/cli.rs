//! Clap derive structures for the `wavespa` CLI.
//!
//! Only depends on clap so the build script can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wavespa -- control Wavespa hot tubs from the command line
#[derive(Debug, Parser)]
#[command(
    name = "wavespa",
    version,
    about = "Control Wavespa hot tubs from the command line",
    long_about = "Monitor and control Wavespa / Bestway hot tubs through the Gizwits cloud.\n\n\
        Devices are read from the account's bindings; commands are sent to the\n\
        cloud and reflected locally until the next status poll confirms them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "WAVESPA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Cloud API root (overrides profile and region)
    #[arg(long, env = "WAVESPA_API_ROOT", global = true)]
    pub api_root: Option<String>,

    /// Account e-mail (overrides profile)
    #[arg(long, short = 'u', env = "WAVESPA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WAVESPA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WAVESPA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and print the issued token's owner and expiry
    Login,

    /// List spas bound to the account
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// Show decoded state and active errors
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Change a spa setting
    Set(SetArgs),

    /// Poll continuously and print every snapshot until Ctrl-C
    Watch(WatchArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Status / Watch ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Device ID or alias (all devices when omitted)
    pub device: Option<String>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls (overrides profile)
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

// ── Set ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Device ID or alias
    pub device: String,

    #[command(subcommand)]
    pub setting: Setting,
}

#[derive(Debug, Subcommand)]
pub enum Setting {
    /// Switch the spa on or off
    Power { state: Switch },

    /// Switch the filter pump on or off
    Filter { state: Switch },

    /// Switch the heater on or off
    #[command(alias = "heater")]
    Heat { state: Switch },

    /// Set the bubbles level
    #[command(alias = "bubble")]
    Bubbles { level: Bubbles },

    /// Lock or unlock the control panel
    Lock { state: Switch },

    /// Set the target temperature in the spa's current unit
    #[command(alias = "temperature")]
    Temp {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bubbles {
    Off,
    Medium,
    Max,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive wizard that creates or updates a profile
    Init,

    /// Print the resolved configuration with secrets masked
    Show,

    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
