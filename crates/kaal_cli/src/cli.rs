use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Vimshottari dasha timelines from a birth Moon position.
#[derive(Parser)]
#[command(name = "kaal", version, about = "Vimshottari dasha timeline calculator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Dasha balance at birth from the Moon's nakshatra position.
    Balance(MoonArgs),
    /// Full Mahadasha listing, nested to the requested depth.
    Timeline(TimelineArgs),
    /// Periods active at an instant, with progress and the next Mahadasha.
    Current(CurrentArgs),
}

/// Birth Moon position: absolute sidereal longitude or nakshatra + degrees.
#[derive(Args, Debug, Clone)]
pub struct MoonArgs {
    /// Sidereal longitude of the Moon in degrees, [0, 360).
    #[arg(long, conflicts_with_all = ["nakshatra", "degrees"])]
    pub moon_lon: Option<f64>,

    /// Nakshatra index (0 = Ashwini .. 26 = Revati).
    #[arg(long, requires = "degrees")]
    pub nakshatra: Option<u8>,

    /// Degrees traversed within the nakshatra, [0, 13.333].
    #[arg(long, requires = "nakshatra")]
    pub degrees: Option<f64>,
}

/// Birth instant and chart timezone.
#[derive(Args, Debug, Clone)]
pub struct BirthArgs {
    /// Birth date-time: RFC 3339, or naive YYYY-MM-DDThh:mm[:ss] in the chart timezone.
    #[arg(long)]
    pub birth: String,

    /// Chart timezone as a UTC offset (+05:30, -0800, Z). Overrides [chart].timezone.
    #[arg(long)]
    pub tz: Option<String>,

    #[command(flatten)]
    pub moon: MoonArgs,

    /// Years past birth to cover. Overrides [timeline].horizon_years.
    #[arg(long)]
    pub horizon: Option<f64>,
}

/// Arguments for the `timeline` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub birth: BirthArgs,

    /// Levels below Mahadasha to print (0-2). Overrides [timeline].depth.
    #[arg(long)]
    pub depth: Option<u8>,

    /// Output format. Overrides [output].format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `current` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CurrentArgs {
    #[command(flatten)]
    pub birth: BirthArgs,

    /// Reference date-time (default: now).
    #[arg(long)]
    pub at: Option<String>,

    /// Output format. Overrides [output].format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
