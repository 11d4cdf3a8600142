use anyhow::{Context, Result, bail};
use kaal_dasha::{
    BirthMoonPosition, DashaLevel, Timeline, generate_timeline, nakshatra_birth_balance,
};
use kaal_time::{DateTime, FixedOffset, jd_from_datetime, now_jd, parse_datetime, parse_utc_offset};
use tracing::info;

use crate::cli::{BirthArgs, CurrentArgs, MoonArgs, OutputFormat, TimelineArgs};
use crate::config::KaalConfig;
use crate::render;

/// Birth Moon position from either an absolute longitude or nakshatra + degrees.
pub fn resolve_moon(args: &MoonArgs) -> Result<BirthMoonPosition> {
    match (args.moon_lon, args.nakshatra, args.degrees) {
        (Some(lon), _, _) => BirthMoonPosition::from_sidereal_longitude(lon)
            .with_context(|| format!("invalid --moon-lon {lon}")),
        (None, Some(nakshatra), Some(degrees)) => Ok(BirthMoonPosition::new(nakshatra, degrees)),
        _ => bail!("birth Moon position required: --moon-lon, or --nakshatra with --degrees"),
    }
}

/// Chart timezone from `--tz`, falling back to `[chart].timezone`.
fn resolve_timezone(tz: Option<&str>, config: &KaalConfig) -> Result<FixedOffset> {
    match tz {
        Some(tz) => parse_utc_offset(tz).with_context(|| format!("invalid --tz {tz:?}")),
        None => config.chart_timezone(),
    }
}

fn resolve_format(flag: Option<OutputFormat>, config: &KaalConfig) -> OutputFormat {
    flag.unwrap_or(match config.output.format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    })
}

/// Parse the birth arguments and build the timeline.
fn build_timeline(
    args: &BirthArgs,
    config: &KaalConfig,
) -> Result<(Timeline, DateTime<FixedOffset>)> {
    let timezone = resolve_timezone(args.tz.as_deref(), config)?;
    let birth = parse_datetime(&args.birth, timezone)
        .with_context(|| format!("invalid --birth {:?}", args.birth))?;
    let moon = resolve_moon(&args.moon)?;
    let horizon_years = args.horizon.unwrap_or(config.timeline.horizon_years);

    let timeline = generate_timeline(&moon, &birth, timezone, horizon_years)
        .context("failed to generate dasha timeline")?;
    info!(
        birth = %birth.to_rfc3339(),
        mahadashas = timeline.mahadashas().len(),
        "timeline ready"
    );
    Ok((timeline, birth))
}

pub fn run_balance(args: &MoonArgs) -> Result<()> {
    let moon = resolve_moon(args)?;
    let balance = nakshatra_birth_balance(&moon).context("failed to resolve birth balance")?;
    print!("{}", render::balance_text(&balance));
    Ok(())
}

pub fn run_timeline(args: &TimelineArgs, config: &KaalConfig) -> Result<()> {
    let depth_raw = args.depth.unwrap_or(config.timeline.depth);
    let Some(depth) = DashaLevel::from_u8(depth_raw) else {
        bail!("--depth must be 0, 1 or 2, got {depth_raw}");
    };
    let (timeline, birth) = build_timeline(&args.birth, config)?;

    match resolve_format(args.format, config) {
        OutputFormat::Text => {
            print!(
                "{}",
                render::timeline_text(&timeline, &birth, depth, config.output.max_rows)?
            );
        }
        OutputFormat::Json => {
            let report = render::TimelineReport::new(&timeline, &birth, depth)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize timeline")?
            );
        }
    }
    Ok(())
}

pub fn run_current(args: &CurrentArgs, config: &KaalConfig) -> Result<()> {
    let (timeline, _) = build_timeline(&args.birth, config)?;
    let reference_jd = match &args.at {
        Some(at) => {
            let at_dt = parse_datetime(at, timeline.timezone())
                .with_context(|| format!("invalid --at {at:?}"))?;
            jd_from_datetime(&at_dt)
        }
        None => now_jd(),
    };
    let view = timeline.view_at(reference_jd);

    match resolve_format(args.format, config) {
        OutputFormat::Text => print!("{}", render::current_text(&view)?),
        OutputFormat::Json => {
            let report = render::CurrentReport::new(&view)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            );
        }
    }
    Ok(())
}
