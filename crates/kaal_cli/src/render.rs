//! Text and JSON presentation of balances, timelines and active periods.

use std::fmt::Write;

use anyhow::Result;
use kaal_dasha::{
    DashaBalance, DashaLevel, DashaPeriod, Graha, Timeline, TimelineView, vimshottari_years,
};
use kaal_time::{DateTime, FixedOffset};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn local(timeline: &Timeline, jd: f64) -> Result<String> {
    Ok(timeline.local_datetime(jd)?.format(DATE_FORMAT).to_string())
}

pub fn balance_text(balance: &DashaBalance) -> String {
    format!(
        "Nakshatra:   {} (#{})\n\
         Dasha lord:  {} ({})\n\
         Elapsed:     {:.2}% ({:.4} y of {} y)\n\
         Balance:     {:.4} y ({:.2} days)\n",
        balance.nakshatra.name(),
        balance.nakshatra.index() + 1,
        balance.graha.name(),
        balance.graha.english_name(),
        balance.elapsed_fraction * 100.0,
        balance.elapsed_years,
        vimshottari_years(balance.graha),
        balance.balance_years,
        balance.balance_days,
    )
}

fn write_period(
    out: &mut String,
    timeline: &Timeline,
    period: &DashaPeriod,
    depth: DashaLevel,
) -> Result<()> {
    let indent = "  ".repeat(period.level as usize);
    writeln!(
        out,
        "{}[{}] {} {}  {} .. {}  (JD {:.4} - {:.4}, {:.1} days)",
        indent,
        period.order,
        period.graha.name(),
        period.level.name(),
        local(timeline, period.start_jd)?,
        local(timeline, period.end_jd)?,
        period.start_jd,
        period.end_jd,
        period.duration_days(),
    )?;
    if period.level < depth {
        for child in &period.children {
            write_period(out, timeline, child, depth)?;
        }
    }
    Ok(())
}

/// Mahadasha listing nested down to `depth`, at most `max_rows` Mahadashas.
pub fn timeline_text(
    timeline: &Timeline,
    birth: &DateTime<FixedOffset>,
    depth: DashaLevel,
    max_rows: usize,
) -> Result<String> {
    let balance = timeline.balance();
    let mut out = String::new();
    writeln!(out, "Vimshottari Dasha for birth {}", birth.to_rfc3339())?;
    writeln!(
        out,
        "Balance at birth: {} {:.4} y of {} y ({})\n",
        balance.graha.name(),
        balance.balance_years,
        vimshottari_years(balance.graha),
        balance.nakshatra.name(),
    )?;

    let mahadashas = timeline.mahadashas();
    let shown = mahadashas.len().min(max_rows);
    for md in &mahadashas[..shown] {
        write_period(&mut out, timeline, md, depth)?;
    }
    if mahadashas.len() > shown {
        writeln!(out, "... and {} more Mahadashas", mahadashas.len() - shown)?;
    }
    Ok(out)
}

/// Active chain, progress and next Mahadasha at the view's reference instant.
pub fn current_text(view: &TimelineView<'_>) -> Result<String> {
    let timeline = view.timeline();
    let mut out = String::new();
    writeln!(
        out,
        "Dasha at {} ({})",
        local(timeline, view.reference_jd())?,
        timeline.timezone()
    )?;

    if view.is_empty() {
        writeln!(
            out,
            "  No computed period at this instant; extend the horizon to cover it."
        )?;
        return Ok(out);
    }

    let chain = view.chain();
    for period in [chain.mahadasha, chain.antardasha, chain.pratyantardasha]
        .into_iter()
        .flatten()
    {
        writeln!(
            out,
            "  {:<16} {:<8} {} .. {}  {:>6.2}%",
            format!("{}:", period.level.name()),
            period.graha.name(),
            local(timeline, period.start_jd)?,
            local(timeline, period.end_jd)?,
            view.progress(period.level).unwrap_or(0.0),
        )?;
    }
    match view.next_mahadasha() {
        Some(next) => writeln!(
            out,
            "Next Mahadasha: {} from {}",
            next.graha.name(),
            local(timeline, next.start_jd)?
        )?,
        None => writeln!(out, "Next Mahadasha: beyond the generated horizon")?,
    }
    Ok(out)
}

/// One period in JSON output, with local date-times alongside JD.
#[derive(Debug, Serialize)]
pub struct PeriodReport {
    pub graha: Graha,
    pub level: DashaLevel,
    pub order: u16,
    pub start: String,
    pub end: String,
    pub start_jd: f64,
    pub end_jd: f64,
    pub duration_days: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PeriodReport>,
}

impl PeriodReport {
    fn new(timeline: &Timeline, period: &DashaPeriod, depth: DashaLevel) -> Result<Self> {
        let children = if period.level < depth {
            period
                .children
                .iter()
                .map(|c| Self::new(timeline, c, depth))
                .collect::<Result<_>>()?
        } else {
            Vec::new()
        };
        Ok(Self {
            graha: period.graha,
            level: period.level,
            order: period.order,
            start: timeline.local_datetime(period.start_jd)?.to_rfc3339(),
            end: timeline.local_datetime(period.end_jd)?.to_rfc3339(),
            start_jd: period.start_jd,
            end_jd: period.end_jd,
            duration_days: period.duration_days(),
            children,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineReport {
    pub birth: String,
    pub timezone: String,
    pub horizon_years: f64,
    pub balance: DashaBalance,
    pub mahadashas: Vec<PeriodReport>,
}

impl TimelineReport {
    pub fn new(
        timeline: &Timeline,
        birth: &DateTime<FixedOffset>,
        depth: DashaLevel,
    ) -> Result<Self> {
        Ok(Self {
            birth: birth.to_rfc3339(),
            timezone: timeline.timezone().to_string(),
            horizon_years: timeline.horizon_years(),
            balance: *timeline.balance(),
            mahadashas: timeline
                .mahadashas()
                .iter()
                .map(|md| PeriodReport::new(timeline, md, depth))
                .collect::<Result<_>>()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ActiveReport {
    #[serde(flatten)]
    pub period: PeriodReport,
    pub progress_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct CurrentReport {
    pub reference: String,
    pub reference_jd: f64,
    pub active: Vec<ActiveReport>,
    pub next_mahadasha: Option<PeriodReport>,
}

impl CurrentReport {
    pub fn new(view: &TimelineView<'_>) -> Result<Self> {
        let timeline = view.timeline();
        let chain = view.chain();
        let active = [chain.mahadasha, chain.antardasha, chain.pratyantardasha]
            .into_iter()
            .flatten()
            .map(|p| -> Result<ActiveReport> {
                Ok(ActiveReport {
                    // Leaf only: the chain already lists each level.
                    period: PeriodReport::new(timeline, p, DashaLevel::Mahadasha)?,
                    progress_percent: view.progress(p.level).unwrap_or(0.0),
                })
            })
            .collect::<Result<_>>()?;
        let next_mahadasha = view
            .next_mahadasha()
            .map(|p| PeriodReport::new(timeline, p, DashaLevel::Mahadasha))
            .transpose()?;
        Ok(Self {
            reference: timeline.local_datetime(view.reference_jd())?.to_rfc3339(),
            reference_jd: view.reference_jd(),
            active,
            next_mahadasha,
        })
    }
}

#[cfg(test)]
mod tests {
    use kaal_dasha::{BirthMoonPosition, DAYS_PER_YEAR, TimelineRequest, nakshatra_birth_balance};

    use super::*;

    const BIRTH_JD: f64 = 2_451_545.0;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(19_800).unwrap()
    }

    fn venus_timeline() -> Timeline {
        TimelineRequest::new(BirthMoonPosition::new(1, 8.0), BIRTH_JD, ist())
            .generate()
            .unwrap()
    }

    #[test]
    fn balance_lists_lord_and_remaining_years() {
        let balance = nakshatra_birth_balance(&BirthMoonPosition::new(1, 8.0)).unwrap();
        let text = balance_text(&balance);
        assert!(text.contains("Bharani (#2)"));
        assert!(text.contains("Shukra (Venus)"));
        assert!(text.contains("60.00%"));
        assert!(text.contains("8.0000 y"));
    }

    #[test]
    fn mahadasha_only_listing() {
        let t = venus_timeline();
        let birth = t.local_datetime(BIRTH_JD).unwrap();
        let text = timeline_text(&t, &birth, DashaLevel::Mahadasha, 50).unwrap();
        assert_eq!(text.matches("Mahadasha  ").count(), t.mahadashas().len());
        assert!(!text.contains("Antardasha"));
        assert!(text.contains("[2] Surya Mahadasha"));
    }

    #[test]
    fn nested_listing_is_indented() {
        let t = venus_timeline();
        let birth = t.local_datetime(BIRTH_JD).unwrap();
        let text = timeline_text(&t, &birth, DashaLevel::Antardasha, 1).unwrap();
        assert!(text.contains("\n  [1] Shukra Antardasha"));
        assert!(text.contains("\n  [9] Ketu Antardasha"));
        assert!(!text.contains("Pratyantardasha"));
        assert!(text.contains("... and 9 more Mahadashas"));
    }

    #[test]
    fn current_shows_chain_and_next() {
        let t = venus_timeline();
        let view = t.view_at(BIRTH_JD + 2.0 * DAYS_PER_YEAR);
        let text = current_text(&view).unwrap();
        assert!(text.contains("Mahadasha:"));
        assert!(text.contains("Pratyantardasha:"));
        assert!(text.contains("70.00%"));
        assert!(text.contains("Next Mahadasha: Surya from 2008-01-01"));
    }

    #[test]
    fn current_outside_horizon() {
        let t = venus_timeline();
        let text = current_text(&t.view_at(t.end_jd() + 10.0)).unwrap();
        assert!(text.contains("No computed period"));
    }

    #[test]
    fn timeline_report_respects_depth() {
        let t = venus_timeline();
        let birth = t.local_datetime(BIRTH_JD).unwrap();
        let report = TimelineReport::new(&t, &birth, DashaLevel::Antardasha).unwrap();
        assert_eq!(report.timezone, "+05:30");
        assert_eq!(report.mahadashas[0].children.len(), 9);
        assert!(report.mahadashas[0].children[0].children.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mahadashas"][1]["graha"], "surya");
        assert_eq!(json["balance"]["graha"], "shukra");
    }

    #[test]
    fn current_report_lists_three_levels() {
        let t = venus_timeline();
        let view = t.view_at(BIRTH_JD + 100.0);
        let report = CurrentReport::new(&view).unwrap();
        assert_eq!(report.active.len(), 3);
        assert!(report.active.iter().all(|a| a.period.children.is_empty()));
        assert_eq!(report.next_mahadasha.map(|p| p.graha), Some(Graha::Surya));

        let json = serde_json::to_value(CurrentReport::new(&view).unwrap()).unwrap();
        assert_eq!(json["active"][0]["level"], "Mahadasha");
        assert!(json["active"][2]["progress_percent"].is_f64());
    }
}
