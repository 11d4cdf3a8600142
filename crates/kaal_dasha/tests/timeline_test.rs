//! Integration tests for Vimshottari timeline generation and queries.

use chrono::FixedOffset;
use kaal_dasha::dasha::{full_period_days, proportional_children, verify_partition};
use kaal_dasha::{
    BirthMoonPosition, DAYS_PER_YEAR, DashaError, DashaLevel, DashaPeriod, Graha,
    NAKSHATRA_SPAN_27, Timeline, TimelineRequest, VIMSHOTTARI_SEQUENCE, vimshottari_snapshot,
    vimshottari_years,
};

const BIRTH_JD: f64 = 2_451_545.0; // J2000

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn timeline(nakshatra_index: u8, degrees: f64) -> Timeline {
    TimelineRequest::new(BirthMoonPosition::new(nakshatra_index, degrees), BIRTH_JD, utc())
        .generate()
        .unwrap()
}

/// Moon 8 deg into Bharani: 60% of Shukra's 20 years elapsed, 8 remain.
fn venus_timeline() -> Timeline {
    timeline(1, 8.0)
}

fn all_periods(t: &Timeline) -> Vec<&DashaPeriod> {
    let mut out = Vec::new();
    for md in t.mahadashas() {
        out.push(md);
        for ad in &md.children {
            out.push(ad);
            out.extend(ad.children.iter());
        }
    }
    out
}

#[test]
fn classical_table_sums_to_120_years() {
    let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|&g| vimshottari_years(g)).sum();
    assert_eq!(total, 120.0);
}

#[test]
fn every_level_partitions_its_parent() {
    for nak in [0, 1, 9, 13, 26] {
        let t = timeline(nak, 5.5);
        for md in t.mahadashas() {
            verify_partition(md).unwrap();
            assert_eq!(md.children.len(), 9);
            for ad in &md.children {
                verify_partition(ad).unwrap();
                assert_eq!(ad.children.len(), 9);
                for pd in &ad.children {
                    assert!(pd.children.is_empty());
                    assert_eq!(pd.level, DashaLevel::Pratyantardasha);
                }
            }
        }
    }
}

#[test]
fn mahadashas_are_contiguous() {
    let t = timeline(17, 3.25);
    for pair in t.mahadashas().windows(2) {
        assert_eq!(pair[0].end_jd, pair[1].start_jd);
    }
}

#[test]
fn children_start_with_parent_graha() {
    let t = venus_timeline();
    for md in t.mahadashas() {
        assert_eq!(md.children[0].graha, md.graha);
        for ad in &md.children {
            assert_eq!(ad.children[0].graha, ad.graha);
        }
    }
}

#[test]
fn single_owner_per_level_at_sampled_instants() {
    let t = venus_timeline();
    let mut jd = t.start_jd();
    while jd < t.end_jd() {
        let owners = |level: DashaLevel| {
            all_periods(&t)
                .into_iter()
                .filter(|p| p.level == level && p.contains(jd))
                .count()
        };
        assert_eq!(owners(DashaLevel::Mahadasha), 1, "jd {jd}");
        assert_eq!(owners(DashaLevel::Antardasha), 1, "jd {jd}");
        assert_eq!(owners(DashaLevel::Pratyantardasha), 1, "jd {jd}");

        let chain = t.active_chain(jd);
        let pd = chain.pratyantardasha.unwrap();
        assert!(pd.contains(jd));
        assert!(chain.antardasha.unwrap().contains(jd));
        jd += 97.3;
    }
}

#[test]
fn boundary_instant_belongs_to_later_period() {
    let t = venus_timeline();
    let boundary = t.mahadashas()[1].start_jd;
    assert_eq!(t.current_mahadasha(boundary).unwrap().graha, Graha::Surya);
    assert_eq!(t.current_antardasha(boundary).unwrap().graha, Graha::Surya);
    assert_eq!(t.current_pratyantardasha(boundary).unwrap().graha, Graha::Surya);
}

#[test]
fn venus_balance_scenario() {
    let t = venus_timeline();
    let md = &t.mahadashas()[0];
    assert_eq!(md.graha, Graha::Shukra);
    assert!((md.end_jd - (BIRTH_JD + 8.0 * DAYS_PER_YEAR)).abs() < 1e-6);
    assert!((md.start_jd - (BIRTH_JD - 12.0 * DAYS_PER_YEAR)).abs() < 1e-6);

    let next = t.next_mahadasha(BIRTH_JD).unwrap();
    assert_eq!(next.graha, Graha::Surya);
    assert_eq!(next.start_jd, md.end_jd);
    assert!((next.duration_years() - 6.0).abs() < 1e-9);
}

#[test]
fn venus_antardasha_durations() {
    let t = venus_timeline();
    let md = &t.mahadashas()[0];
    let expected = [
        (Graha::Shukra, 20.0 * 20.0 / 120.0),
        (Graha::Surya, 20.0 * 6.0 / 120.0),
        (Graha::Chandra, 20.0 * 10.0 / 120.0),
        (Graha::Mangal, 20.0 * 7.0 / 120.0),
        (Graha::Rahu, 20.0 * 18.0 / 120.0),
        (Graha::Guru, 20.0 * 16.0 / 120.0),
        (Graha::Shani, 20.0 * 19.0 / 120.0),
        (Graha::Buddh, 20.0 * 17.0 / 120.0),
        (Graha::Ketu, 20.0 * 7.0 / 120.0),
    ];
    for (ad, (graha, years)) in md.children.iter().zip(expected) {
        assert_eq!(ad.graha, graha);
        assert!(
            (ad.duration_years() - years).abs() < 1e-8,
            "{graha}: expected {years}y, got {}y",
            ad.duration_years()
        );
    }
}

#[test]
fn full_cycle_spans_120_years_from_nakshatra_start() {
    let t = timeline(0, 0.0);
    assert_eq!(t.mahadashas().len(), 9);
    assert_eq!(t.start_jd(), BIRTH_JD);
    let span = t.end_jd() - t.start_jd();
    assert!((span - 120.0 * DAYS_PER_YEAR).abs() < 1e-6);
    for md in t.mahadashas() {
        assert!((md.duration_days() - full_period_days(md.graha)).abs() < 1e-6);
    }
}

#[test]
fn first_nine_mahadashas_span_120_years() {
    for (nak, deg) in [(1, 8.0), (4, 0.001), (13, 13.3), (26, 6.0)] {
        let t = timeline(nak, deg);
        let cycle = &t.mahadashas()[..9];
        let span = cycle[8].end_jd - cycle[0].start_jd;
        assert!(
            (span - 120.0 * DAYS_PER_YEAR).abs() < 1e-6,
            "nakshatra {nak} at {deg} deg: span {span}"
        );
    }
}

#[test]
fn horizon_is_covered() {
    for horizon in [1.0, 50.0, 120.0, 300.0] {
        let t = TimelineRequest::new(BirthMoonPosition::new(5, 7.0), BIRTH_JD, utc())
            .with_horizon(horizon)
            .generate()
            .unwrap();
        assert!(t.end_jd() >= BIRTH_JD + horizon * DAYS_PER_YEAR - 1e-6);
        assert!(t.covers(BIRTH_JD));
    }
}

#[test]
fn progress_is_clamped_and_monotonic() {
    let t = venus_timeline();
    let md = &t.mahadashas()[0];
    assert_eq!(md.progress_percent(md.start_jd), 0.0);
    assert_eq!(md.progress_percent(md.start_jd - 100.0), 0.0);
    assert_eq!(md.progress_percent(md.end_jd + 100.0), 100.0);

    let mut last = 0.0;
    let step = md.duration_days() / 50.0;
    for i in 0..50 {
        let p = md.progress_percent(md.start_jd + step * i as f64);
        assert!((0.0..=100.0).contains(&p));
        assert!(p >= last);
        last = p;
    }
}

#[test]
fn generation_is_deterministic() {
    let a = timeline(22, 4.321);
    let b = timeline(22, 4.321);
    assert_eq!(a, b);
}

#[test]
fn snapshot_agrees_with_timeline() {
    let moon = BirthMoonPosition::new(1, 8.0);
    let t = venus_timeline();
    for offset_days in [-2000.0, 0.0, 1234.5, 9000.0, 30_000.0] {
        let jd = BIRTH_JD + offset_days;
        let snap = vimshottari_snapshot(&moon, BIRTH_JD, jd, 120.0).unwrap();
        assert_eq!(snap, t.snapshot(jd), "offset {offset_days}");
        assert_eq!(snap.periods.len(), 3);
    }
}

#[test]
fn outside_horizon_has_no_active_period() {
    let t = venus_timeline();
    assert!(t.active_chain(t.end_jd()).is_empty());
    assert!(t.active_chain(t.start_jd() - 1.0).is_empty());
    assert!(t.active_chain(f64::NAN).is_empty());
    assert!(t.snapshot(t.end_jd() + 10.0).is_empty());
}

#[test]
fn proportional_children_last_child_snaps() {
    let parent = DashaPeriod::new(Graha::Rahu, DashaLevel::Mahadasha, 0.1, 6574.365, 1);
    let children = proportional_children(&parent);
    assert_eq!(children.len(), 9);
    assert_eq!(children[8].end_jd, parent.end_jd);
    assert_eq!(children[0].start_jd, parent.start_jd);
}

#[test]
fn invalid_birth_data_is_rejected() {
    let cases = [
        BirthMoonPosition::new(27, 1.0),
        BirthMoonPosition::new(0, -0.5),
        BirthMoonPosition::new(0, NAKSHATRA_SPAN_27 + 1.0),
        BirthMoonPosition::new(0, f64::NAN),
    ];
    for moon in cases {
        let err = TimelineRequest::new(moon, BIRTH_JD, utc()).generate().unwrap_err();
        assert!(matches!(err, DashaError::InvalidBirthData(_)), "{moon:?}: {err}");
        assert!(!err.is_retryable());
    }

    let err = TimelineRequest::new(BirthMoonPosition::new(0, 1.0), f64::INFINITY, utc())
        .generate()
        .unwrap_err();
    assert!(matches!(err, DashaError::InvalidBirthData(_)));
}

#[test]
fn invalid_horizon_is_rejected() {
    for horizon in [0.0, -5.0, f64::NAN, 5000.0] {
        let err = TimelineRequest::new(BirthMoonPosition::new(0, 1.0), BIRTH_JD, utc())
            .with_horizon(horizon)
            .generate()
            .unwrap_err();
        assert!(matches!(err, DashaError::InvalidHorizon(_)));
    }
}

#[test]
fn moon_from_sidereal_longitude() {
    // 22 deg: Bharani (13.33..26.67), 8.67 deg in
    let moon = BirthMoonPosition::from_sidereal_longitude(22.0).unwrap();
    assert_eq!(moon.nakshatra_index, 1);
    let t = TimelineRequest::new(moon, BIRTH_JD, utc()).generate().unwrap();
    assert_eq!(t.mahadashas()[0].graha, Graha::Shukra);
    assert!(BirthMoonPosition::from_sidereal_longitude(360.0).is_err());
}
