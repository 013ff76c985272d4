//! Reporting scenarios driven through the kiosk collector
//!
//! Records are produced the way the kiosk produces them and then reported on
//! the way the dashboard does.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use collector::{KioskCollector, KioskCollectorBuilder};
use kiosk_types::{Clock, LocalZone, ManualClock, Satisfaction, ViewMode, ViewState};
use processor::{counts_for, ExportFormat, Exporter, ReportBuilder, ViewSelector};
use std::sync::Arc;

fn collector_at(clock: &Arc<ManualClock>) -> KioskCollector {
    KioskCollectorBuilder::new()
        .clock(clock.clone())
        .zone(LocalZone::utc())
        .build()
        .unwrap()
}

/// Submit one answer per lock window
fn submit_many(clock: &ManualClock, collector: &KioskCollector, n: usize) {
    for i in 0..n {
        collector.submit(Satisfaction::ALL[i % 3]).unwrap();
        clock.advance(Duration::milliseconds(2100));
    }
}

#[tokio::test]
async fn test_forty_five_records_paginate_into_three_pages() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
    ));
    let collector = collector_at(&clock);
    submit_many(&clock, &collector, 45);

    let builder = ReportBuilder::for_factory(collector.factory(), 20).unwrap();
    let records = collector.store().all();
    let mut view = ViewState::new(collector.factory().today());

    let first = builder.build(&records, &mut view);
    assert_eq!(first.total_filtered, 45);
    assert_eq!(first.page.total_pages, 3);
    assert_eq!(first.page.items.len(), 20);
    assert_eq!(first.page.items[0], collector.store().sorted()[0]);

    view.set_page(3, first.page.total_pages);
    let third = builder.build(&records, &mut view);
    assert_eq!(third.page.items.len(), 5);

    view.set_page(4, 4);
    let clamped = builder.build(&records, &mut view);
    assert_eq!(clamped.page.page, 3);
    assert_eq!(view.page(), 3);
    assert_eq!(clamped.page.items, third.page.items);

    let joined: Vec<_> = (1..=3)
        .flat_map(|page| builder.paginator().page(&collector.store().sorted(), page).items)
        .collect();
    assert_eq!(joined, collector.store().sorted());
}

#[tokio::test]
async fn test_first_submission_scenario() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
    ));
    let collector = collector_at(&clock);

    collector.submit(Satisfaction::VerySatisfied).unwrap();
    let counts = counts_for(&collector.store().all());
    assert_eq!(counts.as_array(), [1, 0, 0]);

    clock.advance(Duration::milliseconds(500));
    assert!(collector.submit(Satisfaction::Satisfied).is_err());

    clock.advance(Duration::milliseconds(1600));
    collector.submit(Satisfaction::Satisfied).unwrap();
    let counts = counts_for(&collector.store().all());
    assert_eq!(counts.as_array(), [1, 1, 0]);
    assert_eq!(counts.total(), 2);
}

#[tokio::test]
async fn test_today_view_across_midnight() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 0).unwrap(),
    ));
    let collector = collector_at(&clock);
    submit_many(&clock, &collector, 3);

    let selector = ViewSelector::from_factory(collector.factory());
    let before = selector.select_today(&collector.store().all());
    assert_eq!(before, selector.select_today(&collector.store().all()));
    assert_eq!(before.len(), 3);

    clock.set(Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 30).unwrap());
    submit_many(&clock, &collector, 2);

    let after = selector.select_today(&collector.store().all());
    assert_eq!(after.len(), 2);
    assert!(before.iter().all(|r| !after.contains(r)));
}

#[tokio::test]
async fn test_day_and_compare_views() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap(),
    ));
    let collector = collector_at(&clock);
    submit_many(&clock, &collector, 4);
    clock.set(Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap());
    submit_many(&clock, &collector, 2);

    let builder = ReportBuilder::for_factory(collector.factory(), 20).unwrap();
    let records = collector.store().all();
    let mut view = ViewState::new(collector.factory().today());

    view.set_mode(ViewMode::Day);
    view.set_day_a(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    let day = builder.build(&records, &mut view);
    assert_eq!(day.total_filtered, 4);
    assert_eq!(day.today.total, 2);

    view.set_mode(ViewMode::Compare);
    let compare = builder.build(&records, &mut view);
    assert_eq!(compare.total_filtered, 6);
    let stats = compare.compare.unwrap();
    assert_eq!(stats.day_a.total, 4);
    assert_eq!(stats.day_b.total, 2);
}

#[tokio::test]
async fn test_csv_export_parses_back() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
    ));
    let collector = collector_at(&clock);
    submit_many(&clock, &collector, 2);

    let factory = collector.factory();
    let tricky = factory.build("id \"with\" quotes, and comma", Satisfaction::Unsatisfied, clock.now());
    let mut records = collector.store().all();
    records.push(tricky.clone());

    let artifact = Exporter::default()
        .export(ExportFormat::Csv, &records, factory.today())
        .unwrap();
    assert_eq!(artifact.filename, "kiosk_feedback_2026-03-10.csv");
    assert!(!artifact.body.ends_with('\n'));

    let mut reader = csv::Reader::from_reader(artifact.body.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "satisfaction", "date", "time", "weekdayNumber", "iso"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    // the tricky record is the newest
    assert_eq!(&rows[0][0], tricky.id());
    assert_eq!(&rows[0][1], "insatisfeito");
    assert_eq!(&rows[0][2], tricky.date());
    assert_eq!(&rows[0][3], tricky.time());
    assert_eq!(&rows[0][4], "2");
    assert_eq!(&rows[0][5], tricky.iso());
}
