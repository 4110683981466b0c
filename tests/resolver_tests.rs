use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use trip_planner::{
    DatasetError, DateRange, HolidayEntry, HolidayOrigin, HolidayRange, HolidaySource, HolidaySourceError,
    LocalHolidayTable, RestDayResolver,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

enum Stub {
    Entries(Vec<HolidayEntry>),
    Status(u16),
    Broken,
}

struct StubSource {
    reply: Stub,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    fn new(reply: Stub) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl HolidaySource for StubSource {
    async fn fetch(&self, _range: DateRange) -> Result<Vec<HolidayEntry>, HolidaySourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Stub::Entries(entries) => Ok(entries.clone()),
            Stub::Status(code) => Err(HolidaySourceError::Status(*code)),
            Stub::Broken => Err(HolidaySourceError::Io(std::io::Error::other("unreachable"))),
        }
    }
}

fn table() -> LocalHolidayTable {
    LocalHolidayTable::from_ranges(vec![
        HolidayRange::new("Pesach", d(2025, 4, 13), d(2025, 4, 20)),
        HolidayRange::new("Purim", d(2025, 3, 14), d(2025, 3, 14)),
        HolidayRange::new("Shavuot", d(2025, 6, 2), d(2025, 6, 3)),
    ])
}

#[tokio::test]
async fn remote_holidays_are_used_when_available() {
    let (remote, _) = StubSource::new(Stub::Entries(vec![HolidayEntry::new(
        d(2025, 6, 2),
        "Shavuot I",
    )]));
    let (local, local_calls) = StubSource::new(Stub::Entries(vec![HolidayEntry::new(
        d(2025, 6, 4),
        "Never used",
    )]));
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(local));

    let rest = resolver.resolve(d(2025, 6, 1), d(2025, 6, 8)).await;

    assert_eq!(rest.origin(), HolidayOrigin::Remote);
    assert_eq!(rest.holidays(), &[HolidayEntry::new(d(2025, 6, 2), "Shavuot I")]);
    assert_eq!(local_calls.load(Ordering::SeqCst), 0);
    assert!(rest.is_shabbat(d(2025, 6, 6)));
    assert!(rest.is_shabbat(d(2025, 6, 7)));
}

#[tokio::test]
async fn remote_failure_falls_back_to_local_table_only() {
    let (remote, remote_calls) = StubSource::new(Stub::Broken);
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(table()));

    let rest = resolver.resolve(d(2025, 4, 10), d(2025, 4, 25)).await;

    assert_eq!(remote_calls.load(Ordering::SeqCst), 1);
    assert_eq!(rest.origin(), HolidayOrigin::Fallback);
    assert_eq!(rest.holidays().len(), 8);
    assert!(rest.holidays().iter().all(|h| h.title == "Pesach"));
    assert_eq!(rest.holidays().first().unwrap().date, d(2025, 4, 13));
    assert_eq!(rest.holidays().last().unwrap().date, d(2025, 4, 20));
}

#[tokio::test]
async fn non_success_status_falls_back() {
    let (remote, _) = StubSource::new(Stub::Status(503));
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(table()));

    let rest = resolver.resolve(d(2025, 3, 10), d(2025, 3, 20)).await;

    assert_eq!(rest.origin(), HolidayOrigin::Fallback);
    assert_eq!(rest.holidays(), &[HolidayEntry::new(d(2025, 3, 14), "Purim")]);
}

#[tokio::test]
async fn empty_remote_result_falls_back() {
    let (remote, _) = StubSource::new(Stub::Entries(Vec::new()));
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(table()));

    let rest = resolver.resolve(d(2025, 6, 1), d(2025, 6, 8)).await;

    assert_eq!(rest.origin(), HolidayOrigin::Fallback);
    assert_eq!(
        rest.holidays(),
        &[
            HolidayEntry::new(d(2025, 6, 2), "Shavuot"),
            HolidayEntry::new(d(2025, 6, 3), "Shavuot"),
        ]
    );
}

#[tokio::test]
async fn both_sources_failing_yields_empty_holidays() {
    let (remote, _) = StubSource::new(Stub::Broken);
    let (local, local_calls) = StubSource::new(Stub::Broken);
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(local));

    let rest = resolver.resolve(d(2025, 6, 1), d(2025, 6, 8)).await;

    assert_eq!(local_calls.load(Ordering::SeqCst), 1);
    assert_eq!(rest.origin(), HolidayOrigin::Empty);
    assert!(rest.holidays().is_empty());
    // Sabbath is still computed locally.
    assert_eq!(rest.shabbat().len(), 2);
}

#[tokio::test]
async fn missing_local_file_yields_empty_holidays() {
    let (remote, _) = StubSource::new(Stub::Status(500));
    let local = LocalHolidayTable::from_path("/definitely/not/here/holidays.json");
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(local));

    let rest = resolver.resolve(d(2025, 4, 1), d(2025, 4, 30)).await;

    assert_eq!(rest.origin(), HolidayOrigin::Empty);
    assert!(rest.holidays().is_empty());
}

#[tokio::test]
async fn local_table_only_counts_holidays_starting_in_range() {
    let local = table();

    // Pesach starts before the range and is ignored even though it overlaps.
    let overlapping = local
        .fetch(DateRange::new(d(2025, 4, 15), d(2025, 4, 18)))
        .await
        .unwrap();
    assert!(overlapping.is_empty());

    // A holiday starting on the last trip day is expanded past the trip end.
    let tail = local
        .fetch(DateRange::new(d(2025, 4, 10), d(2025, 4, 13)))
        .await
        .unwrap();
    assert_eq!(tail.len(), 8);
    assert_eq!(tail.last().unwrap().date, d(2025, 4, 20));
}

#[tokio::test]
async fn local_table_reads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");
    std::fs::write(
        &path,
        r#"[{"name":"Sukkot","start":"2025-10-07","end":"2025-10-09"}]"#,
    )
    .unwrap();

    let local = LocalHolidayTable::from_path(&path);
    let entries = local
        .fetch(DateRange::new(d(2025, 10, 1), d(2025, 10, 31)))
        .await
        .unwrap();

    assert_eq!(
        entries,
        vec![
            HolidayEntry::new(d(2025, 10, 7), "Sukkot"),
            HolidayEntry::new(d(2025, 10, 8), "Sukkot"),
            HolidayEntry::new(d(2025, 10, 9), "Sukkot"),
        ]
    );
}

#[tokio::test]
async fn malformed_local_file_is_an_error_for_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");
    std::fs::write(&path, "not json").unwrap();

    let local = LocalHolidayTable::from_path(&path);
    let result = local
        .fetch(DateRange::new(d(2025, 10, 1), d(2025, 10, 31)))
        .await;
    assert!(matches!(
        result,
        Err(HolidaySourceError::Table(DatasetError::Json(_)))
    ));
}

#[tokio::test]
async fn local_file_with_backwards_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");
    std::fs::write(
        &path,
        r#"[
            {"name":"Sukkot","start":"2025-10-07","end":"2025-10-13"},
            {"name":"Backwards","start":"2025-10-20","end":"2025-10-18"}
        ]"#,
    )
    .unwrap();

    let local = LocalHolidayTable::from_path(&path);
    let result = local
        .fetch(DateRange::new(d(2025, 10, 1), d(2025, 10, 31)))
        .await;
    assert!(matches!(
        result,
        Err(HolidaySourceError::Table(DatasetError::InvalidData(_)))
    ));

    let (remote, _) = StubSource::new(Stub::Status(503));
    let resolver = RestDayResolver::new(Box::new(remote), Box::new(local));
    let rest = resolver.resolve(d(2025, 10, 1), d(2025, 10, 31)).await;
    assert_eq!(rest.origin(), HolidayOrigin::Empty);
    assert!(rest.holidays().is_empty());
}
