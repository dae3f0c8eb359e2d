use std::fs;

use chrono::{Duration, TimeZone, Utc};
use tempfile::tempdir;

use voyage_core::payload::seal_document;
use voyage_core::store::{AUTH_EXPIRY_KEY, TRIP_CACHE_KEY};
use voyage_core::{
    DayPlan, FileEnvelopeSource, FileStore, KeyValueStore, LegacyDay, LegacyItem, SessionStore,
    SubmitOutcome, TripCalendar, TripDocument, UnlockState, Unlocker, VoyageError,
};

const PASSPHRASE: &str = "sunset-over-little-venice";

fn legacy_trip() -> TripDocument {
    let day = |location: &str, title: &str| LegacyDay {
        location: Some(location.to_string()),
        items: vec![LegacyItem {
            time: Some("19:00".to_string()),
            title: Some(title.to_string()),
            detail: Some("Booked".to_string()),
        }],
    };
    TripDocument {
        trip_title: "Honeymoon".to_string(),
        trip_date_range: "May 14 - May 28, 2026".to_string(),
        itinerary: Some(vec![
            day("Marrakech", "Jemaa el-Fnaa"),
            day("Mykonos", "Little Venice"),
            day("Marrakech", "Majorelle"),
        ]),
        ..Default::default()
    }
}

fn write_envelope(dir: &std::path::Path, doc: &TripDocument) -> std::path::PathBuf {
    let envelope = seal_document(doc, PASSPHRASE, 2_000).expect("seal should succeed");
    let path = dir.join("trip.enc.json");
    fs::write(&path, serde_json::to_vec_pretty(&envelope.to_json()).unwrap())
        .expect("write should succeed");
    path
}

#[tokio::test]
async fn test_unlock_from_file_then_resume_from_cache() {
    let dir = tempdir().unwrap();
    let envelope_path = write_envelope(dir.path(), &legacy_trip());
    let data_dir = dir.path().join("data");
    let now = Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap();

    let mut first = Unlocker::new(
        Box::new(FileEnvelopeSource::new(&envelope_path)),
        SessionStore::new(FileStore::open(&data_dir).unwrap()),
        TripCalendar::default(),
    );
    first.form_mut().set_passphrase(PASSPHRASE);
    first.form_mut().remember = true;
    assert!(matches!(first.submit(now).await, SubmitOutcome::Unlocked));

    let (document, days) = first.into_unlocked().expect("should be unlocked");
    assert_eq!(document, legacy_trip());
    let dates: Vec<_> = days.iter().map(|day| day.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-05-15", "2026-05-21", "2026-05-22"]);

    // The envelope is gone; a remembered session must not need it.
    fs::remove_file(&envelope_path).unwrap();

    let mut second = Unlocker::new(
        Box::new(FileEnvelopeSource::new(&envelope_path)),
        SessionStore::new(FileStore::open(&data_dir).unwrap()),
        TripCalendar::default(),
    );
    assert!(second.resume(now + Duration::days(29)).is_unlocked());

    let mut third = Unlocker::new(
        Box::new(FileEnvelopeSource::new(&envelope_path)),
        SessionStore::new(FileStore::open(&data_dir).unwrap()),
        TripCalendar::default(),
    );
    assert!(!third.resume(now + Duration::days(30)).is_unlocked());
}

#[tokio::test]
async fn test_missing_envelope_reports_unavailable() {
    let dir = tempdir().unwrap();
    let mut unlocker = Unlocker::new(
        Box::new(FileEnvelopeSource::new(dir.path().join("absent.json"))),
        SessionStore::new(FileStore::open(dir.path().join("data")).unwrap()),
        TripCalendar::default(),
    );
    unlocker.form_mut().set_passphrase(PASSPHRASE);

    let outcome = unlocker.submit(Utc::now()).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(VoyageError::PayloadUnavailable(_))
    ));
    assert_eq!(
        unlocker.state(),
        &UnlockState::Locked {
            status: "Could not load encrypted trip data.".to_string()
        }
    );
}

#[tokio::test]
async fn test_wrong_passphrase_leaves_disk_untouched() {
    let dir = tempdir().unwrap();
    let envelope_path = write_envelope(dir.path(), &legacy_trip());
    let store = FileStore::open(dir.path().join("data")).unwrap();

    let mut unlocker = Unlocker::new(
        Box::new(FileEnvelopeSource::new(&envelope_path)),
        SessionStore::new(store.clone()),
        TripCalendar::default(),
    );
    unlocker.form_mut().set_passphrase("not-the-passphrase");
    unlocker.form_mut().remember = true;

    assert!(matches!(
        unlocker.submit(Utc::now()).await,
        SubmitOutcome::Failed(VoyageError::IncorrectPassphrase)
    ));
    assert_eq!(store.get(TRIP_CACHE_KEY).unwrap(), None);
    assert_eq!(store.get(AUTH_EXPIRY_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_cache_file_is_no_cache() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    fs::write(dir.path().join(format!("{}.json", TRIP_CACHE_KEY)), "{\"tripTitle\": ").unwrap();

    let session = SessionStore::new(store);
    assert!(session.load().is_none());
}

#[test]
fn test_dated_cache_round_trips_through_files() {
    let dir = tempdir().unwrap();
    let session = SessionStore::new(FileStore::open(dir.path()).unwrap());
    let doc = TripDocument {
        trip_title: "Honeymoon".to_string(),
        itinerary_days: Some(vec![DayPlan {
            date: "2026-05-21".to_string(),
            ..Default::default()
        }]),
        ..Default::default()
    };

    session.save(&doc).unwrap();
    assert_eq!(session.load(), Some(doc));
}
