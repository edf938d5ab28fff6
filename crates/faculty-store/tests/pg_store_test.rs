//! Integration tests for the `PostgreSQL` stores.
//!
//! `sqlx::test` creates a fresh database per test from `DATABASE_URL`.

use chrono::{Duration, TimeZone, Utc};
use faculty_core::catalog::{PreferenceStatus, TeachingPreference};
use faculty_core::notification::{Notification, NotificationCategory};
use faculty_core::repository::{
    InstructorDirectory, NotificationSink, PreferenceRepository, SubjectRepository,
};
use faculty_store::pg_catalog::{
    PgInstructorDirectory, PgPreferenceRepository, PgSubjectRepository,
};
use faculty_store::pg_notification_sink::PgNotificationSink;
use faculty_test_support::{FixedClock, SteppingClock};
use sqlx::PgPool;

async fn seed_instructor_and_subject(pool: &PgPool) -> (i64, i64) {
    let (instructor_id,): (i64,) = sqlx::query_as(
        "INSERT INTO instructors (full_name, email) VALUES ('Ada Lovelace', 'ada@faculty.test') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (subject_id,): (i64,) = sqlx::query_as(
        "INSERT INTO subjects (name, code, classroom, credits) VALUES ('Calculus', 'MAT-101', 'A-101', 4) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    (instructor_id, subject_id)
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sink_assigns_ids_and_lists_newest_first(pool: PgPool) {
    // Arrange
    let sink = PgNotificationSink::new(pool);
    let clock = SteppingClock::new(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        Duration::seconds(1),
    );

    // Act
    let first = sink
        .create(Notification::new(
            5,
            "first",
            "body",
            NotificationCategory::Success,
            &clock,
        ))
        .await
        .unwrap();
    let second = sink
        .create(Notification::new(
            5,
            "second",
            "body",
            NotificationCategory::Warning,
            &clock,
        ))
        .await
        .unwrap();

    // Assert
    assert!(first.id().is_some());
    let listed = sink.fetch_by_user(5).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), second.id());
    assert_eq!(listed[0].category(), NotificationCategory::Warning);
    assert_eq!(listed[1], first);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sink_breaks_timestamp_ties_by_id(pool: PgPool) {
    // Arrange
    let sink = PgNotificationSink::new(pool);
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let stored = sink
            .create(Notification::new(
                9,
                title,
                "body",
                NotificationCategory::Informational,
                &clock,
            ))
            .await
            .unwrap();
        ids.push(stored.id().unwrap());
    }

    // Act
    let listed: Vec<i64> = sink
        .fetch_unread(9)
        .await
        .unwrap()
        .iter()
        .filter_map(Notification::id)
        .collect();

    // Assert
    ids.reverse();
    assert_eq!(listed, ids);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sink_mark_read_and_delete(pool: PgPool) {
    // Arrange
    let sink = PgNotificationSink::new(pool);
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
    let stored = sink
        .create(Notification::new(
            5,
            "title",
            "body",
            NotificationCategory::Error,
            &clock,
        ))
        .await
        .unwrap();
    let id = stored.id().unwrap();

    // Act / Assert
    assert!(sink.mark_read(id).await.unwrap());
    assert!(sink.fetch_unread(5).await.unwrap().is_empty());
    assert!(!sink.mark_all_read(6).await.unwrap());
    assert!(sink.delete(id).await.unwrap());
    assert!(!sink.delete(id).await.unwrap());
    assert!(!sink.mark_read(id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_subject_assignment_round_trip(pool: PgPool) {
    // Arrange
    let (instructor_id, subject_id) = seed_instructor_and_subject(&pool).await;
    let subjects = PgSubjectRepository::new(pool.clone());
    let instructors = PgInstructorDirectory::new(pool);

    // Act
    let updated = subjects
        .assign_instructor(subject_id, Some(instructor_id))
        .await
        .unwrap();

    // Assert
    assert!(updated);
    let subject = subjects.find_by_id(subject_id).await.unwrap().unwrap();
    assert_eq!(subject.name, "Calculus");
    assert_eq!(subject.instructor_id, Some(instructor_id));
    assert!(instructors.instructor_exists(instructor_id).await.unwrap());
    assert!(!instructors.instructor_exists(instructor_id + 1).await.unwrap());
    assert!(
        !subjects
            .assign_instructor(subject_id + 1, None)
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_preference_create_and_review(pool: PgPool) {
    // Arrange
    let (instructor_id, subject_id) = seed_instructor_and_subject(&pool).await;
    let preferences = PgPreferenceRepository::new(pool);

    // Act
    let stored = preferences
        .create(TeachingPreference {
            id: None,
            instructor_id,
            subject_id,
            weekday: "Thursday".to_owned(),
            time_slot: "08:00-10:00".to_owned(),
            status: PreferenceStatus::Pending,
        })
        .await
        .unwrap();
    let id = stored.id.unwrap();
    let updated = preferences
        .update_status(id, PreferenceStatus::Rejected)
        .await
        .unwrap();

    // Assert
    assert!(updated);
    let reloaded = preferences.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, PreferenceStatus::Rejected);
    assert_eq!(reloaded.weekday, "Thursday");
    assert!(preferences.find_by_id(id + 1).await.unwrap().is_none());
}
