mod common;

use common::{identity, seed_conference, seed_session, TestDependencies};
use server_core::common::errors::ApiError;
use server_core::domains::session::actions::{add_speaker, create_session, list_sessions};
use server_core::domains::session::data::{CreateSessionInput, SessionFilterInput};
use server_core::domains::session::models::{SessionRole, SessionType, DEFAULT_DURATION_MINUTES};
use server_core::domains::speaker::actions::get_all_speakers;
use server_core::domains::speaker::featured::RefreshFeaturedSpeaker;
use server_core::kernel::jobs::JobCommand;

#[tokio::test]
async fn only_the_organizer_can_create_sessions() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");
    let interloper = identity("interloper@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;

    let err = create_session(
        &deps,
        &interloper,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Sneaky".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(message)
        if message == "Only the owner of the conference can create new sessions."));
}

#[tokio::test]
async fn session_name_is_required() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;

    let err = create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(message)
        if message == "Session 'sessionName' field required"));
}

#[tokio::test]
async fn new_sessions_get_sensible_defaults() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    let session = seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Sam").await;

    assert_eq!(session.type_of_session, SessionType::Tbd);
    assert_eq!(session.role, SessionRole::Speaker);
    assert_eq!(session.duration, DEFAULT_DURATION_MINUTES);
    assert_eq!(session.speaker.as_deref(), Some("Sam"));
}

#[tokio::test]
async fn session_speaker_is_required() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;

    let err = create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Intro".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(message)
        if message == "Session 'speaker' field required"));
}

#[tokio::test]
async fn invalid_dates_and_enums_are_rejected() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;

    let err = create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Talk".to_string()),
            speaker: Some("Sam".to_string()),
            date: Some("next tuesday".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let err = create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Talk".to_string()),
            speaker: Some("Sam".to_string()),
            type_of_session: Some("OPEN_MIC".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn reusing_a_session_name_updates_instead_of_duplicating() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    let original =
        seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Niki").await;

    // A new speaker on an existing name updates the stored session.
    let updated = create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Intro".to_string()),
            speaker: Some("Ana".to_string()),
            highlights: Some("now with live coding".to_string()),
            duration: Some(90),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.websafe_session_key, original.websafe_session_key);
    assert_eq!(updated.duration, 90);
    assert_eq!(updated.speaker.as_deref(), Some("Ana"));

    let all = list_sessions(
        &deps,
        &conf.websafe_conference_key,
        SessionFilterInput::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn assigning_a_speaker_links_them_and_queues_a_refresh() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        "Ownership",
        "Niki",
    )
    .await;

    let jobs = harness.jobs.submitted();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_type, RefreshFeaturedSpeaker::JOB_TYPE);
    let command: RefreshFeaturedSpeaker =
        serde_json::from_value(jobs[0].params.clone()).unwrap();
    assert_eq!(command.speaker, "Niki");
    assert_eq!(command.websafe_conference_key, conf.websafe_conference_key);

    let speakers = get_all_speakers(&deps).await.unwrap();
    assert_eq!(speakers.len(), 1);
    assert_eq!(speakers[0].name, "Niki");
    assert_eq!(speakers[0].session_names, vec!["Ownership".to_string()]);
}

#[tokio::test]
async fn resubmitting_the_same_speaker_does_not_requeue() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        "Ownership",
        "Niki",
    )
    .await;
    // Same name, same speaker: a plain update.
    seed_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        "Ownership",
        "Niki",
    )
    .await;

    assert_eq!(harness.jobs.submitted().len(), 1);
}

#[tokio::test]
async fn adding_a_speaker_twice_is_a_conflict() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    let session = seed_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        "Ownership",
        "Niki",
    )
    .await;

    let err = add_speaker(&deps, "Niki", &session.websafe_session_key)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(message)
        if message == "Speaker is already part of session"));
}

#[tokio::test]
async fn listings_can_be_narrowed_by_filters() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Niki").await;
    create_session(
        &deps,
        &organizer,
        &conf.websafe_conference_key,
        CreateSessionInput {
            session_name: Some("Deep Dive".to_string()),
            type_of_session: Some("WORKSHOP".to_string()),
            speaker: Some("Ana".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let workshops = list_sessions(
        &deps,
        &conf.websafe_conference_key,
        SessionFilterInput {
            type_of_session: Some("WORKSHOP".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(workshops.len(), 1);
    assert_eq!(workshops[0].name, "Deep Dive");

    let by_speaker = list_sessions(
        &deps,
        &conf.websafe_conference_key,
        SessionFilterInput {
            speaker: Some("Niki".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_speaker.len(), 1);
    assert_eq!(by_speaker[0].name, "Intro");
}
