mod common;

use common::{identity, seed_conference, seed_session, TestDependencies};
use server_core::domains::conference::announcements::{
    get_announcement, refresh_announcement, ANNOUNCEMENTS_CACHE_KEY,
};
use server_core::domains::conference::registration::register_for_conference;
use server_core::domains::speaker::featured::{
    get_featured_speaker, refresh_featured_speaker, FeaturedSpeaker,
};
use server_core::kernel::jobs::{JobHandler, JobRegistry};
use server_core::common::keys::ConferenceKey;
use server_core::kernel::BaseCacheService;

#[tokio::test]
async fn announcement_names_only_nearly_sold_out_conferences() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    seed_conference(&deps, &organizer, "Almost Full", 3).await;
    seed_conference(&deps, &organizer, "Roomy", 50).await;
    let sold_out = seed_conference(&deps, &organizer, "Sold Out", 1).await;
    register_for_conference(
        &deps,
        &identity("a@example.com"),
        &sold_out.websafe_conference_key,
    )
    .await
    .unwrap();

    let announcement = refresh_announcement(&deps).await.unwrap();
    assert_eq!(
        announcement,
        "Last chance to attend! The following conferences are nearly sold out: Almost Full"
    );
    assert_eq!(get_announcement(&deps).await.unwrap(), announcement);
}

#[tokio::test]
async fn announcement_lists_every_qualifying_conference() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    seed_conference(&deps, &organizer, "First", 2).await;
    seed_conference(&deps, &organizer, "Second", 4).await;

    let announcement = refresh_announcement(&deps).await.unwrap();
    assert_eq!(
        announcement,
        "Last chance to attend! The following conferences are nearly sold out: First, Second"
    );
}

#[tokio::test]
async fn announcement_clears_when_nothing_qualifies() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    seed_conference(&deps, &organizer, "Roomy", 50).await;
    harness
        .cache
        .set(ANNOUNCEMENTS_CACHE_KEY, serde_json::json!("stale text"))
        .await
        .unwrap();

    let announcement = refresh_announcement(&deps).await.unwrap();
    assert_eq!(announcement, "");
    assert_eq!(get_announcement(&deps).await.unwrap(), "");
    assert!(harness
        .cache
        .get(ANNOUNCEMENTS_CACHE_KEY)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn a_speaker_with_two_sessions_becomes_featured() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Niki").await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Advanced", "Niki").await;

    let conf_key = ConferenceKey::from_websafe(&conf.websafe_conference_key).unwrap();
    refresh_featured_speaker(&deps, "Niki", &conf_key).await.unwrap();

    let featured = get_featured_speaker(&deps).await.unwrap().unwrap();
    assert_eq!(featured.speaker, "Niki");
    assert_eq!(
        featured.session_names,
        vec!["Intro".to_string(), "Advanced".to_string()]
    );
}

#[tokio::test]
async fn a_single_session_speaker_leaves_the_cache_untouched() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Niki").await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Advanced", "Niki").await;

    let conf_key = ConferenceKey::from_websafe(&conf.websafe_conference_key).unwrap();
    refresh_featured_speaker(&deps, "Niki", &conf_key).await.unwrap();

    // Ana only has one session; the previous entry stays.
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Panel", "Ana").await;
    refresh_featured_speaker(&deps, "Ana", &conf_key).await.unwrap();

    let featured = get_featured_speaker(&deps).await.unwrap().unwrap();
    assert_eq!(featured.speaker, "Niki");
}

#[tokio::test]
async fn speaker_sessions_in_other_conferences_do_not_count() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf_a = seed_conference(&deps, &organizer, "Conf A", 5).await;
    let conf_b = seed_conference(&deps, &organizer, "Conf B", 5).await;
    seed_session(&deps, &organizer, &conf_a.websafe_conference_key, "Intro", "Niki").await;
    seed_session(&deps, &organizer, &conf_b.websafe_conference_key, "Advanced", "Niki").await;

    refresh_featured_speaker(
        &deps,
        "Niki",
        &ConferenceKey::from_websafe(&conf_a.websafe_conference_key).unwrap(),
    )
        .await
        .unwrap();
    assert!(get_featured_speaker(&deps).await.unwrap().is_none());
}

#[tokio::test]
async fn queued_refresh_jobs_run_through_the_registry() {
    let harness = TestDependencies::new();
    let deps = harness.deps();
    let organizer = identity("organizer@example.com");

    let conf = seed_conference(&deps, &organizer, "RustConf", 5).await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Intro", "Niki").await;
    seed_session(&deps, &organizer, &conf.websafe_conference_key, "Advanced", "Niki").await;

    let mut registry = JobRegistry::new();
    server_core::server::app::register_domain_jobs(&mut registry, &deps);

    // Replay the spied jobs exactly as the runner would.
    for job in harness.jobs.submitted() {
        let handler = registry.get(&job.job_type).expect("handler registered");
        handler.execute(job.params).await.unwrap();
    }

    let featured: FeaturedSpeaker = get_featured_speaker(&deps).await.unwrap().unwrap();
    assert_eq!(featured.speaker, "Niki");
    assert_eq!(featured.session_names.len(), 2);
}
