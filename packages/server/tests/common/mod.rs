//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use server_core::domains::conference::actions::create_conference;
use server_core::domains::conference::data::{ConferenceData, CreateConferenceInput};
use server_core::domains::session::actions::create_session;
use server_core::domains::session::data::{CreateSessionInput, SessionData};
use server_core::kernel::{Identity, ServerDeps};

pub use server_core::kernel::test_dependencies::{identity, TestDependencies};

pub async fn seed_conference(
    deps: &ServerDeps,
    organizer: &Identity,
    name: &str,
    max_attendees: i32,
) -> ConferenceData {
    create_conference(
        deps,
        organizer,
        CreateConferenceInput {
            name: Some(name.to_string()),
            max_attendees: Some(max_attendees),
            ..Default::default()
        },
    )
    .await
    .expect("seed conference")
}

pub async fn seed_session(
    deps: &ServerDeps,
    organizer: &Identity,
    websafe_conference_key: &str,
    name: &str,
    speaker: &str,
) -> SessionData {
    create_session(
        deps,
        organizer,
        websafe_conference_key,
        CreateSessionInput {
            session_name: Some(name.to_string()),
            speaker: Some(speaker.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("seed session")
}
