use serde::Serialize;

use crate::common::errors::ApiResult;
use crate::kernel::ServerDeps;

/// Speaker roster entry with session keys resolved to names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerData {
    pub name: String,
    pub session_names: Vec<String>,
}

/// Every known speaker and the names of their linked sessions.
pub async fn get_all_speakers(deps: &ServerDeps) -> ApiResult<Vec<SpeakerData>> {
    let speakers = deps.store.speakers().await?;

    let mut items = Vec::with_capacity(speakers.len());
    for speaker in speakers {
        let mut session_names = Vec::with_capacity(speaker.session_keys.len());
        for key in &speaker.session_keys {
            match deps.store.get_session(key).await? {
                Some(session) => session_names.push(session.name),
                None => {
                    tracing::warn!(session = %key.websafe(), "linked session no longer exists")
                }
            }
        }
        items.push(SpeakerData {
            name: speaker.name,
            session_names,
        });
    }
    Ok(items)
}
