use crate::common::errors::{ApiError, ApiResult};
use crate::domains::profile::data::ProfileUpdateInput;
use crate::domains::profile::models::{Profile, TeeShirtSize};
use crate::kernel::{Identity, ServerDeps};

/// Fetch the caller's profile, creating a default one on first access.
pub async fn get_or_create_profile(deps: &ServerDeps, identity: &Identity) -> ApiResult<Profile> {
    if let Some(profile) = deps.store.get_profile(&identity.user_id).await? {
        return Ok(profile);
    }

    let profile = Profile::new(identity);
    deps.store.put_profile(&profile).await?;
    tracing::debug!(user_id = %identity.user_id, "created profile on first access");
    Ok(profile)
}

/// Update user-modifiable profile fields and return the stored profile.
pub async fn save_profile(
    deps: &ServerDeps,
    identity: &Identity,
    input: ProfileUpdateInput,
) -> ApiResult<Profile> {
    let mut profile = get_or_create_profile(deps, identity).await?;

    if let Some(display_name) = input.display_name {
        if !display_name.trim().is_empty() {
            profile.display_name = display_name;
        }
    }

    if let Some(size) = input.tee_shirt_size {
        profile.tee_shirt_size = TeeShirtSize::parse(&size.to_uppercase())
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown tee shirt size: {size}")))?;
    }

    deps.store.put_profile(&profile).await?;
    Ok(profile)
}
