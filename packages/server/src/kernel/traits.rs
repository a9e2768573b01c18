use async_trait::async_trait;

use crate::common::keys::UserId;

/// Authenticated caller, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
}

/// Turns a bearer token into an identity. `Ok(None)` means the token is not
/// recognized; errors are provider failures.
#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Identity>>;
}

/// Development provider: the token is taken verbatim as the user's email.
/// Never wire this into a deployment that faces untrusted callers.
pub struct DevIdentityProvider;

#[async_trait]
impl BaseIdentityProvider for DevIdentityProvider {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Identity>> {
        let email = token.trim();
        if email.is_empty() || !email.contains('@') {
            return Ok(None);
        }
        let display_name = email.split('@').next().unwrap_or(email).to_string();
        Ok(Some(Identity {
            user_id: UserId::new(email),
            email: email.to_string(),
            display_name,
        }))
    }
}

/// Shared JSON cache for derived values.
#[async_trait]
pub trait BaseCacheService: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>>;
    async fn set(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dev_provider_derives_identity_from_email_token() {
        let identity = DevIdentityProvider
            .resolve("sam@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(identity.user_id, UserId::new("sam@example.com"));
        assert_eq!(identity.display_name, "sam");
    }

    #[tokio::test]
    async fn dev_provider_rejects_non_email_tokens() {
        assert!(DevIdentityProvider.resolve("").await.unwrap().is_none());
        assert!(DevIdentityProvider
            .resolve("not a token")
            .await
            .unwrap()
            .is_none());
    }
}
