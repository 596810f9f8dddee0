use crate::config::IdentityProviderConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

/// A user account held by the identity provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalIdentity {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Creates user accounts for participants that are seen for the first time
#[async_trait::async_trait]
pub trait IIdentityProvider: Send + Sync {
    async fn create_user(&self, email: &str, name: &str) -> anyhow::Result<ExternalIdentity>;
}

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    name: &'a str,
    email_verified: bool,
    connection: &'a str,
}

/// Provisions users through the management api of the identity provider
pub struct ManagementApiIdentityProvider {
    client: Client,
    config: IdentityProviderConfig,
}

impl ManagementApiIdentityProvider {
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn users_url(&self) -> String {
        format!("https://{}/api/v2/users", self.config.domain)
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for ManagementApiIdentityProvider {
    async fn create_user(&self, email: &str, name: &str) -> anyhow::Result<ExternalIdentity> {
        let body = CreateUserRequest {
            email,
            name,
            email_verified: true,
            connection: &self.config.connection,
        };
        let res = match self
            .client
            .post(&self.users_url())
            .header("authorization", format!("Bearer {}", self.config.token))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Identity provider create user error. Error message: {:?}",
                    e
                );
                return Err(anyhow::Error::new(e));
            }
        };

        let res = res.error_for_status().map_err(|e| {
            error!(
                "[Unexpected Status] Identity provider create user error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })?;
        res.json::<ExternalIdentity>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Identity provider create user error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })
    }
}

/// Hands out identities without any remote account, used when no
/// identity provider is configured
pub struct LocalIdentityProvider {}

#[async_trait::async_trait]
impl IIdentityProvider for LocalIdentityProvider {
    async fn create_user(&self, email: &str, name: &str) -> anyhow::Result<ExternalIdentity> {
        Ok(ExternalIdentity {
            user_id: format!("local|{}", Uuid::new_v4()),
            email: email.to_string(),
            name: Some(name.to_string()),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn local_identities_are_unique() {
        let provider = LocalIdentityProvider {};
        let a = provider.create_user("a@example.com", "A").await.unwrap();
        let b = provider.create_user("a@example.com", "A").await.unwrap();
        assert!(a.user_id.starts_with("local|"));
        assert_ne!(a.user_id, b.user_id);
        assert_eq!(a.email, "a@example.com");
    }

    #[test]
    fn parses_management_api_user() {
        let user: ExternalIdentity = serde_json::from_str(
            r#"{"user_id":"email|123","email":"john@example.com","name":"John","email_verified":true}"#,
        )
        .unwrap();
        assert_eq!(user.user_id, "email|123");
        assert_eq!(user.name.as_deref(), Some("John"));
    }
}
