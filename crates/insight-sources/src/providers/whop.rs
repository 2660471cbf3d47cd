//! Whop company members directory client.

use crate::error::{Result, SourceError};
use crate::model::{non_empty, DirectoryMember};
use crate::source::{DirectoryLookup, MemberQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use insight_core::{ApiKey, DirectoryConfig, ScopeId};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const SOURCE_ID: &str = "whop";

const DEFAULT_FORBIDDEN_MESSAGE: &str =
    "Directory access denied: the API key is not authorized to read members of this company.";

/// Directory lookup against the Whop `members` endpoint.
pub struct WhopDirectoryClient {
    api_key: Option<ApiKey>,
    client: Client,
    base_url: String,
}

impl WhopDirectoryClient {
    /// Create a client against the public API with default settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: Option<ApiKey>) -> Result<Self> {
        Self::from_config(&DirectoryConfig {
            api_key,
            ..DirectoryConfig::default()
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SourceError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Pull a human-readable message out of an error body.
    fn error_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        non_empty(parsed.error.and_then(|e| e.message).or(parsed.message))
    }
}

#[derive(Debug, Deserialize)]
struct MembersPage {
    #[serde(default)]
    data: Vec<WhopMember>,
}

#[derive(Debug, Deserialize)]
struct WhopMember {
    id: String,
    #[serde(default)]
    joined_at: Option<DateTime<Utc>>,
    user: WhopUser,
}

#[derive(Debug, Deserialize)]
struct WhopUser {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl From<WhopMember> for DirectoryMember {
    fn from(member: WhopMember) -> Self {
        DirectoryMember {
            id: member.id,
            username: member.user.username.trim().to_string(),
            full_name: non_empty(member.user.name),
            email: non_empty(member.user.email),
            joined_at: member.joined_at,
        }
    }
}

#[async_trait]
impl DirectoryLookup for WhopDirectoryClient {
    async fn find_member(
        &self,
        scope: &ScopeId,
        query: &MemberQuery,
    ) -> Result<Option<DirectoryMember>> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::MissingCredentials {
                source_name: SOURCE_ID.to_string(),
            });
        };

        let mut request = self
            .client
            .get(format!("{}/members", self.base_url))
            .bearer_auth(api_key.expose())
            .query(&[("company_id", scope.as_str()), ("first", "1")]);

        request = match query {
            MemberQuery::Text(text) => request.query(&[("query", text.as_str())]),
            MemberQuery::Ids(ids) => ids
                .iter()
                .fold(request, |req, id| req.query(&[("user_ids", id.as_str())])),
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::PermissionDenied {
                source_name: SOURCE_ID.to_string(),
                message: Self::error_message(&body)
                    .unwrap_or_else(|| DEFAULT_FORBIDDEN_MESSAGE.to_string()),
            });
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::ApiError {
                source_name: SOURCE_ID.to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let page: MembersPage = response.json().await.map_err(|e| SourceError::ParseError {
            source_name: SOURCE_ID.to_string(),
            message: format!("Failed to parse response: {e}"),
        })?;

        Ok(page.data.into_iter().next().map(DirectoryMember::from))
    }

    fn source_id(&self) -> &str {
        SOURCE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_mapping() {
        let json = r#"{
            "data": [{
                "id": "mber_123",
                "joined_at": "2024-03-01T12:00:00Z",
                "user": {"id": "user_1", "name": " Ada ", "username": "ada", "email": ""}
            }]
        }"#;
        let page: MembersPage = serde_json::from_str(json).expect("parse members page");
        let member = DirectoryMember::from(page.data.into_iter().next().expect("one member"));

        assert_eq!(member.id, "mber_123");
        assert_eq!(member.username, "ada");
        assert_eq!(member.full_name.as_deref(), Some("Ada"));
        assert_eq!(member.email, None);
        assert_eq!(
            member.joined_at.map(|t| t.format("%Y-%m-%d").to_string()),
            Some("2024-03-01".to_string())
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            WhopDirectoryClient::error_message(r#"{"error":{"message":"missing scope"}}"#),
            Some("missing scope".to_string())
        );
        assert_eq!(
            WhopDirectoryClient::error_message(r#"{"message":"nope"}"#),
            Some("nope".to_string())
        );
        assert_eq!(WhopDirectoryClient::error_message("<html>"), None);
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = WhopDirectoryClient::new(None).expect("create client");
        let scope = ScopeId::new("biz_test").expect("valid scope");
        let err = client
            .find_member(&scope, &MemberQuery::Text("ada".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingCredentials { .. }));
    }
}
