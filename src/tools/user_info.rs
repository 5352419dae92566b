use async_trait::async_trait;
use serde_json::json;

use super::format::format_user;
use super::{status_message, Arguments, Content, Tool, ToolDescriptor, ToolError};
use crate::neodb::{CatalogApi, Endpoint};

const STATUS_MESSAGES: &[(u16, &str)] = &[(401, "Unauthorized")];

/// Fetches the profile of the user owning the access token.
pub struct UserInfo;

#[async_trait]
impl Tool for UserInfo {
    fn name(&self) -> &'static str {
        "get-user-info"
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: "Get current user's basic info",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        }
    }

    async fn run(
        &self,
        api: &dyn CatalogApi,
        _args: &Arguments,
    ) -> Result<Vec<Content>, ToolError> {
        let response = api.fetch(&Endpoint::me()).await;

        if !response.is_success() {
            return Ok(vec![Content::text(status_message(response.status, STATUS_MESSAGES))]);
        }

        let Some(user) = response.usable_body() else {
            log::warn!("UserInfo: empty profile payload");
            return Ok(vec![Content::text("Failed to retrieve user information")]);
        };

        log::info!("UserInfo: retrieved profile");
        Ok(vec![Content::text(format_user(user))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neodb::ApiResponse;
    use crate::tools::testing::RecordingApi;
    use serde_json::Value;

    async fn run_with(response: ApiResponse) -> (String, RecordingApi) {
        let api = RecordingApi::new(response);
        let content = UserInfo.run(&api, &Arguments::new()).await.unwrap();
        assert_eq!(content.len(), 1);
        (content[0].as_text().to_string(), api)
    }

    #[tokio::test]
    async fn test_partial_profile_uses_defaults() {
        let (text, api) = run_with(ApiResponse::ok(json!({"username": "alice"}))).await;
        assert!(text.contains("Username: alice"));
        assert!(text.contains("Display Name: Unknown"));
        assert!(text.contains("Email: Not provided"));
        assert_eq!(api.calls(), vec![Endpoint::me()]);
    }

    #[tokio::test]
    async fn test_full_profile() {
        let (text, _) = run_with(ApiResponse::ok(json!({
            "username": "alice",
            "display_name": "Alice",
            "email": "alice@example.org",
            "url": "https://neodb.social/users/alice/",
            "created_at": "2024-01-15T10:00:00Z"
        })))
        .await;
        assert!(text.starts_with("User Information:\n"));
        assert!(text.contains("Display Name: Alice\n"));
        assert!(text.contains("URL: https://neodb.social/users/alice/\n"));
        assert!(text.contains("Account Created: 2024-01-15T10:00:00Z\n"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (text, _) = run_with(ApiResponse::failed(401)).await;
        assert_eq!(text, "Unauthorized");
    }

    #[tokio::test]
    async fn test_other_status() {
        let (text, _) = run_with(ApiResponse::failed(403)).await;
        assert_eq!(text, "Request failed with status code: 403");

        let (text, _) = run_with(ApiResponse::failed(500)).await;
        assert_eq!(text, "Request failed with status code: 500");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let (text, _) = run_with(ApiResponse::ok(Value::Null)).await;
        assert_eq!(text, "Failed to retrieve user information");

        let (text, _) = run_with(ApiResponse::ok(json!({}))).await;
        assert_eq!(text, "Failed to retrieve user information");
    }
}
