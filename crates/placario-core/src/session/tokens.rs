//! Token acquisition and renewal against the management API.
//!
//! 1. Login is a password-grant form POST to the login endpoint
//! 2. Renewal is a refresh-grant form POST to the renew endpoint
//! 3. Tokens are stored in the OS keyring between runs

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>, // Unix timestamp
    pub token_type: String,
    pub scope: Option<String>,
    /// Account the tokens were issued to. Filled in by the context at
    /// login; the token endpoint itself does not echo it.
    #[serde(default)]
    pub account: Option<String>,
}

/// Endpoints of the management API's auth surface.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub login_path: String,
    pub renew_path: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn login_url(&self) -> Result<String, AuthError> {
        self.join(&self.login_path)
    }

    pub fn renew_url(&self) -> Result<String, AuthError> {
        self.join(&self.renew_path)
    }

    fn join(&self, path: &str) -> Result<String, AuthError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{}: {e}", self.base_url)))?;
        let url = base
            .join(path)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{path}: {e}")))?;
        Ok(url.to_string())
    }
}

/// Authenticate with username/password. Returns fresh tokens.
pub async fn login(
    config: &ApiConfig,
    username: &str,
    password: &str,
) -> Result<SessionTokens, AuthError> {
    let params = [
        ("grant_type", "password"),
        ("username", username),
        ("password", password),
    ];

    let body = post_form(config, &config.login_url()?, &params).await?;

    if let Some(error) = body.get("error") {
        return Err(AuthError::LoginFailed(describe_error(&body, error)));
    }

    Ok(parse_token_response(&body))
}

/// Extend a session using its refresh token.
pub async fn renew(config: &ApiConfig, refresh: &str) -> Result<SessionTokens, AuthError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh),
    ];

    let body = post_form(config, &config.renew_url()?, &params).await?;

    if let Some(error) = body.get("error") {
        return Err(AuthError::RenewFailed(describe_error(&body, error)));
    }

    let mut tokens = parse_token_response(&body);
    // Endpoints may omit the refresh token on renewal; keep the old one.
    if tokens.refresh_token.is_none() {
        tokens.refresh_token = Some(refresh.to_string());
    }
    Ok(tokens)
}

/// Check whether stored tokens are stale (with 60s buffer).
pub fn is_expired(tokens: &SessionTokens) -> bool {
    match tokens.expires_at {
        Some(exp) => chrono::Utc::now().timestamp() > exp - 60,
        None => false,
    }
}

async fn post_form(
    config: &ApiConfig,
    url: &str,
    params: &[(&str, &str)],
) -> Result<serde_json::Value, AuthError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    let resp = client.post(url).form(params).send().await?;
    Ok(resp.json().await?)
}

fn describe_error(body: &serde_json::Value, error: &serde_json::Value) -> String {
    match body.get("error_description").and_then(|d| d.as_str()) {
        Some(description) => format!("{error}: {description}"),
        None => error.to_string(),
    }
}

fn parse_token_response(body: &serde_json::Value) -> SessionTokens {
    let expires_in = body.get("expires_in").and_then(|v| v.as_i64());
    let expires_at = expires_in.map(|ei| chrono::Utc::now().timestamp() + ei);

    SessionTokens {
        access_token: body["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: body
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .map(String::from),
        expires_at,
        token_type: body["token_type"]
            .as_str()
            .unwrap_or("Bearer")
            .to_string(),
        scope: body.get("scope").and_then(|v| v.as_str()).map(String::from),
        account: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            login_path: "/auth/login".to_string(),
            renew_path: "/auth/refresh".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn login_parses_tokens_and_expiry() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access_token": "acc-1",
                    "refresh_token": "ref-1",
                    "expires_in": 900,
                    "token_type": "Bearer",
                    "scope": "placas"
                }"#,
            )
            .create_async()
            .await;

        let before = chrono::Utc::now().timestamp();
        let tokens = login(&config(&server.url()), "alice", "s3cret")
            .await
            .unwrap();

        assert_eq!(tokens.access_token, "acc-1");
        assert_eq!(tokens.refresh_token.as_deref(), Some("ref-1"));
        assert_eq!(tokens.scope.as_deref(), Some("placas"));
        let exp = tokens.expires_at.unwrap();
        assert!(exp >= before + 900 && exp <= before + 902);
    }

    #[tokio::test]
    async fn login_error_payload_surfaces_as_login_failed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": "invalid_grant", "error_description": "bad credentials"}"#,
            )
            .create_async()
            .await;

        let err = login(&config(&server.url()), "alice", "wrong")
            .await
            .unwrap_err();
        match err {
            AuthError::LoginFailed(msg) => assert!(msg.contains("bad credentials")),
            other => panic!("Expected LoginFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn renew_keeps_old_refresh_token_when_omitted() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access_token": "acc-2",
                    "expires_in": 900,
                    "token_type": "Bearer"
                }"#,
            )
            .create_async()
            .await;

        let tokens = renew(&config(&server.url()), "ref-1").await.unwrap();
        assert_eq!(tokens.access_token, "acc-2");
        assert_eq!(tokens.refresh_token.as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn renew_error_payload_surfaces_as_renew_failed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_token"}"#)
            .create_async()
            .await;

        let err = renew(&config(&server.url()), "stale").await.unwrap_err();
        assert!(matches!(err, AuthError::RenewFailed(_)));
    }

    #[test]
    fn expiry_check_honors_buffer() {
        let now = chrono::Utc::now().timestamp();
        let fresh = SessionTokens {
            access_token: "a".into(),
            refresh_token: None,
            expires_at: Some(now + 900),
            token_type: "Bearer".into(),
            scope: None,
            account: None,
        };
        assert!(!is_expired(&fresh));

        // Inside the 60s buffer counts as expired.
        let nearly = SessionTokens {
            expires_at: Some(now + 30),
            ..fresh.clone()
        };
        assert!(is_expired(&nearly));

        // No expiry recorded means never stale.
        let open = SessionTokens {
            expires_at: None,
            ..fresh
        };
        assert!(!is_expired(&open));
    }

    #[test]
    fn endpoint_join_rejects_garbage_base_url() {
        let bad = config("not a url");
        assert!(matches!(
            bad.login_url(),
            Err(AuthError::InvalidEndpoint(_))
        ));
    }
}
