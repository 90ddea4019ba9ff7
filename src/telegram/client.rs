//! Minimal Telegram Bot API client for posting channel messages.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Base URL of the Telegram Bot API.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Errors that can occur while sending a message.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Failed to send message: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram API rejected the request ({status}): {description}")]
    Api {
        status: StatusCode,
        description: String,
    },
}

/// Subset of the Bot API response envelope, used for error diagnostics.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    description: Option<String>,
}

/// Client bound to one bot token and one target channel.
#[derive(Debug, Clone)]
pub struct ChannelClient {
    http: reqwest::Client,
    api_token: String,
    channel_id: String,
    api_base: String,
}

impl ChannelClient {
    /// Creates a client for the production Bot API endpoint.
    #[must_use]
    pub fn new(api_token: String, channel_id: String) -> Self {
        Self::with_api_base(api_token, channel_id, TELEGRAM_API_BASE.to_owned())
    }

    /// Creates a client against a custom API base URL.
    #[must_use]
    pub fn with_api_base(api_token: String, channel_id: String, api_base: String) -> Self {
        debug!(
            "Creating client for bot {} targeting channel {}",
            mask_token(&api_token),
            channel_id
        );

        Self {
            http: reqwest::Client::new(),
            api_token,
            channel_id,
            api_base,
        }
    }

    /// Sends one text message to the configured channel.
    ///
    /// A single best-effort attempt: transport failures and non-2xx
    /// responses are returned as errors, with no retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status.
    pub async fn send_message(&self, text: &str) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.api_token);

        let response = self
            .http
            .get(&url)
            .query(&[("chat_id", self.channel_id.as_str()), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let description = response
                .json::<ApiResponse>()
                .await
                .ok()
                .and_then(|body| body.description)
                .unwrap_or_else(|| "no description provided".to_owned());
            return Err(SendError::Api {
                status,
                description,
            });
        }

        debug!("Sent {} bytes to channel {}", text.len(), self.channel_id);
        Ok(())
    }
}

/// Masks a bot token for logging (keeps the numeric bot ID, hides the secret).
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _secret)) => format!("{bot_id}:***"),
        None => "***".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("123456:secret-part"), "123456:***");
        assert_eq!(mask_token("garbage"), "***");
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/bot123:abc/sendMessage")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("chat_id".into(), "-100200".into()),
                Matcher::UrlEncoded("text".into(), "hello world".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "ok": true, "result": {} }).to_string())
            .create_async()
            .await;

        let client =
            ChannelClient::with_api_base("123:abc".to_owned(), "-100200".to_owned(), server.url());
        client.send_message("hello world").await.expect("send succeeds");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_api_error_carries_description() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bot123:abc/sendMessage")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({ "ok": false, "description": "Bad Request: chat not found" })
                    .to_string(),
            )
            .create_async()
            .await;

        let client =
            ChannelClient::with_api_base("123:abc".to_owned(), "-1".to_owned(), server.url());
        let err = client.send_message("hi").await.expect_err("send fails");

        match err {
            SendError::Api {
                status,
                description,
            } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(description, "Bad Request: chat not found");
            }
            SendError::Transport(other) => panic!("expected API error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_non_json_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bot123:abc/sendMessage")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("upstream gone")
            .create_async()
            .await;

        let client =
            ChannelClient::with_api_base("123:abc".to_owned(), "-1".to_owned(), server.url());
        let err = client.send_message("hi").await.expect_err("send fails");

        assert!(err.to_string().contains("502"));
    }
}
