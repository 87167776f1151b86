//! LINE Messaging API: webhook signatures, event payloads and reply delivery.

use anyhow::Context;
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;

pub const SIGNATURE_HEADER: &str = "x-line-signature";
pub const LINE_API: &str = "https://api.line.me";

type HmacSha256 = Hmac<Sha256>;

/// Check `signature` (base64 HMAC-SHA256 of the raw body keyed by the channel
/// secret). Comparison is constant time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
pub(crate) fn sign(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).unwrap();
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// A local server that accepts connections and never answers.
#[cfg(test)]
pub(crate) async fn silent_upstream() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

// ---------------------------------------------------------------------------
// Webhook payload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    pub destination: Option<String>,
    /// Empty for the console's "Verify" request.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: Option<String>,
        message: MessageContent,
    },
    // follow, unfollow, postback, join, ...
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text { text: String },
    // sticker, image, location, ...
    #[serde(other)]
    Unsupported,
}

/// A text message that can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage<'a> {
    pub reply_token: &'a str,
    pub text: &'a str,
}

impl WebhookEvent {
    pub fn as_text_message(&self) -> Option<TextMessage<'_>> {
        match self {
            WebhookEvent::Message {
                reply_token: Some(reply_token),
                message: MessageContent::Text { text },
            } => Some(TextMessage { reply_token, text }),
            _ => None,
        }
    }
}

pub fn parse_body(body: &[u8]) -> serde_json::Result<WebhookBody> {
    serde_json::from_slice(body)
}

// ---------------------------------------------------------------------------
// Reply delivery
// ---------------------------------------------------------------------------

/// Sends a text reply for a webhook event.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct LineClient {
    client: Client,
    api_base: String,
    access_token: String,
    timeout: Duration,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>, api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("mlbbot/0.1 (LINE reply)")
                .build()
                .unwrap_or_default(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReplySink for LineClient {
    async fn send_reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let payload = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        self.client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("sending reply to {url}"))?
            .error_for_status()
            .context("LINE rejected the reply")?;

        debug!("reply delivered ({} chars)", text.chars().count());
        Ok(())
    }
}
