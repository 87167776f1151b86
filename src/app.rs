use crate::line::{self, LineClient, ReplySink};
use crate::responder::Responder;
use crate::settings::Settings;
use crate::teams::TeamNames;
use log::{debug, error, warn};
use mlb_api::calendar::resolve_zone;
use mlb_api::client::MlbApi;
use std::sync::Arc;

/// Everything a webhook delivery needs, shared read-only across requests.
pub struct App {
    channel_secret: String,
    pub responder: Responder,
    replies: Arc<dyn ReplySink>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let api = MlbApi::new()
            .with_timeout(settings.http_timeout)
            .with_schedule_url(&settings.schedule_url)
            .with_odds_url(&settings.odds_url);
        let responder = Responder::new(
            api,
            TeamNames::mlb(),
            resolve_zone(&settings.time_zone),
            settings.odds_api_key.clone(),
        );
        let replies = LineClient::new(
            &settings.channel_access_token,
            &settings.line_api_url,
            settings.http_timeout,
        );

        Self::with_parts(&settings.channel_secret, responder, Arc::new(replies))
    }

    pub fn with_parts(
        channel_secret: impl Into<String>,
        responder: Responder,
        replies: Arc<dyn ReplySink>,
    ) -> Self {
        Self { channel_secret: channel_secret.into(), responder, replies }
    }

    /// Handle one webhook delivery. Never fails: bad signatures and bodies are
    /// logged and dropped, reply errors are logged and not retried.
    pub async fn handle_webhook(&self, signature: Option<&str>, body: &[u8]) {
        let Some(signature) = signature else {
            warn!("webhook without {} header ignored", line::SIGNATURE_HEADER);
            return;
        };
        if !line::verify_signature(&self.channel_secret, body, signature) {
            warn!("webhook with invalid signature ignored ({} bytes)", body.len());
            return;
        }

        let payload = match line::parse_body(body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("unparsable webhook body: {e}");
                return;
            }
        };
        debug!(
            "webhook for {} with {} events",
            payload.destination.as_deref().unwrap_or("unknown destination"),
            payload.events.len()
        );

        for event in &payload.events {
            let Some(message) = event.as_text_message() else {
                debug!("ignoring non-text event");
                continue;
            };
            let reply = self.responder.respond(message.text).await;
            if let Err(e) = self.replies.send_reply(message.reply_token, &reply).await {
                error!("failed to deliver reply: {e:#}");
            }
        }
    }
}
