use crate::app::App;
use crate::line::SIGNATURE_HEADER;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Body of every `/callback` response, whatever happened inside.
pub const ACK: &str = "OK";

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/healthz", get(healthz))
        .with_state(app)
}

async fn callback(State(app): State<Arc<App>>, headers: HeaderMap, body: Bytes) -> &'static str {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    app.handle_webhook(signature, &body).await;
    ACK
}

async fn healthz() -> &'static str {
    ACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{ReplySink, sign};
    use crate::responder::Responder;
    use crate::teams::TeamNames;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mlb_api::calendar::CivilZone;
    use mlb_api::client::MlbApi;
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    const SECRET: &str = "channel-secret";

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ReplySink for RecordingSink {
        async fn send_reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push((reply_token.to_string(), text.to_string()));
            if self.fail {
                anyhow::bail!("reply token expired");
            }
            Ok(())
        }
    }

    fn app(sink: Arc<RecordingSink>) -> Router {
        let api = MlbApi::new()
            .with_schedule_url("http://127.0.0.1:1/schedule")
            .with_odds_url("http://127.0.0.1:1/odds")
            .with_timeout(Duration::from_secs(2));
        let responder = Responder::new(api, TeamNames::mlb(), CivilZone::default(), None);
        router(Arc::new(App::with_parts(SECRET, responder, sink)))
    }

    fn text_event(reply_token: &str, text: &str) -> String {
        serde_json::json!({
            "destination": "U0",
            "events": [{
                "type": "message",
                "replyToken": reply_token,
                "source": {"type": "user", "userId": "U1"},
                "message": {"type": "text", "id": "1", "text": text}
            }]
        })
        .to_string()
    }

    async fn post_callback(router: Router, body: String, signature: Option<String>) -> (StatusCode, String) {
        let mut request = Request::builder().method("POST").uri("/callback");
        if let Some(signature) = signature {
            request = request.header("X-Line-Signature", signature);
        }
        let response = router
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_text_message_gets_reply() {
        let sink = Arc::new(RecordingSink::default());
        let body = text_event("r1", "  hello ");
        let signature = sign(SECRET, body.as_bytes());

        let (status, text) = post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, ACK);
        assert_eq!(
            *sink.sent.lock().unwrap(),
            vec![("r1".to_string(), "你輸入的是：hello".to_string())]
        );
    }

    #[tokio::test]
    async fn test_command_failure_still_replies_and_acks() {
        let sink = Arc::new(RecordingSink::default());
        let body = text_event("r1", "明日賽事");
        let signature = sign(SECRET, body.as_bytes());

        let (status, text) = post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, ACK));
        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, crate::reply::TOMORROW_FAILED);
    }

    #[tokio::test]
    async fn test_invalid_signature_is_acknowledged_but_ignored() {
        let sink = Arc::new(RecordingSink::default());
        let body = text_event("r1", "hello");
        let signature = sign("wrong-secret", body.as_bytes());

        let (status, text) = post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, ACK));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_signature_is_acknowledged_but_ignored() {
        let sink = Arc::new(RecordingSink::default());
        let (status, text) = post_callback(app(sink.clone()), text_event("r1", "hello"), None).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, ACK));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_text_events_are_ignored() {
        let sink = Arc::new(RecordingSink::default());
        let body = serde_json::json!({
            "events": [
                {"type": "follow", "replyToken": "r1"},
                {"type": "message", "replyToken": "r2",
                 "message": {"type": "sticker", "id": "2", "packageId": "1", "stickerId": "1"}},
                {"type": "message", "replyToken": "r3",
                 "message": {"type": "text", "id": "3", "text": "ok"}}
            ]
        })
        .to_string();
        let signature = sign(SECRET, body.as_bytes());

        post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!(
            *sink.sent.lock().unwrap(),
            vec![("r3".to_string(), "你輸入的是：ok".to_string())]
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_acknowledged() {
        let sink = Arc::new(RecordingSink::default());
        let body = "{not json".to_string();
        let signature = sign(SECRET, body.as_bytes());

        let (status, text) = post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, ACK));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_not_surfaced() {
        let sink = Arc::new(RecordingSink { fail: true, ..Default::default() });
        let body = text_event("r1", "hi");
        let signature = sign(SECRET, body.as_bytes());

        let (status, text) = post_callback(app(sink.clone()), body, Some(signature)).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, ACK));
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app(Arc::new(RecordingSink::default()))
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
