//! `UssdServer` — Axum HTTP server for the gateway callback.
//!
//! The `/ussd` route always answers HTTP 200 with a plain-text body.
//! Anything the dispatcher cannot express as a menu reply is normalized
//! to the generic terminal message here, so the aggregator never sees a
//! 5xx or a JSON error shape.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use avara_core::Reply;
use avara_providers::SessionNotifier;
use avara_ussd::Dispatcher;

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;

/// Terminal body for internal failures, already rendered.
const MSG_INTERNAL: &str = "Something went wrong. Try again.";

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The session dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// Best-effort session-summary SMS.
    pub notifier: Arc<SessionNotifier>,
}

/// Form body of a gateway callback. Field names follow the aggregator's
/// casing; both fields default to empty when absent.
#[derive(Debug, Deserialize)]
struct UssdForm {
    #[serde(rename = "phoneNumber", default)]
    phone_number: String,
    #[serde(default)]
    text: String,
}

/// The gateway HTTP server.
pub struct UssdServer {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
    notifier: Arc<SessionNotifier>,
    shutdown: Arc<ShutdownCoordinator>,
}

impl UssdServer {
    /// Create a new server.
    pub fn new(
        config: ServerConfig,
        dispatcher: Arc<Dispatcher>,
        notifier: Arc<SessionNotifier>,
    ) -> Self {
        Self {
            config,
            dispatcher,
            notifier,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            dispatcher: self.dispatcher.clone(),
            notifier: self.notifier.clone(),
        };

        Router::new()
            .route("/ussd", post(ussd_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind and start serving.
    ///
    /// Returns the bound address (meaningful when the configured port is
    /// `0`) and the serve task handle. The task exits when the shutdown
    /// coordinator fires.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;
        info!(%addr, "listening");

        let app = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.cancelled().await });
            if let Err(e) = serve.await {
                error!(error = %e, "server error");
            }
        });

        Ok((addr, handle))
    }
}

/// POST /ussd
async fn ussd_handler(State(state): State<AppState>, Form(form): Form<UssdForm>) -> String {
    let reply = match state.dispatcher.handle(&form.phone_number, &form.text).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "dispatch failed");
            Reply::end(MSG_INTERNAL)
        }
    };

    // Session-summary SMS goes out before the gateway response so the
    // serve task cannot be torn down with the send in flight.
    if let Some(message) = reply.final_message() {
        state.notifier.notify(&form.phone_number, message).await;
    }

    reply.render()
}

/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(health::health_check())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    use avara_providers::{
        PaymentAck, PaymentInitiator, PaymentRequest, ProviderError, SmsSender,
    };
    use avara_store::{new_in_memory, run_migrations, ConnectionConfig};

    struct FakePayment;

    #[async_trait]
    impl PaymentInitiator for FakePayment {
        async fn initiate(
            &self,
            _request: &PaymentRequest<'_>,
        ) -> avara_providers::Result<PaymentAck> {
            Ok(PaymentAck {
                invoice_id: None,
                state: None,
            })
        }
    }

    struct RecordingSms {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingSms {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl SmsSender for RecordingSms {
        async fn send(&self, to: &str, message: &str) -> avara_providers::Result<()> {
            if self.fail {
                return Err(ProviderError::Status {
                    status: 500,
                    body: "boom".into(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn make_server(migrated: bool, notifier: SessionNotifier) -> UssdServer {
        let pool = new_in_memory(&ConnectionConfig {
            pool_size: 1,
            ..Default::default()
        })
        .unwrap();
        if migrated {
            let conn = pool.get().unwrap();
            let _ = run_migrations(&conn).unwrap();
        }
        let dispatcher = Arc::new(Dispatcher::new(pool, Arc::new(FakePayment)));
        UssdServer::new(ServerConfig::default(), dispatcher, Arc::new(notifier))
    }

    fn ussd_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ussd")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = make_server(true, SessionNotifier::disabled()).router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn root_menu_is_plain_text_con() {
        let app = make_server(true, SessionNotifier::disabled()).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text="))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert!(body_string(resp).await.starts_with("CON Welcome to AVARA"));
    }

    #[tokio::test]
    async fn missing_phone_field_defaults_to_empty() {
        let app = make_server(true, SessionNotifier::disabled()).router();
        let resp = app.oneshot(ussd_request("text=1")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "END Missing phone number");
    }

    #[tokio::test]
    async fn purchase_issues_ticket() {
        let app = make_server(true, SessionNotifier::disabled()).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text=1*1*1"))
            .await
            .unwrap();

        let body = body_string(resp).await;
        assert!(
            body.starts_with("END Payment initiated.\nYour Ticket Code: "),
            "body: {body}"
        );
    }

    #[tokio::test]
    async fn internal_failure_is_normalized() {
        // No migrations: the ticket listing query fails inside the
        // dispatcher and the handler must fall back to the generic body.
        let app = make_server(false, SessionNotifier::disabled()).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text=2"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "END Something went wrong. Try again.");
    }

    #[tokio::test]
    async fn terminal_reply_sends_session_sms() {
        let sms = RecordingSms::new(false);
        let app = make_server(true, SessionNotifier::new(sms.clone())).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text=0"))
            .await
            .unwrap();
        assert_eq!(body_string(resp).await, "END Thank you for using AVARA");

        let sent = sms.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+254700000001");
        // The SMS carries the message without the protocol prefix.
        assert_eq!(sent[0].1, "Thank you for using AVARA");
    }

    #[tokio::test]
    async fn con_reply_sends_no_sms() {
        let sms = RecordingSms::new(false);
        let app = make_server(true, SessionNotifier::new(sms.clone())).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text=1"))
            .await
            .unwrap();
        assert!(body_string(resp).await.starts_with("CON "));
        assert!(sms.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sms_failure_does_not_change_body() {
        let sms = RecordingSms::new(true);
        let app = make_server(true, SessionNotifier::new(sms)).router();
        let resp = app
            .oneshot(ussd_request("phoneNumber=%2B254700000001&text=0"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "END Thank you for using AVARA");
    }

    #[tokio::test]
    async fn listen_binds_ephemeral_port() {
        let server = make_server(true, SessionNotifier::disabled());
        let server = UssdServer::new(
            ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            server.dispatcher.clone(),
            server.notifier.clone(),
        );

        let (addr, handle) = server.listen().await.unwrap();
        assert_ne!(addr.port(), 0);

        server.shutdown().shutdown();
        handle.await.unwrap();
    }
}
