//! Notification stream client.
//!
//! A tokio task owns the connection: it decodes server-sent events into
//! [`NotificationState`], raises desktop alerts, and reconnects closed
//! connections per [`ReconnectPolicy`]. The UI keeps a [`StreamHandle`]
//! and reads state through it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::Instrument;

use aula_core::config::NotificationConfig;
use aula_core::constants::STREAM_UNAVAILABLE_MESSAGE;
use aula_core::errors::{AulaError, AulaResult, StreamError};
use aula_core::models::{Notification, NotificationStatusFilter};
use aula_core::{IClock, IDesktopNotifier};
use aula_observability::{events, stream_span};

use crate::api::{INotificationApi, NotificationApi};
use crate::desktop::{DesktopAlertPolicy, PageFocus};
use crate::event::StreamEvent;
use crate::grouper::{group_notifications, IGroupKeyStrategy, NotificationGroup};
use crate::reconnect::{ReconnectController, ReconnectDecision, ReconnectPolicy};
use crate::sse::SseDecoder;
use crate::state::{NotificationState, ReadTarget};

/// Shown when marking notifications as read could not be saved.
pub const MARK_READ_FAILED_MESSAGE: &str =
    "No se pudo marcar las notificaciones como leídas. Inténtalo nuevamente.";

/// Shown when the notification list could not be loaded.
pub const REFETCH_FAILED_MESSAGE: &str = "No se pudieron cargar las notificaciones.";

/// Raw body chunks of an open event stream.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, StreamError>>;

/// Opens event-stream connections.
pub trait IStreamConnector: Send + Sync {
    fn url(&self) -> &str;
    fn connect(&self) -> BoxFuture<'_, Result<ByteStream, StreamError>>;
}

/// SSE over HTTP with reqwest.
#[derive(Debug)]
pub struct HttpStreamConnector {
    client: reqwest::Client,
    url: String,
    bearer_token: Option<String>,
}

impl HttpStreamConnector {
    pub fn new(config: &NotificationConfig) -> AulaResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AulaError::Config {
                reason: format!("failed to build stream client: {e}"),
            })?;
        Ok(Self {
            client,
            url: config.stream_url(),
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: String) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

impl IStreamConnector for HttpStreamConnector {
    fn url(&self) -> &str {
        &self.url
    }

    fn connect(&self) -> BoxFuture<'_, Result<ByteStream, StreamError>> {
        Box::pin(async move {
            let mut req = self
                .client
                .get(&self.url)
                .header(ACCEPT, "text/event-stream")
                .header(CACHE_CONTROL, "no-cache");
            if let Some(token) = &self.bearer_token {
                req = req.bearer_auth(token);
            }
            let resp = req.send().await.map_err(|e| StreamError::ConnectFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(StreamError::ConnectFailed {
                    url: self.url.clone(),
                    reason: format!("HTTP {status}"),
                });
            }
            let chunks = resp.bytes_stream().map(|chunk| {
                chunk.map(|bytes| bytes.to_vec()).map_err(|e| StreamError::Transient {
                    reason: e.to_string(),
                })
            });
            Ok(chunks.boxed())
        })
    }
}

/// Lifecycle of the stream connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Open,
    Reconnecting { attempt: u32 },
    Closed,
    /// Reconnect attempts exhausted. Terminal.
    Failed,
}

/// The signed-in user. The stream only starts for an active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub bearer_token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn is_active(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State the stream task and the client both touch.
#[derive(Clone)]
struct Shared {
    state: Arc<Mutex<NotificationState>>,
    alerts: Arc<Mutex<DesktopAlertPolicy>>,
    focus: PageFocus,
}

impl Shared {
    fn dispatch(&self, data: &str) {
        match StreamEvent::parse(data) {
            Ok(StreamEvent::Heartbeat) => {}
            Ok(StreamEvent::Notification(notification)) => {
                let focused = self.focus.is_focused();
                lock(&self.alerts).offer(&notification, focused);
                lock(&self.state).prepend(*notification);
            }
            Ok(StreamEvent::DashboardUpdate(data)) => {
                lock(&self.state).set_dashboard(data);
            }
            Ok(StreamEvent::Unknown(kind)) => {
                tracing::debug!(kind = %kind, "ignoring unknown stream message");
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed stream message");
            }
        }
    }
}

pub struct NotificationStreamClient {
    connector: Arc<dyn IStreamConnector>,
    api: Arc<dyn INotificationApi>,
    clock: Arc<dyn IClock>,
    policy: ReconnectPolicy,
    list_limit: usize,
    shared: Shared,
}

impl NotificationStreamClient {
    pub fn new(
        config: &NotificationConfig,
        connector: Arc<dyn IStreamConnector>,
        api: Arc<dyn INotificationApi>,
        notifier: Arc<dyn IDesktopNotifier>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        let alerts = DesktopAlertPolicy::new(config, notifier, Arc::clone(&clock));
        Self {
            connector,
            api,
            clock,
            policy: ReconnectPolicy::from_config(config),
            list_limit: config.list_limit,
            shared: Shared {
                state: Arc::new(Mutex::new(NotificationState::new())),
                alerts: Arc::new(Mutex::new(alerts)),
                focus: PageFocus::default(),
            },
        }
    }

    /// Client talking to the portal over HTTP with the session's token.
    pub fn http(
        config: &NotificationConfig,
        session: &Session,
        notifier: Arc<dyn IDesktopNotifier>,
        clock: Arc<dyn IClock>,
    ) -> AulaResult<Self> {
        let mut connector = HttpStreamConnector::new(config)?;
        let mut api = NotificationApi::new(config)?;
        if let Some(token) = &session.bearer_token {
            connector = connector.with_bearer_token(token.clone());
            api.set_bearer_token(token.clone());
        }
        Ok(Self::new(
            config,
            Arc::new(connector),
            Arc::new(api),
            notifier,
            clock,
        ))
    }

    pub fn state(&self) -> Arc<Mutex<NotificationState>> {
        Arc::clone(&self.shared.state)
    }

    /// Page focus flag; the shell updates it on focus and blur.
    pub fn focus(&self) -> PageFocus {
        self.shared.focus.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.shared.state).notifications()
    }

    pub fn unread_count(&self) -> usize {
        lock(&self.shared.state).unread_count()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.shared.state).error().map(str::to_string)
    }

    /// Groups over the current list.
    pub fn groups(&self, strategy: &dyn IGroupKeyStrategy) -> Vec<NotificationGroup> {
        group_notifications(&self.notifications(), strategy)
    }

    /// Apply one raw `data:` payload as if it arrived on the stream.
    pub fn handle_message(&self, data: &str) {
        self.shared.dispatch(data);
    }

    /// Spawn the stream task on the ambient runtime. Returns `None`
    /// without an active session or outside a tokio runtime.
    pub fn start(&self, session: Option<&Session>) -> Option<StreamHandle> {
        let session = session.filter(|s| s.is_active())?;
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(error = %e, "notification stream needs a tokio runtime");
                return None;
            }
        };

        let cleanup = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Disconnected);
        let status = Arc::new(status_tx);

        let task = StreamTask {
            connector: Arc::clone(&self.connector),
            policy: self.policy,
            cleanup: Arc::clone(&cleanup),
            wake: Arc::clone(&wake),
            status: Arc::clone(&status),
            shared: self.shared.clone(),
        };
        tracing::info!(user_id = %session.user_id, url = %self.connector.url(), "starting notification stream");
        let span = stream_span!(self.connector.url());
        let join = runtime.spawn(task.run().instrument(span));

        Some(StreamHandle {
            task: join,
            cleanup,
            wake,
            status,
            status_rx,
            state: Arc::clone(&self.shared.state),
        })
    }

    /// Mark notifications read: locally first, then on the server. On
    /// server failure the previous read state is restored and the error
    /// is both stored in state and returned.
    pub async fn mark_as_read(&self, target: ReadTarget) -> AulaResult<()> {
        let batch = lock(&self.shared.state).begin_mark_read(target, self.clock.now());
        match self.api.mark_read(&batch.target).await {
            Ok(()) => {
                lock(&self.shared.state).confirm_read(&batch);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(batch = batch.id, error = %e, "mark as read failed, rolling back");
                let mut state = lock(&self.shared.state);
                state.reject_read(&batch);
                state.set_error(MARK_READ_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    /// Replace the local list from the server. Returns the new length.
    pub async fn refetch(
        &self,
        status: NotificationStatusFilter,
        limit: Option<usize>,
    ) -> AulaResult<usize> {
        let limit = limit.unwrap_or(self.list_limit);
        match self.api.list(status, limit).await {
            Ok(notifications) => {
                let mut state = lock(&self.shared.state);
                state.replace_all(notifications);
                state.clear_error();
                Ok(state.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "notification refetch failed");
                lock(&self.shared.state).set_error(REFETCH_FAILED_MESSAGE);
                Err(e)
            }
        }
    }
}

struct StreamTask {
    connector: Arc<dyn IStreamConnector>,
    policy: ReconnectPolicy,
    cleanup: Arc<AtomicBool>,
    wake: Arc<Notify>,
    status: Arc<watch::Sender<ConnectionStatus>>,
    shared: Shared,
}

impl StreamTask {
    fn set_status(&self, status: ConnectionStatus) {
        self.status.send_replace(status);
    }

    async fn run(self) {
        let mut controller = ReconnectController::new(self.policy, Arc::clone(&self.cleanup));
        loop {
            if controller.is_stopped() {
                break;
            }
            self.set_status(ConnectionStatus::Connecting);
            let error = match self.connector.connect().await {
                Ok(stream) => {
                    controller.on_open();
                    self.set_status(ConnectionStatus::Open);
                    lock(&self.shared.state).clear_error();
                    tracing::info!("notification stream open");
                    self.pump(stream).await
                }
                Err(e) if e.is_closed() => e,
                Err(e) => StreamError::ConnectFailed {
                    url: self.connector.url().to_string(),
                    reason: e.to_string(),
                },
            };

            match controller.on_error(&error) {
                ReconnectDecision::Ignore => {}
                ReconnectDecision::Retry { attempt, delay } => {
                    self.set_status(ConnectionStatus::Reconnecting { attempt });
                    events::stream_reconnect_scheduled(attempt, self.policy.max_attempts, delay);
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.wake.notified() => break,
                    }
                }
                ReconnectDecision::GiveUp { attempts } => {
                    events::stream_exhausted(attempts);
                    lock(&self.shared.state).set_error(STREAM_UNAVAILABLE_MESSAGE);
                    self.set_status(ConnectionStatus::Failed);
                    return;
                }
                ReconnectDecision::Stopped => break,
            }
        }
        self.set_status(ConnectionStatus::Closed);
    }

    /// Read until the connection is definitively closed.
    async fn pump(&self, mut stream: ByteStream) -> StreamError {
        let mut decoder = SseDecoder::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    for frame in decoder.push(&bytes) {
                        self.shared.dispatch(&frame.data);
                    }
                }
                Err(e) if e.is_closed() => return e,
                Err(e) => {
                    tracing::debug!(error = %e, "transient stream error ignored");
                }
            }
        }
        StreamError::Closed
    }
}

/// Owner of a running stream task. Dropping it tears the stream down.
pub struct StreamHandle {
    task: JoinHandle<()>,
    cleanup: Arc<AtomicBool>,
    wake: Arc<Notify>,
    status: Arc<watch::Sender<ConnectionStatus>>,
    status_rx: watch::Receiver<ConnectionStatus>,
    state: Arc<Mutex<NotificationState>>,
}

impl StreamHandle {
    pub fn status(&self) -> ConnectionStatus {
        *self.status_rx.borrow()
    }

    /// Watch status transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    pub fn state(&self) -> Arc<Mutex<NotificationState>> {
        Arc::clone(&self.state)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Close the connection and suppress any further reconnects.
    pub fn teardown(&self) {
        self.cleanup.store(true, Ordering::SeqCst);
        self.wake.notify_one();
        self.task.abort();
        self.status.send_if_modified(|status| {
            if *status == ConnectionStatus::Failed || *status == ConnectionStatus::Closed {
                false
            } else {
                *status = ConnectionStatus::Closed;
                true
            }
        });
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
