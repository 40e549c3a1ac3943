//! # aula-notifications
//!
//! Everything between the portal's notification endpoints and the UI:
//!
//! - [`sse`]: incremental server-sent events decoding
//! - [`event`]: typed stream messages
//! - [`reconnect`]: capped exponential backoff and the give-up rule
//! - [`state`]: the local list, unread counter, and two-phase read marking
//! - [`desktop`]: throttled, focus-aware desktop alerts
//! - [`api`]: REST client with retry
//! - [`client`]: the stream task and its [`StreamHandle`]
//! - [`grouper`]: collapsing related notifications into groups

pub mod api;
pub mod client;
pub mod desktop;
pub mod event;
pub mod grouper;
pub mod reconnect;
pub mod sse;
pub mod state;

pub use api::{INotificationApi, NewNotification, NotificationApi};
pub use client::{
    ConnectionStatus, HttpStreamConnector, IStreamConnector, NotificationStreamClient, Session,
    StreamHandle,
};
pub use desktop::{DesktopAlertPolicy, PageFocus};
pub use event::StreamEvent;
pub use grouper::{
    group_notifications, HeuristicGroupKey, IGroupKeyStrategy, NotificationGroup, ServerGroupKey,
};
pub use reconnect::{ReconnectController, ReconnectDecision, ReconnectPolicy};
pub use sse::{SseDecoder, SseFrame};
pub use state::{LocalNotification, NotificationState, ReadBatch, ReadSync, ReadTarget};
