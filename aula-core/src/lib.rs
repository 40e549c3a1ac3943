//! # aula-core
//!
//! Foundation crate for the Aula client layer of the school portal.
//! Defines shared types, traits, errors, config, clock, and constants.
//! Every other crate in the workspace depends on this.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use clock::{IClock, ManualClock, SystemClock};
pub use config::AulaConfig;
pub use errors::{AulaError, AulaResult};
pub use models::{
    DesktopAlert, NavigationPattern, Notification, NotificationPriority, NotificationType,
};
pub use traits::{IDesktopNotifier, IDurableStore, IPrefetcher, PreloadPriority};
