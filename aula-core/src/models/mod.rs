mod navigation_pattern;
mod notification;

pub use navigation_pattern::NavigationPattern;
pub use notification::{
    DesktopAlert, Notification, NotificationPriority, NotificationStatusFilter, NotificationType,
};
