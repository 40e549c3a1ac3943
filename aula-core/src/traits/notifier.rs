use crate::errors::AulaResult;
use crate::models::DesktopAlert;

/// Shows an OS/browser level notification outside the page.
pub trait IDesktopNotifier: Send + Sync {
    fn notify(&self, alert: &DesktopAlert) -> AulaResult<()>;
}
