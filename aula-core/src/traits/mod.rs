mod notifier;
mod prefetch;
mod storage;

pub use notifier::IDesktopNotifier;
pub use prefetch::{IPrefetcher, PreloadPriority};
pub use storage::IDurableStore;
