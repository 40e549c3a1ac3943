use serde::{Deserialize, Serialize};

use crate::errors::AulaResult;

/// Priority hint attached to a route prefetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreloadPriority {
    High,
    Low,
}

impl PreloadPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Issues a prefetch hint for a route. Must not block on the response.
pub trait IPrefetcher: Send + Sync {
    fn prefetch(&self, route: &str, priority: PreloadPriority) -> AulaResult<()>;
}
