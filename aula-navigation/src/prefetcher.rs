//! Fire-and-forget GET prefetch over reqwest.

use std::time::Duration;

use aula_core::errors::{AulaError, AulaResult};
use aula_core::{IPrefetcher, PreloadPriority};

/// Header carrying the prefetch priority.
pub const PREFETCH_HEADER: &str = "X-Aula-Prefetch";

const PREFETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefetches routes by issuing a `GET base_url + route` on the ambient
/// tokio runtime. The response body is discarded.
pub struct HttpPrefetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPrefetcher {
    pub fn new(base_url: &str) -> AulaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(PREFETCH_TIMEOUT)
            .build()
            .map_err(|e| AulaError::Config {
                reason: format!("failed to build prefetch client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }
}

impl IPrefetcher for HttpPrefetcher {
    fn prefetch(&self, route: &str, priority: PreloadPriority) -> AulaResult<()> {
        if !route.starts_with('/') {
            return Err(AulaError::PrefetchFailed {
                route: route.to_string(),
                reason: "route must be an absolute path".to_string(),
            });
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            AulaError::PrefetchFailed {
                route: route.to_string(),
                reason: format!("no tokio runtime: {e}"),
            }
        })?;

        let url = self.url_for(route);
        let request = self
            .client
            .get(&url)
            .header(PREFETCH_HEADER, priority.as_str());
        runtime.spawn(async move {
            match request.send().await {
                Ok(resp) => {
                    tracing::trace!(url = %url, status = resp.status().as_u16(), "prefetch completed");
                }
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "prefetch request failed");
                }
            }
        });
        Ok(())
    }
}
