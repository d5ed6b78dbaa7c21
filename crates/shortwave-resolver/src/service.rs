use crate::error::{ResolveError, Result};
use jiff::Timestamp;
use shortwave_core::LinkReadStore;
use std::sync::Arc;
use tracing::{debug, trace};

/// Service for resolving short codes to their redirect targets.
///
/// Uses a read-only store view; resolving has no side effects on
/// stored state, so repeated lookups of the same live code always
/// return the same target.
#[derive(Debug, Clone)]
pub struct ResolverService<S> {
    store: Arc<S>,
}

impl<S: LinkReadStore> ResolverService<S> {
    /// Creates a new `ResolverService` with the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// The code is the trailing portion of an issued short value; the
    /// caller does not know the host prefix, so matching is by suffix
    /// of the stored value rather than equality. A link whose expiry
    /// has strictly passed fails with [`ResolveError::Expired`].
    pub async fn resolve(&self, code: &str) -> Result<String> {
        // An empty suffix would match every stored value.
        if code.is_empty() {
            return Err(ResolveError::NotFound);
        }

        trace!(code, "resolving short code");

        let Some(link) = self.store.find_by_code_suffix(code).await? else {
            trace!(code, "short code not found");
            return Err(ResolveError::NotFound);
        };

        if link.is_expired_at(Timestamp::now()) {
            debug!(code, expires_at = %link.expires_at, "short link has expired");
            return Err(ResolveError::Expired);
        }

        debug!(code, url = %link.long_url, "resolved short code");
        Ok(link.long_url)
    }
}
