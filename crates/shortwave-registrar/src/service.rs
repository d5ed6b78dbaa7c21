use crate::error::{RegistrarError, Result};
use jiff::Timestamp;
use shortwave_core::{Link, LinkStore, NewLink, ServiceConfig, ShortCode, UserId};
use shortwave_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace};

/// Service for creating and listing short links.
///
/// Wraps a [`LinkStore`] and a [`Generator`]. The generator is a pure
/// randomness source; uniqueness comes from the retry loop here plus
/// the store's unique constraint on the short value.
#[derive(Debug, Clone)]
pub struct RegistrarService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    config: ServiceConfig,
}

impl<S: LinkStore, G: Generator> RegistrarService<S, G> {
    /// Creates a new `RegistrarService`.
    pub fn new(store: S, generator: G, config: ServiceConfig) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            config,
        }
    }

    /// Creates a persisted, collision-free link for the given owner.
    ///
    /// The expiry is `now + link_ttl`. Candidate codes are drawn until
    /// one is unused: a candidate whose short value already exists is
    /// discarded, and a storage conflict from a concurrent racer is
    /// likewise recovered by drawing again. The loop is unbounded by
    /// design; with 62^7 candidate codes, consecutive collisions are
    /// not a practical concern.
    pub async fn create_short_link(&self, long_url: &str, owner: UserId) -> Result<Link> {
        if long_url.trim().is_empty() {
            return Err(RegistrarError::MissingLongUrl);
        }

        let now = Timestamp::now();
        let expires_at = now + self.config.link_ttl;

        loop {
            let code: ShortCode = self.generator.generate().into();
            let short_value = code.to_short_value(&self.config.base_url);
            trace!(code = %code, "drew candidate short code");

            // Read-check first. This keeps the common path cheap; the
            // unique index remains the correctness backstop.
            if self
                .store
                .find_by_short_value(&short_value)
                .await?
                .is_some()
            {
                debug!(code = %code, "candidate already taken, drawing again");
                continue;
            }

            let link = NewLink {
                long_url: long_url.to_string(),
                short_value,
                created_at: now,
                expires_at,
                user_id: owner,
            };

            match self.store.insert(link).await {
                Ok(link) => {
                    debug!(short_value = %link.short_value, owner, "registered short link");
                    return Ok(link);
                }
                Err(shortwave_core::StorageError::Conflict(value)) => {
                    // Lost the race between check and insert; the
                    // unique index caught it. Draw a fresh candidate.
                    debug!(short_value = %value, "insert raced a duplicate, drawing again");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns every link owned by the given user, in storage-default
    /// order.
    pub async fn list_links(&self, owner: UserId) -> Result<Vec<Link>> {
        let links = self.store.find_by_owner(owner).await?;
        trace!(owner, count = links.len(), "listed short links");
        Ok(links)
    }
}
