//! [`PrivateKeyStore`]: caller-owned slot for the session private key.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::PrivateKeyPem;
use crate::error::EnvelopeError;

/// Thread-safe holder for the private key the user uploaded for this session.
///
/// Cloning shares the slot. The store is an ordinary value owned by the
/// caller; codec functions never reach for it implicitly.
#[derive(Clone, Debug, Default)]
pub struct PrivateKeyStore {
    inner: Arc<RwLock<Option<Arc<PrivateKeyPem>>>>,
}

impl PrivateKeyStore {
    /// Create a new, empty [`PrivateKeyStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a private key is currently held.
    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Store (or replace) the session private key.
    pub async fn store(&self, key: PrivateKeyPem) {
        *self.inner.write().await = Some(Arc::new(key));
    }

    /// Drop the held key, e.g. when the session ends.
    pub async fn clear(&self) {
        self.inner.write().await.take();
    }

    /// Borrow the current private key.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::KeyUnavailable`] if no key has been stored.
    pub async fn current(&self) -> Result<Arc<PrivateKeyPem>, EnvelopeError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or_else(|| EnvelopeError::KeyUnavailable("no private key uploaded".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::test_keys;

    #[tokio::test]
    async fn initially_not_ready() {
        let store = PrivateKeyStore::new();
        assert!(!store.is_ready().await);
        assert!(matches!(
            store.current().await,
            Err(EnvelopeError::KeyUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn store_and_retrieve() {
        let (private, public) = test_keys::pair_a();
        let store = PrivateKeyStore::new();
        store.store(private.clone()).await;
        assert!(store.is_ready().await);
        assert_eq!(&store.current().await.unwrap().public_key(), public);
    }

    #[tokio::test]
    async fn replace_and_clear() {
        let (private_a, _) = test_keys::pair_a();
        let (private_b, public_b) = test_keys::pair_b();
        let store = PrivateKeyStore::new();
        store.store(private_a.clone()).await;
        store.store(private_b.clone()).await;
        assert_eq!(&store.current().await.unwrap().public_key(), public_b);

        store.clear().await;
        assert!(!store.is_ready().await);
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let (private, _) = test_keys::pair_a();
        let store = PrivateKeyStore::new();
        let handle = store.clone();
        handle.store(private.clone()).await;
        assert!(store.is_ready().await);
    }
}
