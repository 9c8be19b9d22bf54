//! Cancellation token registry.
//!
//! One live token per operation key (here, a version string), existing only
//! between an install's start and its conclusion. Nothing persists across
//! process restarts.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Table of in-flight cancellation tokens, keyed by version.
///
/// Owned by the orchestrator and passed by reference into install calls —
/// deliberately not process-global state, so tests can hand the installer
/// their own registry.
///
/// [`issue`](Self::issue) silently replaces any prior token under the same
/// key, which orphans the earlier operation's cancellation signal. Callers
/// must serialize per-version requests; see the crate docs.
#[derive(Default)]
pub struct CancelMap {
    tokens: RwLock<HashMap<String, CancellationToken>>,
}

impl CancelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a fresh token under `key`, replacing any prior
    /// one, and return it.
    pub async fn issue(&self, key: &str) -> CancellationToken {
        let token = CancellationToken::new();
        if self.tokens.write().await.insert(key.to_string(), token.clone()).is_some() {
            debug!(key, "replaced existing cancellation token");
        }
        token
    }

    /// Trigger the token registered under `key`, if any.
    ///
    /// Returns whether a token was found. The token stays registered — the
    /// owning operation releases it when it concludes.
    pub async fn trigger(&self, key: &str) -> bool {
        match self.tokens.read().await.get(key) {
            Some(token) => {
                debug!(key, "cancellation requested");
                token.cancel();
                true
            },
            None => false,
        }
    }

    /// Drop the token registered under `key`. No-op when absent.
    pub async fn release(&self, key: &str) {
        self.tokens.write().await.remove(key);
    }

    /// Whether a token is currently registered under `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.tokens.read().await.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_trigger() {
        let map = CancelMap::new();
        let token = map.issue("Wine-GE-8-26").await;
        assert!(!token.is_cancelled());
        assert!(map.trigger("Wine-GE-8-26").await);
        assert!(token.is_cancelled());
        // Triggered but not yet released.
        assert!(map.contains("Wine-GE-8-26").await);
    }

    #[tokio::test]
    async fn test_trigger_unknown_key() {
        let map = CancelMap::new();
        assert!(!map.trigger("nope").await);
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let map = CancelMap::new();
        map.issue("v").await;
        map.release("v").await;
        assert!(!map.contains("v").await);
        map.release("v").await;
    }

    #[tokio::test]
    async fn test_issue_replaces_prior_token() {
        let map = CancelMap::new();
        let first = map.issue("v").await;
        let second = map.issue("v").await;
        // Triggering reaches only the replacement; the first is orphaned.
        map.trigger("v").await;
        assert!(!first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let map = CancelMap::new();
        let a = map.issue("a").await;
        let b = map.issue("b").await;
        map.trigger("a").await;
        assert!(a.is_cancelled());
        assert!(!b.is_cancelled());
    }
}
