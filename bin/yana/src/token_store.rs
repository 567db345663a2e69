use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::RngCore;
use tokio::sync::Mutex;

#[derive(Debug, PartialEq)]
pub enum TokenError {
    Unknown,
    Expired,
}

#[derive(Clone, Debug)]
struct TokenEntry {
    yandex_token: String,
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// In-memory access token map. Tokens are opaque 64-hex strings issued
/// after a successful code exchange; expired entries are evicted on the
/// failed validation that discovers them. Nothing survives a restart.
#[derive(Default)]
pub struct TokenStore {
    tokens: Mutex<HashMap<String, TokenEntry>>,
}

impl TokenStore {
    pub fn new() -> TokenStore {
        TokenStore::default()
    }

    pub async fn issue(
        &self,
        yandex_token: String,
        user_id: String,
        expires_in: Duration,
    ) -> String {
        self.issue_at(yandex_token, user_id, expires_in, Utc::now())
            .await
    }

    async fn issue_at(
        &self,
        yandex_token: String,
        user_id: String,
        expires_in: Duration,
        now: DateTime<Utc>,
    ) -> String {
        let token = generate_token();

        let mut tokens = self.tokens.lock().await;
        tokens.insert(
            token.clone(),
            TokenEntry {
                yandex_token,
                user_id,
                expires_at: now + expires_in,
            },
        );

        token
    }

    /// Resolves a bearer token to its user. An expired token is removed
    /// from the map by the check that finds it.
    pub async fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.validate_at(token, Utc::now()).await
    }

    async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut tokens = self.tokens.lock().await;

        let entry = tokens.get(token).ok_or(TokenError::Unknown)?;

        if now > entry.expires_at {
            debug!("evicting expired token of user {}", entry.user_id);
            tokens.remove(token);
            return Err(TokenError::Expired);
        }

        Ok(entry.user_id.clone())
    }

    /// The Yandex token backing one of our own, for calls made on the
    /// user's behalf.
    pub async fn yandex_token(&self, token: &str) -> Option<String> {
        let tokens = self.tokens.lock().await;

        tokens.get(token).map(|entry| entry.yandex_token.clone())
    }

    pub async fn revoke(&self, token: &str) {
        let mut tokens = self.tokens.lock().await;

        tokens.remove(token);
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);

    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).unwrap()
    }

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let first = generate_token();
        let second = generate_token();

        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let store = TokenStore::new();

        let token = store
            .issue_at(
                "yandex-token".to_string(),
                "chipp".to_string(),
                Duration::hours(1),
                at(NOW),
            )
            .await;

        assert_eq!(
            store.validate_at(&token, at(NOW + 10)).await,
            Ok("chipp".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = TokenStore::new();

        assert_eq!(
            store.validate_at("missing", at(NOW)).await,
            Err(TokenError::Unknown)
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_evicted() {
        let store = TokenStore::new();

        let token = store
            .issue_at(
                "yandex-token".to_string(),
                "chipp".to_string(),
                Duration::hours(1),
                at(NOW),
            )
            .await;

        assert_eq!(
            store.validate_at(&token, at(NOW + 3601)).await,
            Err(TokenError::Expired)
        );

        // The second check no longer finds the entry at all.
        assert_eq!(
            store.validate_at(&token, at(NOW)).await,
            Err(TokenError::Unknown)
        );
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = TokenStore::new();

        let token = store
            .issue_at(
                "yandex-token".to_string(),
                "chipp".to_string(),
                Duration::hours(1),
                at(NOW),
            )
            .await;

        store.revoke(&token).await;

        assert_eq!(
            store.validate_at(&token, at(NOW)).await,
            Err(TokenError::Unknown)
        );
    }
}
