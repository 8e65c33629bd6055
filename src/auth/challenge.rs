//! Challenge store for wallet authentication.
//!
//! Holds at most one live challenge per public key. A challenge is consumed
//! exactly once by a successful verification; expired entries are dropped
//! lazily on lookup and swept opportunistically on issuance.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::RngCore;

use crate::auth::constants::{
    CHALLENGE_NAMESPACE, CHALLENGE_TTL_SECONDS, STELLAR_TESTNET_NETWORK_PASSPHRASE,
};

/// One outstanding proof-of-key-ownership request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRecord {
    pub challenge: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub network_passphrase: String,
}

/// Storage seam for outstanding challenges.
///
/// The in-process map below is fine for a single instance; a multi-instance
/// deployment needs an implementation backed by a shared TTL store, which is
/// why the orchestrator only talks to this trait.
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    /// Creates and stores a fresh challenge for `public_key`, replacing any
    /// previous one. Always succeeds.
    async fn issue(&self, public_key: &str) -> ChallengeRecord;

    /// Returns the live challenge, if any. An expired entry is deleted as a
    /// side effect and reported as absent. Does not consume.
    async fn get(&self, public_key: &str) -> Option<ChallengeRecord>;

    /// Removes the challenge for `public_key`. Returns whether an entry was
    /// actually removed, so concurrent consumers can tell who won.
    async fn remove(&self, public_key: &str) -> bool;
}

/// Process-wide in-memory challenge store.
pub struct InMemoryChallengeStore {
    ttl: Duration,
    challenges: Mutex<HashMap<String, ChallengeRecord>>,
}

impl InMemoryChallengeStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(CHALLENGE_TTL_SECONDS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            challenges: Mutex::new(HashMap::new()),
        }
    }

    fn build_challenge(public_key: &str, now: DateTime<Utc>) -> String {
        let mut nonce_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        // The signed payload carries the key, timestamp and network context so
        // a signature over it cannot be replayed for another key or network.
        [
            CHALLENGE_NAMESPACE.to_string(),
            format!("publicKey={public_key}"),
            format!("timestamp={}", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            format!("nonce={}", hex::encode(nonce_bytes)),
            format!("networkPassphrase={STELLAR_TESTNET_NETWORK_PASSPHRASE}"),
        ]
        .join("|")
    }
}

impl Default for InMemoryChallengeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeRepository for InMemoryChallengeStore {
    async fn issue(&self, public_key: &str) -> ChallengeRecord {
        let now = Utc::now();
        let record = ChallengeRecord {
            challenge: Self::build_challenge(public_key, now),
            created_at: now,
            expires_at: now + self.ttl,
            network_passphrase: STELLAR_TESTNET_NETWORK_PASSPHRASE.to_string(),
        };

        let mut challenges = self.challenges.lock().unwrap_or_else(|e| e.into_inner());
        // Amortized cleanup so abandoned challenges do not accumulate.
        challenges.retain(|_, existing| existing.expires_at > now);
        challenges.insert(public_key.to_string(), record.clone());

        record
    }

    async fn get(&self, public_key: &str) -> Option<ChallengeRecord> {
        let mut challenges = self.challenges.lock().unwrap_or_else(|e| e.into_inner());
        let record = challenges.get(public_key)?;

        if record.expires_at <= Utc::now() {
            challenges.remove(public_key);
            return None;
        }

        Some(record.clone())
    }

    async fn remove(&self, public_key: &str) -> bool {
        let mut challenges = self.challenges.lock().unwrap_or_else(|e| e.into_inner());
        challenges.remove(public_key).is_some()
    }
}
