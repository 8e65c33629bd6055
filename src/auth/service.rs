//! Authentication orchestrator.
//!
//! Sequences the challenge store, signature verifier, profile sync and
//! session codec for the two auth operations. Holds no state of its own.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::challenge::{ChallengeRecord, ChallengeRepository};
use crate::auth::crypto;
use crate::auth::error::AuthError;
use crate::auth::jwt::{SessionClaims, SessionKeys};
use crate::profile_service::ProfileService;

/// Outcome of a successful verification.
#[derive(Debug)]
pub struct VerifiedSession {
    pub public_key: String,
    pub token: String,
}

/// Wallet authentication service.
pub struct AuthService {
    challenges: Arc<dyn ChallengeRepository>,
    session_keys: SessionKeys,
    profiles: Option<Arc<ProfileService>>,
    network_passphrase: String,
}

impl AuthService {
    pub fn new(
        challenges: Arc<dyn ChallengeRepository>,
        session_keys: SessionKeys,
        profiles: Option<Arc<ProfileService>>,
        network_passphrase: String,
    ) -> Self {
        Self {
            challenges,
            session_keys,
            profiles,
            network_passphrase,
        }
    }

    /// Issues a fresh challenge for `public_key`, replacing any outstanding
    /// one. Fails only on a structurally invalid key.
    pub async fn issue_challenge(&self, public_key: &str) -> Result<ChallengeRecord, AuthError> {
        if !crypto::is_valid_public_key(public_key) {
            return Err(AuthError::InvalidPublicKey);
        }

        let record = self.challenges.issue(public_key).await;
        debug!(public_key, "issued auth challenge");
        Ok(record)
    }

    /// Verifies a signed challenge and establishes a session.
    ///
    /// The challenge is consumed only after the signature checks out, so a
    /// failed attempt stays retriable for the legitimate key holder. Profile
    /// sync runs when a backing store is configured; its failure fails the
    /// whole call.
    pub async fn verify(
        &self,
        public_key: &str,
        challenge: &str,
        signed_message: &str,
        display_name: Option<&str>,
    ) -> Result<VerifiedSession, AuthError> {
        if !crypto::is_valid_public_key(public_key) {
            return Err(AuthError::InvalidPublicKey);
        }

        let stored = self
            .challenges
            .get(public_key)
            .await
            .ok_or(AuthError::ChallengeMissing)?;

        if stored.challenge != challenge {
            return Err(AuthError::ChallengeMismatch);
        }

        if !challenge.contains(&format!("networkPassphrase={}", self.network_passphrase)) {
            return Err(AuthError::NetworkMismatch);
        }

        if !crypto::verify_wallet_signature(public_key, challenge, signed_message) {
            return Err(AuthError::InvalidSignature);
        }

        // Single-use: consume only after successful verification. Of two
        // concurrent verifies for the same key, the remove decides the winner.
        if !self.challenges.remove(public_key).await {
            return Err(AuthError::ChallengeMissing);
        }

        if let Some(profiles) = &self.profiles {
            profiles
                .sync_wallet_profile(public_key, display_name)
                .await
                .map_err(AuthError::ProfileSync)?;
        }

        let token = self
            .session_keys
            .sign_session_token(public_key)
            .map_err(AuthError::SessionToken)?;

        info!(public_key, "wallet authenticated");
        Ok(VerifiedSession {
            public_key: public_key.to_string(),
            token,
        })
    }

    /// Validates a session token from the cookie; `None` on any failure.
    pub fn verify_session_token(&self, token: &str) -> Option<SessionClaims> {
        self.session_keys.verify_session_token(token)
    }
}
