//! Authentication module for LemiPay
//!
//! Provides wallet-based authentication using Stellar addresses.
//! - Challenge-response authentication with nonces
//! - Dual-convention wallet signature verification
//! - JWT session token generation and validation

pub mod challenge;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod jwt;
pub mod service;

pub use challenge::{ChallengeRecord, ChallengeRepository, InMemoryChallengeStore};
pub use crypto::{is_valid_public_key, verify_wallet_signature};
pub use error::AuthError;
pub use jwt::{SessionClaims, SessionKeys};
pub use service::{AuthService, VerifiedSession};
