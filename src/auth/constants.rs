//! Protocol constants for wallet authentication.

/// Network passphrase the challenge is scoped to. Signatures over a challenge
/// issued for another network must not be accepted.
pub const STELLAR_TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Freighter's signMessage convention signs SHA256(prefix + message).
pub const SIGNED_MESSAGE_PREFIX: &str = "Stellar Signed Message:\n";

/// Namespace tag embedded at the front of every challenge string.
pub const CHALLENGE_NAMESPACE: &str = "lemipay-sep10";

/// Time to live for auth challenges (10 min).
pub const CHALLENGE_TTL_SECONDS: i64 = 10 * 60;

pub const AUTH_COOKIE_NAME: &str = "lemipay_session";

/// Session lifetime (7 days), shared by the JWT expiry and the cookie max-age.
pub const AUTH_COOKIE_MAX_AGE_SECONDS: i64 = 60 * 60 * 24 * 7;
