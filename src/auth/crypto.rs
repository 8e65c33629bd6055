//! Stellar key handling and wallet signature verification.
//!
//! Public keys arrive as strkey-encoded ed25519 keys (`G...`). Signatures are
//! accepted under two signing conventions because wallet clients disagree:
//! Freighter signs `SHA256("Stellar Signed Message:\n" + message)`, other
//! clients sign the raw message bytes. Both are checked, prefixed form first.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::auth::constants::SIGNED_MESSAGE_PREFIX;

/// Strkey version byte for ed25519 public keys (renders as a leading 'G').
const STRKEY_PUBLIC_KEY_VERSION: u8 = 6 << 3;

const BASE32_ALPHABET: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// Decodes a strkey public key into its raw 32 ed25519 bytes.
///
/// Returns `None` for anything that is not a well-formed `G...` address:
/// wrong length, wrong version byte, bad base32, or checksum mismatch.
pub fn decode_public_key(public_key: &str) -> Option<[u8; 32]> {
    if public_key.len() != 56 {
        return None;
    }

    let decoded = base32::decode(BASE32_ALPHABET, public_key)?;
    if decoded.len() != 35 || decoded[0] != STRKEY_PUBLIC_KEY_VERSION {
        return None;
    }

    let (payload, checksum) = decoded.split_at(33);
    let expected = crc16_xmodem(payload);
    if checksum != expected.to_le_bytes() {
        return None;
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&payload[1..33]);
    Some(key_bytes)
}

/// Encodes raw ed25519 public key bytes as a strkey `G...` address.
pub fn encode_public_key(key_bytes: &[u8; 32]) -> String {
    let mut payload = Vec::with_capacity(35);
    payload.push(STRKEY_PUBLIC_KEY_VERSION);
    payload.extend_from_slice(key_bytes);
    let checksum = crc16_xmodem(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());
    base32::encode(BASE32_ALPHABET, &payload)
}

/// Structural validity check used by request validation.
pub fn is_valid_public_key(public_key: &str) -> bool {
    decode_public_key(public_key).is_some()
}

/// Verifies that `signed_message_base64` is a valid wallet signature over
/// `challenge` under `public_key`.
///
/// Never panics; every failure mode (bad key, bad base64, empty or malformed
/// signature, cryptographic mismatch) collapses to `false`.
pub fn verify_wallet_signature(
    public_key: &str,
    challenge: &str,
    signed_message_base64: &str,
) -> bool {
    let Some(key_bytes) = decode_public_key(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let Ok(signature_bytes) = BASE64.decode(signed_message_base64) else {
        return false;
    };
    if signature_bytes.is_empty() {
        return false;
    }
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };

    // 1) Freighter standard: sign(SHA256("Stellar Signed Message:\n" + message))
    let prefixed_hash = Sha256::digest(format!("{SIGNED_MESSAGE_PREFIX}{challenge}"));
    if verifying_key.verify(prefixed_hash.as_slice(), &signature).is_ok() {
        return true;
    }

    // 2) Fallback: raw challenge bytes (some clients sign the message directly)
    verifying_key
        .verify(challenge.as_bytes(), &signature)
        .is_ok()
}

/// CRC16-XModem (poly 0x1021, init 0), the strkey checksum.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    fn test_keypair() -> (SigningKey, String) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let address = encode_public_key(signing_key.verifying_key().as_bytes());
        (signing_key, address)
    }

    #[test]
    fn encode_decode_roundtrip() {
        let (signing_key, address) = test_keypair();
        assert_eq!(address.len(), 56);
        assert!(address.starts_with('G'));
        assert_eq!(
            decode_public_key(&address),
            Some(*signing_key.verifying_key().as_bytes())
        );
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(!is_valid_public_key(""));
        assert!(!is_valid_public_key("not-a-key"));
        assert!(!is_valid_public_key(&"G".repeat(56)));

        // Corrupt the checksum by changing the final character.
        let (_, address) = test_keypair();
        let tail = if address.ends_with('A') { 'B' } else { 'A' };
        let mut corrupted = address[..55].to_string();
        corrupted.push(tail);
        assert!(!is_valid_public_key(&corrupted));
    }

    #[test]
    fn accepts_prefixed_hash_convention() {
        let (signing_key, address) = test_keypair();
        let challenge = "lemipay-sep10|publicKey=X|nonce=1";

        let digest = Sha256::digest(format!("{SIGNED_MESSAGE_PREFIX}{challenge}"));
        let signature = BASE64.encode(signing_key.sign(digest.as_slice()).to_bytes());

        assert!(verify_wallet_signature(&address, challenge, &signature));
    }

    #[test]
    fn accepts_raw_message_convention() {
        let (signing_key, address) = test_keypair();
        let challenge = "lemipay-sep10|publicKey=X|nonce=2";

        let signature = BASE64.encode(signing_key.sign(challenge.as_bytes()).to_bytes());

        assert!(verify_wallet_signature(&address, challenge, &signature));
    }

    #[test]
    fn rejects_signature_from_other_key() {
        let (other_key, _) = test_keypair();
        let (_, address) = test_keypair();
        let challenge = "lemipay-sep10|publicKey=X|nonce=3";

        let digest = Sha256::digest(format!("{SIGNED_MESSAGE_PREFIX}{challenge}"));
        let prefixed = BASE64.encode(other_key.sign(digest.as_slice()).to_bytes());
        let raw = BASE64.encode(other_key.sign(challenge.as_bytes()).to_bytes());

        assert!(!verify_wallet_signature(&address, challenge, &prefixed));
        assert!(!verify_wallet_signature(&address, challenge, &raw));
    }

    #[test]
    fn rejects_signature_over_different_challenge() {
        let (signing_key, address) = test_keypair();
        let signed_for = "lemipay-sep10|nonce=aaaa";
        let submitted = "lemipay-sep10|nonce=bbbb";

        let digest = Sha256::digest(format!("{SIGNED_MESSAGE_PREFIX}{signed_for}"));
        let signature = BASE64.encode(signing_key.sign(digest.as_slice()).to_bytes());

        assert!(!verify_wallet_signature(&address, submitted, &signature));
    }

    #[test]
    fn rejects_garbage_signatures() {
        let (_, address) = test_keypair();
        let challenge = "lemipay-sep10|nonce=4";

        assert!(!verify_wallet_signature(&address, challenge, ""));
        assert!(!verify_wallet_signature(&address, challenge, "%%%not-base64%%%"));
        // Valid base64 but not 64 signature bytes.
        assert!(!verify_wallet_signature(&address, challenge, &BASE64.encode([1u8; 10])));
    }
}
