//! Ed25519 key material for scenario accounts.
//!
//! Every account the scenario creates gets freshly generated Ed25519
//! keypairs. Keys are rendered with the ASN.1 DER prefixes expected by ledger
//! tooling, so the secrets file is interoperable without conversion.

use core::fmt;

use ed25519_dalek::SigningKey;
use rand::Rng;

/// ASN.1 DER prefix for an Ed25519 public key (`SubjectPublicKeyInfo`).
pub const PUBLIC_KEY_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// ASN.1 DER prefix for an Ed25519 private key (`PrivateKeyInfo`).
pub const PRIVATE_KEY_DER_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
    0x20,
];

/// A single Ed25519 keypair generated for a scenario account.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the thread-local CSPRNG.
    ///
    /// Key entropy is per-thread state, so concurrent workers never contend
    /// here.
    pub fn generate() -> Self {
        let seed: [u8; 32] = rand::rng().random();
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    /// Generates `count` independent keypairs.
    pub fn generate_many(count: u32) -> Vec<Self> {
        (0..count).map(|_| Self::generate()).collect()
    }

    /// Raw 32-byte public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// Raw 32-byte private key seed.
    pub fn private_key(&self) -> [u8; 32] {
        self.signing.to_bytes()
    }

    /// DER-encoded public key.
    pub fn public_key_der(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(PUBLIC_KEY_DER_PREFIX.len() + 32);
        der.extend_from_slice(&PUBLIC_KEY_DER_PREFIX);
        der.extend_from_slice(&self.public_key());
        der
    }

    /// DER-encoded private key.
    pub fn private_key_der(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(PRIVATE_KEY_DER_PREFIX.len() + 32);
        der.extend_from_slice(&PRIVATE_KEY_DER_PREFIX);
        der.extend_from_slice(&self.private_key());
        der
    }

    /// Hex rendering of the DER-encoded public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_der())
    }

    /// Hex rendering of the DER-encoded private key.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key_der())
    }
}

// The private half must stay out of logs and error chains.
impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn der_prefixes_match_wire_encoding() {
        assert_eq!(
            hex::encode(PUBLIC_KEY_DER_PREFIX),
            "302a300506032b6570032100"
        );
        assert_eq!(
            hex::encode(PRIVATE_KEY_DER_PREFIX),
            "302e020100300506032b657004220420"
        );
    }

    #[test]
    fn generated_keys_are_prefixed_and_sized() {
        let keypair = Keypair::generate();
        assert_eq!(keypair.public_key_der().len(), 44);
        assert_eq!(keypair.private_key_der().len(), 48);
        assert!(keypair.public_key_hex().starts_with("302a300506032b6570032100"));
        assert!(
            keypair
                .private_key_hex()
                .starts_with("302e020100300506032b657004220420")
        );
    }

    #[test]
    fn generated_keys_are_distinct() {
        let keys = Keypair::generate_many(8);
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a.public_key(), b.public_key());
            }
        }
    }

    #[test]
    fn debug_hides_private_key() {
        let keypair = Keypair::generate();
        let rendered = format!("{keypair:?}");
        assert!(rendered.contains(&keypair.public_key_hex()));
        assert!(!rendered.contains(&keypair.private_key_hex()));
    }
}
