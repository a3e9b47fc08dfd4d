//! Ed25519 proposer signatures.
//!
//! A proposer signs the **signing root** of its block header:
//! `SHA-256(header_hash || domain)`, where the domain binds the signature to
//! the proposer domain type and the fork version in force at the block's
//! epoch. Signatures therefore cannot be replayed across forks or duties.

use ed25519_dalek::{Signer, Verifier};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::constants::{ChainSpec, PUBKEY_BYTES, SIGNATURE_BYTES};
use crate::error::CryptoError;
use crate::types::{BeaconBlock, BeaconBlockHeader, Fork, Hash256};

/// Ed25519 keypair for signing blocks.
///
/// Wraps [`ed25519_dalek::SigningKey`]. Use [`KeyPair::from_secret_bytes`]
/// for deterministic derivation from a seed.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl KeyPair {
    /// Create a keypair from 32-byte secret key material.
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(&bytes),
        }
    }

    /// Derive the public key from this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// Sign a message, returning the raw 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_BYTES] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying proposer signatures.
#[derive(Clone)]
pub struct PublicKey {
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Create a public key from raw bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; PUBKEY_BYTES]) -> Result<Self, CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key: vk })
    }

    /// Get the raw public key bytes (32 bytes).
    pub fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.verifying_key.to_bytes()
    }

    /// Verify an Ed25519 signature on a message.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8; SIGNATURE_BYTES],
    ) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        self.verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

/// Proposer signing domain at `epoch`: domain type followed by the first
/// 28 bytes of `SHA-256(fork_version)`.
pub fn proposer_domain(spec: &ChainSpec, fork: &Fork, epoch: u64) -> [u8; 32] {
    let version_digest = Sha256::digest(fork.version_at(epoch));
    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&spec.domain_beacon_proposer);
    domain[4..].copy_from_slice(&version_digest[..28]);
    domain
}

/// Digest a proposer signs for `header` under `domain`.
pub fn signing_root(header: &BeaconBlockHeader, domain: &[u8; 32]) -> Hash256 {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(header.hash().as_bytes());
    data.extend_from_slice(domain);
    Hash256(Sha256::digest(&data).into())
}

/// Verify `signature` over `header` by the holder of `pubkey`.
///
/// Checks that the key parses, the signature is exactly 64 bytes, and the
/// Ed25519 signature verifies against the signing root.
pub fn verify_header_signature(
    header: &BeaconBlockHeader,
    signature: &[u8],
    pubkey: &[u8; PUBKEY_BYTES],
    domain: &[u8; 32],
) -> Result<(), CryptoError> {
    let pk = PublicKey::from_bytes(pubkey)?;
    let sig_bytes: [u8; SIGNATURE_BYTES] = signature
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature)?;
    pk.verify(signing_root(header, domain).as_bytes(), &sig_bytes)
}

/// Sign `block` in place for the given fork and spec.
///
/// The epoch comes from the block's own slot. Fails only if the body cannot
/// be encoded or `slots_per_epoch` is zero.
pub fn sign_block(
    block: &mut BeaconBlock,
    keypair: &KeyPair,
    fork: &Fork,
    spec: &ChainSpec,
) -> Result<(), CryptoError> {
    let epoch = block
        .slot
        .checked_div(spec.slots_per_epoch)
        .ok_or(CryptoError::InvalidSignature)?;
    let header = block.header().map_err(|_| CryptoError::InvalidSignature)?;
    let domain = proposer_domain(spec, fork, epoch);
    block.signature = keypair.sign(signing_root(&header, &domain).as_bytes()).to_vec();
    Ok(())
}
