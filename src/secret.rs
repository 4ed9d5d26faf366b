//! Shared-secret and confirmation-handle carriers (spec.md §4.6, §6).

extern crate alloc;
use alloc::vec::Vec;

use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

/// A lightweight `(own_tag, remote_tag, suite)` carrier (spec.md §4.6):
/// everything a server needs to persist between emitting `Y` and
/// verifying the client's confirmation tag, without retaining the full
/// session or `Ke`.
#[derive(Clone, Debug, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct ConfirmationHandle {
    own_tag: Vec<u8>,
    expected_tag: Vec<u8>,
    #[zeroize(skip)]
    suite_name: &'static str,
}

impl ConfirmationHandle {
    pub(crate) fn new(own_tag: Vec<u8>, expected_tag: Vec<u8>, suite_name: &'static str) -> Self {
        Self {
            own_tag,
            expected_tag,
            suite_name,
        }
    }

    /// This side's own confirmation tag (`cA` for a client, `cB` for a
    /// server), to be sent to the peer.
    pub fn bytes(&self) -> &[u8] {
        &self.own_tag
    }

    /// The suite identifier this handle was produced under, so a
    /// reloaded handle can be matched back to the suite it came from.
    pub fn suite_name(&self) -> &'static str {
        self.suite_name
    }

    /// Check `incoming` (the peer's confirmation tag) against the tag
    /// this side expects, in constant time.
    pub fn verify(&self, incoming: &[u8]) -> Result<()> {
        if bool::from(self.expected_tag.as_slice().ct_eq(incoming)) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

/// The output of a completed key-exchange half (spec.md §4.4/§4.5's
/// `SECRETS_READY` state): `Ke` plus the two confirmation tags needed to
/// reach `CONFIRMED`.
///
/// `Ke` is handed out through [`SharedSecret::bytes`] uncleared; per
/// spec.md §9 it is the caller's responsibility to zeroize it once
/// consumed. The confirmation tags zeroize themselves on drop via the
/// embedded [`ConfirmationHandle`].
#[derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct SharedSecret {
    #[zeroize(skip)]
    ke: Vec<u8>,
    handle: ConfirmationHandle,
}

impl SharedSecret {
    pub(crate) fn new(ke: Vec<u8>, own_tag: Vec<u8>, expected_tag: Vec<u8>, suite_name: &'static str) -> Self {
        Self {
            ke,
            handle: ConfirmationHandle::new(own_tag, expected_tag, suite_name),
        }
    }

    /// Rebuild a `SharedSecret` from a `Ke` kept by the caller alongside
    /// a [`ConfirmationHandle`] reloaded from persistence.
    pub fn from_parts(ke: Vec<u8>, handle: ConfirmationHandle) -> Self {
        Self { ke, handle }
    }

    /// This side's confirmation tag. Idempotent: repeated calls return
    /// the same bytes without mutating any state (spec.md §8, property
    /// 7), since the tag was computed once at construction.
    pub fn confirmation(&self) -> &[u8] {
        self.handle.bytes()
    }

    /// Check the peer's confirmation tag in constant time.
    pub fn verify(&self, peer_tag: &[u8]) -> Result<()> {
        self.handle.verify(peer_tag)
    }

    /// `Ke`, the protocol's output shared secret.
    pub fn bytes(&self) -> &[u8] {
        &self.ke
    }

    /// Split into the carrier pieces intended for persistence
    /// (everything except `Ke`) and the part the caller owns directly.
    pub fn into_parts(self) -> (Vec<u8>, ConfirmationHandle) {
        (self.ke.clone(), self.handle.clone())
    }
}
