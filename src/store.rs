//! The user-record store: an external collaborator the core consumes
//! only through a single `fetch` operation (spec.md §1, §5).
//!
//! This module is `std`-only; the core itself stays `no_std`-friendly
//! and a production deployment is expected to back [`Lookup`] with its
//! own non-volatile store. [`MapLookup`] is the supplied in-memory
//! reference implementation, grounded directly in the upstream
//! `MapLookup`/`mu sync.RWMutex` pair: many concurrent fetches, one
//! exclusive registration, no lock held across any cryptographic
//! operation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::record::VerifierRecord;

/// Identity → verifier-record lookup, consumed by [`crate::Verifier`].
///
/// `fetch` returning `None` on a miss is not itself an error: spec.md
/// §4.5 requires the caller to run a dummy-verifier branch rather than
/// short-circuit, so that lookup misses are indistinguishable from hits
/// at the protocol level.
pub trait Lookup {
    /// Look up the verifier record registered for `identity`.
    fn fetch(&self, identity: &[u8]) -> Option<VerifierRecord>;
}

/// Reference in-memory [`Lookup`]: a reader-writer-guarded map keyed on
/// identity bytes. Intended for tests and small deployments; production
/// use should back [`Lookup`] with a real non-volatile store instead.
#[derive(Default)]
pub struct MapLookup {
    inner: RwLock<HashMap<Vec<u8>, VerifierRecord>>,
}

impl MapLookup {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the verifier record for `identity`,
    /// produced out of band by [`crate::Prover::verifier_record`] at
    /// enrollment.
    pub fn add(&self, identity: Vec<u8>, record: VerifierRecord) {
        let mut guard = self.inner.write().expect("verifier store lock poisoned");
        guard.insert(identity, record);
    }
}

impl Lookup for MapLookup {
    fn fetch(&self, identity: &[u8]) -> Option<VerifierRecord> {
        let guard = self.inner.read().expect("verifier store lock poisoned");
        guard.get(identity).cloned()
    }
}
