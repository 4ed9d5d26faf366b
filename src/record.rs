//! Verifier records: the long-lived, server-stored output of client-side
//! registration (spec.md §3 "Verifier record", §6 "Wire formats").

extern crate alloc;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// `(I, V1, V2)` produced by [`crate::Prover::verifier_record`] at
/// enrollment and handed to the server's store.
///
/// `V1` is the raw `w0` byte string (the password-derived half straight
/// out of the MHF split, `hash_size()/2` bytes — not the group's
/// `SCALAR_LEN`-byte scalar encoding); `V2` is `L.bytes()`, the suite's
/// canonical point encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierRecord {
    /// The identity this record is keyed on.
    pub i: Vec<u8>,
    /// `w0`, as the raw MHF-split byte string.
    pub v1: Vec<u8>,
    /// `L.bytes()`.
    pub v2: Vec<u8>,
}

impl VerifierRecord {
    /// Construct a record from its three fields.
    pub fn new(i: Vec<u8>, v1: Vec<u8>, v2: Vec<u8>) -> Self {
        Self { i, v1, v2 }
    }

    /// The `hex(I) ":" hex(V1) hex(V2)` convenience encoding (spec.md §6:
    /// "not wire-critical"), useful for flat-file or log persistence of
    /// a record produced out of band at enrollment.
    pub fn to_hex_string(&self) -> String {
        format!("{}:{}{}", hex::encode(&self.i), hex::encode(&self.v1), hex::encode(&self.v2))
    }

    /// Parse the `to_hex_string` convenience encoding. `v1_len` must be
    /// supplied by the caller (it is suite-dependent: `hash_size()/2`)
    /// since the concatenated `V1 || V2` hex run has no internal
    /// delimiter.
    pub fn from_hex_str(s: &str, v1_len: usize) -> Option<Self> {
        let (i_hex, rest_hex) = s.split_once(':')?;
        let i = hex::decode(i_hex).ok()?;
        let rest = hex::decode(rest_hex).ok()?;
        if rest.len() < v1_len {
            return None;
        }
        let (v1, v2) = rest.split_at(v1_len);
        Some(Self::new(i, v1.to_vec(), v2.to_vec()))
    }
}
