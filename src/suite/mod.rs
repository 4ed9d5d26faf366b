//! Cipher suites binding a [`Group`] to a hash, KDF, MAC and MHF
//! (spec.md §4.2).

pub mod ed25519;
pub mod ed448;
pub mod p256;
pub mod p384;
pub mod p521;

pub use ed25519::Ed25519Sha256HkdfHmac;
pub use ed448::Ed448Sha512HkdfHmac;
pub use p256::{P256Sha256HkdfHmac, P256Sha512HkdfHmac};
pub use p384::{P384Sha256HkdfHmac, P384Sha512HkdfHmac};
pub use p521::P521Sha512HkdfHmac;

extern crate alloc;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::group::{resize_at_high_end, Group};
use crate::mhf::Mhf;
use crate::transcript::concat_skip_empty;

/// A complete SPAKE2+ cipher suite: a [`Group`] plus the hash, KDF, MAC
/// and MHF bound to it (spec.md §4.2).
pub trait CipherSuite {
    /// The prime-order group this suite operates over.
    type Group: Group;

    /// Human-readable suite identifier, e.g. `"P256-SHA256-HKDF-HMAC"`.
    const NAME: &'static str;

    /// `hash_digest(b)` — fixed-length cryptographic hash.
    fn hash_digest(&self, data: &[u8]) -> Vec<u8>;

    /// `hash_size()` — digest byte length.
    fn hash_size(&self) -> usize;

    /// `derive_key(salt, ikm, info)` — HKDF output of exactly
    /// `hash_size()` bytes.
    fn derive_key(&self, salt: &[u8], ikm: &[u8], info: &[u8]) -> Vec<u8>;

    /// `mac(msg, key)` — keyed MAC.
    fn mac(&self, msg: &[u8], key: &[u8]) -> Vec<u8>;

    /// `mac_equal(a, b)` — constant-time comparison.
    fn mac_equal(&self, a: &[u8], b: &[u8]) -> bool;

    /// Invoke the configured MHF with output length `hash_size()`,
    /// reduce the result modulo the group order, and return the
    /// canonical `hash_size()`-byte encoding (left-padded with zeros if
    /// the reduced value is shorter).
    fn mhf(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>>;

    /// `computeW0W1`: derive `w0 || w1` from the password and both
    /// identities, then split the MHF output in half (spec.md §3
    /// "Password material").
    fn compute_w0_w1(
        &self,
        client_identity: &[u8],
        server_identity: &[u8],
        password: &[u8],
        salt: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        let input = concat_skip_empty(&[password, client_identity, server_identity]);
        let w = self.mhf(&input, salt)?;
        let half = w.len() / 2;
        Ok((w[..half].to_vec(), w[half..].to_vec()))
    }
}

/// Shared MHF-with-reduction logic used by every concrete suite's
/// [`CipherSuite::mhf`] implementation.
///
/// The MHF is invoked for `out_len` bytes (`out_len` is the suite's
/// `hash_size()`, which may be smaller or larger than `G::SCALAR_LEN`),
/// the raw output reduced modulo the group order, and the result resized
/// back to exactly `out_len` bytes. Resizing up (zero-extend) or down
/// (drop high-order zero bytes) is always lossless here: a reduction of
/// an `out_len`-byte input is itself always representable in `out_len`
/// bytes, since the remainder never exceeds the dividend.
pub(crate) fn mhf_reduced<G: Group>(mhf: &impl Mhf, password: &[u8], salt: &[u8], out_len: usize) -> Result<Vec<u8>> {
    let mut raw = alloc::vec![0u8; out_len];
    mhf.derive(password, salt, &mut raw).map_err(|_| Error::MhfFailure)?;
    let scalar = G::scalar_reduce_bytes(&raw);
    let bytes = G::scalar_to_bytes(&scalar);
    Ok(resize_at_high_end(bytes, out_len, G::BIG_ENDIAN))
}
