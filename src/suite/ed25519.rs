//! Ed25519, bound to SHA-256 (spec.md §4.2 suite table).
//!
//! Unlike the NIST curves this group has cofactor 8, so every shared
//! point crossing a trust boundary is cleared via
//! [`curve25519_dalek::edwards::EdwardsPoint::mul_by_cofactor`] before
//! use, matching spec.md §4.4/§4.5's small-subgroup rejection step.

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::{Identity, IsIdentity};
use hmac::Mac as _;
use rand_core::CryptoRngCore;
use sha2::Digest as _;

use crate::error::{Error, GroupError, Result};
use crate::group::{reduce_group_bytes, Group};
use crate::mhf::Mhf;
use crate::suite::{mhf_reduced, CipherSuite};

const ED25519_M: [u8; 32] = hex_literal::hex!("d048032c6ea0b6d697ddc2e86bda85a33adac920f1bf18e1b0c6d166a5cecda");
const ED25519_N: [u8; 32] = hex_literal::hex!("d3bfb518f44f3430f29d0c92af503865a1ed3281dc69b35dd868ba85f886c4a");

/// Ed25519's prime-order subgroup (index-8 inside the full curve group).
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Group;

impl Group for Ed25519Group {
    type Scalar = Scalar;
    type Element = EdwardsPoint;

    const SCALAR_LEN: usize = 32;
    const ELEMENT_LEN: usize = 32;
    const COFACTOR: u8 = 8;
    const BIG_ENDIAN: bool = false;

    fn random_scalar(rng: &mut impl CryptoRngCore) -> core::result::Result<Self::Scalar, Error> {
        let mut buf = [0u8; 64];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RandomnessFailure)?;
        Ok(Scalar::from_bytes_mod_order_wide(&buf))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Scalar, GroupError> {
        if bytes.len() != Self::SCALAR_LEN {
            return Err(GroupError);
        }
        let mut repr = [0u8; 32];
        repr.copy_from_slice(bytes);
        Option::from(Scalar::from_canonical_bytes(repr)).ok_or(GroupError)
    }

    fn scalar_reduce_bytes(bytes: &[u8]) -> Self::Scalar {
        reduce_group_bytes(
            bytes,
            Self::BIG_ENDIAN,
            Scalar::ZERO,
            |b| Scalar::from(u64::from(b)),
            |acc| acc * Scalar::from(256u64),
            |a, b| a + b,
        )
    }

    fn scalar_to_bytes(s: &Self::Scalar) -> alloc::vec::Vec<u8> {
        s.to_bytes().to_vec()
    }

    fn scalar_negate(s: &Self::Scalar) -> Self::Scalar {
        -s
    }

    fn element_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Element, GroupError> {
        let compressed = CompressedEdwardsY::from_slice(bytes).map_err(|_| GroupError)?;
        compressed.decompress().ok_or(GroupError)
    }

    fn element_to_bytes(e: &Self::Element) -> alloc::vec::Vec<u8> {
        e.compress().to_bytes().to_vec()
    }

    fn scalar_mult(s: &Self::Scalar, p: &Self::Element) -> Self::Element {
        p * s
    }

    fn base_mult(s: &Self::Scalar) -> Self::Element {
        ED25519_BASEPOINT_POINT * s
    }

    fn add(p: &Self::Element, q: &Self::Element) -> Self::Element {
        p + q
    }

    fn identity() -> Self::Element {
        EdwardsPoint::identity()
    }

    fn is_identity(p: &Self::Element) -> bool {
        p.is_identity()
    }

    fn clear_cofactor(p: &Self::Element) -> Self::Element {
        p.mul_by_cofactor()
    }

    fn m() -> Self::Element {
        Self::element_from_bytes(&ED25519_M).expect("Ed25519 M constant decodes")
    }

    fn n() -> Self::Element {
        Self::element_from_bytes(&ED25519_N).expect("Ed25519 N constant decodes")
    }
}

/// Ed25519 with SHA-256, HKDF-SHA256 and HMAC-SHA256.
pub struct Ed25519Sha256HkdfHmac<M> {
    mhf: M,
}

impl<M: Mhf> Ed25519Sha256HkdfHmac<M> {
    /// Bind a memory-hard function provider to this suite.
    pub fn new(mhf: M) -> Self {
        Self { mhf }
    }
}

impl<M: Mhf> CipherSuite for Ed25519Sha256HkdfHmac<M> {
    type Group = Ed25519Group;

    const NAME: &'static str = "Ed25519Sha256HkdfHmac";

    fn hash_digest(&self, data: &[u8]) -> alloc::vec::Vec<u8> {
        sha2::Sha256::digest(data).to_vec()
    }

    fn hash_size(&self) -> usize {
        32
    }

    fn derive_key(&self, salt: &[u8], ikm: &[u8], info: &[u8]) -> alloc::vec::Vec<u8> {
        let hk = hkdf::Hkdf::<sha2::Sha256>::new(Some(salt), ikm);
        let mut out = alloc::vec![0u8; 32];
        hk.expand(info, &mut out).expect("hkdf output length valid");
        out
    }

    fn mac(&self, msg: &[u8], key: &[u8]) -> alloc::vec::Vec<u8> {
        let mut mac = hmac::Hmac::<sha2::Sha256>::new_from_slice(key).expect("hmac accepts any key length");
        mac.update(msg);
        mac.finalize().into_bytes().to_vec()
    }

    fn mac_equal(&self, a: &[u8], b: &[u8]) -> bool {
        use subtle::ConstantTimeEq;
        a.ct_eq(b).into()
    }

    fn mhf(&self, password: &[u8], salt: &[u8]) -> Result<alloc::vec::Vec<u8>> {
        mhf_reduced::<Ed25519Group>(&self.mhf, password, salt, 32)
    }
}
