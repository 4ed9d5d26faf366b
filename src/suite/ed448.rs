//! Ed448, bound to SHA-512 (spec.md §4.2 suite table).
//!
//! Cofactor 4; every shared point crossing a trust boundary is cleared
//! via [`EdwardsPoint::mul_by_cofactor`] before use, matching spec.md
//! §4.4/§4.5's small-subgroup rejection step.

use ed448_goldilocks::{CompressedEdwardsY, EdwardsPoint, Scalar};
use group::Group as _;
use hmac::Mac as _;
use rand_core::CryptoRngCore;
use sha2::Digest as _;

use crate::error::{Error, GroupError, Result};
use crate::group::{reduce_group_bytes, Group};
use crate::mhf::Mhf;
use crate::suite::{mhf_reduced, CipherSuite};

const ED448_M: [u8; 57] = hex_literal::hex!(
    "b6221038a775ecd007a4e4dde39fd76ae91d3cf0cc92be8f0c2fa6d6b66f9a12942f5a92646109152292464f3e63d354701c7848d9fc3b8880"
);
const ED448_N: [u8; 57] = hex_literal::hex!(
    "6034c65b66e4cd7a49b0edec3e3c9ccc4588afd8cf324e29f0a84a072531c4dbf97ff9af195ed714a689251f08f8e06e2d1f24a0ffc0146600"
);

/// Ed448's prime-order subgroup (index-4 inside the full curve group).
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed448Group;

impl Group for Ed448Group {
    type Scalar = Scalar;
    type Element = EdwardsPoint;

    const SCALAR_LEN: usize = 56;
    const ELEMENT_LEN: usize = 57;
    const COFACTOR: u8 = 4;
    const BIG_ENDIAN: bool = false;

    fn random_scalar(rng: &mut impl CryptoRngCore) -> core::result::Result<Self::Scalar, Error> {
        let mut buf = [0u8; 112];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RandomnessFailure)?;
        Ok(Self::scalar_reduce_bytes(&buf))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Scalar, GroupError> {
        if bytes.len() != Self::SCALAR_LEN {
            return Err(GroupError);
        }
        let mut repr = [0u8; 56];
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
        if bytes.len() != Self::ELEMENT_LEN {
            return Err(GroupError);
        }
        let mut repr = [0u8; 57];
        repr.copy_from_slice(bytes);
        let compressed = CompressedEdwardsY(repr);
        Option::from(compressed.decompress()).ok_or(GroupError)
    }

    fn element_to_bytes(e: &Self::Element) -> alloc::vec::Vec<u8> {
        e.compress().0.to_vec()
    }

    fn scalar_mult(s: &Self::Scalar, p: &Self::Element) -> Self::Element {
        p * s
    }

    fn base_mult(s: &Self::Scalar) -> Self::Element {
        EdwardsPoint::generator() * s
    }

    fn add(p: &Self::Element, q: &Self::Element) -> Self::Element {
        p + q
    }

    fn identity() -> Self::Element {
        EdwardsPoint::identity()
    }

    fn is_identity(p: &Self::Element) -> bool {
        p.is_identity().into()
    }

    fn clear_cofactor(p: &Self::Element) -> Self::Element {
        p.mul_by_cofactor()
    }

    fn m() -> Self::Element {
        Self::element_from_bytes(&ED448_M).expect("Ed448 M constant decodes")
    }

    fn n() -> Self::Element {
        Self::element_from_bytes(&ED448_N).expect("Ed448 N constant decodes")
    }
}

/// Ed448 with SHA-512, HKDF-SHA512 and HMAC-SHA512.
pub struct Ed448Sha512HkdfHmac<M> {
    mhf: M,
}

impl<M: Mhf> Ed448Sha512HkdfHmac<M> {
    /// Bind a memory-hard function provider to this suite.
    pub fn new(mhf: M) -> Self {
        Self { mhf }
    }
}

impl<M: Mhf> CipherSuite for Ed448Sha512HkdfHmac<M> {
    type Group = Ed448Group;

    const NAME: &'static str = "Ed448Sha512HkdfHmac";

    fn hash_digest(&self, data: &[u8]) -> alloc::vec::Vec<u8> {
        sha2::Sha512::digest(data).to_vec()
    }

    fn hash_size(&self) -> usize {
        64
    }

    fn derive_key(&self, salt: &[u8], ikm: &[u8], info: &[u8]) -> alloc::vec::Vec<u8> {
        let hk = hkdf::Hkdf::<sha2::Sha512>::new(Some(salt), ikm);
        let mut out = alloc::vec![0u8; 64];
        hk.expand(info, &mut out).expect("hkdf output length valid");
        out
    }

    fn mac(&self, msg: &[u8], key: &[u8]) -> alloc::vec::Vec<u8> {
        let mut mac = hmac::Hmac::<sha2::Sha512>::new_from_slice(key).expect("hmac accepts any key length");
        mac.update(msg);
        mac.finalize().into_bytes().to_vec()
    }

    fn mac_equal(&self, a: &[u8], b: &[u8]) -> bool {
        use subtle::ConstantTimeEq;
        a.ct_eq(b).into()
    }

    fn mhf(&self, password: &[u8], salt: &[u8]) -> Result<alloc::vec::Vec<u8>> {
        mhf_reduced::<Ed448Group>(&self.mhf, password, salt, 64)
    }
}
