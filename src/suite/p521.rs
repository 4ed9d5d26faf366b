//! NIST P-521, bound to SHA-512 (spec.md §4.2 suite table).

use elliptic_curve::group::Group as _;
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use hmac::Mac as _;
use p521::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};
use rand_core::CryptoRngCore;
use sha2::Digest as _;

use crate::error::{Error, GroupError, Result};
use crate::group::{reduce_group_bytes, Group};
use crate::mhf::Mhf;
use crate::suite::{mhf_reduced, CipherSuite};

const P521_M: [u8; 67] = hex_literal::hex!(
    "02003f06f38131b2ba2600791e82488e8d20ab889af753a41806c5db18d37d85608cfae06b82e4a72cd744c719193562a653ea1f119eef9356907edc9b56979962d7aa"
);
const P521_N: [u8; 67] = hex_literal::hex!(
    "0200c7924b9ec017f3094562894336a53c50167ba8c5963876880542bc669e494b2532d76c5b53dfb349fdf69154b9e0048c58a42e8ed04cef052a3bc349d95575cd25"
);

/// P-521's prime-order subgroup (the whole curve group; cofactor 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct P521Group;

impl Group for P521Group {
    type Scalar = Scalar;
    type Element = ProjectivePoint;

    const SCALAR_LEN: usize = 66;
    const ELEMENT_LEN: usize = 133;
    const COFACTOR: u8 = 1;
    const BIG_ENDIAN: bool = true;

    fn random_scalar(rng: &mut impl CryptoRngCore) -> core::result::Result<Self::Scalar, Error> {
        let mut buf = [0u8; 132];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RandomnessFailure)?;
        Ok(Self::scalar_reduce_bytes(&buf))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Scalar, GroupError> {
        if bytes.len() != Self::SCALAR_LEN {
            return Err(GroupError);
        }
        let mut repr = p521::FieldBytes::default();
        repr.copy_from_slice(bytes);
        Option::from(Scalar::from_repr(repr)).ok_or(GroupError)
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
        s.to_repr().to_vec()
    }

    fn scalar_negate(s: &Self::Scalar) -> Self::Scalar {
        -*s
    }

    fn element_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Element, GroupError> {
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| GroupError)?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded)).ok_or(GroupError)?;
        Ok(ProjectivePoint::from(affine))
    }

    fn element_to_bytes(e: &Self::Element) -> alloc::vec::Vec<u8> {
        e.to_affine().to_encoded_point(false).as_bytes().to_vec()
    }

    fn scalar_mult(s: &Self::Scalar, p: &Self::Element) -> Self::Element {
        *p * s
    }

    fn base_mult(s: &Self::Scalar) -> Self::Element {
        ProjectivePoint::generator() * s
    }

    fn add(p: &Self::Element, q: &Self::Element) -> Self::Element {
        *p + *q
    }

    fn identity() -> Self::Element {
        ProjectivePoint::identity()
    }

    fn is_identity(p: &Self::Element) -> bool {
        p.is_identity().into()
    }

    fn clear_cofactor(p: &Self::Element) -> Self::Element {
        *p
    }

    fn m() -> Self::Element {
        Self::element_from_bytes(&P521_M).expect("P521 M constant decodes")
    }

    fn n() -> Self::Element {
        Self::element_from_bytes(&P521_N).expect("P521 N constant decodes")
    }
}

/// P-521 with SHA-512, HKDF-SHA512 and HMAC-SHA512 — the only SHA-512
/// suite row in the table that isn't paired with a SHA-256 sibling,
/// since P-521 has no SHA-256 row (spec.md §4.2).
pub struct P521Sha512HkdfHmac<M> {
    mhf: M,
}

impl<M: Mhf> P521Sha512HkdfHmac<M> {
    /// Bind a memory-hard function provider to this suite.
    pub fn new(mhf: M) -> Self {
        Self { mhf }
    }
}

impl<M: Mhf> CipherSuite for P521Sha512HkdfHmac<M> {
    type Group = P521Group;

    const NAME: &'static str = "P521Sha512HkdfHmac";

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
        mhf_reduced::<P521Group>(&self.mhf, password, salt, 64)
    }
}
