//! NIST P-256, bound to SHA-256 and SHA-512 (spec.md §4.2 suite table).

use elliptic_curve::group::Group as _;
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use hmac::Mac as _;
use p256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};
use rand_core::CryptoRngCore;
use sha2::Digest as _;

use crate::error::{Error, GroupError, Result};
use crate::group::{reduce_group_bytes, Group};
use crate::mhf::Mhf;
use crate::suite::{mhf_reduced, CipherSuite};

const P256_M: [u8; 33] = hex_literal::hex!("02886e2f97ace46e55ba9dd7242579f2993b64e16ef3dcab95afd497333d8fa12f");
const P256_N: [u8; 33] = hex_literal::hex!("03d8bbd6c639c62937b04d997f38c3770719c629d7014d49a24b4f98baa1292b49");

/// P-256's prime-order subgroup (the whole curve group; cofactor 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct P256Group;

impl Group for P256Group {
    type Scalar = Scalar;
    type Element = ProjectivePoint;

    const SCALAR_LEN: usize = 32;
    const ELEMENT_LEN: usize = 65;
    const COFACTOR: u8 = 1;
    const BIG_ENDIAN: bool = true;

    fn random_scalar(rng: &mut impl CryptoRngCore) -> core::result::Result<Self::Scalar, Error> {
        let mut buf = [0u8; 64];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RandomnessFailure)?;
        Ok(Self::scalar_reduce_bytes(&buf))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> core::result::Result<Self::Scalar, GroupError> {
        if bytes.len() != Self::SCALAR_LEN {
            return Err(GroupError);
        }
        let mut repr = p256::FieldBytes::default();
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
        Self::element_from_bytes(&P256_M).expect("P256 M constant decodes")
    }

    fn n() -> Self::Element {
        Self::element_from_bytes(&P256_N).expect("P256 N constant decodes")
    }
}

macro_rules! p256_suite {
    ($name:ident, $doc:literal, $hash:ty, $hash_size:expr) => {
        #[doc = $doc]
        pub struct $name<M> {
            mhf: M,
        }

        impl<M: Mhf> $name<M> {
            /// Bind a memory-hard function provider to this suite.
            pub fn new(mhf: M) -> Self {
                Self { mhf }
            }
        }

        impl<M: Mhf> CipherSuite for $name<M> {
            type Group = P256Group;

            const NAME: &'static str = stringify!($name);

            fn hash_digest(&self, data: &[u8]) -> alloc::vec::Vec<u8> {
                <$hash>::digest(data).to_vec()
            }

            fn hash_size(&self) -> usize {
                $hash_size
            }

            fn derive_key(&self, salt: &[u8], ikm: &[u8], info: &[u8]) -> alloc::vec::Vec<u8> {
                let hk = hkdf::Hkdf::<$hash>::new(Some(salt), ikm);
                let mut out = alloc::vec![0u8; $hash_size];
                hk.expand(info, &mut out).expect("hkdf output length valid");
                out
            }

            fn mac(&self, msg: &[u8], key: &[u8]) -> alloc::vec::Vec<u8> {
                let mut mac = hmac::Hmac::<$hash>::new_from_slice(key).expect("hmac accepts any key length");
                mac.update(msg);
                mac.finalize().into_bytes().to_vec()
            }

            fn mac_equal(&self, a: &[u8], b: &[u8]) -> bool {
                use subtle::ConstantTimeEq;
                a.ct_eq(b).into()
            }

            fn mhf(&self, password: &[u8], salt: &[u8]) -> Result<alloc::vec::Vec<u8>> {
                mhf_reduced::<P256Group>(&self.mhf, password, salt, $hash_size)
            }
        }
    };
}

p256_suite!(P256Sha256HkdfHmac, "P-256 with SHA-256, HKDF-SHA256 and HMAC-SHA256.", sha2::Sha256, 32);
p256_suite!(P256Sha512HkdfHmac, "P-256 with SHA-512, HKDF-SHA512 and HMAC-SHA512.", sha2::Sha512, 64);
