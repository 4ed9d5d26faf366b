//! Prime-order-subgroup view of an elliptic curve.
//!
//! This mirrors the split `ecdsa` takes between its public API and
//! `ecdsa::hazmat`: the state machines in this crate never touch curve
//! arithmetic directly, only through the [`Group`] trait. Each cipher
//! suite in [`crate::suite`] binds one concrete curve backend to it.

use crate::error::{Error, GroupError};
use alloc::vec::Vec;
use rand_core::CryptoRngCore;

/// A prime-order subgroup of an elliptic curve, as consumed by the
/// SPAKE2+ key schedule.
///
/// Implementors wrap a specific curve crate (`p256`, `p384`, `p521`,
/// `curve25519-dalek`, `ed448-goldilocks`) and are responsible for any
/// conversion between that crate's native types and this trait's byte
/// encodings. All arithmetic on secret scalars MUST go through
/// constant-time backends; see §5 of the design notes.
pub trait Group: Sized {
    /// Scalar modulo the group order. `Zeroize` is required so session
    /// state machines can wipe `x`, `y`, `w0`, `w1` on drop without
    /// knowing the concrete curve (spec.md §9 "Ownership").
    type Scalar: Copy + Clone + zeroize::Zeroize;
    /// A point in the prime-order subgroup.
    type Element: Copy + Clone;

    /// Byte length of an encoded scalar. Constant per group.
    const SCALAR_LEN: usize;
    /// Byte length of an encoded element. Constant per group.
    const ELEMENT_LEN: usize;
    /// The group's cofactor (1 for the NIST curves, 8 for Ed25519, 4 for
    /// Ed448).
    const COFACTOR: u8;
    /// `true` for the NIST curves (big-endian octet strings), `false`
    /// for Ed25519/Ed448 (little-endian). Lets suite-independent code
    /// (the MHF reduction in [`crate::suite`]) resize a byte string from
    /// its high-order end regardless of which group it belongs to.
    const BIG_ENDIAN: bool;

    /// Sample a scalar uniform in `[0, q)`. Fails only if the RNG itself
    /// fails to produce randomness (spec.md §4.7).
    fn random_scalar(rng: &mut impl CryptoRngCore) -> Result<Self::Scalar, Error>;

    /// Decode a scalar. Fails if `bytes.len() != SCALAR_LEN` or the value
    /// is `>= q`.
    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar, GroupError>;

    /// Treat `bytes` (never empty, of *any* length — some suites feed a
    /// longer hash digest into a smaller scalar field, others a shorter
    /// one into a larger field) as an unsigned integer in the group's
    /// native byte order and reduce it modulo `q`. This never fails.
    ///
    /// Implementations build this with repeated-doubling/Horner
    /// reduction over the group's own scalar ring rather than a
    /// curve-specific wide-reduction primitive, so one algorithm covers
    /// both the "digest shorter than a scalar" and "digest longer than a
    /// scalar" cases in the suite table. See DESIGN.md's resolution of
    /// spec.md §9 Open Question 1.
    fn scalar_reduce_bytes(bytes: &[u8]) -> Self::Scalar;

    /// Encode a scalar to its canonical fixed-width byte string.
    fn scalar_to_bytes(s: &Self::Scalar) -> Vec<u8>;

    /// `-s`.
    fn scalar_negate(s: &Self::Scalar) -> Self::Scalar;

    /// Decode an element. Fails if the encoding is malformed or the
    /// point is not on the curve.
    fn element_from_bytes(bytes: &[u8]) -> Result<Self::Element, GroupError>;

    /// Encode an element to the suite's canonical octet form.
    fn element_to_bytes(e: &Self::Element) -> Vec<u8>;

    /// `s * P`.
    fn scalar_mult(s: &Self::Scalar, p: &Self::Element) -> Self::Element;

    /// `s * G`, the group generator.
    fn base_mult(s: &Self::Scalar) -> Self::Element;

    /// `P + Q`.
    fn add(p: &Self::Element, q: &Self::Element) -> Self::Element;

    /// The identity element.
    fn identity() -> Self::Element;

    /// `true` if `p` equals the identity.
    fn is_identity(p: &Self::Element) -> bool;

    /// `h * P`, where `h` is [`Group::COFACTOR`]. Used both to land a
    /// shared point in the prime-order subgroup and, via comparison
    /// against the identity, to reject small-subgroup elements.
    fn clear_cofactor(p: &Self::Element) -> Self::Element;

    /// The suite's fixed point `M`.
    fn m() -> Self::Element;

    /// The suite's fixed point `N`.
    fn n() -> Self::Element;
}

/// Horner's method over a scalar ring: fold `bytes`, taken most-
/// significant-first, into `zero * 256 + b` accumulation so that the
/// result is `bytes` read as a big-endian integer, reduced modulo
/// whatever modulus the ring's `add`/`mul_by_256` already reduce under.
///
/// Callers are responsible for presenting `bytes` most-significant-byte
/// first; see [`reduce_group_bytes`] for the endian-aware wrapper used
/// by suite implementations.
fn horner_reduce_msb_first<T: Copy>(
    bytes_msb_first: &[u8],
    zero: T,
    from_byte: impl Fn(u8) -> T,
    mul_by_256: impl Fn(T) -> T,
    add: impl Fn(T, T) -> T,
) -> T {
    let mut acc = zero;
    for &b in bytes_msb_first {
        acc = add(mul_by_256(acc), from_byte(b));
    }
    acc
}

/// Endian-aware wrapper around [`horner_reduce_msb_first`]: for
/// big-endian groups `bytes` is already most-significant-first, for
/// little-endian groups it is reversed first.
pub(crate) fn reduce_group_bytes<T: Copy>(
    bytes: &[u8],
    big_endian: bool,
    zero: T,
    from_byte: impl Fn(u8) -> T,
    mul_by_256: impl Fn(T) -> T,
    add: impl Fn(T, T) -> T,
) -> T {
    if big_endian {
        horner_reduce_msb_first(bytes, zero, from_byte, mul_by_256, add)
    } else {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        horner_reduce_msb_first(&reversed, zero, from_byte, mul_by_256, add)
    }
}

/// Resize `bytes` (the canonical encoding of some value) to exactly
/// `target_len`, zero-extending or truncating at the integer's
/// high-order end according to `big_endian`. Truncation assumes the
/// high-order bytes being dropped are zero, which holds whenever
/// `bytes` is the reduction of an input no longer than `target_len`.
pub(crate) fn resize_at_high_end(mut bytes: Vec<u8>, target_len: usize, big_endian: bool) -> Vec<u8> {
    use core::cmp::Ordering;
    match bytes.len().cmp(&target_len) {
        Ordering::Equal => bytes,
        Ordering::Less => {
            let pad = target_len - bytes.len();
            if big_endian {
                let mut out = alloc::vec![0u8; pad];
                out.extend_from_slice(&bytes);
                out
            } else {
                bytes.extend(core::iter::repeat(0u8).take(pad));
                bytes
            }
        }
        Ordering::Greater => {
            if big_endian {
                bytes[bytes.len() - target_len..].to_vec()
            } else {
                bytes.truncate(target_len);
                bytes
            }
        }
    }
}
