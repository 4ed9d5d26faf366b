//! The Verifier ("B", server) state machine (spec.md §4.5).

extern crate alloc;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::group::Group;
use crate::secret::SharedSecret;
use crate::store::Lookup;
use crate::suite::CipherSuite;
use crate::transcript::derive_keys;

/// `INIT → READY_FOR_X → SECRETS_READY` (spec.md §4.5); the final
/// `CONFIRMED`/`FAILED` split lives in the returned [`SharedSecret`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Init,
    ReadyForX,
    SecretsReady,
}

/// The server half of a SPAKE2+ session.
///
/// Holds the private scalar `y` for the lifetime of one session,
/// zeroized on drop. A `Verifier` is single-use: construct one per
/// handshake attempt.
pub struct Verifier<S: CipherSuite, L: Lookup> {
    suite: S,
    lookup: L,
    id_b: Vec<u8>,
    y: <S::Group as Group>::Scalar,
    state: State,
}

impl<S: CipherSuite, L: Lookup> Drop for Verifier<S, L> {
    fn drop(&mut self) {
        self.y.zeroize();
    }
}

impl<S: CipherSuite, L: Lookup> Verifier<S, L> {
    /// `new_server` (spec.md §6): sample `y` and land in `INIT`.
    pub fn new(suite: S, lookup: L, id_b: &[u8], rng: &mut impl CryptoRngCore) -> Result<Self> {
        let y = <S::Group as Group>::random_scalar(rng)?;
        Ok(Self {
            suite,
            lookup,
            id_b: id_b.to_vec(),
            y,
            state: State::Init,
        })
    }

    /// `handshake(peerId, X.bytes())` (spec.md §4.5): validate `X`,
    /// resolve `(w0, L)` (the real record on a hit, a synthesized one on
    /// a miss — both paths run the identical pipeline below so neither
    /// timing nor the returned `Y`'s shape leaks whether `peerId` is
    /// registered), emit `Y`, and derive the key schedule and
    /// confirmation tags. `INIT → SECRETS_READY`.
    pub fn handshake(&mut self, peer_id: &[u8], x_bytes: &[u8], rng: &mut impl CryptoRngCore) -> Result<(Vec<u8>, SharedSecret)> {
        self.state = State::ReadyForX;

        let x = <S::Group as Group>::element_from_bytes(x_bytes).map_err(|_| Error::InvalidEncoding)?;
        if <S::Group as Group>::is_identity(&<S::Group as Group>::clear_cofactor(&x)) {
            return Err(Error::SmallSubgroup);
        }

        let (w0_bytes, w0, l) = match self.lookup.fetch(peer_id) {
            Some(rec) => {
                let w0 = <S::Group as Group>::scalar_reduce_bytes(&rec.v1);
                let l = <S::Group as Group>::element_from_bytes(&rec.v2).map_err(|_| Error::InvalidRecord)?;
                (rec.v1, w0, l)
            }
            None => {
                let mut dummy_w0_bytes = alloc::vec![0u8; self.suite.hash_size() / 2];
                rng.try_fill_bytes(&mut dummy_w0_bytes).map_err(|_| Error::RandomnessFailure)?;
                let dummy_w0 = <S::Group as Group>::scalar_reduce_bytes(&dummy_w0_bytes);

                // Run the identical decode-and-validate step the hit branch
                // takes on `rec.v2`, over a freshly synthesized point, so
                // both branches execute the same code shape.
                let dummy_l_scalar = <S::Group as Group>::random_scalar(rng)?;
                let dummy_l_bytes = <S::Group as Group>::element_to_bytes(&<S::Group as Group>::base_mult(&dummy_l_scalar));
                let dummy_l = <S::Group as Group>::element_from_bytes(&dummy_l_bytes).map_err(|_| Error::InvalidRecord)?;

                (dummy_w0_bytes, dummy_w0, dummy_l)
            }
        };

        let g_y = <S::Group as Group>::base_mult(&self.y);
        let w0_n = <S::Group as Group>::scalar_mult(&w0, &<S::Group as Group>::n());
        let y_point = <S::Group as Group>::add(&g_y, &w0_n);
        let y_bytes = <S::Group as Group>::element_to_bytes(&y_point);

        let neg_w0 = <S::Group as Group>::scalar_negate(&w0);
        let m = <S::Group as Group>::m();
        let neg_w0_m = <S::Group as Group>::scalar_mult(&neg_w0, &m);
        let t = <S::Group as Group>::add(&x, &neg_w0_m);

        let z = <S::Group as Group>::clear_cofactor(&<S::Group as Group>::scalar_mult(&self.y, &t));
        let v = <S::Group as Group>::clear_cofactor(&<S::Group as Group>::scalar_mult(&self.y, &l));

        let schedule = derive_keys(
            &self.suite,
            peer_id,
            &self.id_b,
            x_bytes,
            &y_bytes,
            &<S::Group as Group>::element_to_bytes(&z),
            &<S::Group as Group>::element_to_bytes(&v),
            &w0_bytes,
        );

        let c_b = self.suite.mac(x_bytes, &schedule.sensitive.kc_b);
        let expected_c_a = self.suite.mac(&y_bytes, &schedule.sensitive.kc_a);

        self.state = State::SecretsReady;
        Ok((y_bytes, SharedSecret::new(schedule.ke, c_b, expected_c_a, S::NAME)))
    }
}
