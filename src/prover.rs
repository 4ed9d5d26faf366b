//! The Prover ("A", client) state machine (spec.md §4.4).

extern crate alloc;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::group::Group;
use crate::record::VerifierRecord;
use crate::secret::SharedSecret;
use crate::suite::CipherSuite;
use crate::transcript::derive_keys;

/// `INIT → X_SENT → SECRETS_READY` (spec.md §4.4). The final
/// `CONFIRMED`/`FAILED` split happens one level up, in the
/// [`SharedSecret`] `complete` hands back — see its `verify` method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Init,
    XSent,
    SecretsReady,
}

/// The client half of a SPAKE2+ session.
///
/// Holds the private scalar `x` and the password-derived `w0`/`w1` for
/// the lifetime of one session; all three are zeroized on drop. A
/// `Prover` is single-use: construct one per handshake attempt.
pub struct Prover<S: CipherSuite> {
    suite: S,
    id_a: Vec<u8>,
    id_b: Vec<u8>,
    x: <S::Group as Group>::Scalar,
    w0_bytes: Vec<u8>,
    w0: <S::Group as Group>::Scalar,
    w1: <S::Group as Group>::Scalar,
    x_bytes: Option<Vec<u8>>,
    state: State,
}

impl<S: CipherSuite> Drop for Prover<S> {
    fn drop(&mut self) {
        self.x.zeroize();
        self.w0_bytes.zeroize();
        self.w0.zeroize();
        self.w1.zeroize();
    }
}

impl<S: CipherSuite> Prover<S> {
    /// `new_client` (spec.md §6): sample `x`, derive `w0`/`w1` from the
    /// password and both identities, and land in `INIT`.
    pub fn new(
        suite: S,
        id_a: &[u8],
        id_b: &[u8],
        password: &[u8],
        salt: &[u8],
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self> {
        let x = <S::Group as Group>::random_scalar(rng)?;
        let (w0_bytes, w1_bytes) = suite.compute_w0_w1(id_a, id_b, password, salt)?;
        let w0 = <S::Group as Group>::scalar_reduce_bytes(&w0_bytes);
        let w1 = <S::Group as Group>::scalar_reduce_bytes(&w1_bytes);

        Ok(Self {
            suite,
            id_a: id_a.to_vec(),
            id_b: id_b.to_vec(),
            x,
            w0_bytes,
            w0,
            w1,
            x_bytes: None,
            state: State::Init,
        })
    }

    /// `verifier_record()` (spec.md §4.4): a one-shot, state-preserving
    /// snapshot for out-of-band enrollment. May be called at any point
    /// in the session's lifetime since it only reads `w0`/`w1`.
    pub fn verifier_record(&self) -> VerifierRecord {
        let l = <S::Group as Group>::base_mult(&self.w1);
        VerifierRecord::new(self.id_a.clone(), self.w0_bytes.clone(), <S::Group as Group>::element_to_bytes(&l))
    }

    /// `ephemeral_public()`: `X = x·G + w0·M`, cached. `INIT → X_SENT`.
    pub fn ephemeral_public(&mut self) -> &[u8] {
        if self.x_bytes.is_none() {
            let g_x = <S::Group as Group>::base_mult(&self.x);
            let w0_m = <S::Group as Group>::scalar_mult(&self.w0, &<S::Group as Group>::m());
            let x_point = <S::Group as Group>::add(&g_x, &w0_m);
            self.x_bytes = Some(<S::Group as Group>::element_to_bytes(&x_point));
            self.state = State::XSent;
        }
        self.x_bytes.as_deref().expect("just populated")
    }

    /// `complete(Y.bytes())` (spec.md §4.4): validate `Y`, derive `Z`,
    /// `V`, the key schedule, and the two confirmation tags.
    /// `X_SENT → SECRETS_READY`.
    pub fn complete(&mut self, y_bytes: &[u8]) -> Result<SharedSecret> {
        let x_bytes = self.ephemeral_public().to_vec();

        let y = <S::Group as Group>::element_from_bytes(y_bytes).map_err(|_| Error::InvalidEncoding)?;
        if <S::Group as Group>::is_identity(&<S::Group as Group>::clear_cofactor(&y)) {
            return Err(Error::SmallSubgroup);
        }

        let neg_w0 = <S::Group as Group>::scalar_negate(&self.w0);
        let n = <S::Group as Group>::n();
        let neg_w0_n = <S::Group as Group>::scalar_mult(&neg_w0, &n);
        let t = <S::Group as Group>::add(&y, &neg_w0_n);

        let z = <S::Group as Group>::clear_cofactor(&<S::Group as Group>::scalar_mult(&self.x, &t));
        let v = <S::Group as Group>::clear_cofactor(&<S::Group as Group>::scalar_mult(&self.w1, &t));

        let schedule = derive_keys(
            &self.suite,
            &self.id_a,
            &self.id_b,
            &x_bytes,
            y_bytes,
            &<S::Group as Group>::element_to_bytes(&z),
            &<S::Group as Group>::element_to_bytes(&v),
            &self.w0_bytes,
        );

        let c_a = self.suite.mac(y_bytes, &schedule.sensitive.kc_a);
        let expected_c_b = self.suite.mac(&x_bytes, &schedule.sensitive.kc_b);

        self.state = State::SecretsReady;
        Ok(SharedSecret::new(schedule.ke, c_a, expected_c_b, S::NAME))
    }
}
