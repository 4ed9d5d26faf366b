//! Memory-hard function providers.
//!
//! The core consumes a memory-hard function only through a two-argument
//! derivation contract (password, salt) -> bytes of a requested length;
//! the concrete functions are external collaborators (spec.md §1). This
//! module supplies the two providers named in spec.md §6.

use crate::error::{Error, Result};

/// A memory-hard password-stretching function.
///
/// `derive` MUST write exactly `out.len()` bytes and treat `out.len()`
/// as the sole length parameter; callers (the cipher suite) always pass
/// `hash_size()` bytes.
pub trait Mhf {
    /// Stretch `password` with `salt`, filling `out`.
    fn derive(&self, password: &[u8], salt: &[u8], out: &mut [u8]) -> Result<()>;
}

/// scrypt, as used in the RFC 9383 test vectors.
#[derive(Clone, Copy, Debug)]
pub struct Scrypt {
    log_n: u8,
    r: u32,
    p: u32,
}

impl Scrypt {
    /// Construct a provider with scrypt's `(N, r, p)` parameters, given
    /// as `log2(N)`.
    pub fn new(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }
}

impl Mhf for Scrypt {
    fn derive(&self, password: &[u8], salt: &[u8], out: &mut [u8]) -> Result<()> {
        let params = scrypt::Params::new(self.log_n, self.r, self.p, out.len())
            .map_err(|_| Error::MhfFailure)?;
        scrypt::scrypt(password, salt, &params, out).map_err(|_| Error::MhfFailure)
    }
}

/// Argon2, offered as an alternative to scrypt (spec.md §6).
#[derive(Clone, Copy, Debug)]
pub struct Argon2 {
    time_cost: u32,
    memory_cost: u32,
    parallelism: u32,
}

impl Argon2 {
    /// Construct a provider with the given Argon2id time cost (in
    /// passes), memory cost (in KiB), and degree of parallelism.
    pub fn new(time_cost: u32, memory_cost: u32, parallelism: u32) -> Self {
        Self {
            time_cost,
            memory_cost,
            parallelism,
        }
    }
}

impl Mhf for Argon2 {
    fn derive(&self, password: &[u8], salt: &[u8], out: &mut [u8]) -> Result<()> {
        let params = argon2::Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(out.len()),
        )
        .map_err(|_| Error::MhfFailure)?;
        let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        argon2
            .hash_password_into(password, salt, out)
            .map_err(|_| Error::MhfFailure)
    }
}
