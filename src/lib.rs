//! SPAKE2+, an augmented password-authenticated key exchange, as
//! specified in RFC 9383.
//!
//! A client ([`Prover`]) and a server ([`Verifier`]) that both know a
//! password (or, for the server, a one-way derivative of it registered
//! up front as a [`VerifierRecord`]) run a single round trip of
//! elliptic-curve messages and come away with a shared [`SharedSecret`]:
//! an identical `Ke` on both sides, plus a pair of MAC tags that let
//! each side confirm the other actually derived the same key before
//! either one is used.
//!
//! ```
//! use rand_core::OsRng;
//! use spake2plus::{store::MapLookup, suite::P256Sha256HkdfHmac, Prover, Scrypt, Verifier};
//!
//! let mhf = || Scrypt::new(15, 8, 1);
//! let (id_a, id_b) = (b"alice".as_slice(), b"bob".as_slice());
//!
//! let mut rng = OsRng;
//! let mut prover = Prover::new(
//!     P256Sha256HkdfHmac::new(mhf()),
//!     id_a,
//!     id_b,
//!     b"password",
//!     b"salt",
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let store = MapLookup::new();
//! store.add(id_a.to_vec(), prover.verifier_record());
//! let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, id_b, &mut rng).unwrap();
//!
//! let x_bytes = prover.ephemeral_public().to_vec();
//! let (y_bytes, server_secret) = verifier.handshake(id_a, &x_bytes, &mut rng).unwrap();
//! let client_secret = prover.complete(&y_bytes).unwrap();
//!
//! client_secret.verify(server_secret.confirmation()).unwrap();
//! server_secret.verify(client_secret.confirmation()).unwrap();
//! assert_eq!(client_secret.bytes(), server_secret.bytes());
//! ```
//!
//! # Module layout
//!
//! - [`group`] — the [`group::Group`] trait, the prime-order-subgroup
//!   view every cipher suite binds a concrete curve crate to.
//! - [`suite`] — the [`suite::CipherSuite`] trait and the seven
//!   concrete suites from RFC 9383's table.
//! - [`mhf`] — the memory-hard function contract and its two providers,
//!   [`Scrypt`] and [`Argon2`].
//! - [`transcript`] — the `TT` transcript and key-schedule derivation.
//! - [`record`] — [`VerifierRecord`], the enrollment artifact.
//! - [`store`] — [`store::Lookup`], the server-side record store
//!   abstraction, plus the in-memory [`store::MapLookup`] reference
//!   implementation (requires `std`).
//! - [`secret`] — [`SharedSecret`] and [`ConfirmationHandle`], the
//!   session outputs.
//! - [`error`] — [`Error`] and [`Result`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod group;
pub mod mhf;
mod prover;
pub mod record;
#[cfg(feature = "std")]
pub mod store;
pub mod secret;
pub mod suite;
mod transcript;
mod verifier;

pub use error::{Error, Result};
pub use mhf::{Argon2, Mhf, Scrypt};
pub use prover::Prover;
pub use record::VerifierRecord;
pub use secret::{ConfirmationHandle, SharedSecret};
pub use verifier::Verifier;
