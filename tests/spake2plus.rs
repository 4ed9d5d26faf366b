//! Integration tests exercising full client/server handshakes across
//! every cipher suite (spec.md §8).

use rand::rngs::OsRng;

use spake2plus::store::MapLookup;
use spake2plus::suite::{
    Ed25519Sha256HkdfHmac, Ed448Sha512HkdfHmac, P256Sha256HkdfHmac, P256Sha512HkdfHmac, P384Sha256HkdfHmac,
    P384Sha512HkdfHmac, P521Sha512HkdfHmac,
};
use spake2plus::{Error, Prover, Scrypt, Verifier};

const ID_A: &[u8] = b"alice@example.com";
const ID_B: &[u8] = b"server.example.com";
const PASSWORD: &[u8] = b"hunter2";
const SALT: &[u8] = b"enrollment-salt";

fn mhf() -> Scrypt {
    // Minimal cost parameters: these tests only need correctness, not
    // production-grade stretching.
    Scrypt::new(4, 8, 1)
}

/// Run one full handshake and return both sides' `SharedSecret`s after
/// mutual confirmation succeeds.
fn happy_path<S: spake2plus::suite::CipherSuite>(
    client_suite: S,
    server_suite: S,
) -> (spake2plus::SharedSecret, spake2plus::SharedSecret) {
    let mut rng = OsRng;

    let mut prover = Prover::new(client_suite, ID_A, ID_B, PASSWORD, SALT, &mut rng).unwrap();
    let store = MapLookup::new();
    store.add(ID_A.to_vec(), prover.verifier_record());

    let mut verifier = Verifier::new(server_suite, store, ID_B, &mut rng).unwrap();

    let x_bytes = prover.ephemeral_public().to_vec();
    let (y_bytes, server_secret) = verifier.handshake(ID_A, &x_bytes, &mut rng).unwrap();
    let client_secret = prover.complete(&y_bytes).unwrap();

    client_secret.verify(server_secret.confirmation()).unwrap();
    server_secret.verify(client_secret.confirmation()).unwrap();
    assert_eq!(client_secret.bytes(), server_secret.bytes());

    (client_secret, server_secret)
}

macro_rules! happy_path_test {
    ($name:ident, $suite:expr) => {
        #[test]
        fn $name() {
            happy_path($suite, $suite);
        }
    };
}

happy_path_test!(happy_path_p256_sha256, P256Sha256HkdfHmac::new(mhf()));
happy_path_test!(happy_path_p256_sha512, P256Sha512HkdfHmac::new(mhf()));
happy_path_test!(happy_path_p384_sha256, P384Sha256HkdfHmac::new(mhf()));
happy_path_test!(happy_path_p384_sha512, P384Sha512HkdfHmac::new(mhf()));
happy_path_test!(happy_path_p521_sha512, P521Sha512HkdfHmac::new(mhf()));
happy_path_test!(happy_path_ed25519_sha256, Ed25519Sha256HkdfHmac::new(mhf()));
happy_path_test!(happy_path_ed448_sha512, Ed448Sha512HkdfHmac::new(mhf()));

#[test]
fn wrong_password_fails_confirmation_not_earlier() {
    let mut rng = OsRng;

    let prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), ID_A, ID_B, PASSWORD, SALT, &mut rng).unwrap();
    let store = MapLookup::new();
    store.add(ID_A.to_vec(), prover.verifier_record());
    let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, ID_B, &mut rng).unwrap();

    let mut wrong_prover = Prover::new(
        P256Sha256HkdfHmac::new(mhf()),
        ID_A,
        ID_B,
        b"not the password",
        SALT,
        &mut rng,
    )
    .unwrap();

    let x_bytes = wrong_prover.ephemeral_public().to_vec();
    let (y_bytes, server_secret) = verifier.handshake(ID_A, &x_bytes, &mut rng).unwrap();
    let client_secret = wrong_prover.complete(&y_bytes).unwrap();

    // Both sides reach SECRETS_READY — the protocol never rejects a
    // wrong password before confirmation — but the tags disagree.
    assert!(client_secret.verify(server_secret.confirmation()).is_err());
    assert!(server_secret.verify(client_secret.confirmation()).is_err());
    assert_ne!(client_secret.bytes(), server_secret.bytes());
}

#[test]
fn mismatched_identity_fails_confirmation() {
    let mut rng = OsRng;

    let mut prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), ID_A, ID_B, PASSWORD, SALT, &mut rng).unwrap();
    let store = MapLookup::new();
    store.add(ID_A.to_vec(), prover.verifier_record());
    // Server believes its own identity is something else entirely.
    let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, b"impostor.example.com", &mut rng).unwrap();

    let x_bytes = prover.ephemeral_public().to_vec();
    let (y_bytes, server_secret) = verifier.handshake(ID_A, &x_bytes, &mut rng).unwrap();
    let client_secret = prover.complete(&y_bytes).unwrap();

    assert!(client_secret.verify(server_secret.confirmation()).is_err());
}

#[test]
fn unknown_identity_fails_like_wrong_password() {
    let mut rng = OsRng;

    let mut prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), ID_A, ID_B, PASSWORD, SALT, &mut rng).unwrap();
    // Deliberately never registered in the store.
    let store = MapLookup::new();
    let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, ID_B, &mut rng).unwrap();

    let x_bytes = prover.ephemeral_public().to_vec();
    let (y_bytes, server_secret) = verifier.handshake(ID_A, &x_bytes, &mut rng).unwrap();
    let client_secret = prover.complete(&y_bytes).unwrap();

    // A lookup miss must produce Y and a confirmation-failure outcome
    // indistinguishable in shape from a wrong-password failure on a
    // registered identity — no distinct error variant for "no such user".
    assert!(client_secret.verify(server_secret.confirmation()).is_err());
}

#[test]
fn garbage_x_is_rejected_with_invalid_encoding() {
    let mut rng = OsRng;
    let store = MapLookup::new();
    let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, ID_B, &mut rng).unwrap();

    let garbage = vec![0xffu8; 65];
    let err = verifier.handshake(ID_A, &garbage, &mut rng).unwrap_err();
    assert!(matches!(err, Error::InvalidEncoding));
}

#[test]
fn identity_element_x_is_rejected_as_small_subgroup() {
    let mut rng = OsRng;
    let store = MapLookup::new();
    let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, ID_B, &mut rng).unwrap();

    // SEC1 point-at-infinity encoding.
    let identity = vec![0x00u8];
    let err = verifier.handshake(ID_A, &identity, &mut rng).unwrap_err();
    assert!(matches!(err, Error::InvalidEncoding | Error::SmallSubgroup));
}

#[test]
fn verifier_record_hex_round_trips() {
    let mut rng = OsRng;
    let prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), ID_A, ID_B, PASSWORD, SALT, &mut rng).unwrap();
    let record = prover.verifier_record();

    let encoded = record.to_hex_string();
    let decoded = spake2plus::VerifierRecord::from_hex_str(&encoded, record.v1.len()).unwrap();
    assert_eq!(record, decoded);
}

#[test]
fn confirmation_tag_is_idempotent() {
    let (client_secret, _server_secret) = happy_path(P256Sha256HkdfHmac::new(mhf()), P256Sha256HkdfHmac::new(mhf()));
    let first = client_secret.confirmation().to_vec();
    let second = client_secret.confirmation().to_vec();
    assert_eq!(first, second);
}

#[test]
fn cross_suite_sessions_never_share_ke() {
    let (p256_client, _) = happy_path(P256Sha256HkdfHmac::new(mhf()), P256Sha256HkdfHmac::new(mhf()));
    let (ed25519_client, _) = happy_path(Ed25519Sha256HkdfHmac::new(mhf()), Ed25519Sha256HkdfHmac::new(mhf()));

    // Same password, identities and salt, different suites: Ke must not
    // collide, since each suite's transcript embeds its own group and
    // hash algorithm.
    assert_ne!(p256_client.bytes(), ed25519_client.bytes());
}

#[test]
fn confirmation_handle_can_be_split_and_reloaded() {
    let (client_secret, _server_secret) = happy_path(P256Sha256HkdfHmac::new(mhf()), P256Sha256HkdfHmac::new(mhf()));
    let tag = client_secret.confirmation().to_vec();
    let ke = client_secret.bytes().to_vec();

    let (ke_parts, handle) = client_secret.into_parts();
    assert_eq!(ke_parts, ke);
    assert_eq!(handle.bytes(), tag);
}
