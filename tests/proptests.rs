//! Property-based tests (spec.md §8, properties 2, 3, 5, 6; properties 1,
//! 4 and 7 are covered by the concrete scenarios in `tests/spake2plus.rs`).

use proptest::prelude::*;
use rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use spake2plus::group::Group;
use spake2plus::store::MapLookup;
use spake2plus::suite::p256::P256Group;
use spake2plus::suite::P256Sha256HkdfHmac;
use spake2plus::{Prover, Scrypt, Verifier};

fn mhf() -> Scrypt {
    Scrypt::new(4, 8, 1)
}

fn id_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // Property 3: scalar and element encodings round-trip through decode.
    #[test]
    fn p256_scalar_round_trips(seed in any::<[u8; 40]>()) {
        let scalar = P256Group::scalar_reduce_bytes(&seed);
        let encoded = P256Group::scalar_to_bytes(&scalar);
        let decoded = P256Group::scalar_from_bytes(&encoded).unwrap();
        prop_assert_eq!(P256Group::scalar_to_bytes(&decoded), encoded);
    }

    #[test]
    fn p256_element_round_trips(seed in any::<[u8; 40]>()) {
        let scalar = P256Group::scalar_reduce_bytes(&seed);
        let element = P256Group::base_mult(&scalar);
        let encoded = P256Group::element_to_bytes(&element);
        let decoded = P256Group::element_from_bytes(&encoded).unwrap();
        prop_assert_eq!(P256Group::element_to_bytes(&decoded), encoded);
    }

    // Property 2: a password mismatch between the two endpoints fails
    // confirmation on both sides.
    #[test]
    fn mismatched_password_fails(
        seed in any::<[u8; 32]>(),
        password in prop::collection::vec(any::<u8>(), 1..16),
        forged_password in prop::collection::vec(any::<u8>(), 1..16),
        id_a in id_strategy(), id_b in id_strategy(),
    ) {
        prop_assume!(password != forged_password);
        let mut rng = ChaCha8Rng::from_seed(seed);

        let prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, &password, b"salt", &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.clone(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, &id_b, &mut rng).unwrap();

        let mut attacker = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, &forged_password, b"salt", &mut rng).unwrap();
        let x_bytes = attacker.ephemeral_public().to_vec();
        let (y_bytes, server_secret) = verifier.handshake(&id_a, &x_bytes, &mut rng).unwrap();
        let client_secret = attacker.complete(&y_bytes).unwrap();

        prop_assert!(client_secret.verify(server_secret.confirmation()).is_err());
        prop_assert!(server_secret.verify(client_secret.confirmation()).is_err());
    }

    // Property 2: a salt mismatch (which feeds into w0/w1 derivation) fails
    // confirmation.
    #[test]
    fn mismatched_salt_fails(
        seed in any::<[u8; 32]>(),
        salt in prop::collection::vec(any::<u8>(), 1..16),
        forged_salt in prop::collection::vec(any::<u8>(), 1..16),
        id_a in id_strategy(), id_b in id_strategy(),
    ) {
        prop_assume!(salt != forged_salt);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let password: &[u8] = b"correct horse battery staple";

        let prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, password, &salt, &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.clone(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, &id_b, &mut rng).unwrap();

        let mut attacker = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, password, &forged_salt, &mut rng).unwrap();
        let x_bytes = attacker.ephemeral_public().to_vec();
        let (y_bytes, server_secret) = verifier.handshake(&id_a, &x_bytes, &mut rng).unwrap();
        let client_secret = attacker.complete(&y_bytes).unwrap();

        prop_assert!(client_secret.verify(server_secret.confirmation()).is_err());
    }

    // Property 2: a client-identity mismatch fails confirmation.
    #[test]
    fn mismatched_client_identity_fails(
        seed in any::<[u8; 32]>(),
        id_a in id_strategy(), forged_id_a in id_strategy(), id_b in id_strategy(),
    ) {
        prop_assume!(id_a != forged_id_a);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let password: &[u8] = b"correct horse battery staple";

        let prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, password, b"salt", &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.clone(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, &id_b, &mut rng).unwrap();

        let mut attacker = Prover::new(P256Sha256HkdfHmac::new(mhf()), &forged_id_a, &id_b, password, b"salt", &mut rng).unwrap();
        let x_bytes = attacker.ephemeral_public().to_vec();
        let (y_bytes, server_secret) = verifier.handshake(&id_a, &x_bytes, &mut rng).unwrap();
        let client_secret = attacker.complete(&y_bytes).unwrap();

        prop_assert!(client_secret.verify(server_secret.confirmation()).is_err());
    }

    // Property 2: a server-identity mismatch fails confirmation.
    #[test]
    fn mismatched_server_identity_fails(
        seed in any::<[u8; 32]>(),
        id_a in id_strategy(), id_b in id_strategy(), forged_id_b in id_strategy(),
    ) {
        prop_assume!(id_b != forged_id_b);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let password: &[u8] = b"correct horse battery staple";

        let mut prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), &id_a, &id_b, password, b"salt", &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.clone(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, &forged_id_b, &mut rng).unwrap();

        let x_bytes = prover.ephemeral_public().to_vec();
        let (y_bytes, server_secret) = verifier.handshake(&id_a, &x_bytes, &mut rng).unwrap();
        let client_secret = prover.complete(&y_bytes).unwrap();

        prop_assert!(client_secret.verify(server_secret.confirmation()).is_err());
    }

    // Property 2: a bit flip in X in transit is either rejected outright or,
    // if it still decodes, never yields a matching confirmation tag.
    #[test]
    fn tampered_x_never_yields_matching_secret(
        seed in any::<[u8; 32]>(),
        flip_byte in any::<usize>(),
        flip_bit in 0u8..8,
    ) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let (id_a, id_b): (&[u8], &[u8]) = (b"client", b"server");
        let password: &[u8] = b"correct horse battery staple";

        let mut prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), id_a, id_b, password, b"salt", &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.to_vec(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, id_b, &mut rng).unwrap();

        let mut x_bytes = prover.ephemeral_public().to_vec();
        let idx = flip_byte % x_bytes.len();
        x_bytes[idx] ^= 1 << flip_bit;

        match verifier.handshake(id_a, &x_bytes, &mut rng) {
            Err(_) => {} // InvalidEncoding or SmallSubgroup: rejected before any secret is derived.
            Ok((y_bytes, server_secret)) => {
                // The tampered X still decoded to a valid point; the honest
                // prover's own tag (over the untampered X) must not match.
                let client_secret = prover.complete(&y_bytes).unwrap();
                prop_assert!(client_secret.verify(server_secret.confirmation()).is_err());
            }
        }
    }

    // Property 5 (indistinguishability, shape-only): a lookup miss produces
    // a `Y` of the same length and the same failure-at-confirmation shape as
    // a hit with a wrong password, for arbitrary identities. Statistical
    // timing indistinguishability needs an instrumented harness outside an
    // in-process test's scope; this checks only the observable shape.
    #[test]
    fn unknown_identity_shape_matches_known_identity_failure(
        seed in any::<[u8; 32]>(),
        unknown_id in id_strategy(),
        known_id in id_strategy(),
    ) {
        prop_assume!(unknown_id != known_id);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let id_b: &[u8] = b"server";
        let password: &[u8] = b"hunter2";

        let known_prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), &known_id, id_b, password, b"salt", &mut rng).unwrap();
        let known_store = MapLookup::new();
        known_store.add(known_id.clone(), known_prover.verifier_record());
        let mut known_verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), known_store, id_b, &mut rng).unwrap();
        let mut known_attacker = Prover::new(P256Sha256HkdfHmac::new(mhf()), &known_id, id_b, b"wrong", b"salt", &mut rng).unwrap();
        let known_x = known_attacker.ephemeral_public().to_vec();
        let (known_y, known_server_secret) = known_verifier.handshake(&known_id, &known_x, &mut rng).unwrap();
        let known_client_secret = known_attacker.complete(&known_y).unwrap();

        let empty_store = MapLookup::new();
        let mut unknown_verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), empty_store, id_b, &mut rng).unwrap();
        let mut unknown_attacker = Prover::new(P256Sha256HkdfHmac::new(mhf()), &unknown_id, id_b, password, b"salt", &mut rng).unwrap();
        let unknown_x = unknown_attacker.ephemeral_public().to_vec();
        let (unknown_y, unknown_server_secret) = unknown_verifier.handshake(&unknown_id, &unknown_x, &mut rng).unwrap();
        let unknown_client_secret = unknown_attacker.complete(&unknown_y).unwrap();

        prop_assert_eq!(known_y.len(), unknown_y.len());
        prop_assert!(known_client_secret.verify(known_server_secret.confirmation()).is_err());
        prop_assert!(unknown_client_secret.verify(unknown_server_secret.confirmation()).is_err());
    }

    // Property 6 (constant-time MAC, correctness half): flipping any single
    // bit of a confirmation tag must be detected, for every bit position.
    // Actual constant-time behavior is delegated to `subtle::ConstantTimeEq`
    // and isn't independently timed here.
    #[test]
    fn confirmation_rejects_any_single_bit_flip(
        seed in any::<[u8; 32]>(),
        flip_byte in any::<usize>(),
        flip_bit in 0u8..8,
    ) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let (id_a, id_b): (&[u8], &[u8]) = (b"client", b"server");
        let password: &[u8] = b"correct horse battery staple";

        let mut prover = Prover::new(P256Sha256HkdfHmac::new(mhf()), id_a, id_b, password, b"salt", &mut rng).unwrap();
        let store = MapLookup::new();
        store.add(id_a.to_vec(), prover.verifier_record());
        let mut verifier = Verifier::new(P256Sha256HkdfHmac::new(mhf()), store, id_b, &mut rng).unwrap();

        let x_bytes = prover.ephemeral_public().to_vec();
        let (y_bytes, server_secret) = verifier.handshake(id_a, &x_bytes, &mut rng).unwrap();
        let client_secret = prover.complete(&y_bytes).unwrap();

        let mut forged_tag = server_secret.confirmation().to_vec();
        let idx = flip_byte % forged_tag.len();
        forged_tag[idx] ^= 1 << flip_bit;

        prop_assert!(client_secret.verify(&forged_tag).is_err());
    }
}
