//! End-to-end integration tests for threshold BLS signing.
//!
//! These tests exercise a full quorum lifecycle:
//! 1. Base key generation (dealer)
//! 2. Share derivation for every member
//! 3. Signing an LLMQ sign hash with key shares
//! 4. Recovery of the quorum public key and signature
//! 5. Wire encoding of everything a member would publish

use anyhow::{ensure, Result};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tbls_crypto::{
    PrivateKey, PublicKey, Signature, ThresholdConfig, ThresholdError, ThresholdScheme,
};
use tbls_types::{build_sign_hash, G1Point, G2Point, Hash, Scalar as WireScalar};

const N: usize = 5;
const M: usize = 3;
const LLMQ_TYPE: u8 = 100;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn seed(tag: u8) -> [u8; 32] {
    let mut seed = [tag; 32];
    seed[0] = 0xA5;
    seed
}

struct Quorum {
    base_keys: Vec<PrivateKey>,
    base_public_keys: Vec<PublicKey>,
    ids: Vec<Hash>,
    sk_shares: Vec<PrivateKey>,
    pk_shares: Vec<PublicKey>,
}

/// Deal an M-of-N quorum from deterministic seeds.
fn deal(scheme: &ThresholdScheme) -> Result<Quorum> {
    let base_keys = (0..M)
        .map(|i| PrivateKey::key_gen(&seed(i as u8 + 1)))
        .collect::<tbls_crypto::Result<Vec<_>>>()?;
    let base_public_keys: Vec<PublicKey> = base_keys.iter().map(PrivateKey::public_key).collect();

    let ids: Vec<Hash> = (0..N).map(|i| Hash([i as u8 + 1; 32])).collect();

    let mut sk_shares = Vec::with_capacity(N);
    let mut pk_shares = Vec::with_capacity(N);
    for id in &ids {
        sk_shares.push(scheme.private_key_share(&base_keys, id)?);
        pk_shares.push(scheme.public_key_share(&base_public_keys, id)?);
    }

    Ok(Quorum {
        base_keys,
        base_public_keys,
        ids,
        sk_shares,
        pk_shares,
    })
}

fn sign_hash() -> Result<Hash> {
    let quorum_hash =
        Hash::from_hex_reversed("000000000000001a8e0f3c5b66fdbcd7b4b94f8e0fbc8a26e4d8f0a6b1e3c9d2")?;
    let sign_id = Hash([0x11; 32]);
    let msg_hash = Hash([0x22; 32]);
    Ok(build_sign_hash(LLMQ_TYPE, &quorum_hash, &sign_id, &msg_hash))
}

/// Every 3-element subset of 0..5.
fn subsets_of_three() -> Vec<[usize; 3]> {
    let mut out = Vec::new();
    for a in 0..N {
        for b in a + 1..N {
            for c in b + 1..N {
                out.push([a, b, c]);
            }
        }
    }
    out
}

/// Test the complete quorum flow: deal, sign with shares, recover, verify.
#[test]
fn test_full_quorum_flow() -> Result<()> {
    init_tracing();
    let scheme = ThresholdScheme::default();

    // ========================================
    // Phase 1: Deal shares
    // ========================================

    let quorum = deal(&scheme)?;
    let quorum_pk = quorum.base_public_keys[0];
    info!(members = N, threshold = M, fingerprint = quorum_pk.fingerprint(), "quorum dealt");

    // ========================================
    // Phase 2: Members sign the sign hash
    // ========================================

    let hash = sign_hash()?;
    let sig_shares: Vec<Signature> = quorum
        .sk_shares
        .iter()
        .map(|sk| scheme.sign(sk, hash.as_ref()))
        .collect();

    for (pk_share, sig_share) in quorum.pk_shares.iter().zip(&sig_shares) {
        ensure!(
            scheme.verify(pk_share, hash.as_ref(), sig_share),
            "signature share does not verify against its public-key share"
        );
    }

    // Signature shares can also be derived from the base signatures.
    let base_sigs: Vec<Signature> = quorum
        .base_keys
        .iter()
        .map(|sk| scheme.sign(sk, hash.as_ref()))
        .collect();
    for (id, sig_share) in quorum.ids.iter().zip(&sig_shares) {
        assert_eq!(scheme.signature_share(&base_sigs, id)?, *sig_share);
    }

    // ========================================
    // Phase 3: Recover from every quorum of M
    // ========================================

    let expected_sig = scheme.sign(&quorum.base_keys[0], hash.as_ref());
    for subset in subsets_of_three() {
        let ids: Vec<Hash> = subset.iter().map(|i| quorum.ids[*i]).collect();
        let sks: Vec<PrivateKey> = subset.iter().map(|i| quorum.sk_shares[*i].clone()).collect();
        let pks: Vec<PublicKey> = subset.iter().map(|i| quorum.pk_shares[*i]).collect();
        let sigs: Vec<Signature> = subset.iter().map(|i| sig_shares[*i]).collect();

        let sk = scheme.private_key_recover(&sks, &ids)?;
        let pk = scheme.public_key_recover(&pks, &ids)?;
        let sig = scheme.signature_recover(&sigs, &ids)?;

        assert_eq!(sk, quorum.base_keys[0]);
        assert_eq!(pk, quorum_pk);
        assert_eq!(pk, sk.public_key());
        assert_eq!(sig, expected_sig);
        ensure!(scheme.verify(&pk, hash.as_ref(), &sig), "recovered signature rejected");
        ensure!(
            scheme.verify(&quorum_pk, hash.as_ref(), &sig),
            "recovered signature rejected by quorum key"
        );
    }

    info!("all quorums recovered the same signature");
    Ok(())
}

/// Two shares of a 3-of-5 setup recover something, just not the right thing.
#[test]
fn test_sub_threshold_recovery() -> Result<()> {
    init_tracing();
    let scheme = ThresholdScheme::default();
    let quorum = deal(&scheme)?;
    let hash = sign_hash()?;

    let ids = &quorum.ids[..2];
    let sk = scheme.private_key_recover(&quorum.sk_shares[..2], ids)?;
    let pk = scheme.public_key_recover(&quorum.pk_shares[..2], ids)?;
    let sigs: Vec<Signature> = quorum.sk_shares[..2]
        .iter()
        .map(|sk| scheme.sign(sk, hash.as_ref()))
        .collect();
    let sig = scheme.signature_recover(&sigs, ids)?;

    assert_ne!(sk, quorum.base_keys[0]);
    assert_ne!(pk, quorum.base_public_keys[0]);
    // Still internally consistent.
    assert_eq!(pk, sk.public_key());
    ensure!(
        !scheme.verify(&quorum.base_public_keys[0], hash.as_ref(), &sig),
        "sub-threshold signature verified against quorum key"
    );
    Ok(())
}

/// Dealing from the same seeds twice yields identical shares and recoveries.
#[test]
fn test_deterministic_dealing() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let first = deal(&scheme)?;
    let second = deal(&scheme)?;

    assert_eq!(first.base_keys, second.base_keys);
    assert_eq!(first.sk_shares, second.sk_shares);
    assert_eq!(first.pk_shares, second.pk_shares);

    let a = scheme.public_key_recover(&first.pk_shares[1..4], &first.ids[1..4])?;
    let b = scheme.public_key_recover(&second.pk_shares[1..4], &second.ids[1..4])?;
    assert_eq!(a, b);
    Ok(())
}

/// Randomly dealt keys behave the same as seeded ones.
#[test]
fn test_random_base_keys() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let base_keys: Vec<PrivateKey> = (0..M).map(|_| PrivateKey::random(&mut OsRng)).collect();
    let ids = ["alice", "bob", "carol", "dave", "erin"];

    let shares = ids
        .iter()
        .map(|id| scheme.private_key_share(&base_keys, *id))
        .collect::<tbls_crypto::Result<Vec<_>>>()?;

    let recovered = scheme.private_key_recover(&shares[2..], &ids[2..])?;
    assert_eq!(recovered, base_keys[0]);
    Ok(())
}

/// Shares dealt under one identifier tag cannot be recovered under another.
#[test]
fn test_configurations_must_match() -> Result<()> {
    let dealer = ThresholdScheme::default();
    let other = ThresholdScheme::new(ThresholdConfig::new(
        tbls_crypto::DEFAULT_SIGNATURE_DST.to_vec(),
        b"SOME_OTHER_ID_TAG_".to_vec(),
    )?)?;
    let quorum = deal(&dealer)?;

    let right = dealer.public_key_recover(&quorum.pk_shares[..3], &quorum.ids[..3])?;
    let wrong = other.public_key_recover(&quorum.pk_shares[..3], &quorum.ids[..3])?;
    assert_eq!(right, quorum.base_public_keys[0]);
    assert_ne!(wrong, quorum.base_public_keys[0]);
    Ok(())
}

/// The crate-root shorthands agree with a default scheme.
#[test]
fn test_free_functions_use_default_scheme() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let quorum = deal(&scheme)?;
    let id = &quorum.ids[0];

    assert_eq!(
        tbls_crypto::private_key_share(&quorum.base_keys, id)?,
        quorum.sk_shares[0]
    );
    assert_eq!(
        tbls_crypto::public_key_share(&quorum.base_public_keys, id)?,
        quorum.pk_shares[0]
    );
    assert!(tbls_crypto::verify_private_key_share(
        &quorum.sk_shares[0],
        &quorum.base_public_keys,
        id
    ));

    let sig = tbls_crypto::sign(&quorum.sk_shares[0], b"msg");
    assert!(tbls_crypto::verify(&quorum.pk_shares[0], b"msg", &sig));
    assert_eq!(
        tbls_crypto::public_key_recover(&quorum.pk_shares[..3], &quorum.ids[..3])?,
        quorum.base_public_keys[0]
    );
    Ok(())
}

/// Malformed quorums are rejected before any interpolation happens.
#[test]
fn test_degenerate_inputs() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let quorum = deal(&scheme)?;

    let no_ids: [Hash; 0] = [];
    assert!(matches!(
        scheme.public_key_recover(&[], &no_ids),
        Err(ThresholdError::InvalidInput(_))
    ));
    assert!(matches!(
        scheme.public_key_recover(&quorum.pk_shares[..3], &quorum.ids[..2]),
        Err(ThresholdError::InvalidInput(_))
    ));

    let duplicated = [quorum.ids[0], quorum.ids[1], quorum.ids[0]];
    assert_eq!(
        scheme.public_key_recover(&quorum.pk_shares[..3], &duplicated),
        Err(ThresholdError::DegenerateInterpolation)
    );

    assert!(matches!(
        scheme.private_key_share(&[], &quorum.ids[0]),
        Err(ThresholdError::InvalidInput(_))
    ));
    Ok(())
}

/// Everything a member publishes survives the wire containers.
#[test]
fn test_wire_roundtrip() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let quorum = deal(&scheme)?;
    let hash = sign_hash()?;
    let sig = scheme.sign(&quorum.sk_shares[0], hash.as_ref());

    let pk_wire = G1Point::from(&quorum.pk_shares[0]);
    let sig_wire = G2Point::from(&sig);
    let sk_wire = quorum.sk_shares[0].to_wire();

    let pk_borsh = borsh::to_vec(&pk_wire)?;
    let sig_json = serde_json::to_string(&sig_wire)?;
    let sk_borsh = borsh::to_vec(&*sk_wire)?;

    let pk = PublicKey::try_from(&borsh::from_slice::<G1Point>(&pk_borsh)?)?;
    let sig_back = Signature::try_from(&serde_json::from_str::<G2Point>(&sig_json)?)?;
    let sk = PrivateKey::try_from(&borsh::from_slice::<WireScalar>(&sk_borsh)?)?;

    assert_eq!(pk, quorum.pk_shares[0]);
    assert_eq!(sig_back, sig);
    assert_eq!(sk, quorum.sk_shares[0]);

    ensure!(
        scheme.verify_bytes(&pk_wire.0, hash.as_ref(), &sig_wire.0),
        "verify_bytes rejected a valid signature"
    );
    ensure!(
        !scheme.verify_bytes(&[0u8; 48], hash.as_ref(), &sig_wire.0),
        "verify_bytes accepted garbage"
    );

    let hash_json = serde_json::to_string(&hash)?;
    assert_eq!(serde_json::from_str::<Hash>(&hash_json)?, hash);
    Ok(())
}

/// Aggregating recovered quorum signatures over different sign hashes.
#[test]
fn test_aggregate_quorum_signatures() -> Result<()> {
    let scheme = ThresholdScheme::default();
    let quorum = deal(&scheme)?;
    let quorum_pk = quorum.base_public_keys[0];

    let other_keys: Vec<PrivateKey> = (0..M).map(|_| PrivateKey::random(&mut OsRng)).collect();
    let other_pk = other_keys[0].public_key();

    let msg_a = build_sign_hash(LLMQ_TYPE, &Hash([1; 32]), &Hash([2; 32]), &Hash([3; 32]));
    let msg_b = build_sign_hash(LLMQ_TYPE, &Hash([4; 32]), &Hash([5; 32]), &Hash([6; 32]));

    let sig_shares: Vec<Signature> = quorum.sk_shares[..M]
        .iter()
        .map(|sk| scheme.sign(sk, msg_a.as_ref()))
        .collect();
    let sig_a = scheme.signature_recover(&sig_shares, &quorum.ids[..M])?;
    let sig_b = scheme.sign(&other_keys[0], msg_b.as_ref());

    let agg = tbls_crypto::aggregate_signatures(&[sig_a, sig_b])?;
    ensure!(
        scheme.aggregate_verify(&[quorum_pk, other_pk], &[msg_a, msg_b], &agg),
        "aggregate of quorum signatures rejected"
    );
    ensure!(
        !scheme.aggregate_verify(&[quorum_pk, other_pk], &[msg_a, msg_a], &agg),
        "duplicate messages accepted"
    );
    Ok(())
}

/// Members derive per-epoch child keys and co-sign one message under the
/// augmented scheme.
#[test]
fn test_augmented_child_keys_cosign() -> Result<()> {
    init_tracing();
    let scheme = ThresholdScheme::new(ThresholdConfig::augmented())?;
    let quorum = deal(&scheme)?;

    let children = quorum
        .base_keys
        .iter()
        .map(|sk| sk.derive_child_private_key(7))
        .collect::<tbls_crypto::Result<Vec<_>>>()?;
    let child_pks: Vec<PublicKey> = children.iter().map(PrivateKey::public_key).collect();

    let hash = sign_hash()?;
    let sigs: Vec<Signature> = children
        .iter()
        .map(|sk| scheme.sign(sk, hash.as_ref()))
        .collect();
    let agg = tbls_crypto::aggregate_signatures(&sigs)?;

    let messages = vec![hash; children.len()];
    ensure!(
        scheme.aggregate_verify(&child_pks, &messages, &agg),
        "augmented aggregate over one message rejected"
    );
    ensure!(
        !ThresholdScheme::default().aggregate_verify(&child_pks, &messages, &agg),
        "basic scheme accepted repeated messages"
    );

    // Unhardened children can be followed from the public side.
    let watched = quorum.base_public_keys[0].derive_child_public_key_unhardened(3);
    let child = quorum.base_keys[0].derive_child_private_key_unhardened(3);
    let sig = scheme.sign(&child, hash.as_ref());
    ensure!(
        scheme.verify(&watched, hash.as_ref(), &sig),
        "unhardened child signature rejected"
    );
    info!(fingerprint = watched.fingerprint(), "child key verified");
    Ok(())
}
