//! Integration tests for the CredVault crypto modules.

use credvault::crypto::keyfile::{ensure_key, key_exists};
use credvault::crypto::keys::MasterKey;
use credvault::crypto::{cipher, hasher};
use credvault::errors::VaultError;

use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"Tr0ub4dor&3";

    let envelope = cipher::encrypt(&key, plaintext).expect("encrypt should succeed");

    // Envelope must be longer than plaintext (version + 12-byte nonce +
    // 16-byte tag).
    assert!(envelope.len() > plaintext.len());

    let recovered = cipher::decrypt(&key, &envelope).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same password";

    let e1 = cipher::encrypt(&key, plaintext).expect("encrypt 1");
    let e2 = cipher::encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(e1, e2, "two encryptions of the same plaintext must differ");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let envelope = cipher::encrypt(&key, b"top secret").expect("encrypt");
    let result = cipher::decrypt(&wrong_key, &envelope);

    assert!(
        matches!(result, Err(VaultError::DecryptionFailed)),
        "decryption with the wrong key must fail closed"
    );
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let key = [0xAAu8; 32];
    assert!(cipher::decrypt(&key, &[0u8; 5]).is_err());
    assert!(cipher::decrypt(&key, &[]).is_err());
}

#[test]
fn single_bit_flips_are_always_detected() {
    let key = [0xBBu8; 32];
    let envelope = cipher::encrypt(&key, b"integrity matters").expect("encrypt");

    for i in 0..envelope.len() {
        for bit in 0..8 {
            let mut tampered = envelope.clone();
            tampered[i] ^= 1 << bit;
            assert!(
                cipher::decrypt(&key, &tampered).is_err(),
                "flip of bit {bit} in byte {i} went undetected"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Key artifact lifecycle
// ---------------------------------------------------------------------------

#[test]
fn ensure_key_creates_then_reloads_the_same_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("master.key");

    assert!(!key_exists(&path));
    let first = ensure_key(&path).expect("generate key");
    assert!(key_exists(&path));

    let second = ensure_key(&path).expect("load key");

    // Same artifact — the derived cipher keys must agree, so data
    // encrypted in run one decrypts in run two.
    let k1 = first.cipher_key().unwrap();
    let k2 = second.cipher_key().unwrap();
    assert_eq!(k1, k2);

    let envelope = cipher::encrypt(&k1, b"persisted").unwrap();
    assert_eq!(cipher::decrypt(&k2, &envelope).unwrap(), b"persisted");
}

#[test]
fn corrupt_key_artifact_is_not_silently_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("master.key");
    std::fs::write(&path, b"way too short").unwrap();

    let result = ensure_key(&path);
    assert!(matches!(result, Err(VaultError::KeyUnavailable(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"way too short");
}

#[test]
fn distinct_master_keys_cannot_read_each_other() {
    let a = MasterKey::new([0x01u8; 32]);
    let b = MasterKey::new([0x02u8; 32]);

    let envelope = cipher::encrypt(&a.cipher_key().unwrap(), b"mine").unwrap();
    let result = cipher::decrypt(&b.cipher_key().unwrap(), &envelope);
    assert!(matches!(result, Err(VaultError::DecryptionFailed)));
}

// ---------------------------------------------------------------------------
// Credential hashing
// ---------------------------------------------------------------------------

const TEST_ITERATIONS: u32 = 1_000;

#[test]
fn hash_verify_roundtrip() {
    let (digest, salt) = hasher::hash_with_iterations("Tr0ub4dor&3", TEST_ITERATIONS).unwrap();
    assert!(hasher::verify_with_iterations(
        "Tr0ub4dor&3",
        &digest,
        &salt,
        TEST_ITERATIONS
    ));
}

#[test]
fn verify_rejects_other_passwords() {
    let (digest, salt) = hasher::hash_with_iterations("password-one", TEST_ITERATIONS).unwrap();
    assert!(!hasher::verify_with_iterations(
        "password-two",
        &digest,
        &salt,
        TEST_ITERATIONS
    ));
}

#[test]
fn hashing_is_salted() {
    let (d1, s1) = hasher::hash_with_iterations("same input", TEST_ITERATIONS).unwrap();
    let (d2, s2) = hasher::hash_with_iterations("same input", TEST_ITERATIONS).unwrap();
    assert_ne!(s1, s2, "salts must be random per call");
    assert_ne!(d1, d2, "digests must differ under different salts");
}

#[test]
fn hash_output_is_base64_text() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let (digest, salt) = hasher::hash_with_iterations("encode me", TEST_ITERATIONS).unwrap();
    assert_eq!(BASE64.decode(&digest).unwrap().len(), 32);
    assert_eq!(BASE64.decode(&salt).unwrap().len(), 32);
}
