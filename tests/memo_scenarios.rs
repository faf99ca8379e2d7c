//! End-to-end scenarios across brain keys, key formats and memos.
//!
//! Two identities derived from fixed phrases exchange memos; reference
//! ciphertexts pin the wire format so other wallets stay compatible.

use dcorecryptolib::{
    brainkey::{derive_private_key, generate_keys, BrainKey},
    elgamal::{el_gamal_private_from_wif, el_gamal_public},
    keys::SecretKey,
    memo::{decrypt, decrypted_message, encrypt, MemoEnvelope, MemoScan, MemoScanner, ScanPolicy},
    Error, NetworkParams, Secp256k1PublicKey, Secp256k1SecretKey,
};
use rand::rngs::OsRng;

const HELLO_CIPHERTEXT_HEX: &str = "09cc9d8a046ed2534b9318188f7f7693";
const TEST_PHRASE_PUBLIC: &str = "DCT5gqC5uUEENfneq4ButcvPUFAsbP5H761Fx9TPQKfWG5JM3vugJ";
const TEST_PHRASE_EL_GAMAL_PUBLIC: &str = "471170557365311238814898538073836711855978110966964363818601918681563497865518728089895758070938665205476652929301239840465712546552687273961505511447685";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn random_key() -> Secp256k1SecretKey {
    SecretKey::random(&mut OsRng)
}

fn identity(phrase: &str) -> Secp256k1SecretKey {
    let brain_key = BrainKey::normalize(phrase);
    derive_private_key(&brain_key, 0).unwrap()
}

#[test]
fn two_identities_exchange_a_memo() {
    init_tracing();

    let phrase = BrainKey::normalize("TEST PHRASE");
    assert_eq!(phrase.as_str(), "TEST PHRASE");
    let (p, q) = generate_keys(&phrase).unwrap().into_parts();
    let (p2, q2) = generate_keys(&BrainKey::normalize("second identity phrase"))
        .unwrap()
        .into_parts();
    assert_eq!(q.to_string(), TEST_PHRASE_PUBLIC);

    let ciphertext = encrypt("hello", &p, &q2, "1").unwrap();
    assert_eq!(hex::encode(&ciphertext), HELLO_CIPHERTEXT_HEX);
    assert_eq!(decrypt(&ciphertext, &p2, &q, "1").unwrap(), "hello");

    let third = random_key();
    assert_eq!(decrypt(&ciphertext, &third, &q, "1"), Err(Error::DecryptionFailed));
}

#[test]
fn keys_survive_their_text_forms() {
    let key = identity("TEST PHRASE");
    let restored = Secp256k1SecretKey::from_wif(&key.to_wif()).unwrap();
    assert_eq!(restored, key);

    let public: Secp256k1PublicKey = key.public_key().to_string().parse().unwrap();
    assert_eq!(public, key.public_key());

    let testnet = NetworkParams::from_json_str(r#"{"address_prefix":"TST"}"#).unwrap();
    let text = testnet.public_key_to_string(&public);
    assert!(text.starts_with("TST"));
    assert_eq!(testnet.parse_public_key(&text).unwrap(), public);
    assert!(NetworkParams::mainnet().parse_public_key(&text).is_err());
}

#[test]
fn el_gamal_keys_from_wallet_wif() {
    let wif = identity("TEST PHRASE").to_wif();
    let private = el_gamal_private_from_wif(&wif).unwrap();
    assert_eq!(el_gamal_public(&private).unwrap(), TEST_PHRASE_EL_GAMAL_PUBLIC);
}

#[test]
fn history_is_read_with_rotated_keys() {
    init_tracing();

    let sender = identity("TEST PHRASE");
    let phrase = BrainKey::normalize("second identity phrase");
    let old_key = derive_private_key(&phrase, 0).unwrap();
    let new_key = derive_private_key(&phrase, 1).unwrap();

    let old_memo = MemoEnvelope::seal("paid in march", &sender, &old_key.public_key(), "11").unwrap();
    let new_memo = MemoEnvelope::seal("paid in april", &sender, &new_key.public_key(), "12").unwrap();
    let wire = [
        old_memo.to_json().unwrap(),
        new_memo.to_json().unwrap(),
        MemoEnvelope::plain("tip").to_json().unwrap(),
    ];

    let wallet = vec![
        "not a key".to_string(),
        new_key.to_wif(),
        random_key().to_wif(),
        old_key.to_wif(),
    ];

    let read: Vec<String> = wire
        .iter()
        .map(|json| {
            let memo = MemoEnvelope::from_json(json).unwrap();
            decrypted_message(Some(&memo), &wallet)
        })
        .collect();
    assert_eq!(read, ["paid in march", "paid in april", "tip"]);

    let stranger = [identity("someone else entirely").to_wif()];
    let report = MemoScanner::new(ScanPolicy::LastMatch).scan(Some(&old_memo), &stranger);
    assert_eq!(report.outcome, MemoScan::Undecryptable);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(decrypted_message(Some(&old_memo), &stranger), "");
}
