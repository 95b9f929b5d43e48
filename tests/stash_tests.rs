use serde_json::json;

use form_continuity::stash::token;
use form_continuity::{CipherError, FormStorage, StashCipher, TaggedCipher};

use crate::common::fixtures::cipher;

mod common;

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn save_then_load_is_identity() {
    let mut storage = FormStorage::new();
    storage.set("counter", json!(3));
    storage.set("cached", json!({ "nested": ["a", "b"] }));

    let sealed = token::save(&cipher(), &storage);
    let loaded = token::load(&cipher(), Some(&sealed));

    assert_eq!(loaded, storage, "load(save(X)) == X");
}

#[test]
fn missing_token_means_empty_storage() {
    let loaded = token::load(&cipher(), None);
    assert!(loaded.is_empty(), "First-ever render starts empty");
}

// =========================================================================
// Tolerance: tampered and foreign tokens
// =========================================================================

#[test]
fn garbage_token_degrades_to_empty_without_raising() {
    let loaded = token::load(&cipher(), Some("definitely-not-a-token"));
    assert!(loaded.is_empty(), "Garbage degrades to empty storage");
}

#[test]
fn tampered_payload_degrades_to_empty() {
    let mut storage = FormStorage::new();
    storage.set("secret", json!("value"));
    let sealed = token::save(&cipher(), &storage);

    let flipped = if sealed.starts_with('a') { 'b' } else { 'a' };
    let tampered = format!("{}{}", flipped, &sealed[1..]);

    let loaded = token::load(&cipher(), Some(&tampered));
    assert!(loaded.is_empty(), "Flipped payload byte fails the tag check");
}

#[test]
fn token_sealed_under_a_different_key_is_rejected() {
    let mut storage = FormStorage::new();
    storage.set("secret", json!("value"));
    let sealed = token::save(&TaggedCipher::new(b"other-key"), &storage);

    let loaded = token::load(&cipher(), Some(&sealed));
    assert!(loaded.is_empty(), "Foreign token is treated as no prior state");
}

#[test]
fn valid_token_with_non_object_payload_degrades_to_empty() {
    let sealed = cipher().encrypt(b"[1,2,3]");
    let loaded = token::load(&cipher(), Some(&sealed));
    assert!(loaded.is_empty(), "Payload must be a JSON object");

    let decoded = token::decode(&cipher(), Some(&sealed));
    assert!(decoded.is_err(), "decode reports why the payload was rejected");
}

// =========================================================================
// Cipher internals
// =========================================================================

#[test]
fn cipher_rejects_malformed_tokens_with_specific_errors() {
    let c = cipher();

    assert!(
        matches!(c.decrypt("deadbeef"), Err(CipherError::MissingTag)),
        "No separator"
    );
    assert!(
        matches!(c.decrypt("zz.0000"), Err(CipherError::BadHex { .. })),
        "Payload not hex"
    );
    assert!(
        matches!(c.decrypt("abc.0000"), Err(CipherError::BadHex { .. })),
        "Odd-length payload"
    );

    let sealed = c.encrypt(b"payload");
    let (payload, _tag) = sealed.split_once('.').unwrap();
    let forged = format!("{}.{}", payload, "0".repeat(40));
    assert!(
        matches!(c.decrypt(&forged), Err(CipherError::TagMismatch)),
        "Wrong tag"
    );
}

#[test]
fn cipher_round_trips_arbitrary_bytes() {
    let c = cipher();
    let plaintext = [0u8, 1, 2, 254, 255, 127, 10, 13];
    let sealed = c.encrypt(&plaintext);
    assert_eq!(c.decrypt(&sealed).unwrap(), plaintext);
}
