//! Wire-level interoperability tests.
//!
//! The hand-crafted envelopes below are built directly from the RSA and
//! AES-CTR primitives, standing in for counterpart producers that skip one or
//! both base64 framing layers.

use std::collections::HashSet;
use std::sync::OnceLock;

use aes::cipher::{KeyIvInit, StreamCipher};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use envelope::{decrypt, encrypt, open, EnvelopeError, Framing, PrivateKeyPem, PublicKeyPem};
use rand::{rngs::OsRng, RngCore};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

struct Pair {
    rsa_public: RsaPublicKey,
    private: PrivateKeyPem,
    public: PublicKeyPem,
}

fn generate() -> Pair {
    let rsa_private = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
    let rsa_public = rsa_private.to_public_key();
    let private_pem = rsa_private.to_pkcs8_pem(LineEnding::LF).unwrap();
    let public_pem = rsa_public.to_public_key_pem(LineEnding::LF).unwrap();
    Pair {
        private: PrivateKeyPem::from_pem(&private_pem).unwrap(),
        public: PublicKeyPem::from_pem(&public_pem).unwrap(),
        rsa_public,
    }
}

fn pair_a() -> &'static Pair {
    static PAIR: OnceLock<Pair> = OnceLock::new();
    PAIR.get_or_init(generate)
}

fn pair_b() -> &'static Pair {
    static PAIR: OnceLock<Pair> = OnceLock::new();
    PAIR.get_or_init(generate)
}

/// Build an envelope the way an external producer would, choosing whether
/// each layer gets the extra base64 wrapping.
fn hand_crafted(recipient: &RsaPublicKey, payload: &[u8], key_b64: bool, message_b64: bool) -> String {
    let mut shared_key = [0u8; 32];
    let mut iv = [0u8; 16];
    OsRng.fill_bytes(&mut shared_key);
    OsRng.fill_bytes(&mut iv);

    let mut message = if message_b64 {
        STANDARD.encode(payload).into_bytes()
    } else {
        payload.to_vec()
    };
    Aes256Ctr::new(&shared_key.into(), &iv.into()).apply_keystream(&mut message);

    let key_payload = if key_b64 {
        STANDARD.encode(shared_key).into_bytes()
    } else {
        shared_key.to_vec()
    };
    let wrapped = recipient
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, &key_payload)
        .unwrap();

    format!(
        "{}${}${}",
        STANDARD.encode(wrapped),
        STANDARD.encode(iv),
        STANDARD.encode(message)
    )
}

#[test]
fn hello_world_scenario() {
    let pair = pair_a();
    let envelope = encrypt(b"hello world", &pair.public).unwrap();

    assert!(!envelope.is_empty());
    let fields: Vec<&str> = envelope.split('$').collect();
    assert_eq!(fields.len(), 3);
    for field in &fields {
        assert!(!field.is_empty());
        assert!(STANDARD.decode(field).is_ok());
    }
    assert_eq!(STANDARD.decode(fields[1]).unwrap().len(), 16);
    assert_eq!(decrypt(&envelope, &pair.private).unwrap(), b"hello world");
}

#[test]
fn round_trip_edge_payloads() {
    let pair = pair_a();
    let payloads: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"plain ascii".to_vec(),
        "multi-byte: h\u{e9}llo w\u{f6}rld \u{1F512}".as_bytes().to_vec(),
        (0u8..=255).collect(),
        vec![0u8; 70_000],
        b"dGVzdA==".to_vec(),
    ];
    for payload in payloads {
        let envelope = encrypt(&payload, &pair.public).unwrap();
        assert_eq!(decrypt(&envelope, &pair.private).unwrap(), payload);
    }
}

#[test]
fn empty_payload_envelope_has_empty_ciphertext_field() {
    let pair = pair_a();
    let envelope = encrypt(b"", &pair.public).unwrap();
    assert!(envelope.ends_with('$'));
    assert_eq!(envelope.matches('$').count(), 2);
    assert!(decrypt(&envelope, &pair.private).unwrap().is_empty());
}

#[test]
fn freshness_across_many_envelopes() {
    let pair = pair_a();
    let mut key_fields = HashSet::new();
    let mut iv_fields = HashSet::new();
    for _ in 0..1000 {
        let envelope = encrypt(b"same plaintext", &pair.public).unwrap();
        let mut fields = envelope.split('$');
        assert!(key_fields.insert(fields.next().unwrap().to_owned()));
        assert!(iv_fields.insert(fields.next().unwrap().to_owned()));
    }
}

#[test]
fn raw_shared_key_producer_is_accepted() {
    let pair = pair_a();
    let envelope = hand_crafted(&pair.rsa_public, b"interop input", false, true);
    let opened = open(&envelope, &pair.private).unwrap();
    assert_eq!(opened.plaintext, b"interop input");
    assert_eq!(opened.key_framing, Framing::SingleEncoded);
    assert_eq!(opened.message_framing, Framing::DoubleEncoded);
}

#[test]
fn raw_message_producer_is_accepted() {
    let pair = pair_a();
    let envelope = hand_crafted(&pair.rsa_public, b"{\"method\": \"central\"}", true, false);
    let opened = open(&envelope, &pair.private).unwrap();
    assert_eq!(opened.plaintext, b"{\"method\": \"central\"}");
    assert_eq!(opened.key_framing, Framing::DoubleEncoded);
    assert_eq!(opened.message_framing, Framing::SingleEncoded);
}

#[test]
fn fully_raw_producer_is_accepted() {
    let pair = pair_a();
    let payload = [0xFFu8, 0x00, 0x80, b'$', b' '];
    let envelope = hand_crafted(&pair.rsa_public, &payload, false, false);
    assert_eq!(decrypt(&envelope, &pair.private).unwrap(), payload);
}

#[test]
fn malformed_input_is_rejected() {
    let pair = pair_a();
    assert!(matches!(
        decrypt("not-an-envelope", &pair.private),
        Err(EnvelopeError::Format(_))
    ));

    let envelope = encrypt(b"hello world", &pair.public).unwrap();
    let two_fields = envelope.rsplitn(2, '$').nth(1).unwrap();
    assert!(matches!(
        decrypt(two_fields, &pair.private),
        Err(EnvelopeError::Format(_))
    ));
}

#[test]
fn mismatched_key_pair_does_not_return_plaintext() {
    let a = pair_a();
    let b = pair_b();
    for _ in 0..20 {
        let envelope = encrypt(b"for organization A only", &a.public).unwrap();
        match decrypt(&envelope, &b.private) {
            Err(EnvelopeError::Decryption) => {}
            Ok(bytes) => assert_ne!(bytes, b"for organization A only"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn corrupted_key_field_is_decryption_error() {
    let pair = pair_a();
    let envelope = encrypt(b"payload", &pair.public).unwrap();
    let mut fields: Vec<String> = envelope.split('$').map(str::to_owned).collect();
    let mut wrapped = STANDARD.decode(&fields[0]).unwrap();
    wrapped[10] ^= 0x01;
    fields[0] = STANDARD.encode(wrapped);
    match decrypt(&fields.join("$"), &pair.private) {
        Err(EnvelopeError::Decryption) => {}
        Ok(bytes) => assert_ne!(bytes, b"payload"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tampered_ciphertext_is_not_detected() {
    // No integrity tag: flipping a ciphertext bit yields different bytes, not an error.
    let pair = pair_a();
    let envelope = encrypt(b"abc def ghi", &pair.public).unwrap();
    let mut fields: Vec<String> = envelope.split('$').map(str::to_owned).collect();
    let mut ciphertext = STANDARD.decode(&fields[2]).unwrap();
    ciphertext[0] ^= 0x01;
    fields[2] = STANDARD.encode(ciphertext);
    let result = decrypt(&fields.join("$"), &pair.private).unwrap();
    assert_ne!(result, b"abc def ghi");
}

#[test]
fn concurrent_calls_share_nothing() {
    let pair = pair_a();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                scope.spawn(move || {
                    let payload = vec![i; 1024];
                    let envelope = encrypt(&payload, &pair.public).unwrap();
                    assert_eq!(decrypt(&envelope, &pair.private).unwrap(), payload);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}
