use sha1::{Digest, Sha1};

use crate::error::CipherError;

/// Opaque crypto provider for the stash token. The core assumes nothing
/// beyond this pair: `decrypt(encrypt(x)) == x` and decrypt fails on
/// anything encrypt did not produce.
pub trait StashCipher {
    fn encrypt(&self, plaintext: &[u8]) -> String;
    fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError>;
}

/// Hex payload with a keyed SHA-1 tag (`<payload>.<tag>`). Detects
/// tampering and foreign tokens; does not hide contents. Hosts that
/// need confidentiality supply their own `StashCipher`.
#[derive(Debug, Clone)]
pub struct TaggedCipher {
    key: Vec<u8>,
}

impl TaggedCipher {
    pub fn new(key: &[u8]) -> Self {
        TaggedCipher { key: key.to_vec() }
    }

    fn tag(&self, payload: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(&self.key);
        hasher.update(b"\x00");
        hasher.update(payload);
        format!("{:x}", hasher.finalize())
    }
}

impl StashCipher for TaggedCipher {
    fn encrypt(&self, plaintext: &[u8]) -> String {
        format!("{}.{}", hex_encode(plaintext), self.tag(plaintext))
    }

    fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        let (payload_hex, tag) = token.split_once('.').ok_or(CipherError::MissingTag)?;
        let payload = hex_decode(payload_hex)?;
        if self.tag(&payload) != tag {
            return Err(CipherError::TagMismatch);
        }
        Ok(payload)
    }
}

pub fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

pub fn hex_decode(hex: &str) -> Result<Vec<u8>, CipherError> {
    if !hex.is_ascii() {
        return Err(CipherError::BadHex {
            detail: "non-ascii input".to_string(),
        });
    }
    if hex.len() % 2 != 0 {
        return Err(CipherError::BadHex {
            detail: "odd length".to_string(),
        });
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| CipherError::BadHex {
                detail: format!("bad byte at offset {}", i),
            })
        })
        .collect()
}
