use serde_json::{Map, Value};

use crate::error::FormError;
use crate::stash::cipher::StashCipher;
use crate::stash::stash_model::FormStorage;

/// Decode a stash token into storage, reporting why it was rejected.
/// `None` (first-ever render) is not a failure: it yields empty storage.
pub fn decode(cipher: &dyn StashCipher, token: Option<&str>) -> Result<FormStorage, FormError> {
    let Some(token) = token else {
        return Ok(FormStorage::new());
    };
    let bytes = cipher
        .decrypt(token)
        .map_err(|source| FormError::StashDecode { source })?;
    let entries: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|source| FormError::StashPayload { source })?;
    Ok(FormStorage::from_entries(entries))
}

/// Tolerant decode: a tampered or foreign token degrades to empty
/// storage. An attacker-controlled client is the normal adversary on
/// this channel, so failure here is never fatal.
pub fn load(cipher: &dyn StashCipher, token: Option<&str>) -> FormStorage {
    decode(cipher, token).unwrap_or_else(|_| FormStorage::new())
}

/// Seal storage into an opaque token suitable for embedding in output.
pub fn save(cipher: &dyn StashCipher, storage: &FormStorage) -> String {
    let bytes = serde_json::to_vec(storage.entries()).unwrap_or_default();
    cipher.encrypt(&bytes)
}
