use std::fmt;

#[derive(Debug)]
pub enum FormError {
    /// The root of a raw definition was not an object
    InvalidDefinition { detail: String },

    /// Stash token failed to decrypt (recovered internally; exposed for tracing)
    StashDecode { source: CipherError },

    /// Stash token decrypted, but the payload was not a JSON object
    StashPayload { source: serde_json::Error },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidDefinition { detail } => {
                write!(f, "Invalid form definition: {}", detail)
            }
            FormError::StashDecode { source } => {
                write!(f, "Stash token rejected: {}", source)
            }
            FormError::StashPayload { source } => {
                write!(f, "Stash payload is not a JSON object: {}", source)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::StashDecode { source } => Some(source),
            FormError::StashPayload { source } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum CipherError {
    /// Token had no tag separator
    MissingTag,

    /// Payload or tag was not valid lowercase hex
    BadHex { detail: String },

    /// Tag did not match the payload under this key
    TagMismatch,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::MissingTag => write!(f, "token is missing its tag"),
            CipherError::BadHex { detail } => write!(f, "token is not valid hex: {}", detail),
            CipherError::TagMismatch => write!(f, "token tag does not match payload"),
        }
    }
}

impl std::error::Error for CipherError {}
