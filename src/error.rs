use thiserror::Error;

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Misconfigured choice keys. Raised before any per-choice lookup happens,
/// so it always points at a programming mistake rather than user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceKeyError {
    #[error("Choice keys can not be empty. Prefix: {prefix:?}, Path: {path:?}")]
    Empty { prefix: String, path: String },

    #[error("Choice keys can not contain '/'. Prefix: {prefix:?}, Path: {path:?}, Invalid keys: {keys:?}")]
    ContainsSlash {
        prefix: String,
        path: String,
        keys: Vec<String>,
    },

    #[error("Choice keys have to be unique. Prefix: {prefix:?}, Path: {path:?}, Duplicates: {keys:?}")]
    Duplicate {
        prefix: String,
        path: String,
        keys: Vec<String>,
    },

    #[error(
        "Callback data {data:?} is {length} bytes long, only {} are allowed. Shorten the key, prefix or menu path.",
        MAX_CALLBACK_DATA_BYTES
    )]
    TooLong { data: String, length: usize },
}
