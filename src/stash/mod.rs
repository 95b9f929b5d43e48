pub mod cipher;
pub mod stash_model;
pub mod token;
