//! Content hashing and root-relative local storage.

pub mod error;
mod hash;
mod local;
mod path;

pub use crate::hash::{CHUNK_SIZE, DIGEST_LEN, Digest, digest_file, digest_reader};
pub use crate::local::LocalStore;
pub use crate::path::validate as validate_path;
