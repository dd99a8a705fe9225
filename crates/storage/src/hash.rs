//! Streaming content digests.
//!
//! Files are hashed with BLAKE3 (256-bit) in fixed-size chunks, so memory use
//! does not grow with file size. The digest is the deduplication identity of
//! a file's content: name, timestamps and permissions do not contribute.

use crate::error::{Error, ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Bytes read per chunk while hashing.
pub const CHUNK_SIZE: usize = 64 * 1024;
/// Length of a hex-encoded [`Digest`].
pub const DIGEST_LEN: usize = blake3::OUT_LEN * 2;

/// A hex-encoded, lowercase, 256-bit BLAKE3 content digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Digest(String);
impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<blake3::Hash> for Digest {
    fn from(hash: blake3::Hash) -> Self {
        Self(hash.to_hex().to_string())
    }
}
impl TryFrom<String> for Digest {
    type Error = ErrorKind;
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let valid = value.len() == DIGEST_LEN && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        match valid {
            true => Ok(Self(value)),
            false => Err(ErrorKind::InvalidDigest(value)),
        }
    }
}
impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}
impl FromStr for Digest {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Digest::try_from(s.to_string())?)
    }
}
impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Hashes everything `reader` yields, [`CHUNK_SIZE`] bytes at a time.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize().into())
}

/// Hashes the file at `path` (any path, not only root-relative ones).
///
/// Fails with [`NotFound`](ErrorKind::NotFound) or
/// [`PermissionDenied`](ErrorKind::PermissionDenied) if the file cannot be
/// opened, and [`Io`](ErrorKind::Io) if it cannot be read to the end.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn digest_file(path: impl AsRef<Path>) -> Result<Digest> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ErrorKind::from_io(e, path))?;
    Ok(digest_reader(file).map_err(|e| ErrorKind::from_io(e, path))?)
}
