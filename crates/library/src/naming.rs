//! Destination filenames and collision suffixes.

use shelf_storage::Digest;

/// Maximum number of candidate names tried before giving up with
/// [`ErrorKind::Conflict`](crate::error::ErrorKind::Conflict).
pub(crate) const MAX_NAME_ATTEMPTS: usize = 10_000;

/// How an ingested file is named inside its category directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Naming {
    /// Keep the source's filename.
    #[default]
    Original,
    /// Name the file `<digest><extension>`.
    Digest,
}
impl Naming {
    pub fn from_preserve_name(preserve: bool) -> Self {
        match preserve {
            true => Self::Original,
            false => Self::Digest,
        }
    }

    /// The preferred destination filename, before any collision suffix.
    pub fn file_name(&self, original: &str, digest: &Digest) -> String {
        match self {
            Self::Original => original.to_string(),
            Self::Digest => format!("{digest}{}", split_extension(original).1),
        }
    }
}

/// Splits `name` into stem and extension (with its leading `.`).
///
/// Only the final extension counts, a leading dot does not start one, and a
/// trailing dot leaves the extension empty.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i + 1 < name.len() => name.split_at(i),
        _ => (name, ""),
    }
}

/// The `attempt`-th candidate for `name`: the name itself first, then
/// `<stem>_1<ext>`, `<stem>_2<ext>`, ...
pub(crate) fn candidate(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let (stem, extension) = split_extension(name);
    format!("{stem}_{attempt}{extension}")
}
