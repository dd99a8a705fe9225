use crate::error::{Error, ErrorKind};
use crate::rules::{self, Rules};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// One label of the fixed classification taxonomy.
///
/// Declaration order is significant: [`classify`](crate::classify) walks
/// [`Category::ALL`] front to back and the first match wins, so an extension
/// listed under two categories (`.json`, `.xml`, `.sql`) always resolves to
/// the earlier one. The derived [`Ord`] follows the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Documents,
    Images,
    Videos,
    Audio,
    Archives,
    Code,
    Data,
    /// Fallback when no rule matches. Owns no rules of its own.
    Other,
}
impl Category {
    /// Every category, in declaration (and therefore matching) order.
    pub const ALL: [Category; 8] = [
        Category::Documents,
        Category::Images,
        Category::Videos,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Data,
        Category::Other,
    ];

    /// Canonical lowercase name, also used as the storage directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Documents => "documents",
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Code => "code",
            Category::Data => "data",
            Category::Other => "other",
        }
    }

    /// The content-type and extension rules owned by this category.
    pub fn rules(&self) -> &'static Rules {
        match self {
            Category::Documents => &rules::DOCUMENTS,
            Category::Images => &rules::IMAGES,
            Category::Videos => &rules::VIDEOS,
            Category::Audio => &rules::AUDIO,
            Category::Archives => &rules::ARCHIVES,
            Category::Code => &rules::CODE,
            Category::Data => &rules::DATA,
            Category::Other => &Rules::EMPTY,
        }
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| exn::Exn::from(ErrorKind::UnknownCategory(s.to_string())))
    }
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
