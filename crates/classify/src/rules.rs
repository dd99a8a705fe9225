//! The static rule table backing [`Category::rules`](crate::Category::rules).
//!
//! Extensions are lowercase and carry their leading separator. Content types
//! are compared verbatim.

/// Content-type and extension sets owned by a single category.
#[derive(Debug, PartialEq, Eq)]
pub struct Rules {
    pub content_types: &'static [&'static str],
    pub extensions: &'static [&'static str],
}
impl Rules {
    pub const EMPTY: Rules = Rules { content_types: &[], extensions: &[] };

    pub fn matches_content_type(&self, content_type: &str) -> bool {
        self.content_types.contains(&content_type)
    }

    /// `extension` must already be lowercased and include the leading `.`.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.contains(&extension)
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.extensions.is_empty()
    }
}

macro_rules! rules {
    ($name:ident, [$($content_type:literal),* $(,)?], [$($extension:literal),* $(,)?]) => {
        pub(crate) static $name: Rules = Rules {
            content_types: &[$($content_type),*],
            extensions: &[$($extension),*],
        };
    };
}

rules!(
    DOCUMENTS,
    [
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "application/vnd.ms-powerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "text/plain",
        "text/rtf",
    ],
    [".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".rtf", ".odt", ".ods"]
);
rules!(
    IMAGES,
    ["image/jpeg", "image/png", "image/gif", "image/bmp", "image/svg+xml", "image/webp", "image/tiff"],
    [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".tif", ".ico"]
);
rules!(
    VIDEOS,
    ["video/mp4", "video/mpeg", "video/quicktime", "video/x-msvideo", "video/x-matroska", "video/webm"],
    [".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv", ".webm", ".m4v", ".mpg", ".mpeg"]
);
rules!(
    AUDIO,
    ["audio/mpeg", "audio/wav", "audio/ogg", "audio/webm", "audio/aac", "audio/flac"],
    [".mp3", ".wav", ".ogg", ".m4a", ".flac", ".aac", ".wma", ".opus"]
);
rules!(
    ARCHIVES,
    [
        "application/zip",
        "application/x-rar-compressed",
        "application/x-tar",
        "application/gzip",
        "application/x-7z-compressed",
    ],
    [".zip", ".rar", ".tar", ".gz", ".7z", ".bz2", ".xz", ".tgz"]
);
rules!(
    CODE,
    [
        "text/x-python",
        "text/x-java",
        "text/x-c",
        "text/html",
        "text/css",
        "application/javascript",
        "application/json",
        "application/xml",
    ],
    [
        ".py", ".java", ".c", ".cpp", ".h", ".hpp", ".js", ".ts", ".html", ".css", ".json", ".xml", ".php", ".rb",
        ".go", ".rs", ".swift", ".kt", ".sh", ".bash", ".sql", ".yaml", ".yml",
    ]
);
// Overlaps with CODE on json/xml/sql. CODE is declared first and wins.
rules!(
    DATA,
    ["text/csv", "application/json", "application/xml", "application/vnd.sqlite3"],
    [".csv", ".json", ".xml", ".db", ".sqlite", ".sql", ".parquet"]
);
