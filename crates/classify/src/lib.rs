//! Deterministic file classification into a fixed taxonomy.
//!
//! A file is matched against each [`Category`] in declaration order using its
//! lowercased extension and an optional content-type hint. The first category
//! that recognises either signal wins; [`Category::Other`] catches the rest.

mod category;
pub mod error;
mod rules;

pub use crate::category::Category;
pub use crate::rules::Rules;
use std::path::Path;

/// Classifies a filename with an optional content-type hint.
///
/// Pure and reentrant: identical input always yields the identical category.
/// Extension comparison is case-insensitive, content-type comparison is not.
pub fn classify(filename: impl AsRef<Path>, content_type: Option<&str>) -> Category {
    let extension = extension(filename.as_ref());
    Category::ALL
        .into_iter()
        .find(|category| {
            let rules = category.rules();
            content_type.is_some_and(|ct| rules.matches_content_type(ct))
                || extension.as_deref().is_some_and(|ext| rules.matches_extension(ext))
        })
        .unwrap_or(Category::Other)
}

/// Classifies a path using its extension and a content type guessed from it.
pub fn classify_path(path: impl AsRef<Path>) -> Category {
    let path = path.as_ref();
    classify(path, guess_content_type(path))
}

/// Source extensions that `mime_guess` reports as `text/plain` (or, for Java,
/// `application/octet-stream`). A `text/plain` hint would file them under
/// documents, so they get their language type instead.
const SOURCE_CONTENT_TYPES: &[(&str, &str)] = &[
    (".py", "text/x-python"),
    (".c", "text/x-c"),
    (".h", "text/x-c"),
    (".cpp", "text/x-c++src"),
    (".hpp", "text/x-c++hdr"),
    (".java", "text/x-java"),
];

/// Best-effort content type for a filename, based purely on its extension.
pub fn guess_content_type(filename: impl AsRef<Path>) -> Option<&'static str> {
    let filename = filename.as_ref();
    if let Some(ext) = extension(filename)
        && let Some(&(_, content_type)) = SOURCE_CONTENT_TYPES.iter().find(|(known, _)| *known == ext)
    {
        return Some(content_type);
    }
    mime_guess::from_path(filename).first_raw()
}

/// Lowercased final extension including the leading `.`, if there is one.
///
/// `archive.tar.gz` yields `.gz`; `.bashrc` and `trailing.` yield nothing.
pub fn extension(filename: &Path) -> Option<String> {
    filename
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Every category alongside its rules, in matching order.
pub fn table() -> impl Iterator<Item = (Category, &'static Rules)> {
    Category::ALL.into_iter().map(|category| (category, category.rules()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("test.pdf", Category::Documents)]
    #[case("test.txt", Category::Documents)]
    #[case("test.docx", Category::Documents)]
    #[case("image.jpg", Category::Images)]
    #[case("image.png", Category::Images)]
    #[case("movie.mp4", Category::Videos)]
    #[case("song.mp3", Category::Audio)]
    #[case("archive.zip", Category::Archives)]
    #[case("backup.tar.gz", Category::Archives)]
    #[case("script.py", Category::Code)]
    #[case("app.js", Category::Code)]
    #[case("main.rs", Category::Code)]
    #[case("data.csv", Category::Data)]
    #[case("store.sqlite", Category::Data)]
    #[case("unknown.xyz", Category::Other)]
    #[case("Makefile", Category::Other)]
    fn test_classify_by_extension(#[case] filename: &str, #[case] expected: Category) {
        assert_eq!(classify(filename, None), expected);
    }

    #[rstest]
    #[case("IMAGE.PNG", "image.png")]
    #[case("Report.PDF", "report.pdf")]
    #[case("Song.Mp3", "song.mp3")]
    fn test_extension_is_case_insensitive(#[case] upper: &str, #[case] lower: &str) {
        assert_eq!(classify(upper, None), classify(lower, None));
        assert_eq!(classify_path(upper), classify_path(lower));
    }

    #[rstest]
    #[case("config.json")]
    #[case("layout.xml")]
    #[case("schema.sql")]
    fn test_shared_extensions_resolve_to_code(#[case] filename: &str) {
        for _ in 0..3 {
            assert_eq!(classify(filename, None), Category::Code);
        }
        assert_eq!(classify(filename, Some("application/json")), Category::Code);
    }

    #[test]
    fn test_content_type_alone_decides_without_extension() {
        assert_eq!(classify("README", Some("text/plain")), Category::Documents);
        assert_eq!(classify("README", Some("text/csv")), Category::Data);
        assert_eq!(classify("README", Some("application/x-unknown")), Category::Other);
        assert_eq!(classify("README", None), Category::Other);
    }

    #[test]
    fn test_content_type_is_case_sensitive() {
        assert_eq!(classify("blob", Some("TEXT/PLAIN")), Category::Other);
    }

    #[test]
    fn test_earliest_category_wins_across_signals() {
        // Hint matches documents, extension matches data: documents is declared first.
        assert_eq!(classify("export.csv", Some("text/plain")), Category::Documents);
        // Extension matches images, hint matches data: images is declared first.
        assert_eq!(classify("chart.png", Some("text/csv")), Category::Images);
    }

    #[rstest]
    #[case("archive.tar.gz", Some(".gz"))]
    #[case("UPPER.TXT", Some(".txt"))]
    #[case(".bashrc", None)]
    #[case("no_extension", None)]
    #[case("trailing.", None)]
    fn test_extension(#[case] filename: &str, #[case] expected: Option<&str>) {
        assert_eq!(extension(Path::new(filename)).as_deref(), expected);
    }

    #[rstest]
    #[case::python("script.py", Some("text/x-python"))]
    #[case::c_source("main.c", Some("text/x-c"))]
    #[case::c_header("util.H", Some("text/x-c"))]
    #[case::cpp_source("main.cpp", Some("text/x-c++src"))]
    #[case::cpp_header("util.hpp", Some("text/x-c++hdr"))]
    #[case::java("Main.java", Some("text/x-java"))]
    #[case::text("notes.txt", Some("text/plain"))]
    #[case::none("Makefile", None)]
    fn test_guess_content_type(#[case] filename: &str, #[case] expected: Option<&str>) {
        assert_eq!(guess_content_type(filename), expected);
    }

    #[rstest]
    #[case::documents(Category::Documents)]
    #[case::images(Category::Images)]
    #[case::videos(Category::Videos)]
    #[case::audio(Category::Audio)]
    #[case::archives(Category::Archives)]
    #[case::code(Category::Code)]
    #[case::data(Category::Data)]
    fn test_classify_path_every_listed_extension(#[case] category: Category) {
        for ext in category.rules().extensions {
            // Shared extensions belong to whichever owner is declared first.
            let owner = Category::ALL.into_iter().find(|c| c.rules().matches_extension(ext)).unwrap();
            assert!(owner <= category);
            for filename in [format!("file{ext}"), format!("FILE{}", ext.to_uppercase())] {
                assert_eq!(classify_path(&filename), owner, "{filename} hint={:?}", guess_content_type(&filename));
            }
        }
    }

    #[rstest]
    #[case("script.py")]
    #[case("main.c")]
    #[case("main.cpp")]
    #[case("util.h")]
    #[case("util.hpp")]
    #[case("Main.java")]
    #[case("index.ts")]
    #[case("lib.rs")]
    #[case("run.sh")]
    #[case("config.json")]
    #[case("layout.xml")]
    #[case("schema.sql")]
    fn test_classify_path_source_files_are_code(#[case] filename: &str) {
        assert_eq!(classify_path(filename), Category::Code);
    }

    #[test]
    fn test_classify_path_uses_guessed_content_type() {
        assert_eq!(guess_content_type("report.txt"), Some("text/plain"));
        assert_eq!(classify_path("report.txt"), Category::Documents);
        assert_eq!(classify_path("app.js"), Category::Code);
        assert_eq!(classify_path("photo.jpeg"), Category::Images);
        assert_eq!(classify_path("data.xyz"), Category::Other);
    }

    #[test]
    fn test_table_covers_every_category_in_order() {
        let categories: Vec<_> = table().map(|(category, _)| category).collect();
        assert_eq!(categories, Category::ALL);
    }
}
