//! Library entries and the naming conventions applied to them.

use super::platform::{Os, ResolvedPlatform};

/// Name of the primary library the bundle exists to distribute.
pub const MAIN_LIBRARY: &str = "skia";

/// Files shipped next to the libraries that must never be bundled.
pub const IGNORED_FILES: &[&str] = &["icudtl.dat"];

/// A library file collected from one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Filename inside the platform's bundle directory
    pub file_name: String,

    /// Library name with any `lib` prefix stripped, used as the artifact key
    pub display_name: String,

    /// Whether this is the main library
    pub is_main: bool,
}

impl LibraryEntry {
    /// Build an entry from a library's original filename.
    pub fn from_file_name(original: &str, os: Os) -> LibraryEntry {
        let (file_name, stem) = normalize_file_name(original, os);
        let display_name = display_name(&stem).to_string();
        let is_main = display_name.to_lowercase() == MAIN_LIBRARY;

        LibraryEntry {
            file_name,
            display_name,
            is_main,
        }
    }
}

/// The libraries collected from one staged platform.
#[derive(Debug, Clone)]
pub struct PlatformLibraries {
    pub platform: ResolvedPlatform,
    pub libraries: Vec<LibraryEntry>,
}

impl PlatformLibraries {
    /// The main library entry, if this platform shipped one.
    pub fn main_library(&self) -> Option<&LibraryEntry> {
        self.libraries.iter().find(|lib| lib.is_main)
    }
}

/// Normalize a library filename for the bundle.
///
/// Windows libraries lose a case-insensitive `lib` prefix; all other
/// platforms keep the name verbatim. Returns the new filename and its stem.
pub fn normalize_file_name(original: &str, os: Os) -> (String, String) {
    let (stem, extension) = split_extension(original);

    if os.is_windows() {
        let stem = strip_prefix_ignore_case(stem, "lib").unwrap_or(stem);
        let file_name = match extension {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem.to_string(),
        };
        (file_name, stem.to_string())
    } else {
        (original.to_string(), stem.to_string())
    }
}

/// Strip a literal `lib` prefix from a library stem.
pub fn display_name(stem: &str) -> &str {
    stem.strip_prefix("lib").unwrap_or(stem)
}

/// Whether a filename is on the ignore list.
pub fn is_ignored(file_name: &str) -> bool {
    IGNORED_FILES.contains(&file_name)
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(pos) => (&name[..pos], Some(&name[pos + 1..])),
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_strips_lib_prefix() {
        let (name, stem) = normalize_file_name("libfoo.lib", Os::Windows);
        assert_eq!(name, "foo.lib");
        assert_eq!(stem, "foo");

        let (name, _) = normalize_file_name("LIBfoo.lib", Os::Windows);
        assert_eq!(name, "foo.lib");

        let (name, _) = normalize_file_name("skia.lib", Os::Windows);
        assert_eq!(name, "skia.lib");
    }

    #[test]
    fn test_unix_keeps_name_verbatim() {
        let (name, stem) = normalize_file_name("libfoo.a", Os::Linux);
        assert_eq!(name, "libfoo.a");
        assert_eq!(stem, "libfoo");

        let (name, _) = normalize_file_name("LibBar.a", Os::MacOs);
        assert_eq!(name, "LibBar.a");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("libskia"), "skia");
        assert_eq!(display_name("skia"), "skia");
        // Only the literal lowercase prefix is stripped
        assert_eq!(display_name("LibBar"), "LibBar");
    }

    #[test]
    fn test_main_library_detection() {
        assert!(LibraryEntry::from_file_name("libskia.a", Os::Linux).is_main);
        assert!(LibraryEntry::from_file_name("skia.lib", Os::Windows).is_main);
        assert!(LibraryEntry::from_file_name("libSkia.lib", Os::Windows).is_main);
        assert!(!LibraryEntry::from_file_name("libskshaper.a", Os::Linux).is_main);
        assert!(!LibraryEntry::from_file_name("libskia_extra.a", Os::MacOs).is_main);
    }

    #[test]
    fn test_entry_fields() {
        let entry = LibraryEntry::from_file_name("libsvg.lib", Os::Windows);
        assert_eq!(
            entry,
            LibraryEntry {
                file_name: "svg.lib".to_string(),
                display_name: "svg".to_string(),
                is_main: false,
            }
        );
    }

    #[test]
    fn test_ignored_files() {
        assert!(is_ignored("icudtl.dat"));
        assert!(!is_ignored("libskia.a"));
    }
}
