//! Target classifier
//!
//! Maps the loosely standardized list of targets an X selection owner
//! advertises onto a single `(source type, canonical type, category)` triple.
//! Categories are tried in a fixed order (image, files, text, binary): almost
//! every owner advertises some text-ish target, so text is checked late to
//! avoid shadowing an image or file payload.

use std::fmt;

/// Label presented to Wayland for UTF-8 plain text
pub const DEFAULT_TEXT_MIME: &str = "text/plain;charset=utf-8";

/// Label presented to Wayland when nothing better is known
pub const DEFAULT_BINARY_MIME: &str = "application/octet-stream";

/// Meta targets that never carry clipboard content (compared lowercased)
const IGNORED_TARGETS: &[&str] = &["targets", "timestamp", "multiple", "save_targets"];

const IMAGE_TARGET_PREFS: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/bmp",
    "image/tiff",
    "image/gif",
];

const FILE_TARGET_PREFS: &[&str] = &[
    "application/x-gnome-copied-files",
    "x-special/nautilus-clipboard",
    "text/uri-list",
];

const TEXT_TARGET_PREFS: &[&str] = &[
    "text/plain;charset=utf-8",
    "text/plain",
    "text/plain; charset=utf-8",
    "text/plain;charset=UTF-8",
    "utf8_string",
    "string",
    "text",
    "text/html",
    "text/richtext",
];

/// Lowercased target -> label presented to Wayland
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("utf8_string", DEFAULT_TEXT_MIME),
    ("text", DEFAULT_TEXT_MIME),
    ("string", "text/plain"),
    ("text/plain; charset=utf-8", DEFAULT_TEXT_MIME),
    ("text/plain;charset=utf-8", DEFAULT_TEXT_MIME),
    ("text/plain;charset=utf-16", "text/plain"),
    ("text/plain;charset=utf16", "text/plain"),
    ("x-special/nautilus-clipboard", "application/x-gnome-copied-files"),
];

/// Kind of content a selection holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Image,
    Files,
    Text,
    Binary,
}

impl Category {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Files => "files",
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying one selection's advertised targets.
///
/// `source_type` is always one of the advertised targets (original spelling),
/// `canonical_type` is the non-empty label written to the Wayland clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSelection {
    source_type: String,
    canonical_type: String,
    category: Category,
}

impl ClassifiedSelection {
    fn new(source_type: &str, canonical_type: &str, category: Category) -> Self {
        Self {
            source_type: source_type.to_string(),
            canonical_type: canonical_type.to_string(),
            category,
        }
    }

    /// Target to request from the X selection owner
    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    /// Label to present to the Wayland clipboard
    pub fn canonical_type(&self) -> &str {
        &self.canonical_type
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

fn alias(target: &str) -> Option<&'static str> {
    let key = target.to_lowercase();
    TYPE_ALIASES
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Pick the first preference present in `targets` (case-insensitive), or else
/// the first target in source order accepted by `fallback`.
fn pick_preferred<'a>(
    targets: &[&'a str],
    preferences: &[&str],
    fallback: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    preferences
        .iter()
        .find_map(|pref| {
            targets
                .iter()
                .find(|target| target.eq_ignore_ascii_case(pref))
                .copied()
        })
        .or_else(|| {
            targets
                .iter()
                .find(|target| fallback(target.to_lowercase().as_str()))
                .copied()
        })
}

/// Classify advertised targets.
///
/// Returns `None` when nothing usable remains after dropping empty strings and
/// meta targets; callers treat that as an empty selection, not an error.
pub fn classify<S: AsRef<str>>(targets: &[S]) -> Option<ClassifiedSelection> {
    let cleaned: Vec<&str> = targets
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty() && !IGNORED_TARGETS.contains(&t.to_lowercase().as_str()))
        .collect();
    let first = *cleaned.first()?;

    if let Some(target) = pick_preferred(&cleaned, IMAGE_TARGET_PREFS, |t| t.starts_with("image/")) {
        return Some(ClassifiedSelection::new(target, target, Category::Image));
    }

    if let Some(target) = pick_preferred(&cleaned, FILE_TARGET_PREFS, |t| {
        t.contains("copied-files") || t.ends_with("uri-list")
    }) {
        let canonical = alias(target).unwrap_or(target);
        return Some(ClassifiedSelection::new(target, canonical, Category::Files));
    }

    if let Some(target) = pick_preferred(&cleaned, TEXT_TARGET_PREFS, |t| {
        t.starts_with("text/") || t == "utf8_string" || t == "string"
    }) {
        let canonical = alias(target).unwrap_or(if target.starts_with("text/") {
            target
        } else {
            DEFAULT_TEXT_MIME
        });
        return Some(ClassifiedSelection::new(target, canonical, Category::Text));
    }

    let canonical = alias(first).unwrap_or(DEFAULT_BINARY_MIME);
    Some(ClassifiedSelection::new(first, canonical, Category::Binary))
}
