//! Marker-call conventions shared by both marking strategies.

/// Text that closes a marker call.
pub const MARKER_CLOSE: &str = ")";

const DEFAULT_FUNCTION: &str = "_";
const DEFAULT_IMPORT_KEYWORDS: &[&str] = &["require", "require_relative"];

/// Names the marker function and the keywords that introduce imports.
///
/// The default follows the gettext convention: literals are wrapped as
/// `_("text")` and lines or calls starting with `require` load code rather
/// than carry user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSyntax {
    function: String,
    import_keywords: Vec<String>,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTION, DEFAULT_IMPORT_KEYWORDS.iter().copied())
    }
}

impl MarkerSyntax {
    /// Creates marker conventions from a function name and import keywords.
    #[must_use]
    pub fn new<I, S>(function: impl Into<String>, import_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            import_keywords: import_keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the marker function name.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the text that opens a marker call, for example `_(`.
    #[must_use]
    pub fn open(&self) -> String {
        format!("{}(", self.function)
    }

    /// Returns whether `name` is one of the import keywords.
    #[must_use]
    pub fn is_import_keyword(&self, name: &str) -> bool {
        self.import_keywords.iter().any(|keyword| keyword == name)
    }

    /// Returns whether a raw line is an import statement.
    ///
    /// Only the very start of the line is inspected; indented imports are not
    /// recognised.
    #[must_use]
    pub fn is_import_line(&self, line: &[u8]) -> bool {
        self.import_keywords
            .iter()
            .any(|keyword| line.starts_with(keyword.as_bytes()))
    }
}
