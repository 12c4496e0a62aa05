//! Transforms over `String` values.

use crate::pipeline::Pipeline;
use regex::Regex;

impl Pipeline<String> {
    /// Trims leading and trailing whitespace.
    #[must_use]
    pub fn trim(self) -> Self {
        self.pipe(|s| s.trim().to_string())
    }

    /// Uppercases the string.
    #[must_use]
    pub fn uppercase(self) -> Self {
        self.pipe(|s| s.to_uppercase())
    }

    /// Lowercases the string.
    #[must_use]
    pub fn lowercase(self) -> Self {
        self.pipe(|s| s.to_lowercase())
    }

    /// Splits on a separator.
    #[must_use]
    pub fn split(self, separator: impl Into<String>) -> Pipeline<Vec<String>> {
        let separator = separator.into();
        self.pipe(move |s| s.split(&separator).map(str::to_string).collect())
    }

    /// Replaces every occurrence of a literal substring.
    #[must_use]
    pub fn replace(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        self.pipe(move |s| s.replace(&from, &to))
    }

    /// Replaces every match of a compiled pattern.
    #[must_use]
    pub fn replace_regex(self, pattern: Regex, replacement: impl Into<String>) -> Self {
        let replacement = replacement.into();
        self.pipe(move |s| pattern.replace_all(&s, replacement.as_str()).into_owned())
    }

    /// Splits into lines.
    #[must_use]
    pub fn lines(self) -> Pipeline<Vec<String>> {
        self.pipe(|s| s.lines().map(str::to_string).collect())
    }
}
