//! Package-name rewriting applied to template files during extraction.

use std::path::Path;

use heck::ToShoutySnakeCase;

use crate::config::TemplateConfig;

/// One literal token and what it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Bytes searched for.
    pub token: Vec<u8>,
    /// Bytes written in place of every occurrence.
    pub replacement: Vec<u8>,
}

impl Replacement {
    /// Creates a replacement pair.
    #[must_use]
    pub fn new(token: impl Into<Vec<u8>>, replacement: impl Into<Vec<u8>>) -> Self {
        Self {
            token: token.into(),
            replacement: replacement.into(),
        }
    }
}

/// Decides which files are rewritten and how.
///
/// The rule is a plain value: an extension allow-list and an ordered list of
/// literal replacements. Each replacement runs over the output of the
/// previous one, so a longer token listed first (the module path) wins over
/// a shorter one it contains (the bare name).
///
/// # Examples
///
/// ```
/// use starter_core::Interceptor;
/// use starter_core::config::TemplateConfig;
///
/// let interceptor = Interceptor::for_package(&TemplateConfig::default(), "my-app");
///
/// assert!(interceptor.matches("cmd/main.go"));
/// assert!(!interceptor.matches("logo.png"));
///
/// let out = interceptor.intercept(b"module github.com/bingoohuang/gostarter // GOSTARTER_PORT");
/// assert_eq!(out, b"module my-app // MY_APP_PORT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interceptor {
    extensions: Vec<String>,
    replacements: Vec<Replacement>,
}

impl Interceptor {
    /// Creates an interceptor from explicit parts.
    ///
    /// Extensions are given without the leading dot; a leading dot is
    /// tolerated and stripped.
    #[must_use]
    pub fn new<I, S>(extensions: I, replacements: Vec<Replacement>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            extensions,
            replacements,
        }
    }

    /// Builds the rule that turns `template` into package `package_name`.
    ///
    /// Order: module path, bare name, then the upper-case token which becomes
    /// the SHOUTY_SNAKE_CASE form of the package name.
    #[must_use]
    pub fn for_package(template: &TemplateConfig, package_name: &str) -> Self {
        let replacements = vec![
            Replacement::new(template.module_path.as_bytes(), package_name.as_bytes()),
            Replacement::new(template.name_token.as_bytes(), package_name.as_bytes()),
            Replacement::new(
                template.upper_token.as_bytes(),
                package_name.to_shouty_snake_case().into_bytes(),
            ),
        ];
        Self::new(&template.extensions, replacements)
    }

    /// Returns the configured extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns `true` if the file's content should be rewritten.
    ///
    /// Only the final extension is considered, compared case-insensitively.
    pub fn matches(&self, filename: impl AsRef<Path>) -> bool {
        filename
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Applies every replacement in order and returns the rewritten bytes.
    #[must_use]
    pub fn intercept(&self, src: &[u8]) -> Vec<u8> {
        let mut buf = src.to_vec();
        for rule in &self.replacements {
            buf = replace_all(&buf, &rule.token, &rule.replacement);
        }
        buf
    }
}

/// Replaces every non-overlapping occurrence of `token`, scanning left to
/// right. An empty token leaves the input unchanged.
#[must_use]
pub fn replace_all(haystack: &[u8], token: &[u8], replacement: &[u8]) -> Vec<u8> {
    if token.is_empty() || haystack.len() < token.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut pos = 0;
    while let Some(offset) = find(&haystack[pos..], token) {
        out.extend_from_slice(&haystack[pos..pos + offset]);
        out.extend_from_slice(replacement);
        pos += offset + token.len();
    }
    out.extend_from_slice(&haystack[pos..]);
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
