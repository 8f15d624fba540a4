//! Validation issues and their human-readable rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step in the path to a failing value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => formatter.write_str(key),
            Self::Index(index) => write!(formatter, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered path from the validated root to a failing value.
///
/// An empty path points at the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssuePath(Vec<PathSegment>);

impl IssuePath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// All segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Outermost segment, if any.
    #[must_use]
    pub fn first(&self) -> Option<&PathSegment> {
        self.0.first()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the path for an issue message using the given mode.
    #[must_use]
    pub fn render(&self, mode: IssuePathMode) -> String {
        match mode {
            IssuePathMode::FirstSegment => self.first().map(ToString::to_string).unwrap_or_default(),
            IssuePathMode::FullPath => self.to_string(),
        }
    }
}

impl fmt::Display for IssuePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 {
                formatter.write_str(".")?;
            }
            write!(formatter, "{segment}")?;
        }
        Ok(())
    }
}

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value is missing or has the wrong JSON type.
    InvalidType,
    /// Value is below a length or numeric lower bound.
    TooSmall,
    /// Value is above a length or numeric upper bound.
    TooBig,
    /// String is not one of the allowed variants.
    InvalidEnumValue,
    /// Value does not equal the expected literal.
    InvalidLiteral,
    /// String fails a pattern or format check.
    InvalidString,
    /// Object carries keys its schema does not declare.
    UnrecognizedKeys,
    /// Any other schema keyword failed.
    InvalidValue,
    /// Raised by a refinement.
    Custom,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidLiteral => "invalid_literal",
            Self::InvalidString => "invalid_string",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::InvalidValue => "invalid_value",
            Self::Custom => "custom",
        };
        formatter.write_str(label)
    }
}

/// A single discrepancy between input and schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category.
    pub code: IssueCode,
    /// Location of the failing value.
    pub path: IssuePath,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    /// Create an issue.
    pub fn new(code: IssueCode, path: IssuePath, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
        }
    }

    /// Create a refinement issue at the given path.
    ///
    /// ```
    /// use appkit_validation::{Issue, IssueCode};
    ///
    /// let issue = Issue::custom(["password"], "Too weak");
    /// assert_eq!(issue.code, IssueCode::Custom);
    /// assert_eq!(issue.path.to_string(), "password");
    /// ```
    pub fn custom<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self::new(IssueCode::Custom, IssuePath::from_segments(path), message)
    }
}

/// How much of an issue path is shown in formatted messages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IssuePathMode {
    /// Only the outermost segment (`'address' -> ...`).
    #[default]
    FirstSegment,
    /// Every segment joined with `.` (`'address.street' -> ...`).
    FullPath,
}

impl IssuePathMode {
    /// Stable configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstSegment => "first_segment",
            Self::FullPath => "full_path",
        }
    }
}

impl fmt::Display for IssuePathMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Unknown issue path mode label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue path mode `{0}` (expected first_segment or full_path)")]
pub struct UnknownIssuePathMode(pub String);

impl FromStr for IssuePathMode {
    type Err = UnknownIssuePathMode;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_segment" => Ok(Self::FirstSegment),
            "full_path" => Ok(Self::FullPath),
            _ => Err(UnknownIssuePathMode(input.to_owned())),
        }
    }
}

/// Render issues as `['<field>' -> <message>,...]` using the first path segment.
///
/// Order is preserved and nothing is deduplicated.
///
/// ```
/// use appkit_validation::{Issue, format_issues};
///
/// let issues = [Issue::custom(["name"], "Required")];
/// assert_eq!(format_issues(&issues), "['name' -> Required]");
/// assert_eq!(format_issues(&[]), "[]");
/// ```
#[must_use]
pub fn format_issues(issues: &[Issue]) -> String {
    format_issues_with(issues, IssuePathMode::FirstSegment)
}

/// Render issues using an explicit path mode.
#[must_use]
pub fn format_issues_with(issues: &[Issue], mode: IssuePathMode) -> String {
    let entries: Vec<String> = issues
        .iter()
        .map(|issue| format!("'{}' -> {}", issue.path.render(mode), issue.message))
        .collect();
    format!("[{}]", entries.join(","))
}
