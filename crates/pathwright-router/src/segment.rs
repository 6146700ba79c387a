//! Segment classification and path splitting.
//!
//! A pattern such as `/users/$id:d/@[a-z]+@slug/...` is split into segments
//! and each segment is classified by its leading sigil:
//!
//! | Text          | Segment                                   |
//! |---------------|-------------------------------------------|
//! | `users`       | [`Segment::Literal`]                      |
//! | `$id:d`       | [`Segment::Variable`] with a digit check  |
//! | `@[a-z]+@slug`| [`Segment::Regex`] captured as `slug`     |
//! | `...`         | [`Segment::Wildcard`]                     |
//!
//! Both `/` and `.` separate segments, so `/feed.xml` is the two segments
//! `feed` and `xml`.

use regex::Regex;
use smallvec::SmallVec;

use crate::error::{BuildError, BuildResult};

/// Sigil marking a variable segment.
pub const VARIABLE_SIGIL: char = '$';

/// Sigil marking a regex segment (and separating its capture name).
pub const REGEX_SIGIL: char = '@';

/// Token matching every remaining segment.
pub const WILDCARD: &str = "...";

/// Character class a variable segment must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeConstraint {
    /// `A`: ASCII letters and digits.
    Alphanumeric,
    /// `a`: ASCII letters.
    Alphabetic,
    /// `d`: ASCII digits.
    Digit,
    /// `l`: ASCII lowercase letters.
    Lowercase,
    /// `u`: ASCII uppercase letters.
    Uppercase,
}

impl TypeConstraint {
    /// Maps a one-letter type code to a constraint.
    ///
    /// Unknown codes yield `None`, meaning the variable is unconstrained.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Self::Alphanumeric),
            'a' => Some(Self::Alphabetic),
            'd' => Some(Self::Digit),
            'l' => Some(Self::Lowercase),
            'u' => Some(Self::Uppercase),
            _ => None,
        }
    }

    /// Returns the one-letter code for this constraint.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Alphanumeric => 'A',
            Self::Alphabetic => 'a',
            Self::Digit => 'd',
            Self::Lowercase => 'l',
            Self::Uppercase => 'u',
        }
    }

    /// Checks every character of `value` against the class.
    ///
    /// An empty value never satisfies a constraint.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let check: fn(&u8) -> bool = match self {
            Self::Alphanumeric => u8::is_ascii_alphanumeric,
            Self::Alphabetic => u8::is_ascii_alphabetic,
            Self::Digit => u8::is_ascii_digit,
            Self::Lowercase => u8::is_ascii_lowercase,
            Self::Uppercase => u8::is_ascii_uppercase,
        };
        !value.is_empty() && value.as_bytes().iter().all(check)
    }
}

/// One classified pattern segment.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact text.
    Literal(String),

    /// `$name` or `$name:code`.
    Variable {
        /// Full key without the sigil (`id:d`); unique among siblings.
        key: String,
        /// Binding name (`id`).
        name: String,
        /// Optional character class.
        constraint: Option<TypeConstraint>,
    },

    /// `@pattern` or `@pattern@capture`.
    Regex {
        /// Full key without the sigil (`[0-9]+@page`); unique among siblings.
        key: String,
        /// Compiled, fully anchored expression.
        regex: Regex,
        /// Name to bind the whole match under.
        capture: Option<String>,
    },

    /// `...`, the rest of the path.
    Wildcard,
}

impl Segment {
    /// Classifies a single segment.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a regex segment does not compile or a
    /// variable segment has no name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathwright_router::{Segment, TypeConstraint};
    ///
    /// let segment = Segment::classify("$id:d").unwrap();
    /// assert!(matches!(
    ///     segment,
    ///     Segment::Variable { ref name, constraint: Some(TypeConstraint::Digit), .. } if name == "id"
    /// ));
    /// ```
    pub fn classify(text: &str) -> BuildResult<Self> {
        Self::parse(text, text)
    }

    /// Classifies `text`, reporting errors against the whole `pattern`.
    pub(crate) fn parse(text: &str, pattern: &str) -> BuildResult<Self> {
        if text == WILDCARD {
            return Ok(Self::Wildcard);
        }

        if let Some(key) = text.strip_prefix(VARIABLE_SIGIL) {
            let (name, constraint) = match key.split_once(':') {
                Some((name, code)) => {
                    (name, code.chars().next().and_then(TypeConstraint::from_code))
                }
                None => (key, None),
            };
            if name.is_empty() {
                return Err(BuildError::EmptyVariable {
                    pattern: pattern.to_string(),
                });
            }
            return Ok(Self::Variable {
                key: key.to_string(),
                name: name.to_string(),
                constraint,
            });
        }

        if let Some(key) = text.strip_prefix(REGEX_SIGIL) {
            let (expr, capture) = match find_capture_separator(key) {
                Some(pos) => (&key[..pos], Some(&key[pos + 1..])),
                None => (key, None),
            };
            let regex = Regex::new(&format!("^(?:{expr})$")).map_err(|source| {
                BuildError::InvalidRegex {
                    pattern: pattern.to_string(),
                    segment: key.to_string(),
                    source,
                }
            })?;
            return Ok(Self::Regex {
                key: key.to_string(),
                regex,
                capture: capture.filter(|c| !c.is_empty()).map(str::to_string),
            });
        }

        Ok(Self::Literal(text.to_string()))
    }

    /// Key under which this segment is stored among its siblings.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Variable { key, .. } | Self::Regex { key, .. } => key,
            Self::Wildcard => WILDCARD,
        }
    }
}

/// Position of the first `@` not preceded by a backslash.
fn find_capture_separator(key: &str) -> Option<usize> {
    key.char_indices()
        .find(|&(i, c)| c == REGEX_SIGIL && !key[..i].ends_with('\\'))
        .map(|(i, _)| i)
}

/// One segment of a request path, with its position in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment<'a> {
    /// Segment text.
    pub text: &'a str,
    /// Byte offset of the segment in the path it was split from.
    pub start: usize,
}

impl PathSegment<'_> {
    /// Byte offset just past the segment.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Splits a request path on `/` and `.`, skipping empty segments.
///
/// # Example
///
/// ```rust
/// use pathwright_router::split_path;
///
/// let segments = split_path("/feeds/main.xml/");
/// let texts: Vec<_> = segments.iter().map(|s| s.text).collect();
/// assert_eq!(texts, ["feeds", "main", "xml"]);
/// assert_eq!(segments[1].start, 7);
/// ```
#[must_use]
pub fn split_path(path: &str) -> SmallVec<[PathSegment<'_>; 8]> {
    let mut segments = SmallVec::new();
    let mut start = 0;

    for (i, byte) in path.bytes().enumerate() {
        if byte == b'/' || byte == b'.' {
            if i > start {
                segments.push(PathSegment {
                    text: &path[start..i],
                    start,
                });
            }
            start = i + 1;
        }
    }
    if path.len() > start {
        segments.push(PathSegment {
            text: &path[start..],
            start,
        });
    }

    segments
}

/// Splits a route pattern into segment texts.
///
/// Same rules as [`split_path`], except that a `...` piece is kept whole and
/// the expression of a `@` regex piece is never split on `.`. Dots after the
/// capture name still separate segments, so `@[0-9]+@id.json` is the regex
/// `[0-9]+@id` followed by the literal `json`.
pub(crate) fn split_pattern(pattern: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for piece in pattern.split('/').filter(|p| !p.is_empty()) {
        if piece == WILDCARD {
            segments.push(piece);
        } else {
            split_piece(piece, &mut segments);
        }
    }
    segments
}

/// Splits one `/`-delimited piece of a pattern on `.`.
fn split_piece<'p>(piece: &'p str, segments: &mut Vec<&'p str>) {
    let Some(key) = piece.strip_prefix(REGEX_SIGIL) else {
        let (head, tail) = piece.split_once('.').unwrap_or((piece, ""));
        if !head.is_empty() {
            segments.push(head);
        }
        if !tail.is_empty() {
            split_piece(tail, segments);
        }
        return;
    };

    let Some(separator) = find_capture_separator(key) else {
        segments.push(piece);
        return;
    };
    // Offset of the capture name within `piece`.
    let name_start = REGEX_SIGIL.len_utf8() + separator + 1;
    match piece[name_start..].find('.') {
        Some(dot) => {
            segments.push(&piece[..name_start + dot]);
            split_piece(&piece[name_start + dot + 1..], segments);
        }
        None => segments.push(piece),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literal() {
        let segment = Segment::classify("users").unwrap();
        assert!(matches!(segment, Segment::Literal(ref t) if t == "users"));
        assert_eq!(segment.key(), "users");
    }

    #[test]
    fn test_classify_variable_plain() {
        let segment = Segment::classify("$id").unwrap();
        match segment {
            Segment::Variable { key, name, constraint } => {
                assert_eq!(key, "id");
                assert_eq!(name, "id");
                assert_eq!(constraint, None);
            }
            other => panic!("unexpected segment: {other:?}"),
        }
    }

    #[test]
    fn test_classify_variable_typed() {
        let segment = Segment::classify("$id:d").unwrap();
        match segment {
            Segment::Variable { key, name, constraint } => {
                assert_eq!(key, "id:d");
                assert_eq!(name, "id");
                assert_eq!(constraint, Some(TypeConstraint::Digit));
            }
            other => panic!("unexpected segment: {other:?}"),
        }
    }

    #[test]
    fn test_classify_variable_unknown_code_is_unconstrained() {
        let segment = Segment::classify("$slug:x").unwrap();
        assert!(matches!(
            segment,
            Segment::Variable { ref name, constraint: None, .. } if name == "slug"
        ));
    }

    #[test]
    fn test_classify_variable_without_name() {
        assert!(matches!(
            Segment::classify("$"),
            Err(BuildError::EmptyVariable { .. })
        ));
        assert!(matches!(
            Segment::classify("$:d"),
            Err(BuildError::EmptyVariable { .. })
        ));
    }

    #[test]
    fn test_classify_regex_anchored() {
        let Segment::Regex { regex, capture, key } = Segment::classify("@[0-9]+").unwrap() else {
            panic!("expected regex segment");
        };
        assert_eq!(key, "[0-9]+");
        assert_eq!(capture, None);
        assert!(regex.is_match("12"));
        assert!(!regex.is_match("12a"));
        assert!(!regex.is_match("a12"));
    }

    #[test]
    fn test_classify_regex_alternation_is_anchored_as_a_whole() {
        let Segment::Regex { regex, .. } = Segment::classify("@ab|cd").unwrap() else {
            panic!("expected regex segment");
        };
        assert!(regex.is_match("ab"));
        assert!(!regex.is_match("abx"));
        assert!(!regex.is_match("xcd"));
    }

    #[test]
    fn test_classify_regex_named_capture() {
        let Segment::Regex { capture, key, regex } = Segment::classify("@[0-9]+@page").unwrap()
        else {
            panic!("expected regex segment");
        };
        assert_eq!(key, "[0-9]+@page");
        assert_eq!(capture.as_deref(), Some("page"));
        assert!(regex.is_match("42"));
    }

    #[test]
    fn test_classify_regex_trailing_separator_is_unnamed() {
        let Segment::Regex { capture, regex, .. } = Segment::classify("@[0-9]+@").unwrap() else {
            panic!("expected regex segment");
        };
        assert_eq!(capture, None);
        assert!(regex.is_match("12"));
        assert!(!regex.is_match("12a"));
    }

    #[test]
    fn test_classify_regex_escaped_separator() {
        let Segment::Regex { capture, regex, .. } = Segment::classify(r"@a\@b").unwrap() else {
            panic!("expected regex segment");
        };
        assert_eq!(capture, None);
        assert!(regex.is_match("a@b"));
    }

    #[test]
    fn test_classify_regex_invalid() {
        assert!(matches!(
            Segment::classify("@[0-9"),
            Err(BuildError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_classify_wildcard() {
        assert!(matches!(Segment::classify("...").unwrap(), Segment::Wildcard));
    }

    #[test]
    fn test_type_constraints() {
        assert!(TypeConstraint::Digit.accepts("42"));
        assert!(!TypeConstraint::Digit.accepts("4a"));
        assert!(TypeConstraint::Alphabetic.accepts("abc"));
        assert!(!TypeConstraint::Alphabetic.accepts("ab1"));
        assert!(TypeConstraint::Alphanumeric.accepts("ab1"));
        assert!(!TypeConstraint::Alphanumeric.accepts("ab-1"));
        assert!(TypeConstraint::Lowercase.accepts("abc"));
        assert!(!TypeConstraint::Lowercase.accepts("aBc"));
        assert!(TypeConstraint::Uppercase.accepts("ABC"));
        assert!(!TypeConstraint::Uppercase.accepts("ABc"));
        assert!(!TypeConstraint::Digit.accepts(""));
    }

    #[test]
    fn test_type_constraint_codes_round_trip() {
        for code in ['A', 'a', 'd', 'l', 'u'] {
            assert_eq!(TypeConstraint::from_code(code).unwrap().code(), code);
        }
        assert_eq!(TypeConstraint::from_code('z'), None);
    }

    #[test]
    fn test_split_path_offsets() {
        let path = "/files/a/b.txt";
        let segments = split_path(path);
        let texts: Vec<_> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, ["files", "a", "b", "txt"]);
        assert_eq!(&path[segments[1].start..segments[3].end()], "a/b.txt");
    }

    #[test]
    fn test_split_path_skips_empty_segments() {
        let texts: Vec<_> = split_path("//a//b/").iter().map(|s| s.text).collect();
        assert_eq!(texts, ["a", "b"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_split_pattern_keeps_wildcard_and_regex() {
        assert_eq!(split_pattern("/files/..."), ["files", "..."]);
        assert_eq!(split_pattern("/v/@.+@ver"), ["v", "@.+@ver"]);
        assert_eq!(split_pattern("/feed.xml"), ["feed", "xml"]);
        assert!(split_pattern("/").is_empty());
    }

    #[test]
    fn test_split_pattern_dots_after_capture_name() {
        assert_eq!(
            split_pattern("/posts/@[0-9]+@id.json"),
            ["posts", "@[0-9]+@id", "json"]
        );
        assert_eq!(split_pattern("/@a.b@x.y.z"), ["@a.b@x", "y", "z"]);
        assert_eq!(split_pattern("/@v[0-9.]+"), ["@v[0-9.]+"]);
        assert_eq!(split_pattern("/@[a-z]+@.txt"), ["@[a-z]+@", "txt"]);
        assert_eq!(
            split_pattern("/@[0-9]+@major.@[0-9.]+@minor.txt"),
            ["@[0-9]+@major", "@[0-9.]+@minor", "txt"]
        );
        assert_eq!(split_pattern("/a..b.$id"), ["a", "b", "$id"]);
        assert_eq!(split_pattern("/a..../x"), ["a", "x"]);
    }
}
