//! Compiled per-search line matchers.

use crate::error::Result;
use crate::options::NormalizedOptions;
use regex::RegexBuilder;

/// A single-line match function, compiled once per search (file or
/// directory) and reused across every line.
#[derive(Debug)]
pub enum LineMatcher {
    Regex(regex::Regex),
    Literal {
        needle: String,
        case_sensitive: bool,
    },
}

impl LineMatcher {
    /// Build a matcher for `pattern`. In regex mode an invalid pattern
    /// surfaces immediately as [`crate::TrawlError::Pattern`]; literal mode
    /// cannot fail.
    pub fn new(pattern: &str, opts: &NormalizedOptions) -> Result<Self> {
        if opts.use_regex {
            let mut builder = RegexBuilder::new(pattern);
            for flag in opts.regex_flags.chars() {
                match flag {
                    'i' => builder.case_insensitive(true),
                    'm' => builder.multi_line(true),
                    's' => builder.dot_matches_new_line(true),
                    'x' => builder.ignore_whitespace(true),
                    'U' => builder.swap_greed(true),
                    // Unknown flag characters are ignored, same as absent
                    // option fields in the normalizer.
                    _ => continue,
                };
            }
            Ok(LineMatcher::Regex(builder.build()?))
        } else {
            let needle = if opts.case_sensitive {
                pattern.to_string()
            } else {
                pattern.to_lowercase()
            };
            Ok(LineMatcher::Literal {
                needle,
                case_sensitive: opts.case_sensitive,
            })
        }
    }

    /// Byte offset of the first hit on `line`, or `None`.
    pub fn find(&self, line: &str) -> Option<usize> {
        match self {
            LineMatcher::Regex(re) => re.find(line).map(|m| m.start()),
            LineMatcher::Literal {
                needle,
                case_sensitive,
            } => {
                if *case_sensitive {
                    line.find(needle.as_str())
                } else {
                    line.to_lowercase().find(needle.as_str())
                }
            }
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            LineMatcher::Regex(re) => re.is_match(line),
            _ => self.find(line).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SearchOptions;

    fn normalized(partial: SearchOptions) -> crate::options::NormalizedOptions {
        partial.normalize()
    }

    #[test]
    fn literal_is_case_insensitive_by_default() {
        let opts = normalized(SearchOptions::default());
        let m = LineMatcher::new("apple", &opts).unwrap();
        assert_eq!(m.find("Apple pie"), Some(0));
        assert_eq!(m.find("an APPLE"), Some(3));
        assert_eq!(m.find("grape"), None);
    }

    #[test]
    fn literal_case_sensitive_matches_exactly() {
        let opts = normalized(SearchOptions {
            case_sensitive: Some(true),
            ..Default::default()
        });
        let m = LineMatcher::new("apple", &opts).unwrap();
        assert_eq!(m.find("apple"), Some(0));
        assert_eq!(m.find("Apple"), None);
    }

    #[test]
    fn regex_reports_first_match_offset() {
        let opts = normalized(SearchOptions {
            use_regex: Some(true),
            case_sensitive: Some(true),
            ..Default::default()
        });
        let m = LineMatcher::new(r"\d+", &opts).unwrap();
        assert_eq!(m.find("abc 123 456"), Some(4));
        assert_eq!(m.find("no digits"), None);
    }

    #[test]
    fn regex_default_flags_fold_case() {
        let opts = normalized(SearchOptions {
            use_regex: Some(true),
            ..Default::default()
        });
        let m = LineMatcher::new("hello", &opts).unwrap();
        assert!(m.is_match("HELLO world"));
    }

    #[test]
    fn invalid_regex_fails_at_build_time() {
        let opts = normalized(SearchOptions {
            use_regex: Some(true),
            ..Default::default()
        });
        let err = LineMatcher::new("[unclosed", &opts);
        assert!(matches!(err, Err(crate::TrawlError::Pattern(_))));
    }

    #[test]
    fn unknown_flag_characters_are_ignored() {
        let opts = normalized(SearchOptions {
            use_regex: Some(true),
            regex_flags: Some("iz9".into()),
            ..Default::default()
        });
        let m = LineMatcher::new("abc", &opts).unwrap();
        assert!(m.is_match("ABC"));
    }
}
