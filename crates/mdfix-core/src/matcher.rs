use crate::error::RuleError;
use regex::Regex;

/// How a rule locates the text it replaces.
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    pub fn literal(search: impl Into<String>) -> Result<Self, RuleError> {
        let search = search.into();
        if search.is_empty() {
            return Err(RuleError::EmptySearch);
        }
        Ok(Matcher::Literal(search))
    }

    pub fn pattern(search: &str) -> Result<Self, RuleError> {
        if search.is_empty() {
            return Err(RuleError::EmptySearch);
        }
        let re = Regex::new(search).map_err(|source| RuleError::InvalidPattern {
            pattern: search.to_string(),
            source,
        })?;
        // An empty match would insert the replacement between every character.
        if re.is_match("") {
            return Err(RuleError::MatchesEmpty {
                pattern: search.to_string(),
            });
        }
        Ok(Matcher::Pattern(re))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Literal(s) => s,
            Matcher::Pattern(re) => re.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Matcher::Pattern(_))
    }

    /// Replaces every non-overlapping occurrence, scanning left to right.
    /// Returns the rewritten text and the number of substitutions.
    ///
    /// Literal replacements are inserted verbatim; pattern replacements may
    /// reference capture groups (`$1`, `${name}`).
    pub fn replace_all(&self, text: &str, replacement: &str) -> (String, usize) {
        match self {
            Matcher::Literal(search) => {
                let count = text.matches(search.as_str()).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (text.replace(search.as_str(), replacement), count)
            }
            Matcher::Pattern(re) => {
                let count = re.find_iter(text).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (re.replace_all(text, replacement).into_owned(), count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_replaces_every_occurrence() {
        let m = Matcher::literal("foo").unwrap();
        let (out, n) = m.replace_all("foo bar foo", "baz");
        assert_eq!(out, "baz bar baz");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_literal_is_not_a_regex() {
        let m = Matcher::literal("|Token|Hex|Usage|").unwrap();
        let (out, n) = m.replace_all("|Token|Hex|Usage|\n|---|", "| Token | Hex | Usage |");
        assert_eq!(out, "| Token | Hex | Usage |\n|---|");
        assert_eq!(n, 1);

        let m = Matcher::literal("a.c").unwrap();
        let (out, n) = m.replace_all("abc", "x");
        assert_eq!(out, "abc");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_literal_replacement_keeps_dollar_signs() {
        let m = Matcher::literal("price").unwrap();
        let (out, _) = m.replace_all("price", "$1.00");
        assert_eq!(out, "$1.00");
    }

    #[test]
    fn test_literal_matches_are_non_overlapping() {
        let m = Matcher::literal("aa").unwrap();
        let (out, n) = m.replace_all("aaaa a", "b");
        assert_eq!(out, "bb a");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_pattern_expands_capture_groups() {
        let m = Matcher::pattern(r"\*\*End of (\w+)\*\*").unwrap();
        let (out, n) = m.replace_all("**End of Report**\n**End of Draft**", "## End of $1");
        assert_eq!(out, "## End of Report\n## End of Draft");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_no_match_leaves_text_alone() {
        let m = Matcher::pattern(r"^#{7}").unwrap();
        let (out, n) = m.replace_all("# Title\n", "x");
        assert_eq!(out, "# Title\n");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_empty_search_rejected() {
        assert!(matches!(Matcher::literal(""), Err(RuleError::EmptySearch)));
        assert!(matches!(Matcher::pattern(""), Err(RuleError::EmptySearch)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Matcher::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_pattern_matching_empty_text_rejected() {
        for pattern in ["x*", "^", "(?m)$", "a?"] {
            let err = Matcher::pattern(pattern).unwrap_err();
            assert!(matches!(err, RuleError::MatchesEmpty { .. }), "{}", pattern);
        }
        assert!(Matcher::pattern("x+").is_ok());
        assert!(Matcher::pattern(r"(?m)^\*\*(End of [^*\r\n]+)\*\*(\r?)$").is_ok());
    }
}
