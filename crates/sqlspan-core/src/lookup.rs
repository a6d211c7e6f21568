//! Field lookups as named by the ORM filter syntax (`field__contains=...`).

use std::fmt;

/// A filter lookup.
///
/// Parsing never fails: names the layer has no special handling for are
/// kept as [`LookupKind::Other`] and passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// `exact`
    Exact,
    /// `iexact`
    IExact,
    /// `contains`
    Contains,
    /// `icontains`
    IContains,
    /// `startswith`
    StartsWith,
    /// `istartswith`
    IStartsWith,
    /// `endswith`
    EndsWith,
    /// `iendswith`
    IEndsWith,
    /// `regex`
    Regex,
    /// `iregex`
    IRegex,
    /// Any other lookup (`gt`, `in`, `isnull`, ...).
    Other(String),
}

impl LookupKind {
    /// Returns the lookup name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact => "exact",
            Self::IExact => "iexact",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::StartsWith => "startswith",
            Self::IStartsWith => "istartswith",
            Self::EndsWith => "endswith",
            Self::IEndsWith => "iendswith",
            Self::Regex => "regex",
            Self::IRegex => "iregex",
            Self::Other(name) => name,
        }
    }

    /// Returns true for lookups that match text patterns.
    ///
    /// `exact`/`iexact` compare whole values and are not included.
    #[must_use]
    pub const fn is_text_pattern(&self) -> bool {
        matches!(
            self,
            Self::Contains
                | Self::IContains
                | Self::StartsWith
                | Self::IStartsWith
                | Self::EndsWith
                | Self::IEndsWith
                | Self::Regex
                | Self::IRegex
        )
    }

    /// Returns true for the case-insensitive variants.
    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        matches!(
            self,
            Self::IExact | Self::IContains | Self::IStartsWith | Self::IEndsWith | Self::IRegex
        )
    }
}

impl From<&str> for LookupKind {
    fn from(name: &str) -> Self {
        match name {
            "exact" => Self::Exact,
            "iexact" => Self::IExact,
            "contains" => Self::Contains,
            "icontains" => Self::IContains,
            "startswith" => Self::StartsWith,
            "istartswith" => Self::IStartsWith,
            "endswith" => Self::EndsWith,
            "iendswith" => Self::IEndsWith,
            "regex" => Self::Regex,
            "iregex" => Self::IRegex,
            other => Self::Other(String::from(other)),
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_lookups() {
        assert_eq!(LookupKind::from("icontains"), LookupKind::IContains);
        assert_eq!(LookupKind::from("regex"), LookupKind::Regex);
        assert_eq!(LookupKind::from("exact").to_string(), "exact");
    }

    #[test]
    fn test_unknown_lookup_passes_through() {
        let lookup = LookupKind::from("gte");
        assert_eq!(lookup, LookupKind::Other(String::from("gte")));
        assert_eq!(lookup.as_str(), "gte");
        assert!(!lookup.is_text_pattern());
    }

    #[test]
    fn test_text_pattern_set() {
        let patterns = [
            "contains",
            "icontains",
            "startswith",
            "istartswith",
            "endswith",
            "iendswith",
            "regex",
            "iregex",
        ];
        for name in patterns {
            assert!(LookupKind::from(name).is_text_pattern(), "{name}");
        }
        assert!(!LookupKind::Exact.is_text_pattern());
        assert!(!LookupKind::IExact.is_text_pattern());
        assert!(LookupKind::IExact.is_case_insensitive());
        assert!(!LookupKind::Contains.is_case_insensitive());
    }
}
