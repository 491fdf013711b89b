use std::fmt;

/// Which simulated policy produced a report. A report body cannot indicate
/// this on its own, so collection endpoints advertise a distinguishing
/// hint in their report-uri (`?type=eval`, `?type=inline`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVariant {
    Regular,
    Eval,
    Inline,
}

impl PolicyVariant {
    /// Classify a caller-supplied hint, typically the raw query string of
    /// the submit request. Substring match; `eval` wins over `inline` when
    /// both appear. Every input, including none at all, yields a variant.
    #[must_use]
    pub fn from_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Self::Regular;
        };
        if hint.contains("eval") {
            Self::Eval
        } else if hint.contains("inline") {
            Self::Inline
        } else {
            Self::Regular
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Eval => "eval",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for PolicyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_unmatched_hints_are_regular() {
        assert_eq!(PolicyVariant::from_hint(None), PolicyVariant::Regular);
        assert_eq!(PolicyVariant::from_hint(Some("")), PolicyVariant::Regular);
        assert_eq!(PolicyVariant::from_hint(Some("foo=bar")), PolicyVariant::Regular);
        assert_eq!(PolicyVariant::from_hint(Some("type=unknown")), PolicyVariant::Regular);
    }

    #[test]
    fn markers_select_their_variant() {
        assert_eq!(PolicyVariant::from_hint(Some("type=eval")), PolicyVariant::Eval);
        assert_eq!(PolicyVariant::from_hint(Some("type=inline")), PolicyVariant::Inline);
    }

    #[test]
    fn eval_takes_priority_when_both_markers_appear() {
        assert_eq!(
            PolicyVariant::from_hint(Some("type=inline&also=eval")),
            PolicyVariant::Eval
        );
    }

    #[test]
    fn matching_is_plain_substring_search() {
        // Deliberate: the marker may appear anywhere in the hint.
        assert_eq!(PolicyVariant::from_hint(Some("mode=evaluate")), PolicyVariant::Eval);
        assert_eq!(PolicyVariant::from_hint(Some("x=inlined")), PolicyVariant::Inline);
    }

    #[test]
    fn display_matches_stored_field_values() {
        assert_eq!(PolicyVariant::Regular.to_string(), "regular");
        assert_eq!(PolicyVariant::Eval.to_string(), "eval");
        assert_eq!(PolicyVariant::Inline.to_string(), "inline");
    }
}
