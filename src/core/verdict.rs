//! Closed verdict vocabulary attached to tests, reviews and products.
//!
//! Verdicts arrive as free text from the ingestion pipeline (`"pass"`,
//! `"Not Assigned"`, `"neutral"`, ...). Parsing is case-insensitive and
//! total: unknown text is preserved as [`Verdict::Other`] and empty text is
//! treated as "no verdict" by [`optional`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Outcome of a single test, review aspect, or product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Pass,
    Fail,
    /// `"not assigned"` / `"not_assigned"`
    NotAssigned,
    /// Offered separately from `NotAssigned` by subjective review facets.
    Neutral,
    Pending,
    /// Any other non-empty verdict text, kept verbatim (lowercased).
    Other(String),
}

impl Verdict {
    /// Parse verdict text. Returns `None` for empty or whitespace-only text.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Some(match normalized.as_str() {
            "pass" => Verdict::Pass,
            "fail" => Verdict::Fail,
            "not assigned" | "not_assigned" => Verdict::NotAssigned,
            "neutral" => Verdict::Neutral,
            "pending" => Verdict::Pending,
            _ => Verdict::Other(normalized),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::NotAssigned => "not assigned",
            Verdict::Neutral => "neutral",
            Verdict::Pending => "pending",
            Verdict::Other(text) => text.as_str(),
        }
    }

    /// Label shown next to a facet checkbox.
    pub fn display_name(&self) -> &str {
        match self {
            Verdict::NotAssigned => "No Result",
            other => other.as_str(),
        }
    }
}

impl From<String> for Verdict {
    fn from(text: String) -> Self {
        Verdict::parse(&text).unwrap_or(Verdict::Other(String::new()))
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.as_str().to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::parse(s).ok_or_else(|| "verdict must not be empty".to_string())
    }
}

/// Deserialize an optional verdict, mapping `null`, empty strings and
/// non-string values to `None`.
pub(crate) fn optional<'de, D>(deserializer: D) -> Result<Option<Verdict>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Verdict::parse(&text),
        _ => None,
    })
}

/// Summary of a whole results section, derived by dominance:
/// `Fail` over `Pass` over everything else (`Mixed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateVerdict {
    Pass,
    Fail,
    Mixed,
}

impl AggregateVerdict {
    /// Fold child verdicts. `None` when there are no verdicts at all.
    pub fn from_verdicts<'a, I>(verdicts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Verdict>,
    {
        let mut seen_any = false;
        let mut has_pass = false;
        for verdict in verdicts {
            seen_any = true;
            match verdict {
                Verdict::Fail => return Some(AggregateVerdict::Fail),
                Verdict::Pass => has_pass = true,
                _ => {}
            }
        }

        match (seen_any, has_pass) {
            (false, _) => None,
            (true, true) => Some(AggregateVerdict::Pass),
            (true, false) => Some(AggregateVerdict::Mixed),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateVerdict::Pass => "pass",
            AggregateVerdict::Fail => "fail",
            AggregateVerdict::Mixed => "mixed",
        }
    }
}

impl fmt::Display for AggregateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AggregateVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" => Ok(AggregateVerdict::Pass),
            "fail" => Ok(AggregateVerdict::Fail),
            "mixed" => Ok(AggregateVerdict::Mixed),
            other => Err(format!("unknown aggregate verdict: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Verdict::parse("PASS"), Some(Verdict::Pass));
        assert_eq!(Verdict::parse(" Fail "), Some(Verdict::Fail));
        assert_eq!(Verdict::parse("Not Assigned"), Some(Verdict::NotAssigned));
        assert_eq!(Verdict::parse("not_assigned"), Some(Verdict::NotAssigned));
        assert_eq!(Verdict::parse("neutral"), Some(Verdict::Neutral));
        assert_eq!(Verdict::parse("pending"), Some(Verdict::Pending));
    }

    #[test]
    fn test_parse_empty_is_absent() {
        assert_eq!(Verdict::parse(""), None);
        assert_eq!(Verdict::parse("   "), None);
    }

    #[test]
    fn test_unknown_text_preserved() {
        assert_eq!(
            Verdict::parse("Borderline"),
            Some(Verdict::Other("borderline".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_canonical_text() {
        let json = serde_json::to_string(&Verdict::NotAssigned).unwrap();
        assert_eq!(json, "\"not assigned\"");
        let back: Verdict = serde_json::from_str("\"NOT_ASSIGNED\"").unwrap();
        assert_eq!(back, Verdict::NotAssigned);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Verdict::NotAssigned.display_name(), "No Result");
        assert_eq!(Verdict::Pass.display_name(), "pass");
    }

    #[test]
    fn test_aggregate_fail_dominates() {
        let verdicts = [Verdict::Pass, Verdict::Fail, Verdict::Pass];
        assert_eq!(
            AggregateVerdict::from_verdicts(&verdicts),
            Some(AggregateVerdict::Fail)
        );
    }

    #[test]
    fn test_aggregate_pass_over_neutral() {
        let verdicts = [Verdict::Neutral, Verdict::Pass];
        assert_eq!(
            AggregateVerdict::from_verdicts(&verdicts),
            Some(AggregateVerdict::Pass)
        );
    }

    #[test]
    fn test_aggregate_mixed_and_empty() {
        assert_eq!(
            AggregateVerdict::from_verdicts(&[Verdict::NotAssigned]),
            Some(AggregateVerdict::Mixed)
        );
        assert_eq!(
            AggregateVerdict::from_verdicts(Vec::<Verdict>::new().iter()),
            None
        );
    }

    #[test]
    fn test_aggregate_from_str() {
        assert_eq!(
            "Mixed".parse::<AggregateVerdict>(),
            Ok(AggregateVerdict::Mixed)
        );
        assert!("unknown".parse::<AggregateVerdict>().is_err());
    }
}
