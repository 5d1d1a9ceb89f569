//! Admission competitiveness categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const REACH_KEYWORDS: &[&str] = &["reach", "stretch", "ambitious"];
const SAFETY_KEYWORDS: &[&str] = &["safety", "safe", "backup"];

/// How competitive a program is relative to the candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reach,
    #[default]
    Target,
    Safety,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Reach, Category::Target, Category::Safety];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reach => "reach",
            Category::Target => "target",
            Category::Safety => "safety",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Never fails: unrecognized text is a target.
impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(normalize_category(s))
    }
}

/// Map free text onto a category by keyword. Reach keywords are checked
/// before safety keywords; anything else is `Target`.
pub fn normalize_category(raw: &str) -> Category {
    let lowered = raw.to_lowercase();

    if REACH_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Category::Reach
    } else if SAFETY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Category::Safety
    } else {
        Category::Target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keyword_matching() {
        assert_eq!(normalize_category("Reach"), Category::Reach);
        assert_eq!(normalize_category("a stretch school"), Category::Reach);
        assert_eq!(normalize_category("AMBITIOUS"), Category::Reach);
        assert_eq!(normalize_category("safety"), Category::Safety);
        assert_eq!(normalize_category("Safe bet"), Category::Safety);
        assert_eq!(normalize_category("backup option"), Category::Safety);
        assert_eq!(normalize_category("target"), Category::Target);
        assert_eq!(normalize_category("match"), Category::Target);
        assert_eq!(normalize_category(""), Category::Target);
    }

    #[test]
    fn test_reach_wins_over_safety() {
        assert_eq!(normalize_category("reach, not a safety"), Category::Reach);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Safety).unwrap(), "\"safety\"");
        assert_eq!("Backup".parse::<Category>().unwrap(), Category::Safety);
    }

    #[test]
    fn test_default_is_target() {
        assert_eq!(Category::default(), Category::Target);
    }

    proptest! {
        #[test]
        fn normalizing_twice_is_stable(raw in ".*") {
            let once = normalize_category(&raw);
            prop_assert_eq!(normalize_category(once.as_str()), once);
        }
    }
}
