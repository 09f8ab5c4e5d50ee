use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Normalized set of skill tokens
///
/// Tokens are lowercased, trimmed and never empty. The set is ordered so that
/// serialized output and joined text are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    /// Parse a free-text skills field (comma or semicolon separated)
    pub fn parse(text: &str) -> Self {
        normalize(Some(text))
    }

    /// Build a set from individual tokens, each normalized like free text
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for token in tokens {
            set.extend(normalize(Some(token.as_ref())).0);
        }
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Join tokens with `sep`; `normalize` of the result yields the same set
    pub fn join(&self, sep: &str) -> String {
        self.iter().collect::<Vec<_>>().join(sep)
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSkills {
            Text(String),
            List(Vec<String>),
        }

        Ok(match Option::<RawSkills>::deserialize(deserializer)? {
            Some(RawSkills::Text(text)) => SkillSet::parse(&text),
            Some(RawSkills::List(tokens)) => SkillSet::from_tokens(tokens),
            None => SkillSet::default(),
        })
    }
}

/// Normalize a free-text skills field into a set of tokens
///
/// Splits on `,` and `;`, trims and lowercases each token and drops empty
/// ones, so runs of delimiters behave like a single separator. Absent or
/// empty input yields the empty set.
pub fn normalize(text: Option<&str>) -> SkillSet {
    let Some(text) = text else {
        return SkillSet::default();
    };

    SkillSet(
        text.split([',', ';'])
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect(),
    )
}

/// Permissive token comparison: equal, or either contains the other
#[inline]
fn tokens_overlap(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

/// Whether any token in `a` overlaps any token in `b`
///
/// Matching is a substring test in either direction, so `code` overlaps
/// `coding` and `first aid` overlaps `aid`. Returns false when either set is
/// empty.
pub fn overlaps(a: &SkillSet, b: &SkillSet) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.iter().any(|left| b.iter().any(|right| tokens_overlap(left, right)))
}

/// Tokens of `a` that overlap at least one token of `b`, in sorted order
pub fn matching_skills(a: &SkillSet, b: &SkillSet) -> Vec<String> {
    a.iter()
        .filter(|left| b.iter().any(|right| tokens_overlap(left, right)))
        .map(str::to_string)
        .collect()
}
