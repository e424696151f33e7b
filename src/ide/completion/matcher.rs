//! Prefix matching of candidate names against what the user typed.

use smol_str::SmolStr;

/// Matches names against the typed prefix.
///
/// A name matches when it starts with the prefix ignoring case, or when the
/// prefix spells the starts of its camel humps (`fB` matches `fooBar`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMatcher {
    prefix: SmolStr,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<SmolStr>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length of the prefix in characters.
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }

    pub fn prefix_matches(&self, name: &str) -> bool {
        if self.prefix.is_empty() {
            return true;
        }
        starts_with_ignore_case(name, &self.prefix) || matches_humps(name, &self.prefix)
    }
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    let mut name = name.chars();
    prefix.chars().all(|p| name.next().is_some_and(|n| eq_ignore_case(n, p)))
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn matches_humps(name: &str, prefix: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let is_hump_start = |i: usize| {
        i == 0 || chars[i].is_uppercase() || (chars[i - 1] == '_' && chars[i] != '_')
    };

    let mut pos = 0;
    for (n, p) in prefix.chars().enumerate() {
        if pos < chars.len() && eq_ignore_case(chars[pos], p) {
            pos += 1;
            continue;
        }
        // jump to the next hump starting with `p`
        match (pos..chars.len()).find(|&i| is_hump_start(i) && eq_ignore_case(chars[i], p)) {
            Some(i) if n > 0 => pos = i + 1,
            _ => return false,
        }
    }
    true
}
