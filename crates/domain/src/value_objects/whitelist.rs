//! Entity predicate data used by whitelists and blacklists.
//!
//! Evaluation against a live entity is the whitelist collaborator's job; the
//! matching rule itself lives here so every adapter agrees on it.

use serde::{Deserialize, Serialize};

use crate::value_objects::PrototypeId;

/// Matches entities by tag or by prototype.
///
/// A list with no criteria matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityWhitelist {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prototypes: Vec<PrototypeId>,
    /// When set, every listed tag must be present instead of any one of them.
    #[serde(default)]
    pub require_all: bool,
}

impl EntityWhitelist {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_prototypes<I>(prototypes: I) -> Self
    where
        I: IntoIterator<Item = PrototypeId>,
    {
        Self {
            prototypes: prototypes.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.prototypes.is_empty()
    }

    /// Whether an entity with the given prototype and tags satisfies this list.
    pub fn matches(&self, prototype: Option<&PrototypeId>, tags: &[String]) -> bool {
        if self.is_empty() {
            return false;
        }

        if let Some(prototype) = prototype {
            if self.prototypes.contains(prototype) {
                return true;
            }
        }

        if self.tags.is_empty() {
            return false;
        }

        if self.require_all {
            self.tags.iter().all(|tag| tags.contains(tag))
        } else {
            self.tags.iter().any(|tag| tags.contains(tag))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_list_matches_nothing() {
        let list = EntityWhitelist::default();
        assert!(!list.matches(None, &tags(&["Anything"])));
    }

    #[test]
    fn any_tag_matches_by_default() {
        let list = EntityWhitelist::with_tags(["Paper", "Food"]);
        assert!(list.matches(None, &tags(&["Food"])));
        assert!(!list.matches(None, &tags(&["Metal"])));
    }

    #[test]
    fn require_all_needs_every_tag() {
        let mut list = EntityWhitelist::with_tags(["Paper", "Flat"]);
        list.require_all = true;
        assert!(!list.matches(None, &tags(&["Paper"])));
        assert!(list.matches(None, &tags(&["Flat", "Paper", "Blue"])));
    }

    #[test]
    fn prototype_match_wins_regardless_of_tags() {
        let crate_id = PrototypeId::new("Crate").expect("valid");
        let list = EntityWhitelist::with_prototypes([crate_id.clone()]);
        assert!(list.matches(Some(&crate_id), &[]));
        let other = PrototypeId::new("Locker").expect("valid");
        assert!(!list.matches(Some(&other), &[]));
    }
}
