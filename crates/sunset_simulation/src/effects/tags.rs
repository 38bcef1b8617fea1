//! Gameplay tags (иерархические строки: "Status.Corrupted")

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Цель под статусом Corruption (накладывается boomerang'ом на вылете)
pub const STATUS_CORRUPTED: &str = "Status.Corrupted";
/// Neon тип урона (условие combo)
pub const DAMAGE_TYPE_NEON: &str = "Damage.Type.Neon";
/// SetByCaller ключ базового урона
pub const DATA_DAMAGE: &str = "Data.Damage";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameplayTag(String);

impl GameplayTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// "Status.Corrupted.Heavy" matches "Status.Corrupted" (и сам себя)
    pub fn matches(&self, query: &str) -> bool {
        self.0 == query
            || (self.0.len() > query.len()
                && self.0.starts_with(query)
                && self.0.as_bytes()[query.len()] == b'.')
    }
}

impl From<&str> for GameplayTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Набор тегов (BTreeSet — детерминированный порядок для snapshot'ов)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameplayTagContainer {
    tags: BTreeSet<GameplayTag>,
}

impl GameplayTagContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<GameplayTag>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add(&mut self, tag: impl Into<GameplayTag>) {
        self.tags.insert(tag.into());
    }

    /// Иерархический match (родительский тег тоже считается)
    pub fn has_tag(&self, query: &str) -> bool {
        self.tags.iter().any(|tag| tag.matches(query))
    }

    pub fn has_tag_exact(&self, query: &str) -> bool {
        self.tags.iter().any(|tag| tag.as_str() == query)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameplayTag> {
        self.tags.iter()
    }
}

impl Extend<GameplayTag> for GameplayTagContainer {
    fn extend<I: IntoIterator<Item = GameplayTag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchical_match() {
        let tag = GameplayTag::new("Status.Corrupted.Heavy");

        assert!(tag.matches("Status.Corrupted.Heavy"));
        assert!(tag.matches("Status.Corrupted"));
        assert!(tag.matches("Status"));
        assert!(!tag.matches("Status.Corrupt"));
        assert!(!tag.matches("Status.Corrupted.Heavy.Extra"));
    }

    #[test]
    fn test_container_queries() {
        let container = GameplayTagContainer::from_tags(["Damage.Type.Neon", "Ability.Boomerang"]);

        assert!(container.has_tag(DAMAGE_TYPE_NEON));
        assert!(container.has_tag("Damage.Type"));
        assert!(!container.has_tag_exact("Damage.Type"));
        assert!(!container.has_tag(STATUS_CORRUPTED));
        assert_eq!(container.len(), 2);
    }
}
