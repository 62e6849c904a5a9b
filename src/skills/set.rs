//! Small ordered skill sets.
//!
//! Players hold a handful of skills, so a `SmallVec` with inline storage
//! beats a hash set. Insertion order is preserved and duplicates are
//! ignored; aggregation never depends on the order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::skill::Skill;

/// A set of skills in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillSet(SmallVec<[Skill; 4]>);

impl SkillSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill. Returns false if it was already present.
    pub fn insert(&mut self, skill: Skill) -> bool {
        if self.contains(skill) {
            return false;
        }
        self.0.push(skill);
        true
    }

    /// Builder form of `insert`.
    #[must_use]
    pub fn with(mut self, skill: Skill) -> Self {
        self.insert(skill);
        self
    }

    pub fn remove(&mut self, skill: Skill) -> bool {
        match self.0.iter().position(|&held| held == skill) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, skill: Skill) -> bool {
        self.0.contains(&skill)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Skill> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = Skill;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Skill>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
