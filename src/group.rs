//! Grouping of parameter bindings for panel layout.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::binding::ParamBinding;

/// How the rendering layer presents a group of controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDisplayMode {
    /// Controls laid out directly in the panel.
    Inline,
    /// Controls tucked behind a disclosure popover.
    Popover,
}

/// Identifies a [`ParamGroup`] independently of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u64);

impl GroupId {
    fn unique() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);

        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An ordered, named collection of parameter bindings. Purely an aggregation container for
/// layout; equality and hashing go through the generated id, never the contents, so two groups
/// with the same title and parameters are still distinct.
#[derive(Debug)]
pub struct ParamGroup {
    id: GroupId,
    pub title: String,
    pub display_mode: GroupDisplayMode,
    pub params: Vec<ParamBinding>,
}

impl ParamGroup {
    pub fn new(title: impl Into<String>, params: Vec<ParamBinding>) -> Self {
        Self {
            id: GroupId::unique(),
            title: title.into(),
            display_mode: GroupDisplayMode::Inline,
            params,
        }
    }

    pub fn with_display_mode(mut self, display_mode: GroupDisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn id(&self) -> GroupId {
        self.id
    }
}

impl PartialEq for ParamGroup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamGroup {}

impl Hash for ParamGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_by_generated_id() {
        let a = ParamGroup::new("Filter", Vec::new());
        let b = ParamGroup::new("Filter", Vec::new());

        assert_ne!(a, b);
        assert_eq!(a, a);

        let mut set = HashSet::new();
        set.insert(a.id());
        set.insert(b.id());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_mode_defaults_to_inline() {
        let group = ParamGroup::new("Envelope", Vec::new());
        assert_eq!(group.display_mode, GroupDisplayMode::Inline);

        let group = group.with_display_mode(GroupDisplayMode::Popover);
        assert_eq!(group.display_mode, GroupDisplayMode::Popover);
    }
}
