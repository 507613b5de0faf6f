#![forbid(unsafe_code)]

use crate::ids::TagId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Link changes that move a document from its current tag set to a target set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TagDelta {
    pub to_add: BTreeSet<TagId>,
    pub to_remove: BTreeSet<TagId>,
}

impl TagDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Minimal add/remove delta. Ids present in both sets are never touched, so an
/// unchanged link is never deleted and re-inserted against the `(document, tag)`
/// uniqueness constraint.
pub fn reconcile_tags(current: &BTreeSet<TagId>, target: &BTreeSet<TagId>) -> TagDelta {
    TagDelta {
        to_add: target.difference(current).copied().collect(),
        to_remove: current.difference(target).copied().collect(),
    }
}
