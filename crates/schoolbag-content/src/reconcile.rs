//! Set algebra behind the packing lists.

use schoolbag_core::TagId;
use std::collections::BTreeSet;

/// Work lists produced by comparing the bag against today's requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Required today but not in the bag.
    pub to_insert: BTreeSet<TagId>,

    /// In the bag but not required today.
    pub to_remove: BTreeSet<TagId>,
}

impl Reconciliation {
    /// Nothing to add and nothing to take out.
    pub fn is_settled(&self) -> bool {
        self.to_insert.is_empty() && self.to_remove.is_empty()
    }
}

/// Compare the current content with the target content.
///
/// # Examples
///
/// ```
/// use schoolbag_content::reconcile;
/// use schoolbag_core::TagId;
/// use std::collections::BTreeSet;
///
/// let id = |s: &str| s.parse::<TagId>().unwrap();
/// let target = BTreeSet::from([id("0a"), id("0b")]);
/// let current = BTreeSet::from([id("0b"), id("0c")]);
///
/// let result = reconcile(&current, &target);
/// assert_eq!(result.to_insert, BTreeSet::from([id("0a")]));
/// assert_eq!(result.to_remove, BTreeSet::from([id("0c")]));
/// ```
pub fn reconcile(current: &BTreeSet<TagId>, target: &BTreeSet<TagId>) -> Reconciliation {
    Reconciliation {
        to_insert: target.difference(current).cloned().collect(),
        to_remove: current.difference(target).cloned().collect(),
    }
}

/// Flip membership of `id`. Returns `true` if the tag is now in the set.
pub fn toggle(content: &mut BTreeSet<TagId>, id: &TagId) -> bool {
    if content.remove(id) {
        false
    } else {
        content.insert(id.clone());
        true
    }
}
