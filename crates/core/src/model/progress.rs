use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::ItemId;
use crate::model::status::Status;

/// Status per item id.
///
/// A missing key means `Status::Unlearned`. Updates go through [`ProgressMap::with_status`],
/// which returns a new map and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<ItemId, Status>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of `id`, defaulting to `Unlearned`.
    #[must_use]
    pub fn status(&self, id: &ItemId) -> Status {
        self.0.get(id).copied().unwrap_or_default()
    }

    /// Explicitly recorded status, if any.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<Status> {
        self.0.get(id).copied()
    }

    /// Copy of this map with `id` bound to `status`.
    ///
    /// Binding `Unlearned` still records the key.
    #[must_use]
    pub fn with_status(&self, id: &ItemId, status: Status) -> Self {
        let mut next = self.0.clone();
        next.insert(id.clone(), status);
        Self(next)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.0.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, Status)> {
        self.0.iter().map(|(id, status)| (id, *status))
    }
}

impl FromIterator<(ItemId, Status)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (ItemId, Status)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
