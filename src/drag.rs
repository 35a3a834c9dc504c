use alloc::vec::Vec;

use crate::{DataKey, DropEvent};

/// Drag bookkeeping owned by a single list.
///
/// `key == None` means no drag is in progress. The dragged item is cloned out of the data
/// source when the drag starts, so it survives data mutations that happen mid-drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState<T> {
    pub key: Option<DataKey>,
    pub item: Option<T>,
}

impl<T> Default for DragState<T> {
    fn default() -> Self {
        Self {
            key: None,
            item: None,
        }
    }
}

impl<T> DragState<T> {
    pub fn is_dragging(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_dragging_key(&self, key: &DataKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    pub fn start(&mut self, key: DataKey, item: Option<T>) {
        self.key = Some(key);
        self.item = item;
    }

    /// Ends the drag, handing back the retained item.
    pub fn finish(&mut self) -> Option<T> {
        self.key = None;
        self.item.take()
    }
}

/// Computes the ordering produced by `drop`, starting from a copy of `list`.
///
/// - `old_index == None`: insert `item` at `new_index` (the item came from another list).
/// - `new_index == None`: remove the entry at `old_index` (the item left for another list).
/// - otherwise: remove at `old_index`, insert at `new_index`.
///
/// Insert positions past the end append; removals past the end are skipped. When no item was
/// retained, a reorder reinserts the removed entry. Returns `None` when both indexes are absent.
pub fn reorder<T: Clone>(list: &[T], drop: DropEvent, item: Option<&T>) -> Option<Vec<T>> {
    let mut next = list.to_vec();
    match (drop.old_index, drop.new_index) {
        (None, None) => return None,
        (None, Some(new_index)) => {
            if let Some(item) = item {
                next.insert(new_index.min(next.len()), item.clone());
            } else {
                vwarn!(new_index, "reorder: external insertion without an item");
            }
        }
        (Some(old_index), None) => {
            if old_index < next.len() {
                next.remove(old_index);
            }
        }
        (Some(old_index), Some(new_index)) => {
            let removed = (old_index < next.len()).then(|| next.remove(old_index));
            if let Some(item) = item.cloned().or(removed) {
                next.insert(new_index.min(next.len()), item);
            }
        }
    }
    Some(next)
}
