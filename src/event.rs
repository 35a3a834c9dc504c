use alloc::vec::Vec;

use crate::{DataKey, Range};

/// Notifications emitted by [`crate::ListController`] to its host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListEvent<T> {
    /// The viewport reached its top edge (throttled). Load older items here.
    ReachedTop,
    /// The viewport reached its bottom edge (throttled). Load newer items here.
    ReachedBottom,
    /// The engine reported a different mounted window.
    RangeChange(Range),
    /// A drag gesture started on the item at `index`.
    Drag {
        key: DataKey,
        index: usize,
        item: Option<T>,
    },
    /// A drop reordered the list; the controller already adopted `0` as its data source.
    DataSourceUpdate(Vec<T>),
    Drop(DropNotification<T>),
}

/// Payload of [`ListEvent::Drop`].
///
/// Carries both orderings so the host can diff or persist the change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropNotification<T> {
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub changed: bool,
    /// The dragged item, as retained when the drag started.
    pub item: Option<T>,
    /// Ordering after the drop.
    pub list: Vec<T>,
    /// Ordering before the drop.
    pub old_list: Vec<T>,
}
