use crate::DataKey;

/// Alignment hint forwarded with `scroll_to_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Top,
    Bottom,
    Auto,
}

/// Layout axis of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// The mounted window of the list.
///
/// `start` and `end` are inclusive item indexes. `front` and `behind` are the layout sizes of the
/// content before `start` and after `end` that is not rendered, reserved as spacing so the
/// scrollbar stays truthful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: usize,
    pub end: usize, // inclusive
    pub front: u64,
    pub behind: u64,
}

impl Range {
    /// The initial window for a list that keeps `keeps` items mounted.
    pub fn initial(keeps: usize) -> Self {
        Self {
            start: 0,
            end: keeps.saturating_sub(1),
            front: 0,
            behind: 0,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Opaque handle to an external scroll container owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollerRef(pub u64);

/// Reported by the engine when a drag gesture starts on a rendered item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragEvent {
    pub key: DataKey,
    pub index: usize,
}

/// Reported by the engine when a drag gesture ends.
///
/// `old_index == None` is an insertion from another list, `new_index == None` a removal into
/// another list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEvent {
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub changed: bool,
}

/// Edge flags of an engine scroll tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub top: bool,
    pub bottom: bool,
}
