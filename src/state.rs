use crate::Range;

/// Scroll position recorded when a list is suspended (detached from an active view).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so a host can also
/// persist it across sessions and hand it back through `ListController::restore_scroll_state`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
    pub range: Range,
}
