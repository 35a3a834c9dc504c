//! The boundary between the controller and the virtualization/drag engine.
//!
//! The controller never computes geometry itself. It drives an [`Engine`] through the methods
//! below and learns about ranges, scrolling and drag gestures through [`EngineEvent`]s that the
//! engine pushes into the [`EngineEvents`] queue it was constructed with.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::{Align, DataKey, Direction, DragEvent, DropEvent, Range, ScrollEvent, ScrollerRef};

/// Capability surface of a virtualization/drag engine.
///
/// Any engine that implements this trait can back a [`crate::ListController`]. All calls are
/// synchronous. An engine that wants to report something back (a new range, a scroll tick, a
/// drag gesture) pushes an [`EngineEvent`] instead of calling into the controller.
pub trait Engine {
    /// Measured (or estimated) size of the item with `key`.
    fn size_of(&self, key: &DataKey) -> Option<u32>;

    /// Current scroll offset of the scroll container.
    fn offset(&self) -> u64;

    /// Size of the viewport along the scroll axis.
    fn client_size(&self) -> u64;

    /// Total scrollable size along the scroll axis.
    fn scroll_size(&self) -> u64;

    fn scroll_to_index(&mut self, index: usize, align: Option<Align>);

    fn scroll_to_offset(&mut self, offset: u64);

    fn scroll_to_bottom(&mut self);

    fn is_reached_bottom(&self) -> bool;

    /// Recomputes the window, using `hint` as the starting point.
    ///
    /// The result is reported through [`EngineEvent::Update`].
    fn update_range(&mut self, hint: Range);

    fn update_item_size(&mut self, key: &DataKey, size: u32);

    fn enable_scroll(&mut self, enabled: bool);

    fn add_scroll_event_listener(&mut self);

    fn remove_scroll_event_listener(&mut self);

    /// Reconfigures a single knob without rebuilding the engine.
    fn set_option(&mut self, option: EngineOption);

    /// Number of keys with a settled measurement.
    fn measured_sizes(&self) -> usize;

    /// Scroll offset tracked by the virtual geometry (read when the list is suspended).
    fn virtual_offset(&self) -> u64;

    /// Releases every resource held by the engine.
    fn destroy(&mut self);
}

/// A single live-reconfigurable engine knob.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineOption {
    Keeps(usize),
    Buffer(usize),
    EstimateSize(u32),
    Direction(Direction),
    Scroller(Option<ScrollerRef>),
    UniqueKeys(Vec<DataKey>),
    Disabled(bool),
    Group(Option<Arc<str>>),
    AutoScroll(bool),
    ScrollThreshold(u32),
    AnimationMs(u32),
}

/// Construction-time configuration handed to an engine factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub keeps: usize,
    /// Number of items rendered beyond the viewport on each side; `round(keeps / 3)`.
    pub buffer: usize,
    pub estimate_size: u32,
    pub direction: Direction,
    pub scroller: Option<ScrollerRef>,
    pub unique_keys: Vec<DataKey>,
    pub disabled: bool,
    pub group: Option<Arc<str>>,
    pub auto_scroll: bool,
    pub scroll_threshold: u32,
    pub animation_ms: u32,
}

pub(crate) fn buffer_for(keeps: usize) -> usize {
    // round(keeps / 3); keeps / 3 never lands on .5
    (keeps + 1) / 3
}

/// Callbacks an engine reports back to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineEvent {
    Drag(DragEvent),
    Drop(DropEvent),
    Scroll(ScrollEvent),
    Update { range: Range, changed: bool },
}

/// Shared queue the engine pushes its callbacks into.
///
/// Cloning yields another handle to the same queue. The controller drains it after every call
/// it makes into the engine, so callbacks triggered by those calls are applied before the call
/// returns.
#[derive(Clone, Debug, Default)]
pub struct EngineEvents {
    queue: Rc<RefCell<VecDeque<EngineEvent>>>,
}

impl EngineEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: EngineEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    pub fn drag_started(&self, key: DataKey, index: usize) {
        self.emit(EngineEvent::Drag(DragEvent { key, index }));
    }

    pub fn dropped(&self, old_index: Option<usize>, new_index: Option<usize>, changed: bool) {
        self.emit(EngineEvent::Drop(DropEvent {
            old_index,
            new_index,
            changed,
        }));
    }

    pub fn scrolled(&self, top: bool, bottom: bool) {
        self.emit(EngineEvent::Scroll(ScrollEvent { top, bottom }));
    }

    pub fn range_updated(&self, range: Range, changed: bool) {
        self.emit(EngineEvent::Update { range, changed });
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub(crate) fn pop(&self) -> Option<EngineEvent> {
        self.queue.borrow_mut().pop_front()
    }

    pub(crate) fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}
