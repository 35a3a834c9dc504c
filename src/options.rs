use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::engine::buffer_for;
use crate::throttle::EDGE_THROTTLE_MS;
use crate::{DataKey, Direction, EngineConfig, EngineOption, KeySelector, ListEvent, ScrollerRef};

/// Listener for notifications emitted by a [`crate::ListController`].
pub type ListEventCallback<T> = Arc<dyn Fn(&ListEvent<T>) + Send + Sync>;

/// Configuration for [`crate::ListController`].
///
/// Cheap to clone: closures live behind `Arc`s, so a host can tweak a few fields and hand the
/// result to `ListController::set_options`, which forwards only the knobs that changed.
pub struct ListOptions<T> {
    /// How each record's key is derived. `None` keys primitives by value and everything else by
    /// position.
    pub key_selector: Option<KeySelector<T>>,

    /// Number of items kept mounted regardless of scroll position.
    pub keeps: usize,

    /// Size estimate (layout units, scroll axis) for items that were not measured yet.
    pub estimate_size: u32,

    pub direction: Direction,

    /// Keep the previous top item in place when older items are prepended after a
    /// top-edge notification.
    pub keep_offset: bool,

    /// When `false`, the engine stops scrolling and auto-scrolling while a drag is active.
    pub sortable: bool,

    /// Whether the engine auto-scrolls when a dragged item nears the viewport edges.
    pub auto_scroll: bool,

    /// External scroll container. `None` means the list root scrolls itself.
    pub scroller: Option<ScrollerRef>,

    /// Disables drag gestures entirely.
    pub disabled: bool,

    /// Lists sharing a group name can exchange items by dragging.
    pub group: Option<Arc<str>>,

    /// Distance from the viewport edge (layout units) at which drag auto-scroll kicks in.
    pub scroll_threshold: u32,

    /// Duration of the reorder animation.
    pub animation_ms: u32,

    /// Suppression window of the top/bottom edge notifications.
    pub edge_throttle_ms: u64,

    /// Optional listener for [`ListEvent`]s.
    pub on_event: Option<ListEventCallback<T>>,
}

impl<T> Clone for ListOptions<T> {
    fn clone(&self) -> Self {
        Self {
            key_selector: self.key_selector.clone(),
            keeps: self.keeps,
            estimate_size: self.estimate_size,
            direction: self.direction,
            keep_offset: self.keep_offset,
            sortable: self.sortable,
            auto_scroll: self.auto_scroll,
            scroller: self.scroller,
            disabled: self.disabled,
            group: self.group.clone(),
            scroll_threshold: self.scroll_threshold,
            animation_ms: self.animation_ms,
            edge_throttle_ms: self.edge_throttle_ms,
            on_event: self.on_event.clone(),
        }
    }
}

impl<T> Default for ListOptions<T> {
    fn default() -> Self {
        Self {
            key_selector: None,
            keeps: 30,
            estimate_size: 50,
            direction: Direction::Vertical,
            keep_offset: false,
            sortable: true,
            auto_scroll: true,
            scroller: None,
            disabled: false,
            group: None,
            scroll_threshold: 55,
            animation_ms: 150,
            edge_throttle_ms: EDGE_THROTTLE_MS,
            on_event: None,
        }
    }
}

impl<T> ListOptions<T> {
    /// Creates options for a list that keeps `keeps` items mounted.
    pub fn new(keeps: usize) -> Self {
        Self {
            keeps,
            ..Self::default()
        }
    }

    pub fn with_key_field(mut self, field: &str) -> Self {
        self.key_selector = Some(KeySelector::field(field));
        self
    }

    pub fn with_key_fn(
        mut self,
        f: impl Fn(&T) -> Option<DataKey> + Send + Sync + 'static,
    ) -> Self {
        self.key_selector = Some(KeySelector::map(f));
        self
    }

    pub fn with_keeps(mut self, keeps: usize) -> Self {
        self.keeps = keeps;
        self
    }

    pub fn with_estimate_size(mut self, estimate_size: u32) -> Self {
        self.estimate_size = estimate_size;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_keep_offset(mut self, keep_offset: bool) -> Self {
        self.keep_offset = keep_offset;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_auto_scroll(mut self, auto_scroll: bool) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    pub fn with_scroller(mut self, scroller: Option<ScrollerRef>) -> Self {
        self.scroller = scroller;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_group(mut self, group: Option<&str>) -> Self {
        self.group = group.map(Arc::from);
        self
    }

    pub fn with_scroll_threshold(mut self, scroll_threshold: u32) -> Self {
        self.scroll_threshold = scroll_threshold;
        self
    }

    pub fn with_animation_ms(mut self, animation_ms: u32) -> Self {
        self.animation_ms = animation_ms;
        self
    }

    pub fn with_edge_throttle_ms(mut self, edge_throttle_ms: u64) -> Self {
        self.edge_throttle_ms = edge_throttle_ms;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: impl Fn(&ListEvent<T>) + Send + Sync + 'static,
    ) -> Self {
        let on_event: ListEventCallback<T> = Arc::new(on_event);
        self.on_event = Some(on_event);
        self
    }

    pub fn without_on_event(mut self) -> Self {
        self.on_event = None;
        self
    }

    pub(crate) fn engine_config(&self, unique_keys: Vec<DataKey>) -> EngineConfig {
        EngineConfig {
            keeps: self.keeps,
            buffer: buffer_for(self.keeps),
            estimate_size: self.estimate_size,
            direction: self.direction,
            scroller: self.scroller,
            unique_keys,
            disabled: self.disabled,
            group: self.group.clone(),
            auto_scroll: self.auto_scroll,
            scroll_threshold: self.scroll_threshold,
            animation_ms: self.animation_ms,
        }
    }

    /// Pushes one [`EngineOption`] per engine knob that differs between `self` and `next`.
    pub(crate) fn diff_engine_options(&self, next: &Self, out: &mut Vec<EngineOption>) {
        if self.keeps != next.keeps {
            out.push(EngineOption::Keeps(next.keeps));
            let buffer = buffer_for(next.keeps);
            if buffer != buffer_for(self.keeps) {
                out.push(EngineOption::Buffer(buffer));
            }
        }
        if self.estimate_size != next.estimate_size {
            out.push(EngineOption::EstimateSize(next.estimate_size));
        }
        if self.direction != next.direction {
            out.push(EngineOption::Direction(next.direction));
        }
        if self.scroller != next.scroller {
            out.push(EngineOption::Scroller(next.scroller));
        }
        if self.disabled != next.disabled {
            out.push(EngineOption::Disabled(next.disabled));
        }
        if self.group != next.group {
            out.push(EngineOption::Group(next.group.clone()));
        }
        if self.auto_scroll != next.auto_scroll {
            out.push(EngineOption::AutoScroll(next.auto_scroll));
        }
        if self.scroll_threshold != next.scroll_threshold {
            out.push(EngineOption::ScrollThreshold(next.scroll_threshold));
        }
        if self.animation_ms != next.animation_ms {
            out.push(EngineOption::AnimationMs(next.animation_ms));
        }
    }

    pub(crate) fn key_selector_changed(&self, next: &Self) -> bool {
        match (&self.key_selector, &next.key_selector) {
            (None, None) => false,
            (Some(a), Some(b)) => !a.same_as(b),
            _ => true,
        }
    }
}

impl<T> core::fmt::Debug for ListOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("key_selector", &self.key_selector)
            .field("keeps", &self.keeps)
            .field("estimate_size", &self.estimate_size)
            .field("direction", &self.direction)
            .field("keep_offset", &self.keep_offset)
            .field("sortable", &self.sortable)
            .field("auto_scroll", &self.auto_scroll)
            .field("scroller", &self.scroller)
            .field("disabled", &self.disabled)
            .field("group", &self.group)
            .field("scroll_threshold", &self.scroll_threshold)
            .field("animation_ms", &self.animation_ms)
            .field("edge_throttle_ms", &self.edge_throttle_ms)
            .finish_non_exhaustive()
    }
}
