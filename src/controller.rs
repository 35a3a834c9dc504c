use alloc::vec::Vec;

use crate::drag::{DragState, reorder};
use crate::throttle::EdgeThrottle;
use crate::{
    Align, DataItem, DataKey, DragEvent, DropEvent, DropNotification, Engine, EngineConfig,
    EngineEvent, EngineEvents, EngineOption, ListEvent, ListOptions, Range, ScrollEvent,
    ScrollState, UniqueKeys,
};

/// Upper bound of engine callbacks a single drain applies on top of those already queued.
const MAX_FOLLOW_UP_EVENTS: usize = 1024;

/// Keeps a virtual list's window, scroll position, item sizes and drag-and-drop reordering
/// consistent with each other.
///
/// The controller owns the data source and is the only writer of its range, key index, drag
/// state and top-load marker. Geometry lives in the [`Engine`]; the controller drives it through
/// the trait and applies what it reports back through [`EngineEvents`].
///
/// Hosts drive it by calling:
/// - `set_data_source` / `update_data_source` when the data changes
/// - `on_item_resized` when a mounted item is measured
/// - `pump(now_ms)` after the engine queued events on its own (e.g. native scroll)
/// - `mount`, `activate`, `deactivate`, `destroy` from the hosting view's lifecycle
///
/// Timestamps (`now_ms`) are provided by the host; they only drive edge-notification throttling.
pub struct ListController<T, E: Engine> {
    options: ListOptions<T>,
    data: Vec<T>,
    unique_keys: UniqueKeys,
    range: Range,
    drag: DragState<T>,
    top_load_marker: Option<usize>,
    last_len: Option<usize>,

    engine: Option<E>,
    events: EngineEvents,
    auto_scroll_suspended: bool,
    suspended: Option<ScrollState>,

    top_throttle: EdgeThrottle,
    bottom_throttle: EdgeThrottle,
}

impl<T: DataItem + Clone, E: Engine> ListController<T, E> {
    /// Creates a controller over `data`. The engine is attached later with [`Self::mount`].
    pub fn new(options: ListOptions<T>, data: Vec<T>) -> Self {
        vdebug!(
            keeps = options.keeps,
            len = data.len(),
            keep_offset = options.keep_offset,
            sortable = options.sortable,
            "ListController::new"
        );
        let mut c = Self {
            range: Range::initial(options.keeps),
            top_throttle: EdgeThrottle::new(options.edge_throttle_ms),
            bottom_throttle: EdgeThrottle::new(options.edge_throttle_ms),
            options,
            data,
            unique_keys: UniqueKeys::default(),
            drag: DragState::default(),
            top_load_marker: None,
            last_len: None,
            engine: None,
            events: EngineEvents::new(),
            auto_scroll_suspended: false,
            suspended: None,
        };
        c.on_data_source_change();
        c
    }

    pub fn options(&self) -> &ListOptions<T> {
        &self.options
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn unique_keys(&self) -> &UniqueKeys {
        &self.unique_keys
    }

    pub fn index_of_key(&self, key: &DataKey) -> Option<usize> {
        self.unique_keys.index_of(key)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn drag_state(&self) -> &DragState<T> {
        &self.drag
    }

    pub fn dragging_key(&self) -> Option<&DataKey> {
        self.drag.key.as_ref()
    }

    pub fn top_load_marker(&self) -> Option<usize> {
        self.top_load_marker
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Handle to the queue the engine reports into.
    pub fn engine_events(&self) -> &EngineEvents {
        &self.events
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.is_some()
    }

    /// Builds the engine and attaches it.
    ///
    /// `factory` receives the full configuration (current knobs and unique keys) and the event
    /// queue the engine must report into. Mounting twice is ignored.
    pub fn mount(
        &mut self,
        factory: impl FnOnce(EngineConfig, EngineEvents) -> E,
        now_ms: u64,
    ) {
        if self.engine.is_some() {
            vwarn!("ListController::mount: already mounted");
            return;
        }
        let config = self.options.engine_config(self.unique_keys.to_vec());
        vinfo!(keeps = config.keeps, buffer = config.buffer, "ListController::mount");
        self.engine = Some(factory(config, self.events.clone()));
        self.drain(now_ms);
    }

    /// Detaches from the active view: records the scroll offset and stops listening to scroll.
    ///
    /// Returns the recorded state, or `None` when no engine is mounted.
    pub fn deactivate(&mut self) -> Option<ScrollState> {
        let engine = self.engine.as_mut()?;
        let state = ScrollState {
            offset: engine.virtual_offset(),
            range: self.range,
        };
        engine.remove_scroll_event_listener();
        vinfo!(offset = state.offset, "ListController::deactivate");
        self.suspended = Some(state);
        Some(state)
    }

    /// Reattaches to the active view.
    ///
    /// The recorded offset is restored before the scroll listener comes back, so the viewport
    /// does not jump.
    pub fn activate(&mut self, now_ms: u64) {
        let suspended = self.suspended.take();
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let offset = suspended
            .map(|s| s.offset)
            .unwrap_or_else(|| engine.virtual_offset());
        vinfo!(offset, "ListController::activate");
        engine.scroll_to_offset(offset);
        engine.add_scroll_event_listener();
        self.drain(now_ms);
    }

    /// Scrolls back to a previously captured state (for example one persisted by the host).
    pub fn restore_scroll_state(&mut self, state: ScrollState, now_ms: u64) {
        if self.suspended.is_some() {
            self.suspended = Some(state);
            return;
        }
        self.scroll_to_offset(state.offset, now_ms);
    }

    /// Releases the engine and cancels pending edge throttles.
    pub fn destroy(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            vinfo!("ListController::destroy");
            engine.destroy();
        }
        self.events.clear();
        self.top_throttle.cancel();
        self.bottom_throttle.cancel();
        self.suspended = None;
        self.auto_scroll_suspended = false;
        self.drag = DragState::default();
    }

    /// Replaces the options, forwarding only the engine knobs that changed.
    pub fn set_options(&mut self, options: ListOptions<T>, now_ms: u64) {
        let mut changed = Vec::new();
        self.options.diff_engine_options(&options, &mut changed);
        let rebuild_keys = self.options.key_selector_changed(&options);
        let throttle_changed = self.options.edge_throttle_ms != options.edge_throttle_ms;
        self.options = options;
        vtrace!(
            changed = changed.len(),
            rebuild_keys,
            "ListController::set_options"
        );

        if throttle_changed {
            self.top_throttle = EdgeThrottle::new(self.options.edge_throttle_ms);
            self.bottom_throttle = EdgeThrottle::new(self.options.edge_throttle_ms);
        }

        if let Some(engine) = self.engine.as_mut() {
            for option in changed {
                // Reapplied when the drag that suspended auto-scroll ends.
                if self.auto_scroll_suspended && matches!(option, EngineOption::AutoScroll(_)) {
                    continue;
                }
                engine.set_option(option);
            }
        }

        if rebuild_keys {
            self.rebuild_unique_keys();
        }
        self.drain(now_ms);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<T>), now_ms: u64) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next, now_ms);
    }

    pub fn set_data_source(&mut self, data: Vec<T>, now_ms: u64) {
        self.data = data;
        self.on_data_source_change();
        self.drain(now_ms);
    }

    /// Mutates the data source in place (append, prepend, edit...).
    pub fn update_data_source(&mut self, f: impl FnOnce(&mut Vec<T>), now_ms: u64) {
        f(&mut self.data);
        self.on_data_source_change();
        self.drain(now_ms);
    }

    fn on_data_source_change(&mut self) {
        self.rebuild_unique_keys();
        let len = self.data.len();
        self.detect_range_change(self.last_len, len);

        if self.options.keep_offset {
            if let Some(marker) = self.top_load_marker.filter(|&m| m > 0) {
                let prepended = len.saturating_sub(marker);
                if prepended > 0 {
                    vdebug!(prepended, "restoring offset after top load");
                    if let Some(engine) = self.engine.as_mut() {
                        engine.scroll_to_index(prepended, None);
                    }
                }
                self.top_load_marker = None;
            }
        }

        self.last_len = Some(len);
    }

    fn rebuild_unique_keys(&mut self) {
        self.unique_keys = UniqueKeys::rebuild(&self.data, self.options.key_selector.as_ref());
        debug_assert_eq!(self.unique_keys.len(), self.data.len());
        if let Some(engine) = self.engine.as_mut() {
            engine.set_option(EngineOption::UniqueKeys(self.unique_keys.to_vec()));
        }
    }

    fn detect_range_change(&mut self, old_len: Option<usize>, new_len: usize) {
        let old = old_len.unwrap_or(0);
        if old == 0 && new_len == 0 {
            return;
        }
        if old_len == Some(new_len) {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        if old > self.options.keeps
            && new_len > old
            && self.range.end == old - 1
            && engine.is_reached_bottom()
        {
            // Follow a bottom-pinned viewport as the feed grows.
            self.range.start = (self.range.start + 1).min(self.range.end);
            vtrace!(start = self.range.start, "bottom follow");
        }
        engine.update_range(self.range);
    }

    /// Applies every event the engine queued since the last drain.
    pub fn pump(&mut self, now_ms: u64) {
        self.drain(now_ms);
    }

    /// Applies a single engine callback, then drains whatever it caused.
    pub fn handle_engine_event(&mut self, event: EngineEvent, now_ms: u64) {
        self.dispatch(event, now_ms);
        self.drain(now_ms);
    }

    fn drain(&mut self, now_ms: u64) {
        // Everything queued before the drain is applied; only follow-up events count
        // against the budget, and the rest waits for the next pump.
        let mut budget = self.events.len() + MAX_FOLLOW_UP_EVENTS;
        while budget > 0 {
            let Some(event) = self.events.pop() else {
                return;
            };
            budget -= 1;
            self.dispatch(event, now_ms);
        }
        if !self.events.is_empty() {
            vwarn!(
                pending = self.events.len(),
                "engine keeps re-emitting; deferring to the next pump"
            );
        }
    }

    fn dispatch(&mut self, event: EngineEvent, now_ms: u64) {
        vtrace!(?event, now_ms, "engine event");
        match event {
            EngineEvent::Drag(ev) => self.on_drag(ev),
            EngineEvent::Drop(ev) => self.on_drop(ev),
            EngineEvent::Scroll(ev) => self.on_scroll(ev, now_ms),
            EngineEvent::Update { range, changed } => self.on_update(range, changed),
        }
    }

    fn on_update(&mut self, range: Range, changed: bool) {
        self.range = range;
        if changed {
            self.emit_with(|| ListEvent::RangeChange(range));
        }
    }

    fn on_scroll(&mut self, event: ScrollEvent, now_ms: u64) {
        // Any scroll before the data grows invalidates a pending top-load restoration.
        self.top_load_marker = None;

        if !self.data.is_empty() && event.top && self.top_throttle.try_fire(now_ms) {
            self.top_load_marker = Some(self.data.len());
            self.emit_with(|| ListEvent::ReachedTop);
        }
        if event.bottom && self.bottom_throttle.try_fire(now_ms) {
            self.emit_with(|| ListEvent::ReachedBottom);
        }
    }

    fn on_drag(&mut self, event: DragEvent) {
        let DragEvent { key, index } = event;
        let item = self.data.get(index).cloned();
        vdebug!(%key, index, found = item.is_some(), "drag start");
        self.drag.start(key.clone(), item.clone());

        if !self.options.sortable {
            if let Some(engine) = self.engine.as_mut() {
                engine.enable_scroll(false);
                engine.set_option(EngineOption::AutoScroll(false));
            }
            self.auto_scroll_suspended = true;
        }
        self.emit_with(|| ListEvent::Drag { key, index, item });
    }

    fn on_drop(&mut self, event: DropEvent) {
        if let Some(engine) = self.engine.as_mut() {
            engine.enable_scroll(true);
            engine.set_option(EngineOption::AutoScroll(self.options.auto_scroll));
        }
        self.auto_scroll_suspended = false;

        let item = self.drag.finish();
        let Some(list) = reorder(&self.data, event, item.as_ref()) else {
            vdebug!("drop without source or target index; list left untouched");
            return;
        };
        vdebug!(
            old_index = ?event.old_index,
            new_index = ?event.new_index,
            changed = event.changed,
            "drop"
        );

        let DropEvent {
            old_index,
            new_index,
            changed,
        } = event;
        if changed {
            let old_list = core::mem::replace(&mut self.data, list);
            self.on_data_source_change();
            self.emit_with(|| ListEvent::DataSourceUpdate(self.data.clone()));
            self.emit_with(|| {
                ListEvent::Drop(DropNotification {
                    old_index,
                    new_index,
                    changed,
                    item,
                    list: self.data.clone(),
                    old_list,
                })
            });
        } else {
            self.emit_with(|| {
                ListEvent::Drop(DropNotification {
                    old_index,
                    new_index,
                    changed,
                    item,
                    list,
                    old_list: self.data.clone(),
                })
            });
        }
    }

    /// Hands over an item dragged out of another list, so a drop that inserts into this list
    /// (`old_index == None`) has something to insert.
    pub fn set_incoming_item(&mut self, item: T) {
        self.drag.item = Some(item);
    }

    /// Reports the measured size of a mounted item.
    pub fn on_item_resized(&mut self, key: &DataKey, size: u32, now_ms: u64) {
        if self.drag.is_dragging_key(key) {
            // Hidden while dragged; its size is meaningless.
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let measured = engine.measured_sizes();
        engine.update_item_size(key, size);
        vtrace!(%key, size, measured, "item resized");

        // The first probing pass just completed: recompute once with real sizes.
        if self.options.keeps.checked_sub(1) == Some(measured)
            && self.data.len() > self.options.keeps
        {
            engine.update_range(self.range);
        }
        self.drain(now_ms);
    }

    pub fn get_size(&self, key: &DataKey) -> Option<u32> {
        self.engine.as_ref()?.size_of(key)
    }

    pub fn get_offset(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.offset())
    }

    pub fn get_client_size(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.client_size())
    }

    pub fn get_scroll_size(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.scroll_size())
    }

    /// Scrolls to the item with `key`.
    ///
    /// Returns `false` (and makes no engine call) when the key is unknown or no engine is
    /// mounted.
    pub fn scroll_to_key(&mut self, key: &DataKey, align: Option<Align>, now_ms: u64) -> bool {
        let Some(index) = self.unique_keys.index_of(key) else {
            vtrace!(%key, "scroll_to_key: unknown key");
            return false;
        };
        if self.engine.is_none() {
            return false;
        }
        self.scroll_to_index(index, align, now_ms);
        true
    }

    pub fn scroll_to_index(&mut self, index: usize, align: Option<Align>, now_ms: u64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_to_index(index, align);
            self.drain(now_ms);
        }
    }

    pub fn scroll_to_offset(&mut self, offset: u64, now_ms: u64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_to_offset(offset);
            self.drain(now_ms);
        }
    }

    pub fn scroll_to_top(&mut self, now_ms: u64) {
        self.scroll_to_offset(0, now_ms);
    }

    pub fn scroll_to_bottom(&mut self, now_ms: u64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_to_bottom();
            self.drain(now_ms);
        }
    }

    fn emit_with(&self, event: impl FnOnce() -> ListEvent<T>) {
        if let Some(cb) = &self.options.on_event {
            cb(&event());
        }
    }
}

impl<T, E: Engine> Drop for ListController<T, E> {
    fn drop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
    }
}

impl<T: core::fmt::Debug, E: Engine> core::fmt::Debug for ListController<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListController")
            .field("options", &self.options)
            .field("len", &self.data.len())
            .field("range", &self.range)
            .field("dragging", &self.drag.key)
            .field("top_load_marker", &self.top_load_marker)
            .field("mounted", &self.engine.is_some())
            .field("suspended", &self.suspended)
            .finish_non_exhaustive()
    }
}
