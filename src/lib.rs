//! A headless controller for sortable virtual lists.
//!
//! Rendering a huge, reorderable collection means keeping only a small window of items mounted
//! while several event streams arrive independently: data-source mutations, scroll ticks, item
//! measurements and drag-and-drop gestures. [`ListController`] folds all of them into one
//! consistent [`Range`] and drives a virtualization/drag [`Engine`] through a narrow trait.
//!
//! What it handles:
//! - a key index parallel to the data source, kept aligned with the engine
//! - bottom-following when a live feed grows while the viewport is pinned to the end
//! - throttled top/bottom edge notifications for infinite loading, and offset preservation
//!   when older items are prepended
//! - drag-and-drop reordering, with the dragged item owned by each list
//! - keep-alive style suspend/resume without scroll jumps
//!
//! It is UI-agnostic. The host is expected to provide:
//! - an [`Engine`] implementation (geometry, scroll listeners, drag ghost)
//! - timestamps (`now_ms`) for event handlers
//! - rendering of the mounted window ([`ListController::for_each_rendered_item`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod drag;
mod engine;
mod event;
mod key;
mod options;
mod render;
mod state;
mod throttle;
mod types;


pub use controller::ListController;
pub use drag::{DragState, reorder};
pub use engine::{Engine, EngineConfig, EngineEvent, EngineEvents, EngineOption};
pub use event::{DropNotification, ListEvent};
pub use key::{DataItem, DataKey, KeySelector, UniqueKeys, data_key_of, rebuild_unique_keys};
pub use options::{ListEventCallback, ListOptions};
pub use render::{Padding, RenderedItem, Spacers};
pub use state::ScrollState;
pub use throttle::{EDGE_THROTTLE_MS, EdgeThrottle};
pub use types::{Align, Direction, DragEvent, DropEvent, Range, ScrollEvent, ScrollerRef};
