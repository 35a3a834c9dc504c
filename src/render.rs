use alloc::vec::Vec;

use crate::{DataItem, DataKey, Direction, Engine, ListController};

/// One mounted item, as handed to the host renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedItem<'a, T> {
    pub index: usize,
    pub key: &'a DataKey,
    pub item: &'a T,
    /// The item is being dragged: render it with no visual footprint, but keep its slot.
    pub hidden: bool,
}

/// Space reserved for the unrendered content around the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacers {
    pub front: u64,
    pub behind: u64,
    pub direction: Direction,
}

/// Padding of the item wrapper, in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: u64,
    pub right: u64,
    pub bottom: u64,
    pub left: u64,
}

impl Spacers {
    /// Maps `front`/`behind` onto the wrapper sides for the current direction.
    pub fn padding(&self) -> Padding {
        match self.direction {
            Direction::Vertical => Padding {
                top: self.front,
                bottom: self.behind,
                ..Padding::default()
            },
            Direction::Horizontal => Padding {
                left: self.front,
                right: self.behind,
                ..Padding::default()
            },
        }
    }
}

impl<T: DataItem + Clone, E: Engine> ListController<T, E> {
    /// Calls `f` for every mounted item, in index order.
    ///
    /// Indexes of the window past the end of the data are skipped.
    pub fn for_each_rendered_item<'a>(&'a self, mut f: impl FnMut(RenderedItem<'a, T>)) {
        let range = self.range();
        let data = self.data();
        let keys = self.unique_keys();
        for index in range.start..=range.end {
            let (Some(item), Some(key)) = (data.get(index), keys.get(index)) else {
                break;
            };
            f(RenderedItem {
                index,
                key,
                item,
                hidden: self.drag_state().is_dragging_key(key),
            });
        }
    }

    pub fn collect_rendered_items<'a>(&'a self, out: &mut Vec<RenderedItem<'a, T>>) {
        out.clear();
        self.for_each_rendered_item(|it| out.push(it));
    }

    pub fn spacers(&self) -> Spacers {
        let range = self.range();
        Spacers {
            front: range.front,
            behind: range.behind,
            direction: self.options().direction,
        }
    }
}
