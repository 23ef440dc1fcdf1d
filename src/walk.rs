//! Walks a completed edit path, translating consecutive coordinate jumps
//! into a stream of low-level events handed to an installed [`Callback`].
//!
//! Kept separate from path construction (spec §4.5) so that the same path
//! can be replayed against different callbacks (the grouping collector in
//! [`crate::collector`], or a future one-off consumer) without recomputing
//! the Myers search.

use crate::arena::{PathArena, PathIdx};
use crate::error::Error;

/// One step of the walk, in old/new token-index coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The walk is about to begin; emitted exactly once, before anything else.
    Start,
    /// Old token at `old_index` and new token at `new_index` are equal.
    Equal { old_index: usize, new_index: usize },
    /// Old token at `old_index` has no counterpart in the new side.
    Delete { old_index: usize },
    /// New token at `new_index` has no counterpart in the old side.
    Insert { new_index: usize },
    /// The walk has reached the end of the path; emitted exactly once, last.
    Finish,
}

/// Receives [`Event`]s in path order. A collector (see
/// [`crate::collector::ChangeSetCollector`]) is the usual implementor.
pub trait Callback {
    fn on_event(&mut self, event: Event);
}

impl<F: FnMut(Event)> Callback for F {
    fn on_event(&mut self, event: Event) {
        self(event)
    }
}

/// Walks the path rooted at `head`, translating each `(x, y) -> (x', y')`
/// jump between consecutive arena nodes into `Equal`/`Delete`/`Insert`
/// events.
///
/// A diagonal step (`x' - x == y' - y`, both advancing by the same amount)
/// is a run of `Equal`s. A horizontal-only step is a run of `Delete`s; a
/// vertical-only step is a run of `Insert`s. The recursive path builder
/// never produces a step that's neither (mixed steps are split into an
/// intermediate coordinate by the snake/divide boundary); encountering one
/// anyway is reported as [`Error::InvariantViolation`] rather than ignored.
pub fn walk_path(arena: &PathArena, head: PathIdx, cb: &mut dyn Callback) -> Result<(), Error> {
    cb.on_event(Event::Start);

    if head == 0 {
        cb.on_event(Event::Finish);
        return Ok(());
    }

    let mut idx = head;
    let mut x = arena.get(idx)?.x;
    let mut y = arena.get(idx)?.y;

    loop {
        let next_idx = arena.get(idx)?.next;
        if next_idx == 0 {
            break;
        }
        let node = arena.get(next_idx)?;
        let (nx, ny) = (node.x, node.y);

        let dx = nx - x;
        let dy = ny - y;

        if dx > 0 && dx == dy {
            for step in 0..dx {
                cb.on_event(Event::Equal {
                    old_index: (x + step) as usize,
                    new_index: (y + step) as usize,
                });
            }
        } else if dy == 0 {
            for step in 0..dx {
                cb.on_event(Event::Delete { old_index: (x + step) as usize });
            }
        } else if dx == 0 {
            for step in 0..dy {
                cb.on_event(Event::Insert { new_index: (y + step) as usize });
            }
        } else {
            return Err(Error::InvariantViolation(format!(
                "path step ({x},{y}) -> ({nx},{ny}) is neither diagonal nor axis-aligned"
            )));
        }

        x = nx;
        y = ny;
        idx = next_idx;
    }

    cb.on_event(Event::Finish);
    Ok(())
}
