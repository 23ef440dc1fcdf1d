//! Recursive subdivision of an edit-graph rectangle around its midpoint
//! snake, assembling the full shortest edit path as a linked list of
//! coordinates in a [`PathArena`].
//!
//! Rendered iteratively with an explicit work stack rather than call-stack
//! recursion (spec §9: "an iterative variant with a work stack is
//! equivalent and preferred when the target language penalizes deep
//! recursion"), since the recursion depth here is the edit distance, which
//! is caller-controlled and unbounded.

use crate::arena::{PathArena, PathIdx};
use crate::error::Error;
use crate::myers::{find_middle_snake, max_d, Box, Snake, V};
use crate::token::TokenView;

enum Task {
    /// Find the path through `Box` and leave its head `PathIdx` on the
    /// result stack (`0` if the box turned out to be empty).
    Solve(Box),
    /// Both children of the snake `(sx1,sy1)-(sx2,sy2)` have been solved and
    /// their results are the top two entries of the result stack (tail on
    /// top of head); stitch them together into a single path and leave the
    /// combined head on the result stack.
    Combine { sx1: i64, sy1: i64, sx2: i64, sy2: i64 },
}

/// Builds the linked list of coordinates along a shortest edit path through
/// `outer`, using `arena` for storage and `vf`/`vb` as shared midpoint-search
/// scratch (sized for `outer`; every recursive sub-box fits in the same
/// scratch since its `d_max` only shrinks).
///
/// Returns `0` (the null sentinel) if `outer` is empty.
///
/// Fails with [`Error::InvariantViolation`] if the midpoint search fails
/// (see [`find_middle_snake`]), if a box's combine step finds the result
/// stack doesn't hold both of its children, or if the work loop finishes
/// with anything but exactly one assembled path on the result stack.
pub fn find_path<P, Q>(
    old: TokenView<'_, P>,
    new: TokenView<'_, Q>,
    outer: Box,
    arena: &mut PathArena,
    vf: &mut V,
    vb: &mut V,
) -> Result<PathIdx, Error> {
    let mut work = vec![Task::Solve(outer)];
    let mut results: Vec<PathIdx> = Vec::new();

    while let Some(task) = work.pop() {
        match task {
            Task::Solve(b) => match find_middle_snake(old, new, b, vf, vb)? {
                None => results.push(0),
                Some(Snake { x1, y1, x2, y2 }) => {
                    let head_box = Box::new(b.left, b.top, x1, y1);
                    let tail_box = Box::new(x2, y2, b.right, b.bottom);
                    work.push(Task::Combine { sx1: x1, sy1: y1, sx2: x2, sy2: y2 });
                    work.push(Task::Solve(tail_box));
                    work.push(Task::Solve(head_box));
                }
            },
            Task::Combine { sx1, sy1, sx2, sy2 } => {
                let tail_result = results
                    .pop()
                    .ok_or_else(|| Error::InvariantViolation("path builder result stack missing tail".to_string()))?;
                let head_result = results
                    .pop()
                    .ok_or_else(|| Error::InvariantViolation("path builder result stack missing head".to_string()))?;

                let tail = if tail_result == 0 {
                    let (idx, node) = arena.push();
                    node.x = sx2;
                    node.y = sy2;
                    idx
                } else {
                    tail_result
                };

                let head = if head_result == 0 {
                    let (idx, node) = arena.push();
                    node.x = sx1;
                    node.y = sy1;
                    idx
                } else {
                    head_result
                };

                let mut terminal = head;
                while arena.get(terminal)?.next != 0 {
                    terminal = arena.get(terminal)?.next;
                }
                arena.get_mut(terminal)?.next = tail;

                results.push(head);
            }
        }
    }

    if results.len() != 1 {
        return Err(Error::InvariantViolation(format!(
            "path builder finished with {} pending results, expected exactly 1",
            results.len()
        )));
    }
    Ok(results.pop().unwrap())
}

/// Convenience: allocates scratch vectors sized for `outer` and builds the
/// path in one call.
pub fn find_path_fresh<P, Q>(
    old: TokenView<'_, P>,
    new: TokenView<'_, Q>,
    outer: Box,
    arena: &mut PathArena,
) -> Result<PathIdx, Error> {
    let d_max = max_d(&outer).max(1);
    let mut vf = V::new(d_max);
    let mut vb = V::new(d_max);
    find_path(old, new, outer, arena, &mut vf, &mut vb)
}
