//! The Myers O(ND) linear-space midpoint search: given a rectangle of the
//! edit graph, finds a snake straddling the middle of some shortest edit
//! path by expanding forward and backward BFS frontiers on diagonals until
//! they meet.
//!
//! The furthest-reaching-`x`-per-diagonal scratch vector (`V`) is kept in
//! the teacher's own shape (an `Index<i64>`/`IndexMut<i64>` wrapper around a
//! fixed-offset `Vec`) rather than the spec's literal modular-wraparound
//! description; both realize the same "support negative diagonal indices"
//! contract.

use crate::error::Error;
use crate::token::{common_prefix_len, common_suffix_len, TokenView};

/// A bounding rectangle of the edit graph: an old-token range `[left, right)`
/// crossed with a new-token range `[top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Box {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Box {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        debug_assert!(left <= right, "box left must be <= right");
        debug_assert!(top <= bottom, "box top must be <= bottom");
        Box { left, top, right, bottom }
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> i64 {
        self.width() + self.height()
    }

    pub fn delta(&self) -> i64 {
        self.width() - self.height()
    }
}

/// A diagonal run discovered by midpoint search, in absolute (box-relative
/// origin already applied) edit-graph coordinates. Transient: never stored
/// past the recursive frame that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snake {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Scratch vector holding the furthest-reaching `x` for each diagonal `k`,
/// indexed by signed diagonal number via a fixed offset.
pub struct V {
    offset: i64,
    v: Vec<i64>,
}

impl V {
    /// `d_max` is `(size + 1) / 2 + 1`, per [`max_d`].
    pub fn new(d_max: i64) -> Self {
        V { offset: d_max, v: vec![0; 2 * d_max as usize + 1] }
    }
}

impl std::ops::Index<i64> for V {
    type Output = i64;
    fn index(&self, k: i64) -> &i64 {
        &self.v[(k + self.offset) as usize]
    }
}

impl std::ops::IndexMut<i64> for V {
    fn index_mut(&mut self, k: i64) -> &mut i64 {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// `ceil(size / 2) + 1`: the largest `d` the search can need, and the
/// minimum capacity a [`V`] must have.
pub fn max_d(b: &Box) -> i64 {
    (b.size() + 1) / 2 + 1
}

/// Finds a midpoint snake for `B`, or reports none when `B` is empty.
///
/// `vf` and `vb` are shared scratch shared across one recursive frame (the
/// caller in [`crate::path`] owns them and passes the same pair down both
/// recursive branches, since each sub-box's demand on `d_max` only shrinks).
///
/// Fails with [`Error::InvariantViolation`] if the search exhausts every
/// `d` up to `d_max` without finding a snake, which the algorithm guarantees
/// cannot happen for a non-empty box; a well-formed diff never observes it.
pub fn find_middle_snake<P, Q>(
    old: TokenView<'_, P>,
    new: TokenView<'_, Q>,
    b: Box,
    vf: &mut V,
    vb: &mut V,
) -> Result<Option<Snake>, Error> {
    if b.size() == 0 {
        return Ok(None);
    }

    let old = old.slice(b.left as usize..b.right as usize);
    let new = new.slice(b.top as usize..b.bottom as usize);
    let n = b.width();
    let m = b.height();
    let delta = n - m;
    let odd = delta & 1 != 0;
    let d_max = max_d(&b);

    vf[1] = 0;
    vb[1] = 0;

    for d in 0..=d_max {
        // Forward step: extend the furthest-reaching paths on each diagonal
        // one non-diagonal edge further, then slide through any shared
        // tokens that follow.
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let mut y = x - k;
            let (x0, y0) = (x, y);

            if x < n && y < m {
                let advance =
                    common_prefix_len(old.slice(x as usize..n as usize), new.slice(y as usize..m as usize)) as i64;
                x += advance;
                y += advance;
            }
            vf[k] = x;

            if odd && (k - delta).abs() <= d - 1 && x + vb[-(k - delta)] >= n {
                log::trace!("find_middle_snake: box={b:?} d={d} snake=({x0},{y0})-({x},{y}) (forward)");
                return Ok(Some(Snake {
                    x1: b.left + x0,
                    y1: b.top + y0,
                    x2: b.left + x,
                    y2: b.top + y,
                }));
            }
            k += 2;
        }

        // Backward step: same expansion, mirrored from the bottom-right
        // corner, measuring `x`/`y` as distance from the far edge.
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = x - k;
            let (x0, y0) = (x, y);

            if x < n && y < m {
                let advance = common_suffix_len(
                    old.slice(0..(n - x) as usize),
                    new.slice(0..(m - y) as usize),
                ) as i64;
                x += advance;
                y += advance;
            }
            vb[k] = x;

            if !odd && (k - delta).abs() <= d && x + vf[-(k - delta)] >= n {
                log::trace!(
                    "find_middle_snake: box={b:?} d={d} snake=({},{})-({},{}) (backward)",
                    n - x,
                    m - y,
                    n - x0,
                    m - y0
                );
                return Ok(Some(Snake {
                    x1: b.left + (n - x),
                    y1: b.top + (m - y),
                    x2: b.left + (n - x0),
                    y2: b.top + (m - y0),
                }));
            }
            k += 2;
        }
    }

    Err(Error::InvariantViolation(format!(
        "Myers midpoint search over box {b:?} exhausted d_max={d_max} without finding a snake"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize_words;

    fn view(s: &str) -> (Vec<u8>, Vec<crate::token::Token<()>>) {
        let tokens = tokenize_words(s.as_bytes());
        (s.as_bytes().to_vec(), tokens)
    }

    #[test]
    fn finds_a_snake_for_nontrivial_input() {
        let (ba, ta) = view("a b c a b b a");
        let (bb, tb) = view("c b a b a c");
        let old = TokenView::new(&ba, &ta).unwrap();
        let new = TokenView::new(&bb, &tb).unwrap();
        let b = Box::new(0, 0, old.len() as i64, new.len() as i64);
        let mut vf = V::new(max_d(&b));
        let mut vb = V::new(max_d(&b));
        let snake = find_middle_snake(old, new, b, &mut vf, &mut vb).unwrap();
        assert!(snake.is_some());
    }

    #[test]
    fn empty_box_has_no_midpoint() {
        let (ba, ta) = view("");
        let (bb, tb) = view("");
        let old = TokenView::new(&ba, &ta).unwrap();
        let new = TokenView::new(&bb, &tb).unwrap();
        let b = Box::new(0, 0, 0, 0);
        let mut vf = V::new(1);
        let mut vb = V::new(1);
        assert!(find_middle_snake(old, new, b, &mut vf, &mut vb).unwrap().is_none());
    }
}
