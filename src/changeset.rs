//! The grouped output of a diff: a sequence of [`ChangeSet`]s, each an
//! unbroken run of one edit kind, owning copies of the tokens it spans so
//! the result outlives the transient diff context that produced it.

use crate::error::Error;
use crate::token::Token;

/// What a [`ChangeSet`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Old and new tokens in this run are pairwise equal.
    Equal,
    /// New tokens with no old-side counterpart (`old_tokens` is empty).
    Insert,
    /// Old tokens with no new-side counterpart (`new_tokens` is empty).
    Delete,
    /// An adjacent delete-then-insert run merged into one replacement,
    /// produced only when the caller asked for `emit_substitute`; otherwise
    /// the same span surfaces as separate `Delete` and `Insert` sets.
    Substitute,
}

/// One contiguous run of same-kind changes. Owns its token copies: a
/// `ChangeSet` is free to outlive the `TokenView`s it was computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeSet<P> {
    kind: Kind,
    old_tokens: Vec<Token<P>>,
    new_tokens: Vec<Token<P>>,
}

impl<P> ChangeSet<P> {
    pub(crate) fn new(kind: Kind, old_tokens: Vec<Token<P>>, new_tokens: Vec<Token<P>>) -> Self {
        ChangeSet { kind, old_tokens, new_tokens }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// `max(|old_tokens|, |new_tokens|)`.
    pub fn len(&self) -> usize {
        self.old_tokens.len().max(self.new_tokens.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `|old_tokens| + |new_tokens|`; `0` for `Equal`.
    pub fn change_count(&self) -> usize {
        match self.kind {
            Kind::Equal => 0,
            _ => self.old_tokens.len() + self.new_tokens.len(),
        }
    }

    /// The `i`th old/new token pair, padding whichever side is shorter with
    /// `None`. Fails rather than panicking when `i` is out of range.
    pub fn index(&self, i: usize) -> Result<(Option<&Token<P>>, Option<&Token<P>>), Error> {
        if i >= self.len() {
            return Err(Error::IndexOutOfRange { index: i, len: self.len() });
        }
        Ok((self.old_tokens.get(i), self.new_tokens.get(i)))
    }

    /// Iterates `(old, new)` token pairs across `0..len()`.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&Token<P>>, Option<&Token<P>>)> {
        (0..self.len()).map(move |i| (self.old_tokens.get(i), self.new_tokens.get(i)))
    }

    /// Old-side tokens projected to `len()`, padding the short side with
    /// `None`; mirrors the old half of [`Self::iter`]'s pairing.
    pub fn old_tokens(&self) -> Vec<Option<&Token<P>>> {
        (0..self.len()).map(move |i| self.old_tokens.get(i)).collect()
    }

    /// New-side tokens projected to `len()`, padding the short side with
    /// `None`; mirrors the new half of [`Self::iter`]'s pairing.
    pub fn new_tokens(&self) -> Vec<Option<&Token<P>>> {
        (0..self.len()).map(move |i| self.new_tokens.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(s: u32, e: u32) -> Token<()> {
        Token::new(s, e, ())
    }

    #[test]
    fn equal_set_has_zero_change_count() {
        let cs = ChangeSet::new(Kind::Equal, vec![tok(0, 1), tok(1, 2)], vec![tok(0, 1), tok(1, 2)]);
        assert_eq!(cs.change_count(), 0);
        assert_eq!(cs.len(), 2);
    }

    #[test]
    fn substitute_counts_both_sides() {
        let cs = ChangeSet::new(Kind::Substitute, vec![tok(0, 1), tok(1, 2)], vec![tok(0, 1)]);
        assert_eq!(cs.change_count(), 3);
        assert_eq!(cs.len(), 2);
    }

    #[test]
    fn index_out_of_range_is_reported() {
        let cs = ChangeSet::new(Kind::Delete, vec![tok(0, 1), tok(1, 2)], vec![]);
        assert!(cs.index(5).is_err());
        let (old, new) = cs.index(1).unwrap();
        assert_eq!(old, Some(&tok(1, 2)));
        assert_eq!(new, None);
    }

    #[test]
    fn iter_pads_shorter_side_with_none() {
        let cs = ChangeSet::new(Kind::Insert, vec![], vec![tok(0, 1), tok(1, 2)]);
        let pairs: Vec<_> = cs.iter().collect();
        assert_eq!(pairs, vec![(None, Some(&tok(0, 1))), (None, Some(&tok(1, 2)))]);
    }
}
