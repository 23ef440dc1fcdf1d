//! Groups the token-by-token [`Event`] stream from [`crate::walk`] into
//! [`ChangeSet`]s: runs of `Equal` tokens, and runs of `Delete`/`Insert`
//! tokens between them, optionally merged into `Substitute` sets.

use crate::changeset::{ChangeSet, Kind};
use crate::token::TokenView;
use crate::walk::{Callback, Event};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    None,
    Equal { old_start: usize, new_start: usize, len: usize },
    Change { old_start: usize, old_len: usize, new_start: usize, new_len: usize },
}

/// Accumulates path-walk events into a flat [`ChangeSet`] list, per the
/// options a caller passed to [`crate::diff`]. Holds the two token views so
/// a flush can copy the tokens a range denotes out into an owned
/// [`ChangeSet`].
pub struct ChangeSetCollector<'a, P> {
    old: TokenView<'a, P>,
    new: TokenView<'a, P>,
    emit_equal: bool,
    emit_substitute: bool,
    pending: Pending,
    out: Vec<ChangeSet<P>>,
}

impl<'a, P: Clone> ChangeSetCollector<'a, P> {
    pub fn new(old: TokenView<'a, P>, new: TokenView<'a, P>, emit_equal: bool, emit_substitute: bool) -> Self {
        ChangeSetCollector { old, new, emit_equal, emit_substitute, pending: Pending::None, out: Vec::new() }
    }

    /// Consumes the collector, returning the assembled change sets.
    pub fn into_change_sets(self) -> Vec<ChangeSet<P>> {
        self.out
    }

    fn old_slice(&self, range: std::ops::Range<usize>) -> Vec<crate::token::Token<P>> {
        self.old.tokens()[range].to_vec()
    }

    fn new_slice(&self, range: std::ops::Range<usize>) -> Vec<crate::token::Token<P>> {
        self.new.tokens()[range].to_vec()
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None => {}
            Pending::Equal { old_start, new_start, len } => {
                if self.emit_equal && len > 0 {
                    let old_tokens = self.old_slice(old_start..old_start + len);
                    let new_tokens = self.new_slice(new_start..new_start + len);
                    self.out.push(ChangeSet::new(Kind::Equal, old_tokens, new_tokens));
                }
            }
            Pending::Change { old_start, old_len, new_start, new_len } => {
                if old_len == 0 && new_len == 0 {
                    return;
                }
                if old_len == 0 {
                    let new_tokens = self.new_slice(new_start..new_start + new_len);
                    self.out.push(ChangeSet::new(Kind::Insert, Vec::new(), new_tokens));
                } else if new_len == 0 {
                    let old_tokens = self.old_slice(old_start..old_start + old_len);
                    self.out.push(ChangeSet::new(Kind::Delete, old_tokens, Vec::new()));
                } else if self.emit_substitute {
                    let old_tokens = self.old_slice(old_start..old_start + old_len);
                    let new_tokens = self.new_slice(new_start..new_start + new_len);
                    self.out.push(ChangeSet::new(Kind::Substitute, old_tokens, new_tokens));
                } else {
                    let old_tokens = self.old_slice(old_start..old_start + old_len);
                    let new_tokens = self.new_slice(new_start..new_start + new_len);
                    self.out.push(ChangeSet::new(Kind::Delete, old_tokens, Vec::new()));
                    self.out.push(ChangeSet::new(Kind::Insert, Vec::new(), new_tokens));
                }
            }
        }
    }
}

impl<'a, P: Clone> Callback for ChangeSetCollector<'a, P> {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Start => {}
            Event::Finish => self.flush(),
            Event::Equal { old_index, new_index } => match self.pending {
                Pending::Equal { old_start, new_start, len }
                    if old_start + len == old_index && new_start + len == new_index =>
                {
                    self.pending = Pending::Equal { old_start, new_start, len: len + 1 };
                }
                _ => {
                    self.flush();
                    self.pending = Pending::Equal { old_start: old_index, new_start: new_index, len: 1 };
                }
            },
            // Within one non-equal stretch, old_index only ever advances via
            // Delete events and new_index only ever advances via Insert
            // events, so each side's own run is contiguous no matter how
            // the two interleave; only the first Delete or Insert of a
            // fresh group needs its start position recorded.
            Event::Delete { old_index } => match self.pending {
                Pending::Change { old_start, old_len, new_start, new_len } if old_len > 0 => {
                    self.pending = Pending::Change { old_start, old_len: old_len + 1, new_start, new_len };
                }
                Pending::Change { new_start, new_len, .. } => {
                    self.pending = Pending::Change { old_start: old_index, old_len: 1, new_start, new_len };
                }
                _ => {
                    self.flush();
                    self.pending = Pending::Change { old_start: old_index, old_len: 1, new_start: 0, new_len: 0 };
                }
            },
            Event::Insert { new_index } => match self.pending {
                Pending::Change { old_start, old_len, new_start, new_len } if new_len > 0 => {
                    self.pending = Pending::Change { old_start, old_len, new_start, new_len: new_len + 1 };
                }
                Pending::Change { old_start, old_len, .. } => {
                    self.pending = Pending::Change { old_start, old_len, new_start: new_index, new_len: 1 };
                }
                _ => {
                    self.flush();
                    self.pending = Pending::Change { old_start: 0, old_len: 0, new_start: new_index, new_len: 1 };
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn views(old: &str, new: &str) -> (Vec<u8>, Vec<Token<()>>, Vec<u8>, Vec<Token<()>>) {
        let old_tokens = crate::tokenizer::tokenize_words(old.as_bytes());
        let new_tokens = crate::tokenizer::tokenize_words(new.as_bytes());
        (old.as_bytes().to_vec(), old_tokens, new.as_bytes().to_vec(), new_tokens)
    }

    fn drive(old: &str, new: &str, events: &[Event], emit_equal: bool, emit_substitute: bool) -> Vec<ChangeSet<()>> {
        let (ob, ot, nb, nt) = views(old, new);
        let old_view = TokenView::new(&ob, &ot).unwrap();
        let new_view = TokenView::new(&nb, &nt).unwrap();
        let mut c = ChangeSetCollector::new(old_view, new_view, emit_equal, emit_substitute);
        for &e in events {
            c.on_event(e);
        }
        c.into_change_sets()
    }

    #[test]
    fn groups_contiguous_equal_run() {
        let events = [
            Event::Equal { old_index: 0, new_index: 0 },
            Event::Equal { old_index: 1, new_index: 1 },
            Event::Equal { old_index: 2, new_index: 2 },
            Event::Finish,
        ];
        let sets = drive("a b c", "a b c", &events, true, true);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].kind(), Kind::Equal);
        assert_eq!(sets[0].old_tokens().len(), 3);
    }

    #[test]
    fn equal_omitted_when_not_requested() {
        let events = [Event::Equal { old_index: 0, new_index: 0 }, Event::Finish];
        assert!(drive("a", "a", &events, false, true).is_empty());
    }

    #[test]
    fn delete_then_insert_merges_into_substitute_when_requested() {
        let events = [
            Event::Delete { old_index: 0 },
            Event::Delete { old_index: 1 },
            Event::Insert { new_index: 0 },
            Event::Finish,
        ];
        let sets = drive("a b", "x", &events, true, true);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].kind(), Kind::Substitute);
        assert_eq!(sets[0].old_tokens().len(), 2);
        assert_eq!(sets[0].new_tokens().len(), 1);
    }

    #[test]
    fn delete_then_insert_stays_split_when_substitute_not_requested() {
        let events = [Event::Delete { old_index: 0 }, Event::Insert { new_index: 0 }, Event::Finish];
        let sets = drive("a", "x", &events, true, false);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].kind(), Kind::Delete);
        assert_eq!(sets[1].kind(), Kind::Insert);
    }

    #[test]
    fn pure_delete_run_has_empty_new_tokens() {
        let events = [Event::Delete { old_index: 0 }, Event::Delete { old_index: 1 }, Event::Finish];
        let sets = drive("a b", "", &events, true, true);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].kind(), Kind::Delete);
        assert!(sets[0].new_tokens().is_empty());
    }
}
