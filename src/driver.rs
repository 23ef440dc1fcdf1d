//! The public entry point: tokenizes both sides, trims identical
//! prefix/suffix runs, runs the Myers search over what's left, and groups
//! the result into [`ChangeSet`]s.

use crate::changeset::ChangeSet;
use crate::collector::ChangeSetCollector;
use crate::error::{Error, Result};
use crate::myers::{max_d, Box as EditBox, V};
use crate::path::find_path;
use crate::token::{common_prefix_len, common_suffix_len, TokenView};
use crate::tokenizer::Tokenizer;
use crate::walk::walk_path;

/// Configuration accepted by [`diff`]. Construct with [`DiffOptions::new`]
/// (equivalent to [`Default::default`]) and adjust with the builder
/// methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    pub emit_equal: bool,
    pub emit_substitute: bool,
    pub ignore_whitespace: bool,
    pub ignore_comments: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions { emit_equal: true, emit_substitute: true, ignore_whitespace: false, ignore_comments: false }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        DiffOptions::default()
    }

    pub fn emit_equal(mut self, yes: bool) -> Self {
        self.emit_equal = yes;
        self
    }

    pub fn emit_substitute(mut self, yes: bool) -> Self {
        self.emit_substitute = yes;
        self
    }

    pub fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    pub fn ignore_comments(mut self, yes: bool) -> Self {
        self.ignore_comments = yes;
        self
    }
}

/// Computes the token-level edit script between `old_bytes` and
/// `new_bytes` using `tokenizer` to split each side into tokens.
///
/// Returns an empty list when the two byte buffers (or, after
/// tokenization, the two token sequences) are identical.
pub fn diff<P: Clone>(
    tokenizer: &dyn Tokenizer<P>,
    old_bytes: &[u8],
    new_bytes: &[u8],
    options: &DiffOptions,
) -> Result<Vec<ChangeSet<P>>> {
    if old_bytes == new_bytes {
        log::debug!("diff: byte-identical input, short-circuiting");
        return Ok(Vec::new());
    }

    let old_tokens = tokenizer.tokenize(old_bytes, options.ignore_whitespace, options.ignore_comments);
    let new_tokens = tokenizer.tokenize(new_bytes, options.ignore_whitespace, options.ignore_comments);
    let old = TokenView::new(old_bytes, &old_tokens)?;
    let new = TokenView::new(new_bytes, &new_tokens)?;

    let prefix_len = common_prefix_len(old, new);
    if prefix_len == old.len() && prefix_len == new.len() {
        log::debug!(
            "diff: old_tokens={} new_tokens={} token-identical after tokenization",
            old.len(),
            new.len()
        );
        return Ok(Vec::new());
    }

    let max_suffix = old.len().min(new.len()) - prefix_len;
    let suffix_len = {
        let old_rest = old.slice(prefix_len..old.len());
        let new_rest = new.slice(prefix_len..new.len());
        common_suffix_len(old_rest, new_rest).min(max_suffix)
    };

    if prefix_len + suffix_len >= old.len().max(new.len()) {
        return Err(Error::InvariantViolation(format!(
            "prefix+suffix trim ({prefix_len}+{suffix_len}) left no non-equal token on the longer side \
             (old_len={}, new_len={})",
            old.len(),
            new.len()
        )));
    }

    let mut collector = ChangeSetCollector::new(old, new, options.emit_equal, options.emit_substitute);

    if options.emit_equal && prefix_len > 0 {
        for i in 0..prefix_len {
            collector.on_event(crate::walk::Event::Equal { old_index: i, new_index: i });
        }
    }

    let inner_old = old.slice(prefix_len..old.len() - suffix_len);
    let inner_new = new.slice(prefix_len..new.len() - suffix_len);
    let outer = EditBox::new(0, 0, inner_old.len() as i64, inner_new.len() as i64);

    let mut arena = crate::arena::PathArena::new();
    let d_max = max_d(&outer).max(1);
    let mut vf = V::new(d_max);
    let mut vb = V::new(d_max);
    let head = find_path(inner_old, inner_new, outer, &mut arena, &mut vf, &mut vb)?;

    // Re-base the walker's indices from the trimmed inner rectangle back
    // onto the untrimmed token sequences. The inner walk's own Start/Finish
    // are swallowed here rather than forwarded: the collector sees exactly
    // one Finish, at the very end of the whole driver-level sequence
    // (including the suffix equal run below), so a trailing inner Equal run
    // stays merged with the trimmed suffix instead of being flushed early.
    let mut rebased = Vec::new();
    walk_path(&arena, head, &mut |e: crate::walk::Event| rebased.push(e))?;
    for e in rebased {
        let shifted = match e {
            crate::walk::Event::Start | crate::walk::Event::Finish => continue,
            crate::walk::Event::Equal { old_index, new_index } => {
                crate::walk::Event::Equal { old_index: old_index + prefix_len, new_index: new_index + prefix_len }
            }
            crate::walk::Event::Delete { old_index } => {
                crate::walk::Event::Delete { old_index: old_index + prefix_len }
            }
            crate::walk::Event::Insert { new_index } => {
                crate::walk::Event::Insert { new_index: new_index + prefix_len }
            }
        };
        collector.on_event(shifted);
    }

    if options.emit_equal && suffix_len > 0 {
        let base_old = old.len() - suffix_len;
        let base_new = new.len() - suffix_len;
        for i in 0..suffix_len {
            collector.on_event(crate::walk::Event::Equal { old_index: base_old + i, new_index: base_new + i });
        }
    }
    collector.on_event(crate::walk::Event::Finish);

    let change_sets = collector.into_change_sets();
    log::debug!(
        "diff: old_tokens={} new_tokens={} prefix={} suffix={} change_sets={}",
        old.len(),
        new.len(),
        prefix_len,
        suffix_len,
        change_sets.len()
    );
    Ok(change_sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::ByteTokenizer;

    fn words(s: &str) -> Vec<crate::token::Token<()>> {
        crate::tokenizer::tokenize_words(s.as_bytes())
    }

    struct WordTokenizer;
    impl Tokenizer<()> for WordTokenizer {
        fn tokenize(&self, input: &[u8], _ignore_whitespace: bool, _ignore_comments: bool) -> Vec<crate::token::Token<()>> {
            words(std::str::from_utf8(input).unwrap())
        }
    }

    #[test]
    fn identical_inputs_produce_no_change_sets() {
        let options = DiffOptions::new();
        let sets = diff(&WordTokenizer, b"a b c d", b"a b c d", &options).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn single_substitution_in_the_middle() {
        let options = DiffOptions::new();
        let sets = diff(&WordTokenizer, b"a b c", b"a x c", &options).unwrap();
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].kind(), crate::changeset::Kind::Equal);
        assert_eq!(sets[1].kind(), crate::changeset::Kind::Substitute);
        assert_eq!(sets[2].kind(), crate::changeset::Kind::Equal);
    }

    #[test]
    fn pure_insert_at_the_end() {
        let options = DiffOptions::new();
        let sets = diff(&WordTokenizer, b"x y", b"x y z", &options).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].kind(), crate::changeset::Kind::Equal);
        assert_eq!(sets[1].kind(), crate::changeset::Kind::Insert);
        assert_eq!(sets[1].new_tokens().len(), 1);
    }

    #[test]
    fn total_replacement() {
        let options = DiffOptions::new();
        let sets = diff(&WordTokenizer, b"a b", b"c d", &options).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].kind(), crate::changeset::Kind::Substitute);
    }

    #[test]
    fn byte_tokenizer_round_trips_through_the_driver() {
        let tokenizer = ByteTokenizer::new();
        let options = DiffOptions::new().ignore_whitespace(true);
        let sets = diff(&tokenizer, b"let x = 1;", b"let x = 2;", &options).unwrap();
        assert!(!sets.is_empty());
    }
}
