//! A collaborator interface for turning raw bytes into [`Token`]s, plus a
//! byte-oriented default implementation usable without a syntax tree.
//!
//! The default tokenizer's character classes and boundary rules are ported
//! from a character-class state machine (`tokenizer_feed`/`tokenizer_feed_`)
//! that drove a C extension's token scanner: switch over the current byte to
//! assign it a class, flush the run so far whenever the class changes (or a
//! bracket/quote forces an immediate flush), and fold the previous run's
//! class, "don't start a line here" flag, and whitespace-drop decision into
//! the emitted token.

use crate::token::Token;

/// Coarse lexical class of a byte, mirroring a C tokenizer's `CharType` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Invalid,
    Other,
    Alpha,
    Digit,
    Blank,
    Space,
    Line,
    Punct,
    Quote,
    Bracket,
    Arith,
}

/// Which side of a bracket pair a [`CharClass::Bracket`] byte closed or
/// opened, kept only long enough to compute [`TokenMeta::dont_start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BracketSide {
    Open,
    Closed,
}

/// A convenience classification layered on top of [`CharClass`] when
/// `ignore_comments` is set, recognizing `//` and `/* ... */` runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    Class(CharClass),
    Comment,
}

/// Opaque per-token payload the default tokenizer attaches: the run's
/// lexical class, plus two flags a collaborator may compute but the diff
/// core never reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenMeta {
    pub token_type: TokenType,
    /// Set when this token starts a line immediately after punctuation or a
    /// closing bracket; a caller-side rendering concern the core is opaque
    /// to.
    pub dont_start: bool,
    /// Reserved for a caller-synthesized token with no backing bytes
    /// (`start_byte == end_byte`). The default tokenizer never sets this.
    pub implicit: bool,
}

impl TokenMeta {
    fn new(token_type: TokenType, dont_start: bool) -> Self {
        TokenMeta { token_type, dont_start, implicit: false }
    }
}

/// A source of tokens for one side of a comparison. Implementors own the
/// decision of what counts as an atomic unit; the diff core only ever
/// compares token byte ranges for equality.
///
/// `ignore_whitespace`/`ignore_comments` are forwarded from
/// [`crate::driver::DiffOptions`] on every call rather than configured once
/// on the tokenizer, so the same collaborator instance can serve calls with
/// different options.
pub trait Tokenizer<P> {
    fn tokenize(&self, input: &[u8], ignore_whitespace: bool, ignore_comments: bool) -> Vec<Token<P>>;
}

/// The default collaborator: a single-pass byte-class scanner with no
/// notion of a grammar, usable on any input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteTokenizer;

impl ByteTokenizer {
    pub fn new() -> Self {
        ByteTokenizer::default()
    }
}

fn classify(c: u8) -> (CharClass, Option<BracketSide>) {
    match c {
        b'\t' | b' ' => (CharClass::Space, None),
        b'\r' | b'\n' => (CharClass::Line, None),
        b'"' | b'\'' => (CharClass::Quote, None),
        b'(' | b'[' | b'{' => (CharClass::Bracket, Some(BracketSide::Open)),
        b')' | b']' | b'}' => (CharClass::Bracket, Some(BracketSide::Closed)),
        b'<' | b'>' => (CharClass::Bracket, None),
        b'*' | b'+' | b'-' | b'/' | b'=' => (CharClass::Arith, None),
        b'0'..=b'9' => (CharClass::Digit, None),
        b'A'..=b'Z' | b'a'..=b'z' => (CharClass::Alpha, None),
        b'!' | b'#' | b'$' | b'%' | b'&' | b',' | b'.' | b':' | b';' | b'?' | b'@' | b'\\'
        | b'^' | b'_' | b'`' | b'|' | b'~' => (CharClass::Punct, None),
        0x0B | 0x0C => (CharClass::Other, None),
        0x00..=0x08 => (CharClass::Other, None),
        0x0E..=0x1F => (CharClass::Other, None),
        _ => (CharClass::Invalid, None),
    }
}

struct Run {
    start: usize,
    class: CharClass,
    prev_bracket: Option<BracketSide>,
}

impl Tokenizer<TokenMeta> for ByteTokenizer {
    fn tokenize(&self, input: &[u8], ignore_whitespace: bool, ignore_comments: bool) -> Vec<Token<TokenMeta>> {
        let raw = tokenize_meta(input, ignore_whitespace, ignore_comments);
        raw.into_iter()
            .map(|(start, end, meta)| Token::new(start as u32, end as u32, meta))
            .collect()
    }
}

/// Runs the character-class state machine over `input`, returning
/// `(start_byte, end_byte, TokenMeta)` triples.
///
/// A forced flush happens immediately after a bracket or quote byte, so a
/// `(` or `"` is always its own token regardless of what precedes or
/// follows it. Otherwise a run continues as long as consecutive bytes share
/// a class, and breaks the instant the class changes. A one-byte lookahead
/// past the end of `input` (mirroring the trailing `tokenizer_feed(..,
/// '\0', ..)` call in the C source) flushes the final run.
fn flush_run(
    out: &mut Vec<(usize, usize, TokenMeta)>,
    run: &Run,
    end: usize,
    next_class: CharClass,
    ignore_whitespace: bool,
    inside_quote: bool,
) {
    if end == run.start {
        return;
    }
    let is_whitespace = matches!(run.class, CharClass::Space | CharClass::Line);
    if ignore_whitespace && is_whitespace && !inside_quote {
        return;
    }
    let dont_start = next_class == CharClass::Line
        && (run.class == CharClass::Punct
            || (run.class == CharClass::Bracket && run.prev_bracket == Some(BracketSide::Closed)));
    out.push((run.start, end, TokenMeta::new(TokenType::Class(run.class), dont_start)));
}

fn tokenize_meta(
    input: &[u8],
    ignore_whitespace: bool,
    ignore_comments: bool,
) -> Vec<(usize, usize, TokenMeta)> {
    let mut out = Vec::new();
    let mut run: Option<Run> = None;
    let mut force_flush_next = false;
    // Tracks whether we are inside a single- or double-quoted run, so a
    // whitespace token inside a quoted string is never dropped even when
    // `ignore_whitespace` is set.
    let mut inside_quote = false;

    for i in 0..=input.len() {
        let (class, bracket) = if i < input.len() {
            classify(input[i])
        } else {
            // Sentinel past-the-end byte: always forces the final run closed.
            (CharClass::Invalid, None)
        };

        // inside_quote reflects the state *before* this byte toggles it, so
        // a whitespace run that ends exactly at a quote still sees whether
        // it was inside the string that quote closes.
        let inside_quote_for_flush = inside_quote;

        if i < input.len() && (input[i] == b'"' || input[i] == b'\'') {
            inside_quote = !inside_quote;
        }

        let changed = match &run {
            Some(r) => r.class != class,
            None => i > 0,
        };

        if force_flush_next || (changed && i > 0) {
            if let Some(r) = &run {
                flush_run(&mut out, r, i, class, ignore_whitespace, inside_quote_for_flush);
            }
            force_flush_next = false;
            run = Some(Run { start: i, class, prev_bracket: bracket });
        } else if run.is_none() {
            run = Some(Run { start: i, class, prev_bracket: bracket });
        }

        if matches!(class, CharClass::Bracket | CharClass::Quote) {
            force_flush_next = true;
        }
    }

    if ignore_comments {
        merge_comment_runs(input, &mut out);
    }

    out
}

/// Collapses consecutive tokens that together spell a `//...` or `/* ... */`
/// comment into a single [`TokenType::Comment`] token, so line-comment text
/// edits don't register as token-level churn when the caller asked to
/// ignore comments.
fn merge_comment_runs(input: &[u8], tokens: &mut Vec<(usize, usize, TokenMeta)>) {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let (start, end, meta) = tokens[i];
        if input[start..end].starts_with(b"//") {
            let mut j = i + 1;
            while j < tokens.len() && !input[tokens[j].0..tokens[j].1].contains(&b'\n') {
                j += 1;
            }
            let last_end = if j < tokens.len() { tokens[j].1 } else { tokens[j - 1].1 };
            merged.push((start, last_end, TokenMeta::new(TokenType::Comment, meta.dont_start)));
            i = if j < tokens.len() { j + 1 } else { j };
            continue;
        }
        if input[start..end].starts_with(b"/*") {
            let mut j = i;
            let mut last_end = end;
            while j < tokens.len() {
                last_end = tokens[j].1;
                if input[tokens[j].0..tokens[j].1].ends_with(b"*/") {
                    break;
                }
                j += 1;
            }
            merged.push((start, last_end, TokenMeta::new(TokenType::Comment, meta.dont_start)));
            i = j + 1;
            continue;
        }
        merged.push((start, end, meta));
        i += 1;
    }
    *tokens = merged;
}

/// Test-only helper: whitespace-delimited word tokenizer used where tests
/// want predictable, human-readable tokens instead of the byte-class
/// machine's finer-grained output.
#[cfg(test)]
pub fn tokenize_words(input: &[u8]) -> Vec<Token<()>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &b) in input.iter().enumerate() {
        if b.is_ascii_whitespace() {
            if let Some(s) = start.take() {
                out.push(Token::new(s as u32, i as u32, ()));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Token::new(s as u32, input.len() as u32, ()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, ignore_ws: bool) -> Vec<(String, TokenType)> {
        tokenize_meta(input.as_bytes(), ignore_ws, false)
            .into_iter()
            .map(|(s, e, m)| (String::from_utf8_lossy(&input.as_bytes()[s..e]).into_owned(), m.token_type))
            .collect()
    }

    #[test]
    fn splits_on_class_change() {
        let toks = run("abc123", false);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].0, "abc");
        assert_eq!(toks[1].0, "123");
    }

    #[test]
    fn brackets_and_quotes_force_their_own_token() {
        let toks = run("foo(bar)", false);
        let texts: Vec<_> = toks.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["foo", "(", "bar", ")"]);
    }

    #[test]
    fn ignore_whitespace_drops_space_runs() {
        let toks = run("a  b", true);
        let texts: Vec<_> = toks.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn whitespace_kept_inside_quotes_even_when_ignored() {
        let toks = run("\"a b\"", true);
        let texts: Vec<_> = toks.iter().map(|(t, _)| t.as_str()).collect();
        // the quote chars are their own tokens; "a b" inner run still splits
        // on class but is not dropped since it's inside a quoted span.
        assert!(texts.contains(&"a"));
        assert!(texts.contains(&"b"));
    }

    #[test]
    fn ignore_comments_merges_line_comment() {
        let toks = tokenize_meta(b"x // trailing note\ny", false, true);
        let texts: Vec<_> = toks
            .iter()
            .map(|(s, e, _)| String::from_utf8_lossy(&b"x // trailing note\ny"[*s..*e]).into_owned())
            .collect();
        assert!(texts.iter().any(|t| t.starts_with("//")));
    }

    #[test]
    fn word_tokenizer_splits_on_ascii_whitespace() {
        let toks = tokenize_words(b"a  bb ccc");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[2].start_byte, 6);
        assert_eq!(toks[2].end_byte, 9);
    }
}
