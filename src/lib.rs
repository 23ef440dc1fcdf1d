//! A token-level diff engine: computes a structured edit script between
//! two token sequences and returns it as an ordered list of [`ChangeSet`]s.
//!
//! The engine itself only ever compares byte ranges for equality; what
//! counts as a token is the caller's choice, expressed through the
//! [`Tokenizer`] trait. A byte-oriented default ([`ByteTokenizer`]) is
//! included so the crate works standalone on raw text; an embedder with a
//! real syntax tree is free to supply its own token stream instead.
//!
//! ```
//! use tokdiff::{diff, DiffOptions, tokenizer::ByteTokenizer};
//!
//! let tokenizer = ByteTokenizer::new();
//! let options = DiffOptions::new().ignore_whitespace(true);
//! let change_sets = diff(&tokenizer, b"a + b", b"a - b", &options).unwrap();
//! assert!(!change_sets.is_empty());
//! ```

mod arena;
pub mod changeset;
mod collector;
mod driver;
pub mod error;
mod myers;
mod path;
pub mod token;
pub mod tokenizer;
mod walk;

pub use changeset::{ChangeSet, Kind};
pub use driver::{diff, DiffOptions};
pub use error::{Error, Result};
pub use token::{Token, TokenView};
pub use tokenizer::Tokenizer;
pub use walk::{Callback, Event};
