#![forbid(unsafe_code)]
#![deny(missing_docs, missing_debug_implementations)]
//! Finding emoji and pictographic graphemes in text.
//!
//! A grapheme here is a named emoji or pictographic symbol from a fixed dictionary. Many of them span
//! several code points: skin tone modifiers, zero width joiner (ZWJ) sequences, keycaps, flags, and
//! emoji variation selectors. This crate does not implement the Unicode text segmentation rules; it
//! only recognizes sequences the dictionary knows about.
//!
//! The `GraphemeTrie` type is a prefix tree keyed by code point that indexes every sequence of every
//! dictionary entry. It is built once through `GraphemeTrieBuilder` and is immutable afterwards, so it
//! can be shared freely between threads.
//!
//! The `GraphemeMatcher` type is a cursor over one text and one trie. Each call to `find` yields the
//! next non-overlapping match, and among the sequences starting at one position the longest wins.
//!
//! # Offsets
//!
//! Match offsets are UTF-8 byte offsets into the scanned `str`, so `&text[m.start()..m.end()]` is the
//! matched text.
//!
//! # Example
//!
//! ```
//! use graphemestr::{GraphemeEntry, GraphemeMatch, GraphemeTrie};
//!
//! let entries = [
//!     GraphemeEntry::new("woman", "emoji", [0x1F469]),
//!     GraphemeEntry::new("woman: dark skin tone", "emoji", [0x1F469, 0x1F3FF]),
//! ];
//! let trie = GraphemeTrie::from_entries(&entries).unwrap();
//!
//! let mut m = trie.matcher("hi \u{1F469}\u{1F3FF}!");
//! assert!(m.find());
//! assert_eq!(3, m.start().unwrap());
//! assert_eq!("woman: dark skin tone", m.grapheme().unwrap().name());
//!
//! let replaced = m.replace_all(|r: &GraphemeMatch<'_, '_>| format!("<{}>", r.grapheme().name()));
//! assert_eq!("hi <woman: dark skin tone>!", replaced);
//! ```
//!
//! # Default dictionary
//!
//! With the `default-data` feature (enabled by default) a dictionary is compiled into the crate, and
//! `default_trie` builds a trie over it on first use.

pub(crate) mod error;

pub(crate) mod utf8;

pub(crate) mod grapheme_ty;

pub(crate) mod entry_ty;

pub(crate) mod trie_builder;

pub(crate) mod trie_ty;

pub(crate) mod matcher;

#[cfg(feature = "default-data")]
pub(crate) mod default_trie;

pub use error::{GraphemeError, Result};

pub use grapheme_ty::{Grapheme, GraphemeKind, EMOJI_TYPE, PICTOGRAPHIC_TYPE};

pub use entry_ty::{sequence_text, CodePointSequence, GraphemeData, GraphemeEntry};

pub use trie_builder::{ConflictPolicy, GraphemeTrieBuilder};

pub use trie_ty::{GraphemeTrie, TrieNode};

pub use matcher::{GraphemeMatch, GraphemeMatcher, Replacer, Results};

#[cfg(feature = "default-data")]
pub use default_trie::{default_data, default_trie};
