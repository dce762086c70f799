//! The grapheme dictionary shipped with this crate and the trie built from it.

use crate::{
    entry_ty::GraphemeData, error::Result, matcher::GraphemeMatcher, trie_ty::GraphemeTrie,
};
use once_cell::sync::OnceCell;

const BUNDLED_GRAPHEMES: &str = include_str!("../data/graphemes.json");

static DEFAULT_TRIE: OnceCell<GraphemeTrie> = OnceCell::new();

/// Parses the bundled dictionary.
pub fn default_data() -> Result<GraphemeData> {
    let data = GraphemeData::from_json_str(BUNDLED_GRAPHEMES)?;
    log::debug!(
        "loaded {} bundled grapheme entries (Unicode {})",
        data.graphemes.len(),
        data.unicode_version
    );
    Ok(data)
}

/// Returns the trie over the bundled dictionary, building it on first use.
///
/// Concurrent first callers block until one of them finishes the build and
/// then all observe the same instance.
pub fn default_trie() -> Result<&'static GraphemeTrie> {
    DEFAULT_TRIE.get_or_try_init(|| GraphemeTrie::from_data(&default_data()?))
}

impl<'s> GraphemeMatcher<'static, 's> {
    /// Creates a matcher over `text` using the [`default_trie`].
    pub fn with_default_trie(text: &'s str) -> Result<Self> {
        Ok(GraphemeMatcher::new(default_trie()?, text))
    }
}
