use crate::{
    entry_ty::{GraphemeData, GraphemeEntry},
    error::Result,
    grapheme_ty::Grapheme,
    matcher::GraphemeMatcher,
    trie_builder::{ConflictPolicy, GraphemeTrieBuilder},
};
use std::sync::Arc;

/// A node of a compiled [`GraphemeTrie`].
///
/// Children are kept in a sorted key array with a parallel node array, so a
/// lookup is a bounds check followed by a binary search.
#[derive(Debug)]
pub struct TrieNode {
    code_points: Box<[u32]>,
    children: Box<[TrieNode]>,
    grapheme: Option<Arc<Grapheme>>,
}

impl TrieNode {
    pub(crate) fn new(
        code_points: Box<[u32]>,
        children: Box<[TrieNode]>,
        grapheme: Option<Arc<Grapheme>>,
    ) -> Self {
        debug_assert_eq!(code_points.len(), children.len());
        debug_assert!(code_points.windows(2).all(|w| w[0] < w[1]));
        TrieNode {
            code_points,
            children,
            grapheme,
        }
    }

    /// Returns the child reached through `code_point`, if any.
    #[inline]
    pub fn child(&self, code_point: u32) -> Option<&TrieNode> {
        match (self.code_points.first(), self.code_points.last()) {
            (Some(&first), Some(&last)) if first <= code_point && code_point <= last => self
                .code_points
                .binary_search(&code_point)
                .ok()
                .map(|idx| &self.children[idx]),
            _ => None,
        }
    }

    /// Returns the grapheme whose sequence ends at this node, if any.
    #[inline]
    pub fn grapheme(&self) -> Option<&Grapheme> {
        self.grapheme.as_deref()
    }

    /// Returns the sorted code points this node branches on.
    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns whether this node is a leaf.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn depth(&self) -> usize {
        1 + self.children.iter().map(TrieNode::depth).max().unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(TrieNode::node_count).sum::<usize>()
    }
}

/// An immutable prefix tree over code point sequences of known graphemes.
///
/// A trie is built once and may then be shared across threads by reference;
/// every [`GraphemeMatcher`] borrows one.
#[derive(Debug)]
pub struct GraphemeTrie {
    root: TrieNode,
    grapheme_count: usize,
    node_count: usize,
    depth: usize,
}

impl GraphemeTrie {
    pub(crate) fn from_root(root: TrieNode, grapheme_count: usize) -> Self {
        let node_count = root.node_count();
        let depth = root.depth();
        log::debug!(
            "compiled grapheme trie: {} graphemes, {} nodes, depth {}",
            grapheme_count,
            node_count,
            depth
        );
        GraphemeTrie {
            root,
            grapheme_count,
            node_count,
            depth,
        }
    }

    /// Builds a trie from dictionary entries, rejecting ambiguous sequences.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a GraphemeEntry>,
    {
        Self::from_entries_with_policy(entries, ConflictPolicy::default())
    }

    /// Builds a trie from dictionary entries with an explicit conflict policy.
    pub fn from_entries_with_policy<'a, I>(entries: I, policy: ConflictPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a GraphemeEntry>,
    {
        let mut builder = GraphemeTrieBuilder::new().with_conflict_policy(policy);
        for entry in entries {
            builder.push_entry(entry)?;
        }
        Ok(builder.build())
    }

    /// Builds a trie from a complete dictionary.
    pub fn from_data(data: &GraphemeData) -> Result<Self> {
        Self::from_entries(&data.graphemes)
    }

    /// Returns the node for the empty prefix.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Looks up the grapheme for exactly `sequence`.
    pub fn get(&self, sequence: &[u32]) -> Option<&Grapheme> {
        sequence
            .iter()
            .try_fold(&self.root, |node, &cp| node.child(cp))?
            .grapheme()
    }

    /// Number of dictionary entries the trie was built from.
    pub fn grapheme_count(&self) -> usize {
        self.grapheme_count
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Length of the longest root-to-leaf path counting the root, so an empty trie has depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Creates a matcher scanning `text` against this trie.
    pub fn matcher<'s>(&self, text: &'s str) -> GraphemeMatcher<'_, 's> {
        GraphemeMatcher::new(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::GraphemeTrie;
    use crate::{
        entry_ty::GraphemeEntry, grapheme_ty::GraphemeKind, trie_builder::GraphemeTrieBuilder,
    };

    fn women() -> Vec<GraphemeEntry> {
        vec![
            GraphemeEntry::new("woman", "emoji", [0x1F469]),
            GraphemeEntry::new("woman: light skin tone", "emoji", [0x1F469, 0x1F3FB]),
            GraphemeEntry::new("woman: dark skin tone", "emoji", [0x1F469, 0x1F3FF]),
            GraphemeEntry::new("woman technologist", "emoji", [0x1F469, 0x200D, 0x1F4BB]),
            GraphemeEntry::new("helm symbol", "pictographic", [0x2388]),
        ]
    }

    #[test]
    fn test_child_lookup() {
        let trie = GraphemeTrie::from_entries(&women()).unwrap();
        let root = trie.root();
        assert_eq!(&[0x2388u32, 0x1F469], root.code_points());
        assert!(root.grapheme().is_none());
        assert!(root.child(0x41).is_none());
        assert!(root.child(0xFFFFF).is_none());

        let woman = root.child(0x1F469).unwrap();
        assert_eq!("woman", woman.grapheme().unwrap().name());
        assert_eq!(&[0x200Du32, 0x1F3FB, 0x1F3FF], woman.code_points());
        assert_eq!(3, woman.len());
        assert!(woman.child(0x1F3FC).is_none());

        let zwj = woman.child(0x200D).unwrap();
        assert!(zwj.grapheme().is_none());
        let technologist = zwj.child(0x1F4BB).unwrap();
        assert!(technologist.is_empty());
        assert_eq!(
            GraphemeKind::Emoji,
            technologist.grapheme().unwrap().kind()
        );
    }

    #[test]
    fn test_get() {
        let trie = GraphemeTrie::from_entries(&women()).unwrap();
        assert_eq!(
            "woman: dark skin tone",
            trie.get(&[0x1F469, 0x1F3FF]).unwrap().name()
        );
        assert_eq!(
            GraphemeKind::Pictographic,
            trie.get(&[0x2388]).unwrap().kind()
        );
        assert!(trie.get(&[0x1F469, 0x200D]).is_none());
        assert!(trie.get(&[]).is_none());
    }

    #[test]
    fn test_stats() {
        let trie = GraphemeTrie::from_entries(&women()).unwrap();
        assert_eq!(5, trie.grapheme_count());
        // root, helm, woman, two skin tones, zwj, technologist
        assert_eq!(7, trie.node_count());
        assert_eq!(4, trie.depth());

        let empty = GraphemeTrieBuilder::new().build();
        assert_eq!(1, empty.depth());
        assert_eq!(1, empty.node_count());
        assert!(empty.root().is_empty());
    }

    #[test]
    fn test_trie_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphemeTrie>();
    }

    #[test]
    fn test_concurrent_reads() {
        let trie = GraphemeTrie::from_entries(&women()).unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut m = trie.matcher("\u{1F469}\u{1F3FB} and \u{2388}");
                    assert!(m.find());
                    assert_eq!("woman: light skin tone", m.grapheme().unwrap().name());
                    assert!(m.find());
                    assert_eq!("helm symbol", m.grapheme().unwrap().name());
                    assert!(!m.find());
                });
            }
        });
    }
}
