use crate::{
    entry_ty::GraphemeEntry,
    error::{format_sequence, GraphemeError, Result},
    grapheme_ty::{Grapheme, GraphemeCharVec, GraphemeKind},
    trie_ty::{GraphemeTrie, TrieNode},
};
use std::{collections::HashMap, sync::Arc};

/// What to do when two different graphemes claim the same code point sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail with [`GraphemeError::AmbiguousSequence`].
    #[default]
    Reject,
    /// Keep the grapheme inserted last.
    LastWriteWins,
}

#[derive(Debug, Default)]
struct BuilderNode {
    children: HashMap<u32, BuilderNode>,
    grapheme: Option<Arc<Grapheme>>,
}

impl BuilderNode {
    fn find(&self, sequence: &[u32]) -> Option<&BuilderNode> {
        sequence
            .iter()
            .try_fold(self, |node, cp| node.children.get(cp))
    }

    fn compile(self) -> TrieNode {
        let mut children = self.children.into_iter().collect::<Vec<_>>();
        children.sort_unstable_by_key(|(cp, _)| *cp);
        let (code_points, children): (Vec<u32>, Vec<TrieNode>) = children
            .into_iter()
            .map(|(cp, child)| (cp, child.compile()))
            .unzip();
        TrieNode::new(
            code_points.into_boxed_slice(),
            children.into_boxed_slice(),
            self.grapheme,
        )
    }
}

/// Mutable trie representation used while a dictionary is loaded.
///
/// Call [`build`](GraphemeTrieBuilder::build) to compile it into an immutable
/// [`GraphemeTrie`].
#[derive(Debug, Default)]
pub struct GraphemeTrieBuilder {
    root: BuilderNode,
    policy: ConflictPolicy,
    grapheme_count: usize,
}

fn to_chars(name: &str, sequence: &[u32]) -> Result<GraphemeCharVec> {
    if sequence.is_empty() {
        return Err(GraphemeError::EmptySequence {
            name: name.to_owned(),
        });
    }
    sequence
        .iter()
        .map(|&code_point| {
            char::from_u32(code_point).ok_or_else(|| GraphemeError::InvalidCodePoint {
                name: name.to_owned(),
                code_point,
            })
        })
        .collect()
}

impl GraphemeTrieBuilder {
    /// Creates an empty builder that rejects ambiguous sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy applied when a sequence is claimed twice.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of entries pushed so far.
    pub fn grapheme_count(&self) -> usize {
        self.grapheme_count
    }

    /// Inserts the canonical and every alternative sequence of `entry`, all
    /// resolving to one shared grapheme.
    ///
    /// The entry is validated as a whole first; on error the builder is left
    /// as it was before the call.
    pub fn push_entry(&mut self, entry: &GraphemeEntry) -> Result<Arc<Grapheme>> {
        let kind: GraphemeKind = entry.ty.parse()?;
        let canonical = to_chars(&entry.name, &entry.canonical_code_point_sequence)?;
        for alternative in entry.alternative_code_point_sequences.iter() {
            to_chars(&entry.name, alternative)?;
        }
        let grapheme = Arc::new(Grapheme::new(kind, entry.name.clone(), canonical));

        if self.policy == ConflictPolicy::Reject {
            for sequence in entry.sequences() {
                self.check_conflict(sequence, &grapheme)?;
            }
        }
        for sequence in entry.sequences() {
            self.insert(sequence, Arc::clone(&grapheme));
        }
        self.grapheme_count += 1;
        Ok(grapheme)
    }

    fn check_conflict(&self, sequence: &[u32], grapheme: &Grapheme) -> Result<()> {
        let existing = self.root.find(sequence).and_then(|node| node.grapheme.as_deref());
        match existing {
            Some(existing) if existing != grapheme => {
                log::trace!(
                    "rejecting {} for {:?}, already mapped to {:?}",
                    format_sequence(sequence),
                    grapheme.name(),
                    existing.name()
                );
                Err(GraphemeError::AmbiguousSequence {
                    sequence: format_sequence(sequence),
                    existing: existing.name().to_owned(),
                    incoming: grapheme.name().to_owned(),
                })
            }
            _ => Ok(()),
        }
    }

    fn insert(&mut self, sequence: &[u32], grapheme: Arc<Grapheme>) {
        let mut node = &mut self.root;
        for cp in sequence.iter() {
            node = node.children.entry(*cp).or_default();
        }
        if let Some(existing) = &node.grapheme {
            if **existing != *grapheme {
                log::trace!(
                    "overwriting {} ({:?} -> {:?})",
                    format_sequence(sequence),
                    existing.name(),
                    grapheme.name()
                );
            }
        }
        node.grapheme = Some(grapheme);
    }

    /// Compiles the builder into an immutable trie with sorted child arrays.
    pub fn build(self) -> GraphemeTrie {
        let grapheme_count = self.grapheme_count;
        GraphemeTrie::from_root(self.root.compile(), grapheme_count)
    }
}
