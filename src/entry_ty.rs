use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io;

/// A sequence of raw code point values as they appear in a dictionary.
pub type CodePointSequence = smallvec::SmallVec<[u32; 8]>;

/// One dictionary record: a grapheme and every sequence that denotes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphemeEntry {
    /// Human readable name.
    pub name: String,
    /// Type tag, `emoji` or `pictographic`. Checked when the entry is inserted into a trie.
    #[serde(rename = "type")]
    pub ty: String,
    /// The preferred encoding.
    pub canonical_code_point_sequence: CodePointSequence,
    /// Other encodings of the same grapheme, e.g. without the emoji variation selector.
    #[serde(default)]
    pub alternative_code_point_sequences: Vec<CodePointSequence>,
}

impl GraphemeEntry {
    /// Creates an entry without alternative sequences.
    pub fn new<N, T, S>(name: N, ty: T, canonical: S) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        S: IntoIterator<Item = u32>,
    {
        GraphemeEntry {
            name: name.into(),
            ty: ty.into(),
            canonical_code_point_sequence: canonical.into_iter().collect(),
            alternative_code_point_sequences: Vec::new(),
        }
    }

    /// Adds an alternative sequence.
    pub fn with_alternative<S: IntoIterator<Item = u32>>(mut self, sequence: S) -> Self {
        self.alternative_code_point_sequences
            .push(sequence.into_iter().collect());
        self
    }

    /// Iterates the canonical sequence followed by every alternative sequence.
    pub fn sequences(&self) -> impl Iterator<Item = &[u32]> {
        std::iter::once(&self.canonical_code_point_sequence[..]).chain(
            self.alternative_code_point_sequences
                .iter()
                .map(|seq| &seq[..]),
        )
    }

    /// Renders the canonical sequence as text.
    /// Returns `None` if it contains a value that is not a Unicode scalar value.
    pub fn canonical_text(&self) -> Option<String> {
        sequence_text(&self.canonical_code_point_sequence)
    }
}

/// Renders a code point sequence as text, or `None` if a value is not a `char`.
pub fn sequence_text(code_points: &[u32]) -> Option<String> {
    code_points.iter().copied().map(char::from_u32).collect()
}

/// A complete grapheme dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphemeData {
    /// Version of the Unicode emoji data the dictionary was generated from.
    pub unicode_version: String,
    /// Every dictionary record.
    pub graphemes: Vec<GraphemeEntry>,
}

impl GraphemeData {
    /// Creates a dictionary from its parts.
    pub fn new<V: Into<String>>(unicode_version: V, graphemes: Vec<GraphemeEntry>) -> Self {
        GraphemeData {
            unicode_version: unicode_version.into(),
            graphemes,
        }
    }

    /// Parses a dictionary from its JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a dictionary from a reader producing its JSON document.
    pub fn from_json_reader<R: io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{CodePointSequence, GraphemeData, GraphemeEntry};
    use crate::error::GraphemeError;
    use smallvec::smallvec;

    const SAMPLE: &str = r#"{
        "unicodeVersion": "14.0",
        "graphemes": [
            {
                "name": "red heart",
                "type": "emoji",
                "canonicalCodePointSequence": [10084, 65039],
                "alternativeCodePointSequences": [[10084]]
            },
            {
                "name": "helm symbol",
                "type": "pictographic",
                "canonicalCodePointSequence": [9096]
            }
        ]
    }"#;

    #[test]
    fn test_parse_json() {
        let data = GraphemeData::from_json_str(SAMPLE).unwrap();
        assert_eq!("14.0", data.unicode_version);
        assert_eq!(2, data.graphemes.len());

        let heart = &data.graphemes[0];
        assert_eq!("red heart", heart.name);
        assert_eq!("emoji", heart.ty);
        assert_eq!(
            heart,
            &GraphemeEntry::new("red heart", "emoji", [0x2764, 0xFE0F]).with_alternative([0x2764])
        );

        let helm = &data.graphemes[1];
        assert!(helm.alternative_code_point_sequences.is_empty());
        assert_eq!(Some("\u{2388}".to_owned()), helm.canonical_text());
    }

    #[test]
    fn test_parse_from_reader() {
        let data = GraphemeData::from_json_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(2, data.graphemes.len());
    }

    #[test]
    fn test_parse_errors() {
        let missing_type = r#"{"unicodeVersion": "14.0", "graphemes": [
            {"name": "x", "canonicalCodePointSequence": [1]}
        ]}"#;
        assert!(matches!(
            GraphemeData::from_json_str(missing_type),
            Err(GraphemeError::Json(_))
        ));
        assert!(matches!(
            GraphemeData::from_json_str("[]"),
            Err(GraphemeError::Json(_))
        ));
    }

    #[test]
    fn test_sequences() {
        let entry = GraphemeEntry::new("keycap: 1", "emoji", [0x31, 0xFE0F, 0x20E3])
            .with_alternative([0x31, 0x20E3]);
        let seqs = entry.sequences().collect::<Vec<_>>();
        let expected_seqs: Vec<&[u32]> = vec![&[0x31, 0xFE0F, 0x20E3][..], &[0x31, 0x20E3][..]];
        assert_eq!(expected_seqs, seqs);
        let expected: Vec<CodePointSequence> = vec![smallvec![0x31, 0x20E3]];
        assert_eq!(expected, entry.alternative_code_point_sequences);
    }

    #[test]
    fn test_canonical_text_rejects_surrogates() {
        let entry = GraphemeEntry::new("bogus", "emoji", [0xD83D]);
        assert_eq!(None, entry.canonical_text());
    }
}
