use crate::error::GraphemeError;
use std::{fmt, str::FromStr};

/// Dictionary type tag for [`GraphemeKind::Emoji`].
pub const EMOJI_TYPE: &str = "emoji";

/// Dictionary type tag for [`GraphemeKind::Pictographic`].
pub const PICTOGRAPHIC_TYPE: &str = "pictographic";

pub(crate) type GraphemeCharVec = smallvec::SmallVec<[char; 8]>;

/// The kind of a grapheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphemeKind {
    /// A fully supported emoji, including modifier and ZWJ sequences.
    Emoji,
    /// An extended pictographic symbol that is not an emoji.
    Pictographic,
}

impl GraphemeKind {
    /// Returns the dictionary type tag of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            GraphemeKind::Emoji => EMOJI_TYPE,
            GraphemeKind::Pictographic => PICTOGRAPHIC_TYPE,
        }
    }
}

impl FromStr for GraphemeKind {
    type Err = GraphemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EMOJI_TYPE => Ok(GraphemeKind::Emoji),
            PICTOGRAPHIC_TYPE => Ok(GraphemeKind::Pictographic),
            other => Err(GraphemeError::UnrecognizedType(other.to_owned())),
        }
    }
}

impl fmt::Display for GraphemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named emoji or pictographic symbol.
///
/// A grapheme may be reachable through several code point sequences; it
/// always remembers the canonical one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grapheme {
    kind: GraphemeKind,
    name: String,
    canonical: GraphemeCharVec,
}

impl Grapheme {
    pub(crate) fn new(kind: GraphemeKind, name: String, canonical: GraphemeCharVec) -> Self {
        Grapheme {
            kind,
            name,
            canonical,
        }
    }

    /// Returns the kind of this grapheme.
    pub fn kind(&self) -> GraphemeKind {
        self.kind
    }

    /// Returns the human readable name, e.g. `slightly smiling face`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the preferred code point encoding of this grapheme.
    pub fn canonical_sequence(&self) -> &[char] {
        &self.canonical
    }

    /// Returns whether this grapheme is an emoji.
    pub fn is_emoji(&self) -> bool {
        self.kind == GraphemeKind::Emoji
    }
}

impl fmt::Display for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.canonical.iter() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Grapheme, GraphemeKind};
    use crate::error::GraphemeError;
    use smallvec::smallvec;

    #[test]
    fn test_kind_tags() {
        assert_eq!(GraphemeKind::Emoji, "emoji".parse::<GraphemeKind>().unwrap());
        assert_eq!(
            GraphemeKind::Pictographic,
            "pictographic".parse::<GraphemeKind>().unwrap()
        );
        assert_eq!("pictographic", GraphemeKind::Pictographic.to_string());
        assert!(matches!(
            "Emoji".parse::<GraphemeKind>(),
            Err(GraphemeError::UnrecognizedType(tag)) if tag == "Emoji"
        ));
    }

    #[test]
    fn test_display_renders_canonical_sequence() {
        let woman = Grapheme::new(
            GraphemeKind::Emoji,
            "woman: medium skin tone".into(),
            smallvec!['\u{1F469}', '\u{1F3FD}'],
        );
        assert_eq!("\u{1F469}\u{1F3FD}", woman.to_string());
        assert_eq!("woman: medium skin tone", woman.name());
        assert!(woman.is_emoji());
    }
}
