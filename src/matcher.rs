use crate::{
    error::{GraphemeError, Result},
    grapheme_ty::Grapheme,
    trie_ty::GraphemeTrie,
    utf8,
};
use std::{fmt, iter::FusedIterator, ops::Range};

/// A single grapheme found in a text.
///
/// Offsets are UTF-8 byte offsets, so `&text[m.start()..m.end()]` is always valid.
#[derive(Copy, Clone)]
pub struct GraphemeMatch<'t, 's> {
    text: &'s str,
    start: usize,
    end: usize,
    grapheme: &'t Grapheme,
}

impl<'t, 's> GraphemeMatch<'t, 's> {
    /// Byte offset where the match begins, inclusive.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset where the match ends, exclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The byte range of the match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text.
    pub fn as_str(&self) -> &'s str {
        &self.text[self.start..self.end]
    }

    /// The grapheme the matched text denotes.
    pub fn grapheme(&self) -> &'t Grapheme {
        self.grapheme
    }
}

impl fmt::Debug for GraphemeMatch<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeMatch")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("text", &self.as_str())
            .field("name", &self.grapheme.name())
            .finish()
    }
}

/// Produces the text that replaces a match.
pub trait Replacer {
    /// Appends the replacement for `m` to `dst`.
    fn replace_append(&mut self, m: &GraphemeMatch<'_, '_>, dst: &mut String);
}

impl Replacer for &str {
    fn replace_append(&mut self, _: &GraphemeMatch<'_, '_>, dst: &mut String) {
        dst.push_str(self);
    }
}

impl Replacer for String {
    fn replace_append(&mut self, _: &GraphemeMatch<'_, '_>, dst: &mut String) {
        dst.push_str(self);
    }
}

impl<F, T> Replacer for F
where
    F: FnMut(&GraphemeMatch<'_, '_>) -> T,
    T: AsRef<str>,
{
    fn replace_append(&mut self, m: &GraphemeMatch<'_, '_>, dst: &mut String) {
        dst.push_str((*self)(m).as_ref());
    }
}

/// A scanning cursor that finds the longest known grapheme at each position of a text.
///
/// The matcher starts idle at offset zero. Each [`find`](GraphemeMatcher::find)
/// resumes where the previous match ended, so matches never overlap.
#[derive(Clone)]
pub struct GraphemeMatcher<'t, 's> {
    trie: &'t GraphemeTrie,
    text: &'s str,
    index: usize,
    current: Option<GraphemeMatch<'t, 's>>,
}

impl fmt::Debug for GraphemeMatcher<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeMatcher")
            .field("text", &self.text)
            .field("index", &self.index)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'t, 's> GraphemeMatcher<'t, 's> {
    /// Creates a matcher over `text` using `trie`.
    pub fn new(trie: &'t GraphemeTrie, text: &'s str) -> Self {
        GraphemeMatcher {
            trie,
            text,
            index: 0,
            current: None,
        }
    }

    /// Returns the text being scanned.
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Searches for the next grapheme, starting where the last match ended.
    ///
    /// Among the dictionary sequences starting at a position the longest one
    /// wins. Returns `false` once the end of the text is reached.
    pub fn find(&mut self) -> bool {
        self.current = None;

        let trie: &'t GraphemeTrie = self.trie;
        let text: &'s str = self.text;
        let bytes = text.as_bytes();
        let length = bytes.len();

        while self.index < length {
            let Some((cp0, width0)) = utf8::decode_at(bytes, self.index) else {
                break;
            };

            if let Some(mut node) = trie.root().child(cp0) {
                let mut offset = width0;
                let mut longest = node.grapheme().map(|g| (offset, g));

                while self.index + offset < length {
                    let Some((cp, width)) = utf8::decode_at(bytes, self.index + offset) else {
                        break;
                    };
                    match node.child(cp) {
                        Some(next) => {
                            node = next;
                            offset += width;
                            if let Some(g) = node.grapheme() {
                                longest = Some((offset, g));
                            }
                        }
                        None => break,
                    }
                }

                if let Some((len, grapheme)) = longest {
                    let start = self.index;
                    let end = start + len;
                    self.current = Some(GraphemeMatch {
                        text,
                        start,
                        end,
                        grapheme,
                    });
                    self.index = end;
                    return true;
                }
            }

            // nothing starts here; retry one code point later
            self.index += width0;
        }

        false
    }

    /// Returns whether the next match spans the whole text.
    ///
    /// On `false` the matcher holds no match.
    pub fn matches(&mut self) -> bool {
        if self.find() {
            if let Some(m) = &self.current {
                if m.start == 0 && m.end == self.text.len() {
                    return true;
                }
            }
        }
        self.current = None;
        false
    }

    /// Returns the matcher to offset zero with no current match.
    pub fn reset(&mut self) {
        self.index = 0;
        self.current = None;
    }

    /// Returns the current match, if the last [`find`](GraphemeMatcher::find) succeeded.
    pub fn current(&self) -> Option<GraphemeMatch<'t, 's>> {
        self.current
    }

    fn require_current(&self) -> Result<GraphemeMatch<'t, 's>> {
        self.current.ok_or(GraphemeError::NotMatched)
    }

    /// Start offset of the current match.
    pub fn start(&self) -> Result<usize> {
        Ok(self.require_current()?.start)
    }

    /// End offset of the current match.
    pub fn end(&self) -> Result<usize> {
        Ok(self.require_current()?.end)
    }

    /// Text of the current match.
    pub fn group(&self) -> Result<&'s str> {
        Ok(self.require_current()?.as_str())
    }

    /// Grapheme of the current match.
    pub fn grapheme(&self) -> Result<&'t Grapheme> {
        Ok(self.require_current()?.grapheme)
    }

    /// Iterates the remaining matches from the current position.
    pub fn results(&mut self) -> Results<'_, 't, 's> {
        Results {
            matcher: self,
            exhausted: false,
        }
    }

    /// Resets the matcher and replaces its first match.
    pub fn replace_first<R: Replacer>(&mut self, replacer: R) -> String {
        self.replace_some(replacer, true)
    }

    /// Resets the matcher and replaces every match.
    pub fn replace_all<R: Replacer>(&mut self, replacer: R) -> String {
        self.replace_some(replacer, false)
    }

    fn replace_some<R: Replacer>(&mut self, mut replacer: R, first_only: bool) -> String {
        self.reset();

        let text = self.text;
        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        while self.find() {
            let Some(m) = self.current else {
                break;
            };
            result.push_str(&text[last_end..m.start]);
            replacer.replace_append(&m, &mut result);
            last_end = m.end;
            if first_only {
                break;
            }
        }
        result.push_str(&text[last_end..]);
        result
    }
}

/// An iterator over the matches of a [`GraphemeMatcher`].
///
/// Created by [`GraphemeMatcher::results`].
#[derive(Debug)]
pub struct Results<'m, 't, 's> {
    matcher: &'m mut GraphemeMatcher<'t, 's>,
    exhausted: bool,
}

impl<'m, 't, 's> Iterator for Results<'m, 't, 's> {
    type Item = GraphemeMatch<'t, 's>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.matcher.find() {
            self.matcher.current
        } else {
            self.exhausted = true;
            None
        }
    }
}

impl FusedIterator for Results<'_, '_, '_> {}
