//! Splitting numbers into thousand-groups and prose into phrases.
//!
//! Both splitters are plain iterators over borrowed input: cheap to clone,
//! restartable, and finite.

use crate::scale::Magnitude;
use std::iter::FusedIterator;
use std::str::Split;

/// Delimiter between phrases in number prose
pub const PHRASE_SEPARATOR: &str = ", ";

/// A 1-3 digit chunk of a number together with its magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub digits: &'a str,
    pub magnitude: Magnitude,
}

/// Right-aligned thousand-groups of an ASCII digit string, most significant first.
/// Only the leading group can be shorter than three digits.
#[derive(Debug, Clone)]
pub struct ThousandGroups<'a> {
    digits: &'a str,
    start: usize,
}

pub fn thousand_groups(digits: &str) -> ThousandGroups<'_> {
    debug_assert!(digits.is_ascii());
    ThousandGroups { digits, start: 0 }
}

impl<'a> Iterator for ThousandGroups<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.digits.len().checked_sub(self.start)?;
        if remaining == 0 {
            return None;
        }
        let width = match remaining % 3 {
            0 => 3,
            short => short,
        };
        let end = self.start + width;
        let segment = Segment {
            digits: &self.digits[self.start..end],
            magnitude: Magnitude::new((self.digits.len() - end) / 3),
        };
        self.start = end;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let groups = (self.digits.len() - self.start).div_ceil(3);
        (groups, Some(groups))
    }
}

impl ExactSizeIterator for ThousandGroups<'_> {}
impl FusedIterator for ThousandGroups<'_> {}

/// The words of one segment plus its scale word, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase<'a> {
    text: &'a str,
}

impl<'a> Phrase<'a> {
    pub fn new(text: &'a str) -> Self {
        Phrase { text }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn words(&self) -> impl Iterator<Item = &'a str> + Clone + use<'a> {
        self.text.split(' ').filter(|word| !word.is_empty())
    }

    pub fn last_word(&self) -> Option<&'a str> {
        self.words().last()
    }

    /// The phrase with its final word removed
    pub fn without_last_word(&self) -> &'a str {
        let trimmed = self.text.trim_end_matches(' ');
        match trimmed.rfind(' ') {
            Some(index) => trimmed[..index].trim_end_matches(' '),
            None => "",
        }
    }
}

/// Phrases of number prose, in reading order
#[derive(Debug, Clone)]
pub struct Phrases<'a> {
    inner: Split<'a, &'static str>,
}

pub fn phrases(text: &str) -> Phrases<'_> {
    Phrases {
        inner: text.split(PHRASE_SEPARATOR),
    }
}

impl<'a> Iterator for Phrases<'a> {
    type Item = Phrase<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Phrase::new)
    }
}

impl FusedIterator for Phrases<'_> {}
