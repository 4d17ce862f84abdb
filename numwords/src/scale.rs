use crate::error::{ConvertError, ConvertResult};
use crate::locale::LocaleTable;

/// Power of one thousand a group carries: 0 = units, 1 = thousand, 2 = million, ...
///
/// Kept as its own type so positions in the locale's scale list (which start
/// at "thousand") never get mixed up with powers of one thousand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Magnitude(usize);

impl Magnitude {
    pub const UNITS: Magnitude = Magnitude(0);

    pub fn new(power: usize) -> Self {
        Magnitude(power)
    }

    pub fn power(self) -> usize {
        self.0
    }

    /// Position of this magnitude's word in the scale list; units have none
    pub fn scale_index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    pub fn from_scale_index(index: usize) -> Self {
        Magnitude(index + 1)
    }

    /// Number of thousand-groups in a number whose leading group has this magnitude
    pub fn group_count(self) -> usize {
        self.0 + 1
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1000^{}", self.0)
    }
}

/// Maps magnitudes to scale words and back
pub struct ScaleResolver<'a> {
    table: &'a LocaleTable,
}

impl<'a> ScaleResolver<'a> {
    pub fn new(table: &'a LocaleTable) -> Self {
        ScaleResolver { table }
    }

    /// Largest magnitude the locale can name
    pub fn max_magnitude(&self) -> Magnitude {
        Magnitude::new(self.table.scales().len())
    }

    /// Scale word for a group of the given magnitude.
    ///
    /// `segment` is the group's numeral; its value picks the plural form when
    /// the locale has one and the value is not one. Units get no word.
    pub fn word_for(&self, magnitude: Magnitude, segment: &str) -> ConvertResult<Option<&'a str>> {
        let Some(index) = magnitude.scale_index() else {
            return Ok(None);
        };
        let scale = self
            .table
            .scales()
            .get(index)
            .ok_or(ConvertError::UnsupportedMagnitude {
                magnitude: magnitude.power(),
                max: self.max_magnitude().power(),
            })?;

        let is_one = segment.trim_start_matches('0') == "1";
        let word = match &scale.plural {
            Some(plural) if !is_one => plural.as_str(),
            _ => scale.singular.as_str(),
        };
        Ok(Some(word))
    }

    /// Magnitude named by `word`, singular or plural; `None` if it is not a scale word
    pub fn resolve(&self, word: &str) -> Option<Magnitude> {
        self.table.scale_magnitude(word)
    }
}
