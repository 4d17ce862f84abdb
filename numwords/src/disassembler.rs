use crate::error::{ConvertError, ConvertResult};
use crate::locale::LocaleTable;
use crate::scale::{Magnitude, ScaleResolver};
use crate::segment::SegmentCodec;
use crate::tokens::{Phrase, phrases};
use tracing::trace;

/// Recovers a digit string from number prose (the `to_number` direction)
pub struct NumberDisassembler<'a> {
    table: &'a LocaleTable,
    separator: &'a str,
}

impl<'a> NumberDisassembler<'a> {
    pub fn new(table: &'a LocaleTable, separator: &'a str) -> Self {
        NumberDisassembler { table, separator }
    }

    /// Digits, with group separators, for prose such as "ten million, one".
    ///
    /// The scale word ending the first phrase fixes how many groups the
    /// result has. Every group starts as "000" and each phrase fills the
    /// group its scale word names; a phrase without one fills the units
    /// group. Only the leading group is left unpadded.
    pub fn disassemble(&self, input: &str) -> ConvertResult<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConvertError::InvalidSegment(
                "input must have at least one word".to_string(),
            ));
        }
        if self.table.zero() == Some(input) {
            return Ok("0".to_string());
        }

        let codec = SegmentCodec::new(self.table);
        let scales = ScaleResolver::new(self.table);
        let all_phrases = phrases(input);

        let leading = all_phrases
            .clone()
            .next()
            .map(|phrase| self.magnitude_of(&scales, &phrase))
            .unwrap_or(Magnitude::UNITS);
        let mut groups = vec!["000".to_string(); leading.group_count()];

        let mut previous: Option<Magnitude> = None;
        for (index, phrase) in all_phrases.enumerate() {
            if phrase.words().next().is_none() {
                return Err(ConvertError::InvalidSegment(format!(
                    "empty phrase in '{}'",
                    input
                )));
            }

            let magnitude = self.magnitude_of(&scales, &phrase);
            let words = if magnitude == Magnitude::UNITS {
                phrase.text()
            } else {
                phrase.without_last_word()
            };

            if let Some(previous) = previous {
                if magnitude >= previous {
                    return Err(ConvertError::InvalidNumber(format!(
                        "phrase '{}' is out of order in '{}'",
                        phrase.text(),
                        input
                    )));
                }
            }
            previous = Some(magnitude);

            if magnitude != Magnitude::UNITS && words.trim().is_empty() {
                return Err(ConvertError::InvalidSegment(format!(
                    "scale word '{}' has no number before it",
                    phrase.text().trim()
                )));
            }

            let digits = codec
                .decode(words, index > 0)
                .map_err(|e| match e {
                    ConvertError::InvalidSegment(msg) => ConvertError::InvalidNumber(msg),
                    other => other,
                })?;
            trace!(phrase = phrase.text(), magnitude = %magnitude, digits = %digits, "decoded phrase");

            let slot = groups.len() - 1 - magnitude.power();
            groups[slot] = digits;
        }

        Ok(groups.join(self.separator))
    }

    fn magnitude_of(&self, scales: &ScaleResolver<'_>, phrase: &Phrase<'_>) -> Magnitude {
        phrase
            .last_word()
            .and_then(|word| scales.resolve(word))
            .unwrap_or(Magnitude::UNITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::tests::english;

    fn disassemble(input: &str, separator: &str) -> ConvertResult<String> {
        let table = english();
        NumberDisassembler::new(&table, separator).disassemble(input)
    }

    #[test]
    fn test_sub_thousand() {
        assert_eq!(disassemble("one hundred", ".").unwrap(), "100");
        assert_eq!(disassemble("three", ".").unwrap(), "3");
        assert_eq!(disassemble("thirty three", ".").unwrap(), "33");
        assert_eq!(disassemble("eleven", ".").unwrap(), "11");
    }

    #[test]
    fn test_scaled_numbers() {
        assert_eq!(
            disassemble("one thousand, thirty three", ".").unwrap(),
            "1.033"
        );
        assert_eq!(disassemble("ten million, one", ".").unwrap(), "10.000.001");
        assert_eq!(
            disassemble("five hundred fifty five thousand, two hundred four", ".").unwrap(),
            "555.204"
        );
        assert_eq!(
            disassemble(
                "five hundred and fifty five thousand, two hundred and four",
                "."
            )
            .unwrap(),
            "555.204"
        );
        assert_eq!(disassemble("five thousand", ".").unwrap(), "5.000");
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(disassemble("ten million, one", ",").unwrap(), "10,000,001");
        assert_eq!(disassemble("one billion, one", "").unwrap(), "1000000001");
    }

    #[test]
    fn test_padding_of_inner_groups() {
        assert_eq!(
            disassemble("one billion, twelve thousand, five", ".").unwrap(),
            "1.000.012.005"
        );
        assert_eq!(
            disassemble("twelve million, one hundred thousand", ".").unwrap(),
            "12.100.000"
        );
    }

    #[test]
    fn test_zero() {
        assert_eq!(disassemble("zero", ".").unwrap(), "0");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            disassemble("", "."),
            Err(ConvertError::InvalidSegment(_))
        ));
        assert!(matches!(
            disassemble("   ", "."),
            Err(ConvertError::InvalidSegment(_))
        ));
        assert!(matches!(
            disassemble("thousand", "."),
            Err(ConvertError::InvalidSegment(_))
        ));
        assert!(matches!(
            disassemble("one thousand, , one", "."),
            Err(ConvertError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_unrecognized_words() {
        assert!(matches!(
            disassemble("one banana", "."),
            Err(ConvertError::InvalidNumber(_))
        ));
        assert!(matches!(
            disassemble("one thousand, seven bananas", "."),
            Err(ConvertError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_out_of_order_phrases() {
        assert!(matches!(
            disassemble("one thousand, one million", "."),
            Err(ConvertError::InvalidNumber(_))
        ));
        assert!(matches!(
            disassemble("one thousand, two thousand", "."),
            Err(ConvertError::InvalidNumber(_))
        ));
        assert!(matches!(
            disassemble("one, two", "."),
            Err(ConvertError::InvalidNumber(_))
        ));
    }
}
