use crate::error::{ConvertError, ConvertResult};
use crate::locale::{ConjunctionPosition, LocaleTable, Place};

/// Encodes 1-3 digit segments to words and decodes segment words back to digits
pub struct SegmentCodec<'a> {
    table: &'a LocaleTable,
}

impl<'a> SegmentCodec<'a> {
    pub fn new(table: &'a LocaleTable) -> Self {
        SegmentCodec { table }
    }

    /// Words for a segment of one to three digits.
    ///
    /// Exceptions win over composition, first for the whole segment and
    /// again for the two digits left once the hundreds place is peeled off.
    /// Zero digits produce no word, so "000" encodes to the empty string.
    pub fn encode(&self, segment: &str) -> ConvertResult<String> {
        if segment.is_empty() {
            return Err(ConvertError::InvalidSegment(
                "segment must have at least one digit".to_string(),
            ));
        }
        if segment.len() > 3 || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConvertError::InvalidSegment(format!(
                "'{}' is not a 1-3 digit segment",
                segment
            )));
        }

        if let Some(word) = self.table.exception(segment) {
            return Ok(word.to_string());
        }

        let mut words: Vec<&str> = Vec::with_capacity(4);
        let mut rest = segment;

        if rest.len() == 3 {
            let (hundreds, remainder) = rest.split_at(1);
            if let Some(word) = self.table.word(Place::Hundreds, leading_digit(hundreds)) {
                words.push(word);
                if remainder != "00" {
                    if let Some(and) = self.table.conjunction_at(ConjunctionPosition::Hundreds) {
                        words.push(and);
                    }
                }
            }
            rest = remainder;
        }

        if let Some(word) = self.table.exception(rest) {
            words.push(word);
            return Ok(words.join(" "));
        }

        if rest.len() == 2 {
            let (tens, ones) = rest.split_at(1);
            if let Some(word) = self.table.word(Place::Tens, leading_digit(tens)) {
                words.push(word);
                if ones != "0" {
                    if let Some(and) = self.table.conjunction_at(ConjunctionPosition::Tens) {
                        words.push(and);
                    }
                }
            }
            rest = ones;
        }

        if let Some(word) = self.table.word(Place::Ones, leading_digit(rest)) {
            words.push(word);
        }

        Ok(words.join(" "))
    }

    /// Digits for the words of one segment, scale word already removed.
    ///
    /// With `pad` the result is always three digits wide; this is used for
    /// every segment except the most significant one. Without it, leading
    /// places that have no word are left out ("ninety nine" -> "99").
    pub fn decode(&self, words: &str, pad: bool) -> ConvertResult<String> {
        let conjunction = self.table.conjunction().map(|c| c.text.as_str());
        let tokens: Vec<&str> = words
            .split(' ')
            .filter(|token| !token.is_empty() && Some(*token) != conjunction)
            .collect();

        if tokens.is_empty() {
            if pad {
                return Ok("000".to_string());
            }
            return Err(ConvertError::InvalidSegment(
                "segment must have at least one word".to_string(),
            ));
        }

        // an exception in front stands for the whole segment value
        if let Some((numeral, consumed)) = self.match_exception(&tokens) {
            expect_consumed(words, &tokens[consumed..])?;
            return Ok(if pad {
                format!("{:0>3}", numeral)
            } else {
                numeral.to_string()
            });
        }

        let mut digits = String::with_capacity(3);
        let mut rest: &[&str] = &tokens;

        if let Some((digit, consumed)) = self.match_hundreds(rest) {
            digits.push(digit);
            rest = &rest[consumed..];
        } else if pad {
            digits.push('0');
        }

        if let Some((numeral, consumed)) = self
            .match_exception(rest)
            .filter(|(numeral, _)| numeral.len() == 2)
        {
            digits.push_str(numeral);
            expect_consumed(words, &rest[consumed..])?;
            return Ok(digits);
        }

        match rest.first().and_then(|token| self.table.digit(Place::Tens, token)) {
            Some(digit) => {
                digits.push(digit);
                rest = &rest[1..];
            }
            None if !digits.is_empty() || pad => digits.push('0'),
            None => {}
        }

        match rest.first().and_then(|token| self.table.digit(Place::Ones, token)) {
            Some(digit) => {
                digits.push(digit);
                rest = &rest[1..];
            }
            None => digits.push('0'),
        }

        expect_consumed(words, rest)?;
        Ok(digits)
    }

    // Two-word forms are tried first so "one hundred"-style exceptions win
    // over a one-word prefix.
    fn match_exception(&self, tokens: &[&str]) -> Option<(&'a str, usize)> {
        if tokens.len() >= 2 {
            let pair = format!("{} {}", tokens[0], tokens[1]);
            if let Some(numeral) = self.table.exception_numeral(&pair) {
                return Some((numeral, 2));
            }
        }
        let first = tokens.first()?;
        self.table
            .exception_numeral(first)
            .map(|numeral| (numeral, 1))
    }

    fn match_hundreds(&self, tokens: &[&str]) -> Option<(char, usize)> {
        let first = tokens.first()?;
        if let Some(digit) = self.table.digit(Place::Hundreds, first) {
            return Some((digit, 1));
        }
        let second = tokens.get(1)?;
        let pair = format!("{} {}", first, second);
        self.table
            .digit(Place::Hundreds, &pair)
            .map(|digit| (digit, 2))
    }
}

fn leading_digit(digits: &str) -> char {
    digits.chars().next().unwrap_or('0')
}

fn expect_consumed(words: &str, rest: &[&str]) -> ConvertResult<()> {
    match rest.first() {
        Some(word) => Err(ConvertError::InvalidSegment(format!(
            "unrecognized word '{}' in '{}'",
            word, words
        ))),
        None => Ok(()),
    }
}
