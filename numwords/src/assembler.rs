use crate::error::{ConvertError, ConvertResult};
use crate::locale::LocaleTable;
use crate::scale::ScaleResolver;
use crate::segment::SegmentCodec;
use crate::tokens::{PHRASE_SEPARATOR, thousand_groups};
use tracing::trace;

/// Builds number prose from a digit string (the `from_number` direction)
pub struct NumberAssembler<'a> {
    table: &'a LocaleTable,
    separator: &'a str,
}

impl<'a> NumberAssembler<'a> {
    pub fn new(table: &'a LocaleTable, separator: &'a str) -> Self {
        NumberAssembler { table, separator }
    }

    /// Words for `input`, a digit string that may contain group separators.
    ///
    /// Each thousand-group is encoded on its own and followed by its scale
    /// word. Groups that are all zeros leave no phrase behind, so
    /// "10.001.000" reads "ten million, one thousand".
    pub fn assemble(&self, input: &str) -> ConvertResult<String> {
        let digits = strip_separators(input, self.separator)?;
        let codec = SegmentCodec::new(self.table);
        let scales = ScaleResolver::new(self.table);

        let mut phrases = Vec::new();
        for segment in thousand_groups(&digits) {
            let text = codec.encode(segment.digits)?;
            trace!(segment = segment.digits, magnitude = %segment.magnitude, text = %text, "encoded group");
            if text.is_empty() {
                continue;
            }
            match scales.word_for(segment.magnitude, segment.digits)? {
                Some(scale) => phrases.push(format!("{} {}", text, scale)),
                None => phrases.push(text),
            }
        }

        if phrases.is_empty() {
            return Ok(self.table.zero().unwrap_or_default().to_string());
        }
        Ok(phrases.join(PHRASE_SEPARATOR))
    }
}

/// Remove group separators and check that only ASCII digits remain
fn strip_separators(input: &str, separator: &str) -> ConvertResult<String> {
    let digits: String = input.split(separator).collect();
    if digits.is_empty() {
        return Err(ConvertError::InvalidNumber(
            "Input must be a number".to_string(),
        ));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ConvertError::InvalidNumber(format!(
            "Input must be a number, found '{}' in '{}'",
            bad, input
        )));
    }
    Ok(digits)
}
