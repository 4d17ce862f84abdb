use crate::error::{ConvertError, ConvertResult};
use crate::scale::Magnitude;
use crate::segment::SegmentCodec;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Where the locale's joining word goes inside a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConjunctionPosition {
    /// After the hundreds word, when something follows it ("one hundred and five")
    Hundreds,
    /// Between the tens word and a nonzero ones word ("treinta y uno")
    Tens,
}

/// Digit place inside a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Ones,
    Tens,
    Hundreds,
}

impl Place {
    fn name(self) -> &'static str {
        match self {
            Place::Ones => "ones",
            Place::Tens => "tens",
            Place::Hundreds => "hundreds",
        }
    }
}

/// Locale record as stored on disk
///
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "zero": "zero",        // Optional
///     "ones": { "1": "one", ... },
///     "tens": { "1": "ten", ... },
///     "hundreds": { "1": "one hundred", ... },
///     "exceptions": { "11": "eleven", ... },
///     "powers": { "singular": ["thousand", ...], "plural": { "millón": "millones" } },
///     "and": { "text": "and", "position": "hundreds" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleDefinition {
    #[serde(rename = "@metadata", default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub zero: Option<String>,
    pub ones: BTreeMap<String, String>,
    pub tens: BTreeMap<String, String>,
    pub hundreds: BTreeMap<String, String>,
    #[serde(default)]
    pub exceptions: BTreeMap<String, String>,
    pub powers: PowersDefinition,
    #[serde(rename = "and", default)]
    pub conjunction: Option<ConjunctionDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowersDefinition {
    pub singular: Vec<String>,
    #[serde(default)]
    pub plural: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConjunctionDefinition {
    pub text: String,
    #[serde(default)]
    pub position: Option<ConjunctionPosition>,
}

/// One magnitude name, e.g. "million" / "millones"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleWord {
    pub singular: String,
    pub plural: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    pub text: String,
    pub position: Option<ConjunctionPosition>,
}

// word -> value views, derived once from the forward tables
#[derive(Debug, Clone, Default)]
struct InverseTable {
    ones: HashMap<String, char>,
    tens: HashMap<String, char>,
    hundreds: HashMap<String, char>,
    exceptions: HashMap<String, String>,
    scales: HashMap<String, Magnitude>,
}

/// Validated, immutable grammar table for one locale
#[derive(Debug, Clone)]
pub struct LocaleTable {
    id: String,
    ones: [String; 9],
    tens: [String; 9],
    hundreds: [String; 9],
    exceptions: HashMap<String, String>,
    scales: Vec<ScaleWord>,
    conjunction: Option<Conjunction>,
    zero: Option<String>,
    inverse: InverseTable,
}

impl LocaleTable {
    /// Parse and validate a locale record from JSON text
    pub fn from_json_str(id: &str, json: &str) -> ConvertResult<Self> {
        let definition: LocaleDefinition = serde_json::from_str(json).map_err(|e| {
            ConvertError::LoadError(format!("Failed to parse locale '{}': {}", id, e))
        })?;
        Self::from_definition(id, definition)
    }

    /// Validate a parsed record and build the table plus its inverse view.
    ///
    /// Everything a conversion could trip over later is rejected here:
    /// missing digit keys, malformed exception keys, words the tokenizer
    /// cannot reproduce, and words that would decode ambiguously. The last
    /// check encodes every segment from 1 to 999 and requires the words to
    /// decode back to the same digits.
    pub fn from_definition(id: &str, definition: LocaleDefinition) -> ConvertResult<Self> {
        let invalid = |msg: String| ConvertError::InvalidLocale(format!("{}: {}", id, msg));

        let ones = digit_table(id, Place::Ones, &definition.ones, 1)?;
        let tens = digit_table(id, Place::Tens, &definition.tens, 1)?;
        let hundreds = digit_table(id, Place::Hundreds, &definition.hundreds, 2)?;

        let mut exceptions = HashMap::new();
        for (numeral, word) in &definition.exceptions {
            let well_formed = (2..=3).contains(&numeral.len())
                && numeral.chars().all(|c| c.is_ascii_digit());
            if !well_formed {
                return Err(invalid(format!(
                    "exception key '{}' must be a 2 or 3 digit numeral",
                    numeral
                )));
            }
            check_word(id, "exceptions", word, 2)?;
            exceptions.insert(numeral.clone(), word.clone());
        }

        let mut scales = Vec::with_capacity(definition.powers.singular.len());
        for singular in &definition.powers.singular {
            check_word(id, "powers.singular", singular, 1)?;
            let plural = match definition.powers.plural.get(singular) {
                Some(plural) => {
                    check_word(id, "powers.plural", plural, 1)?;
                    Some(plural.clone())
                }
                None => None,
            };
            scales.push(ScaleWord {
                singular: singular.clone(),
                plural,
            });
        }
        for singular in definition.powers.plural.keys() {
            if !definition.powers.singular.contains(singular) {
                return Err(invalid(format!(
                    "plural form given for unknown scale word '{}'",
                    singular
                )));
            }
        }

        let conjunction = match definition.conjunction {
            Some(def) => {
                check_word(id, "and.text", &def.text, 1)?;
                Some(Conjunction {
                    text: def.text,
                    position: def.position,
                })
            }
            None => None,
        };

        if let Some(zero) = &definition.zero {
            check_word(id, "zero", zero, 1)?;
        }

        let inverse = InverseTable {
            ones: invert_digits(id, Place::Ones, &ones)?,
            tens: invert_digits(id, Place::Tens, &tens)?,
            hundreds: invert_digits(id, Place::Hundreds, &hundreds)?,
            exceptions: invert_exceptions(id, &exceptions)?,
            scales: invert_scales(id, &scales)?,
        };

        if let Some(conjunction) = &conjunction {
            let text = conjunction.text.as_str();
            let clashes = inverse.ones.contains_key(text)
                || inverse.tens.contains_key(text)
                || inverse.scales.contains_key(text)
                || hundreds.iter().any(|w| w.split(' ').any(|t| t == text))
                || exceptions.values().any(|w| w.split(' ').any(|t| t == text));
            if clashes {
                return Err(invalid(format!(
                    "conjunction '{}' is also used as a number word",
                    text
                )));
            }
        }

        let number_words: HashSet<&str> = ones
            .iter()
            .chain(tens.iter())
            .chain(hundreds.iter())
            .chain(exceptions.values())
            .chain(definition.zero.iter())
            .flat_map(|word| word.split(' '))
            .collect();
        if let Some(word) = inverse.scales.keys().find(|w| number_words.contains(w.as_str())) {
            return Err(invalid(format!(
                "scale word '{}' is also used as a number word",
                word
            )));
        }

        let table = LocaleTable {
            id: id.to_lowercase(),
            ones,
            tens,
            hundreds,
            exceptions,
            scales,
            conjunction,
            zero: definition.zero,
            inverse,
        };
        table.check_read_back()?;
        Ok(table)
    }

    // Overlapping tables (an exception spelled like a composed form, a
    // hundreds word reused as an exception prefix) only show up when the
    // words are parsed again.
    fn check_read_back(&self) -> ConvertResult<()> {
        let codec = SegmentCodec::new(self);
        for value in 1..=999u32 {
            for (digits, pad) in [(format!("{:03}", value), true), (value.to_string(), false)] {
                let words = codec.encode(&digits)?;
                match codec.decode(&words, pad) {
                    Ok(decoded) if decoded == digits => {}
                    Ok(decoded) => {
                        return Err(ConvertError::InvalidLocale(format!(
                            "{}: '{}' reads back as {} instead of {}",
                            self.id, words, decoded, digits
                        )));
                    }
                    Err(e) => {
                        return Err(ConvertError::InvalidLocale(format!(
                            "{}: '{}' for {} does not read back: {}",
                            self.id, words, digits, e
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Word for a nonzero digit at a place; `None` for '0' or non-digits
    pub fn word(&self, place: Place, digit: char) -> Option<&str> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        let table = match place {
            Place::Ones => &self.ones,
            Place::Tens => &self.tens,
            Place::Hundreds => &self.hundreds,
        };
        table.get(index).map(String::as_str)
    }

    /// Inverse of [`LocaleTable::word`]
    pub fn digit(&self, place: Place, word: &str) -> Option<char> {
        let table = match place {
            Place::Ones => &self.inverse.ones,
            Place::Tens => &self.inverse.tens,
            Place::Hundreds => &self.inverse.hundreds,
        };
        table.get(word).copied()
    }

    /// Irregular word for a 2 or 3 digit numeral
    pub fn exception(&self, numeral: &str) -> Option<&str> {
        self.exceptions.get(numeral).map(String::as_str)
    }

    /// Numeral an irregular word stands for
    pub fn exception_numeral(&self, word: &str) -> Option<&str> {
        self.inverse.exceptions.get(word).map(String::as_str)
    }

    /// Scale words, index 0 = thousand
    pub fn scales(&self) -> &[ScaleWord] {
        &self.scales
    }

    pub fn scale_magnitude(&self, word: &str) -> Option<Magnitude> {
        self.inverse.scales.get(word).copied()
    }

    pub fn conjunction(&self) -> Option<&Conjunction> {
        self.conjunction.as_ref()
    }

    /// Conjunction word, only when it is inserted at `position`
    pub fn conjunction_at(&self, position: ConjunctionPosition) -> Option<&str> {
        self.conjunction
            .as_ref()
            .filter(|c| c.position == Some(position))
            .map(|c| c.text.as_str())
    }

    pub fn zero(&self) -> Option<&str> {
        self.zero.as_deref()
    }
}

// A word must survive a split on single spaces unchanged and stay within
// `max_tokens` tokens, otherwise decoding could never match it.
fn check_word(id: &str, field: &str, word: &str, max_tokens: usize) -> ConvertResult<()> {
    let tokens: Vec<&str> = word.split(' ').collect();
    let canonical = !word.is_empty()
        && tokens.iter().all(|t| !t.is_empty() && !t.contains(char::is_whitespace))
        && !word.contains(',');
    if !canonical {
        return Err(ConvertError::InvalidLocale(format!(
            "{}: {} word '{}' must be non-empty, single-spaced and comma-free",
            id, field, word
        )));
    }
    if tokens.len() > max_tokens {
        return Err(ConvertError::InvalidLocale(format!(
            "{}: {} word '{}' has {} words, at most {} allowed",
            id,
            field,
            word,
            tokens.len(),
            max_tokens
        )));
    }
    Ok(())
}

fn digit_table(
    id: &str,
    place: Place,
    source: &BTreeMap<String, String>,
    max_tokens: usize,
) -> ConvertResult<[String; 9]> {
    for key in source.keys() {
        let valid = key.len() == 1 && matches!(key.as_bytes()[0], b'1'..=b'9');
        if !valid {
            return Err(ConvertError::InvalidLocale(format!(
                "{}: unexpected key '{}' in {} table",
                id,
                key,
                place.name()
            )));
        }
    }

    let mut words: [String; 9] = Default::default();
    for (index, slot) in words.iter_mut().enumerate() {
        let key = (index + 1).to_string();
        let word = source.get(&key).ok_or_else(|| {
            ConvertError::InvalidLocale(format!(
                "{}: {} table is missing digit {}",
                id,
                place.name(),
                key
            ))
        })?;
        check_word(id, place.name(), word, max_tokens)?;
        *slot = word.clone();
    }
    Ok(words)
}

fn invert_digits(id: &str, place: Place, words: &[String; 9]) -> ConvertResult<HashMap<String, char>> {
    let mut inverse = HashMap::with_capacity(words.len());
    for (index, word) in words.iter().enumerate() {
        let digit = char::from(b'1' + index as u8);
        if inverse.insert(word.clone(), digit).is_some() {
            return Err(ConvertError::InvalidLocale(format!(
                "{}: word '{}' appears twice in {} table",
                id,
                word,
                place.name()
            )));
        }
    }
    Ok(inverse)
}

fn invert_exceptions(
    id: &str,
    exceptions: &HashMap<String, String>,
) -> ConvertResult<HashMap<String, String>> {
    let mut inverse = HashMap::with_capacity(exceptions.len());
    for (numeral, word) in exceptions {
        if let Some(other) = inverse.insert(word.clone(), numeral.clone()) {
            return Err(ConvertError::InvalidLocale(format!(
                "{}: exception word '{}' is used for both {} and {}",
                id, word, other, numeral
            )));
        }
    }
    Ok(inverse)
}

fn invert_scales(id: &str, scales: &[ScaleWord]) -> ConvertResult<HashMap<String, Magnitude>> {
    let mut inverse = HashMap::new();
    for (index, scale) in scales.iter().enumerate() {
        let magnitude = Magnitude::from_scale_index(index);
        let forms = std::iter::once(&scale.singular).chain(scale.plural.iter());
        for form in forms {
            match inverse.insert(form.clone(), magnitude) {
                Some(previous) if previous != magnitude => {
                    return Err(ConvertError::InvalidLocale(format!(
                        "{}: scale word '{}' names more than one magnitude",
                        id, form
                    )));
                }
                _ => {}
            }
        }
    }
    Ok(inverse)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn english() -> LocaleTable {
        LocaleTable::from_json_str("en", include_str!("../locales/en.json"))
            .expect("built-in en table is valid")
    }

    fn definition() -> LocaleDefinition {
        serde_json::from_str(include_str!("../locales/en.json")).unwrap()
    }

    #[test]
    fn test_builtin_tables_validate() {
        for (id, json) in [
            ("en", include_str!("../locales/en.json")),
            ("en-gb", include_str!("../locales/en-gb.json")),
            ("es", include_str!("../locales/es.json")),
        ] {
            assert!(LocaleTable::from_json_str(id, json).is_ok(), "{} failed", id);
        }
    }

    #[test]
    fn test_forward_and_inverse_lookup() {
        let table = english();
        assert_eq!(table.word(Place::Ones, '7'), Some("seven"));
        assert_eq!(table.word(Place::Hundreds, '2'), Some("two hundred"));
        assert_eq!(table.word(Place::Tens, '0'), None);
        assert_eq!(table.digit(Place::Tens, "forty"), Some('4'));
        assert_eq!(table.digit(Place::Hundreds, "two hundred"), Some('2'));
        assert_eq!(table.digit(Place::Ones, "forty"), None);
        assert_eq!(table.exception("13"), Some("thirteen"));
        assert_eq!(table.exception_numeral("thirteen"), Some("13"));
        assert_eq!(table.scale_magnitude("million"), Some(Magnitude::new(2)));
    }

    #[test]
    fn test_conjunction_position() {
        let table = english();
        assert_eq!(table.conjunction().map(|c| c.text.as_str()), Some("and"));
        assert_eq!(table.conjunction_at(ConjunctionPosition::Hundreds), None);

        let gb = LocaleTable::from_json_str("en-gb", include_str!("../locales/en-gb.json")).unwrap();
        assert_eq!(gb.conjunction_at(ConjunctionPosition::Hundreds), Some("and"));
        assert_eq!(gb.conjunction_at(ConjunctionPosition::Tens), None);
    }

    #[test]
    fn test_missing_digit_rejected() {
        let mut def = definition();
        def.tens.remove("4");
        let err = LocaleTable::from_definition("en", def).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidLocale(msg) if msg.contains("missing digit 4")));
    }

    #[test]
    fn test_zero_key_rejected() {
        let mut def = definition();
        def.ones.insert("0".to_string(), "zero".to_string());
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_malformed_exception_key_rejected() {
        let mut def = definition();
        def.exceptions.insert("1a".to_string(), "oops".to_string());
        assert!(LocaleTable::from_definition("en", def).is_err());

        let mut def = definition();
        def.exceptions.insert("1234".to_string(), "oops".to_string());
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_multi_word_scale_rejected() {
        let mut def = definition();
        def.powers.singular.push("mil millones".to_string());
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_plural_for_unknown_scale_rejected() {
        let mut def = definition();
        def.powers
            .plural
            .insert("gazillion".to_string(), "gazillions".to_string());
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_duplicate_word_rejected() {
        let mut def = definition();
        def.ones.insert("2".to_string(), "one".to_string());
        let err = LocaleTable::from_definition("en", def).unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn test_conjunction_clash_rejected() {
        let mut def = definition();
        def.conjunction = Some(ConjunctionDefinition {
            text: "hundred".to_string(),
            position: Some(ConjunctionPosition::Hundreds),
        });
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_exception_shadowing_composition_rejected() {
        let mut def = definition();
        def.exceptions
            .insert("100".to_string(), "one hundred".to_string());
        let err = LocaleTable::from_definition("en", def).unwrap_err();
        assert!(
            matches!(&err, ConvertError::InvalidLocale(msg) if msg.contains("does not read back")),
            "{}",
            err
        );
    }

    #[test]
    fn test_exception_reusing_digit_word_rejected() {
        let mut def = definition();
        def.exceptions.insert("21".to_string(), "two".to_string());
        assert!(matches!(
            LocaleTable::from_definition("en", def),
            Err(ConvertError::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_scale_clash_rejected() {
        let mut def = definition();
        def.powers.singular[0] = "nine".to_string();
        let err = LocaleTable::from_definition("en", def).unwrap_err();
        assert!(err.to_string().contains("scale word 'nine'"));

        let mut def = definition();
        def.powers.singular[0] = "hundred".to_string();
        assert!(LocaleTable::from_definition("en", def).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = include_str!("../locales/en.json").replacen("\"zero\"", "\"nil\"", 1);
        let err = LocaleTable::from_json_str("en", &json).unwrap_err();
        assert!(matches!(err, ConvertError::LoadError(_)));
    }

    #[test]
    fn test_metadata_and_missing_conjunction_accepted() {
        let json = r#"{
            "@metadata": { "authors": ["someone"] },
            "ones": {"1":"a","2":"b","3":"c","4":"d","5":"e","6":"f","7":"g","8":"h","9":"i"},
            "tens": {"1":"ta","2":"tb","3":"tc","4":"td","5":"te","6":"tf","7":"tg","8":"th","9":"ti"},
            "hundreds": {"1":"ha","2":"hb","3":"hc","4":"hd","5":"he","6":"hf","7":"hg","8":"hh","9":"hi"},
            "powers": { "singular": [] }
        }"#;
        let table = LocaleTable::from_json_str("xx", json).unwrap();
        assert!(table.conjunction().is_none());
        assert!(table.scales().is_empty());
        assert!(table.zero().is_none());
    }
}
