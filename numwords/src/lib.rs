//! Convert digit strings into number names and number names back into digits.
//!
//! ```
//! use numwords::{Converter, ConverterOptions};
//!
//! let converter = Converter::new(&ConverterOptions::default()).unwrap();
//! assert_eq!(converter.from_number("10.001.000").unwrap(), "ten million, one thousand");
//! assert_eq!(converter.to_number("one billion, one").unwrap(), "1.000.000.001");
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod assembler;
pub mod disassembler;
pub mod error;
pub mod fallbacks;
pub mod loader;
pub mod locale;
pub mod scale;
pub mod segment;
pub mod tokens;


pub use assembler::NumberAssembler;
pub use disassembler::NumberDisassembler;
pub use error::{ConvertError, ConvertResult};
pub use fallbacks::resolve_locale_chain;
pub use loader::{LocaleRegistry, load_all_locales_from_dir, load_locale_from_file};
pub use locale::{ConjunctionPosition, LocaleDefinition, LocaleTable, Place};
pub use scale::{Magnitude, ScaleResolver};
pub use segment::SegmentCodec;

/// Options for building a [`Converter`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Locale id, matched case-insensitively with fallbacks (default "en")
    pub locale: String,
    /// Separator between groups of three digits (default ".")
    pub separator: String,
    /// Directory of extra `*.json` locale tables
    pub locales_dir: Option<PathBuf>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            locale: "en".to_string(),
            separator: ".".to_string(),
            locales_dir: None,
        }
    }
}

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(&mut self, locale: &str) -> &mut Self {
        self.locale = locale.to_string();
        self
    }

    pub fn with_separator(&mut self, separator: &str) -> &mut Self {
        self.separator = separator.to_string();
        self
    }

    pub fn with_locales_dir(&mut self, dir: &Path) -> &mut Self {
        self.locales_dir = Some(dir.to_path_buf());
        self
    }
}

/// Converts between digit strings and number names for one locale.
///
/// The locale table is immutable and shared, so a converter can be cloned
/// and used from any number of threads.
#[derive(Debug, Clone)]
pub struct Converter {
    table: Arc<LocaleTable>,
    separator: String,
}

impl Converter {
    /// Build a converter from options, loading `locales_dir` if given
    pub fn new(options: &ConverterOptions) -> ConvertResult<Self> {
        let registry = match &options.locales_dir {
            Some(dir) => LocaleRegistry::with_dir(dir)?,
            None => LocaleRegistry::builtin()?,
        };
        registry.converter(&options.locale, &options.separator)
    }

    /// Build a converter around an already loaded table
    pub fn with_table(table: Arc<LocaleTable>, separator: &str) -> ConvertResult<Self> {
        if separator.is_empty() {
            return Err(ConvertError::InvalidOptions(
                "separator must not be empty".to_string(),
            ));
        }
        if separator
            .chars()
            .any(|c| c.is_ascii_digit() || c.is_whitespace())
        {
            return Err(ConvertError::InvalidOptions(format!(
                "separator '{}' must not contain digits or whitespace",
                separator
            )));
        }
        Ok(Converter {
            table,
            separator: separator.to_string(),
        })
    }

    pub fn locale(&self) -> &str {
        self.table.id()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// Number name for a digit string, e.g. "1.212" -> "one thousand, two hundred twelve"
    pub fn from_number(&self, digits: &str) -> ConvertResult<String> {
        NumberAssembler::new(&self.table, &self.separator).assemble(digits)
    }

    /// Digit string for a number name, e.g. "ten million, one" -> "10.000.001"
    pub fn to_number(&self, words: &str) -> ConvertResult<String> {
        NumberDisassembler::new(&self.table, &self.separator).disassemble(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ConverterOptions::default();
        assert_eq!(options.locale, "en");
        assert_eq!(options.separator, ".");
        assert_eq!(options.locales_dir, None);
    }

    #[test]
    fn test_options_builder() {
        let mut options = ConverterOptions::new();
        options.with_locale("es").with_separator(",");
        let converter = Converter::new(&options).unwrap();
        assert_eq!(converter.locale(), "es");
        assert_eq!(converter.separator(), ",");
    }

    #[test]
    fn test_options_from_json() {
        let options: ConverterOptions = serde_json::from_str(r#"{"separator": ","}"#).unwrap();
        assert_eq!(options.locale, "en");
        assert_eq!(options.separator, ",");
    }

    #[test]
    fn test_unknown_locale() {
        let mut options = ConverterOptions::new();
        options.with_locale("xx");
        let err = Converter::new(&options).unwrap_err();
        assert!(err.to_string().contains("locale must be one of en, en-gb, es"));
    }

    #[test]
    fn test_bad_separator() {
        let mut options = ConverterOptions::new();
        options.with_separator("");
        assert!(matches!(
            Converter::new(&options),
            Err(ConvertError::InvalidOptions(_))
        ));
        for separator in ["0", " ", "\t", ". "] {
            options.with_separator(separator);
            assert!(
                matches!(
                    Converter::new(&options),
                    Err(ConvertError::InvalidOptions(_))
                ),
                "separator {:?} accepted",
                separator
            );
        }
        options.with_separator("'");
        assert_eq!(
            Converter::new(&options).unwrap().to_number("one thousand, five").unwrap(),
            "1'005"
        );
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
