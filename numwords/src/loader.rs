use crate::error::{ConvertError, ConvertResult};
use crate::fallbacks::resolve_locale_chain;
use crate::locale::LocaleTable;
use crate::Converter;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Locale tables compiled into the crate
const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("en-gb", include_str!("../locales/en-gb.json")),
    ("es", include_str!("../locales/es.json")),
];

/// Load a locale table from a single JSON file
///
/// The file stem is the locale id: `en.json` -> `"en"`, `en-GB.json` -> `"en-gb"`.
///
/// # Errors
/// - `LoadError` when the file cannot be read or is not valid JSON
/// - `InvalidLocale` when the record fails validation
pub fn load_locale_from_file(path: &Path) -> ConvertResult<LocaleTable> {
    let locale = locale_id_from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        ConvertError::LoadError(format!("Failed to read file '{}': {}", path.display(), e))
    })?;
    let table = LocaleTable::from_json_str(&locale, &content)?;
    debug!(locale = %locale, path = %path.display(), "loaded locale table");
    Ok(table)
}

/// Load every `*.json` locale table in a directory, keyed by locale id
pub fn load_all_locales_from_dir(dir: &Path) -> ConvertResult<HashMap<String, LocaleTable>> {
    if !dir.exists() {
        return Err(ConvertError::LoadError(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(ConvertError::LoadError(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        ConvertError::LoadError(format!(
            "Failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut tables = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ConvertError::LoadError(format!("Error reading directory entry: {}", e))
        })?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            warn!(path = %path.display(), "skipping non-JSON entry");
            continue;
        }

        let table = load_locale_from_file(&path)?;
        if tables.contains_key(table.id()) {
            return Err(ConvertError::LoadError(format!(
                "Locale '{}' is defined twice in '{}' (file names differ only in case)",
                table.id(),
                dir.display()
            )));
        }
        tables.insert(table.id().to_string(), table);
    }

    if tables.is_empty() {
        warn!(dir = %dir.display(), "no locale files found");
    }

    Ok(tables)
}

fn locale_id_from_path(path: &Path) -> ConvertResult<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| ConvertError::LoadError(format!("Invalid filename: {}", path.display())))
}

/// Locale tables available to converters, shared read-only
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    tables: HashMap<String, Arc<LocaleTable>>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        LocaleRegistry {
            tables: HashMap::new(),
        }
    }

    /// Registry holding the built-in locales
    pub fn builtin() -> ConvertResult<Self> {
        let mut registry = LocaleRegistry::new();
        for (locale, json) in BUILTIN_LOCALES {
            registry.with_table(LocaleTable::from_json_str(locale, json)?);
        }
        Ok(registry)
    }

    /// Built-in locales, extended and overridden by the tables in `dir`
    pub fn with_dir(dir: &Path) -> ConvertResult<Self> {
        let mut registry = LocaleRegistry::builtin()?;
        for (_, table) in load_all_locales_from_dir(dir)? {
            registry.with_table(table);
        }
        Ok(registry)
    }

    pub fn with_table(&mut self, table: LocaleTable) -> &mut Self {
        self.tables
            .insert(table.id().to_string(), Arc::new(table));
        self
    }

    /// Sorted ids of every registered locale
    pub fn available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.tables.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Table for `locale`, following the fallback chain (`en-US` -> `en`)
    pub fn get(&self, locale: &str) -> ConvertResult<Arc<LocaleTable>> {
        let chain = resolve_locale_chain(locale);
        for (depth, candidate) in chain.iter().enumerate() {
            if let Some(table) = self.tables.get(candidate) {
                if depth > 0 {
                    info!(
                        requested = locale,
                        using = candidate.as_str(),
                        chain = %chain.join(" -> "),
                        "locale fallback"
                    );
                }
                return Ok(Arc::clone(table));
            }
        }
        Err(ConvertError::UnknownLocale {
            requested: locale.to_string(),
            available: self.available_locales(),
        })
    }

    pub fn converter(&self, locale: &str, separator: &str) -> ConvertResult<Converter> {
        Converter::with_table(self.get(locale)?, separator)
    }
}
