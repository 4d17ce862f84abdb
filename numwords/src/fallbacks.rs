use icu_locale::Locale;

/// Candidate table ids for a requested locale, most specific first.
///
/// `en-Latn-GB` -> `["en-latn-gb", "en-gb", "en-latn", "en"]`. Ids that do not
/// parse as BCP-47 are returned as-is (lowercased) with no fallbacks.
pub fn resolve_locale_chain(locale: &str) -> Vec<String> {
    let requested = locale.trim().replace('_', "-").to_lowercase();
    let mut chain = vec![requested.clone()];

    let Ok(parsed) = requested.parse::<Locale>() else {
        return chain;
    };

    let mut push = |candidate: String| {
        if !chain.contains(&candidate) {
            chain.push(candidate);
        }
    };

    let id = &parsed.id;
    let language = id.language.as_str().to_lowercase();
    push(parsed.to_string().to_lowercase());
    if let Some(region) = id.region {
        push(format!("{}-{}", language, region.as_str().to_lowercase()));
    }
    if let Some(script) = id.script {
        push(format!("{}-{}", language, script.as_str().to_lowercase()));
    }
    if language != "und" {
        push(language);
    }

    chain
}
