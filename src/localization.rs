use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Localization manager for user-facing message copy.
///
/// Reply-keyboard labels are deliberately not localized (they are the routing
/// surface, see the keyboards module); everything else the bot says goes
/// through here.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

/// Locales shipped with the bot; the first entry is the fallback
const LOCALES: &[&str] = &["en", "ru"];

impl LocalizationManager {
    /// Create a new localization manager
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for locale_str in LOCALES {
            let locale: LanguageIdentifier = locale_str.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(locale_str.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Interpolated values land inside HTML markup; bidi isolate marks
        // would leak into the rendered messages.
        bundle.set_use_isolating(false);

        // Resource path is relative to Cargo.toml
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        let resource_path = format!("{}/locales/{}/main.ftl", manifest_dir, locale);
        if let Ok(content) = fs::read_to_string(&resource_path) {
            if let Ok(resource) = FluentResource::try_new(content) {
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&FluentArgs>,
    ) -> String {
        let bundle = match self.bundles.get(language) {
            Some(bundle) => bundle,
            None => match self.bundles.get("en") {
                Some(bundle) => bundle,
                None => return format!("Missing translation: {}", key),
            },
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();
        let _ = bundle.write_pattern(&mut value, pattern, args, &mut vec![]);
        value
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }
}

/// Build the shared localization manager passed into the handlers
pub fn create_localization_manager() -> Result<Arc<LocalizationManager>> {
    Ok(Arc::new(LocalizationManager::new()?))
}

/// Get a localized message in the user's language
pub fn t_lang(manager: &LocalizationManager, key: &str, language_code: Option<&str>) -> String {
    let language = detect_language(manager, language_code);
    manager.get_message_in_language(key, &language, None)
}

/// Get a localized message with arguments in the user's language
pub fn t_args_lang(
    manager: &LocalizationManager,
    key: &str,
    args: &[(&str, &str)],
    language_code: Option<&str>,
) -> String {
    let language = detect_language(manager, language_code);
    let fluent_args =
        FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
    manager.get_message_in_language(key, &language, Some(&fluent_args))
}

/// Map a Telegram language code onto a supported locale
pub fn detect_language(manager: &LocalizationManager, language_code: Option<&str>) -> String {
    if let Some(code) = language_code {
        // "ru-RU" -> "ru", "en-US" -> "en"
        let lang = code.split('-').next().unwrap_or("en");
        if manager.is_language_supported(lang) {
            return lang.to_string();
        }
    }

    "en".to_string()
}
