use std::collections::BTreeMap;

pub type LanguageCode = String;

pub const LABEL_ATTRIBUTE_PREFIX: &str = "data-label-";

// Never holds an empty code or an empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    texts: BTreeMap<LanguageCode, String>,
}

impl Translations {
    pub fn from_map<I, K, V>(entries: I) -> Translations
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut texts = BTreeMap::new();
        for (code, text) in entries {
            let code = code.into();
            let text = text.into();
            if code.is_empty() {
                log::warn!("Ignoring label \"{}\" without a language code", text);
                continue;
            }
            if !text.is_empty() {
                texts.insert(code, text);
            }
        }
        Translations { texts }
    }

    pub fn from_attributes<'a, I>(attributes: I) -> Translations
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Translations::from_map(attributes.into_iter().filter_map(|(name, value)| {
            name.strip_prefix(LABEL_ATTRIBUTE_PREFIX)
                .map(|code| (code, value))
        }))
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.texts.get(code).map(String::as_str)
    }

    pub fn merge_missing(&mut self, other: Translations) {
        for (code, text) in other.texts {
            self.texts.entry(code).or_insert(text);
        }
    }
}
