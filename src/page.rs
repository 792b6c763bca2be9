use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::element::*;
use crate::error::*;
use crate::label_translator::*;
use crate::translations::*;

#[derive(Deserialize)]
struct PageDescription {
    #[serde(default = "default_language")]
    default_language: LanguageCode,
    #[serde(default)]
    languages: Vec<LanguageCode>,
    elements: Vec<ElementDescription>,
}

#[derive(Deserialize)]
struct ElementDescription {
    kind: String,
    label: LabelDescription,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelDescription {
    Plain(String),
    Multilingual(BTreeMap<LanguageCode, String>),
}

fn default_language() -> LanguageCode {
    "en".to_string()
}

impl ElementDescription {
    fn into_element(self, default_language: &str) -> Result<FormElement> {
        let (text, labels) = match self.label {
            LabelDescription::Plain(text) => (text, None),
            LabelDescription::Multilingual(labels) => {
                let text = labels
                    .get(default_language)
                    .cloned()
                    .ok_or_else(|| Error::MissingDefaultLabel(default_language.to_string()))?;
                (text, Some(labels))
            }
        };

        let mut element = FormElement::from_markup(
            &self.kind,
            &text,
            self.attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )?;
        if let Some(labels) = labels {
            element.add_missing_translations(Translations::from_map(labels));
        }
        Ok(element)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub selector: LanguageSelector,
    pub elements: Vec<FormElement>,
    markup: Vec<FormElement>,
    ready: bool,
}

impl Page {
    pub fn new(languages: Vec<LanguageCode>, elements: Vec<FormElement>) -> Page {
        Page {
            selector: LanguageSelector::new(languages),
            markup: elements.clone(),
            elements,
            ready: false,
        }
    }

    pub fn from_json_str(data: &str) -> Result<Page> {
        let description: PageDescription =
            serde_json::from_str(data).map_err(|source| Error::Parse {
                what: "page description",
                source,
            })?;

        let default_language = description.default_language;
        let elements = description
            .elements
            .into_iter()
            .map(|element| element.into_element(&default_language))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(description.languages, elements))
    }

    pub fn load(file_path: &Path) -> Result<Page> {
        let data = fs::read_to_string(file_path).map_err(|source| Error::Io {
            path: file_path.display().to_string(),
            source,
        })?;
        Page::from_json_str(&data)
    }

    pub fn reload(&mut self) {
        self.elements = self.markup.clone();
        self.selector = LanguageSelector::new(self.selector.choices.clone());
        self.ready = false;
    }

    // The ready signal fires once per load; returns false for repeats.
    pub fn mark_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready, true)
    }

    pub fn render(&self) -> String {
        let mut result = format!(
            "#{} [{}]\n",
            self.selector.id,
            self.selector.value().unwrap_or("-")
        );
        for element in &self.elements {
            result += &format!("{}: {}\n", element.kind(), element.text());
        }
        result
    }
}
