use std::fmt;

use crate::error::*;
use crate::translations::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Label,
    Option,
    TableCell,
}

impl ElementKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementKind::Label => "label",
            ElementKind::Option => "option",
            ElementKind::TableCell => "td",
        }
    }

    pub fn from_tag(tag: &str) -> Result<ElementKind> {
        match tag.to_lowercase().as_str() {
            "label" => Ok(ElementKind::Label),
            "option" => Ok(ElementKind::Option),
            "td" => Ok(ElementKind::TableCell),
            _ => Err(Error::UnknownElementKind(tag.to_string())),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.tag_name())
    }
}

pub trait TranslatableElement {
    fn kind(&self) -> ElementKind;
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
    fn alternate_text(&self, code: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormElement {
    kind: ElementKind,
    text: String,
    translations: Translations,
}

impl FormElement {
    pub fn new(kind: ElementKind, text: impl Into<String>, translations: Translations) -> FormElement {
        FormElement {
            kind,
            text: text.into(),
            translations,
        }
    }

    pub fn from_markup<'a, I>(tag: &str, text: &str, attributes: I) -> Result<FormElement>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Ok(FormElement::new(
            ElementKind::from_tag(tag)?,
            text,
            Translations::from_attributes(attributes),
        ))
    }

    // Markup attributes take precedence over these.
    pub fn add_missing_translations(&mut self, translations: Translations) {
        self.translations.merge_missing(translations);
    }
}

impl TranslatableElement for FormElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn alternate_text(&self, code: &str) -> Option<&str> {
        self.translations.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_is_case_insensitive() {
        assert_eq!(ElementKind::from_tag("TD").unwrap(), ElementKind::TableCell);
        assert_eq!(ElementKind::from_tag("Option").unwrap(), ElementKind::Option);
        assert!(matches!(
            ElementKind::from_tag("div"),
            Err(Error::UnknownElementKind(tag)) if tag == "div"
        ));
    }

    #[test]
    fn test_from_markup_reads_label_attributes() {
        let element =
            FormElement::from_markup("label", "Name", [("data-label-es", "Nombre"), ("for", "name")])
                .unwrap();
        assert_eq!(element.kind(), ElementKind::Label);
        assert_eq!(element.text(), "Name");
        assert_eq!(element.alternate_text("es"), Some("Nombre"));
        assert_eq!(element.alternate_text("de"), None);
    }
}
