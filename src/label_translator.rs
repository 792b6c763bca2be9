use crate::element::*;
use crate::session_storage::*;
use crate::translations::*;

pub const FORM_LANG_KEY: &str = "form_lang";
pub const LANGS_SELECT_ID: &str = "form-langs-select";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelector {
    pub id: String,
    pub choices: Vec<LanguageCode>,
    value: Option<LanguageCode>,
}

impl LanguageSelector {
    pub fn new(choices: Vec<LanguageCode>) -> LanguageSelector {
        LanguageSelector {
            id: LANGS_SELECT_ID.to_string(),
            choices,
            value: None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, code: &str) {
        self.value = Some(code.to_string());
    }
}

pub fn apply_labels<E: TranslatableElement>(elements: &mut [E], code: &str) -> usize {
    let mut replaced = 0;
    for element in elements.iter_mut() {
        let new_text = match element.alternate_text(code) {
            Some(text) => text.to_string(),
            None => continue,
        };
        log::debug!("{} \"{}\" -> \"{}\"", element.kind(), element.text(), new_text);
        element.set_text(new_text);
        replaced += 1;
    }

    if replaced == 0 {
        log::debug!("No element has a label for language \"{}\"", code);
    }
    replaced
}

pub fn on_selector_changed<S, E>(storage: &mut S, elements: &mut [E], code: &str) -> usize
where
    S: SessionStorage + ?Sized,
    E: TranslatableElement,
{
    storage.set_item(FORM_LANG_KEY, code);
    apply_labels(elements, code)
}

pub fn on_ready<S, E>(
    storage: &S,
    selector: &mut LanguageSelector,
    elements: &mut [E],
) -> Option<LanguageCode>
where
    S: SessionStorage + ?Sized,
    E: TranslatableElement,
{
    let code = storage
        .get_item(FORM_LANG_KEY)
        .filter(|code| !code.is_empty())?;

    log::info!("Restoring form language \"{}\"", code);
    selector.set_value(&code);
    apply_labels(elements, &code);
    Some(code)
}
