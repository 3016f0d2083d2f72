use askama::Template;

use super::PageContext;
use crate::form::FormState;
use crate::i18n::Translations;
use crate::models::proposal::ban_name::{
    BanNameField, BanNameState, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};

/// Everything the ban-name form needs, already translated.
pub struct BanNameFormView {
    pub name: String,
    pub description: String,
    pub co_authors: String,
    pub name_error: bool,
    pub name_message: String,
    pub description_error: bool,
    pub description_message: String,
    pub form_error: Option<String>,
    pub disabled: bool,
    pub prevent_navigation: bool,
    pub name_limit: usize,
    pub description_limit: usize,
}

impl BanNameFormView {
    pub fn new(form: &FormState<BanNameState>, t: &Translations) -> Self {
        let value = form.value();
        let field_message = |field: BanNameField, current: usize, limit: usize| {
            let counter = t.t_with(
                "page.submit.character_counter",
                &[("current", current.to_string()), ("limit", limit.to_string())],
            );
            match form.field_error(field) {
                Some(key) => format!("{} {}", t.t(key), counter),
                None => counter,
            }
        };

        Self {
            name: value.name.clone(),
            description: value.description.clone(),
            co_authors: value.co_authors.as_ref().map(|a| a.join(", ")).unwrap_or_default(),
            name_error: form.field_error(BanNameField::Name).is_some(),
            name_message: field_message(BanNameField::Name, value.name_len(), NAME_MAX_LENGTH),
            description_error: form.field_error(BanNameField::Description).is_some(),
            description_message: field_message(
                BanNameField::Description,
                value.description_len(),
                DESCRIPTION_MAX_LENGTH,
            ),
            form_error: form.form_error().map(|e| t.t(e)),
            disabled: form.validated(),
            prevent_navigation: form.is_modified(&BanNameState::default()),
            name_limit: NAME_MAX_LENGTH,
            description_limit: DESCRIPTION_MAX_LENGTH,
        }
    }
}

#[derive(Template)]
#[template(path = "submit/ban_name.html")]
pub struct BanNameFormTemplate {
    pub ctx: PageContext,
    pub form: BanNameFormView,
}
