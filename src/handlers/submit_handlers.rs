use std::collections::BTreeMap;

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use super::redirect;
use crate::auth::csrf;
use crate::auth::session;
use crate::errors::{AppError, render};
use crate::form::FormState;
use crate::models::proposal::ban_name::{
    BAN_NAME_RULES, BanNameField, BanNamePatch, BanNameState, parse_co_authors,
};
use crate::navigation::{RedirectNavigator, locations};
use crate::state::AppState;
use crate::submit::submit_ban_name;
use crate::templates_structs::{
    BanNameFormTemplate, BanNameFormView, LoadingTemplate, LoginTemplate, PageContext,
};

#[derive(Deserialize)]
pub struct BanNameForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub co_authors: String,
    pub csrf_token: String,
}

/// Loading view while the account is resolving, log-in view without one.
fn gate(session: &Session, state: &AppState) -> Result<Option<HttpResponse>, AppError> {
    let (account, account_state) = session::account(session, state);
    let current = locations::submit_ban_name();

    if account_state.loading {
        let ctx = PageContext::build(session, state, &current);
        return render(LoadingTemplate { ctx }).map(Some);
    }

    if account.is_none() {
        let ctx = PageContext::build(session, state, &current);
        let tmpl = LoginTemplate {
            title: ctx.t.t("page.submit_ban_name.title"),
            description: ctx.t.t("page.submit_ban_name.description"),
            error: None,
            address: String::new(),
            next: current,
            ctx,
        };
        return render(tmpl).map(Some);
    }

    Ok(None)
}

fn render_form(
    session: &Session,
    state: &AppState,
    form: &FormState<BanNameState>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, state, &locations::submit_ban_name());
    let view = BanNameFormView::new(form, &ctx.t);
    render(BanNameFormTemplate { ctx, form: view })
}

/// GET /submit/ban-name
pub async fn ban_name_form(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if let Some(resp) = gate(&session, &state)? {
        return Ok(resp);
    }
    let form = FormState::new(BanNameState::default());
    render_form(&session, &state, &form)
}

/// POST /submit/ban-name
/// Validates, then runs the submission pipeline. Success redirects to the
/// new proposal; any failure re-renders the form, editable, with the error.
pub async fn ban_name_submit(
    state: web::Data<AppState>,
    session: Session,
    input: web::Form<BanNameForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &input.csrf_token)?;
    if let Some(resp) = gate(&session, &state)? {
        return Ok(resp);
    }

    let input = input.into_inner();
    let mut form = FormState::new(BanNameState::default());
    // Fields are trimmed the way the page does on blur.
    form.set(BanNamePatch {
        name: Some(input.name.trim().to_string()),
        description: Some(input.description.trim().to_string()),
        co_authors: Some(parse_co_authors(&input.co_authors)),
    });

    if form.validate(&BAN_NAME_RULES) {
        let navigator = RedirectNavigator::new();
        submit_ban_name(&mut form, state.api.as_ref(), &state.cache, &navigator).await;
        if let Some(nav) = navigator.take() {
            return Ok(redirect(&nav));
        }
    }

    render_form(&session, &state, &form)
}

#[derive(Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Fields that just changed; all fields when empty.
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub errors: BTreeMap<String, String>,
    pub messages: BTreeMap<String, String>,
}

/// POST /api/submit/ban-name/check
/// Live per-field feedback while the user types.
pub async fn ban_name_check(
    state: web::Data<AppState>,
    body: web::Json<CheckRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let mut fields: Vec<BanNameField> = body
        .fields
        .iter()
        .filter_map(|f| BanNameField::parse(f))
        .collect();
    if fields.is_empty() {
        fields = BAN_NAME_RULES.fields().collect();
    }

    let mut form = FormState::new(BanNameState::default());
    form.set(BanNamePatch {
        name: Some(body.name),
        description: Some(body.description),
        co_authors: None,
    });
    form.check(&BAN_NAME_RULES, &fields);

    let t = state.translations();
    let mut errors = BTreeMap::new();
    let mut messages = BTreeMap::new();
    for field in fields {
        if let Some(key) = form.field_error(field) {
            errors.insert(field.as_str().to_string(), key.to_string());
            messages.insert(field.as_str().to_string(), t.t(key));
        }
    }
    HttpResponse::Ok().json(CheckResponse { errors, messages })
}
