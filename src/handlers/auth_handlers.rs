use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::see_other;
use crate::auth::{csrf, session, validate};
use crate::errors::{AppError, render};
use crate::navigation::locations;
use crate::state::AppState;
use crate::templates_structs::{LoginTemplate, PageContext};

#[derive(Deserialize)]
pub struct ConnectQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct ConnectForm {
    pub address: String,
    #[serde(default)]
    pub next: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Only same-site relative paths are followed after connecting.
/// Browsers read `/\host` like `//host` and drop tabs and newlines, so
/// backslashes and control characters are refused anywhere in the path.
fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(n)
            if n.starts_with('/')
                && !n.starts_with("//")
                && !n.chars().any(|c| c == '\\' || c.is_control()) =>
        {
            n.to_string()
        }
        _ => locations::proposals(&[]),
    }
}

fn login_page(
    session: &Session,
    state: &AppState,
    address: String,
    error: Option<String>,
    next: String,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, state, &locations::connect());
    let tmpl = LoginTemplate {
        title: ctx.t.t("page.connect.title"),
        description: ctx.t.t("page.connect.description"),
        error: error.map(|key| ctx.t.t(&key)),
        address,
        next,
        ctx,
    };
    render(tmpl)
}

/// GET /connect
pub async fn connect_page(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ConnectQuery>,
) -> Result<HttpResponse, AppError> {
    let next = safe_next(query.next.as_deref());
    if session::get_account(&session).is_some() {
        return Ok(see_other(&next));
    }
    login_page(&session, &state, String::new(), None, next)
}

/// POST /connect
pub async fn connect_submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<ConnectForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let next = safe_next(Some(&form.next));

    if let Some(error) = validate::validate_address(&form.address) {
        return login_page(&session, &state, form.address.clone(), Some(error), next);
    }

    session::set_account(&session, form.address.trim()).map_err(AppError::Session)?;
    log::info!("Account connected: {}", form.address.trim().to_lowercase());
    Ok(see_other(&next))
}

/// POST /disconnect
pub async fn disconnect(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other(&locations::proposals(&[])))
}
