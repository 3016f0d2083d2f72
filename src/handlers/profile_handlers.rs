use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use super::see_other;
use crate::auth::session::get_account;
use crate::auth::validate::is_address;
use crate::errors::{AppError, render};
use crate::navigation::locations;
use crate::state::AppState;
use crate::templates_structs::{PageContext, ProfileTemplate};
use crate::views::ProfileProposalItem;

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub address: Option<String>,
}

/// GET /profile?address=..
/// Voting history of an account; defaults to the connected one.
pub async fn show(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse, AppError> {
    let address = match query.address.clone().or_else(|| get_account(&session)) {
        Some(a) => a.trim().to_lowercase(),
        None => return Ok(see_other(&locations::connect())),
    };
    if !is_address(&address) {
        return Err(AppError::NotFound);
    }

    let voted = state.api.get_voted_proposals(&address).await?;
    let ctx = PageContext::build(&session, &state, "/profile");
    let now = Utc::now();
    let items = voted
        .iter()
        .map(|v| ProfileProposalItem::new(v, now, &ctx.t))
        .collect();

    render(ProfileTemplate { ctx, address, items })
}
