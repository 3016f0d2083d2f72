// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_account, take_flash};
use crate::i18n::Translations;
use crate::state::AppState;
use crate::views::Navbar;

/// Common context shared by all pages.
/// Templates access these as `ctx.navbar`, `ctx.t`, etc.
pub struct PageContext {
    pub navbar: Navbar,
    pub t: Translations,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, state: &AppState, current_path: &str) -> Self {
        let t = state.translations();
        let account = get_account(session);
        let organization = state.organization();
        let navbar = Navbar::new(account.as_deref(), organization.as_ref(), current_path, &t);
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        Self { navbar, t, flash, csrf_token }
    }
}

mod common;
mod profile;
mod proposal;
mod submit;

pub use self::common::{LoadingTemplate, LoginTemplate};
pub use self::profile::ProfileTemplate;
pub use self::proposal::{
    FilterOption, ProposalCard, ProposalDetailTemplate, ProposalListTemplate, ResultRow,
};
pub use self::submit::{BanNameFormTemplate, BanNameFormView};
