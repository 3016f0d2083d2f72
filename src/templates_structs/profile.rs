use askama::Template;

use super::PageContext;
use crate::views::ProfileProposalItem;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub ctx: PageContext,
    pub address: String,
    pub items: Vec<ProfileProposalItem>,
}
