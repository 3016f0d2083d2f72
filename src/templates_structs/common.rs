use askama::Template;

use super::PageContext;

/// Wallet sign-in page, also shown in place of gated pages.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub description: String,
    pub error: Option<String>,
    pub address: String,
    /// Page to return to after connecting.
    pub next: String,
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub ctx: PageContext,
}
