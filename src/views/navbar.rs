use crate::auth::session::short_address;
use crate::i18n::Translations;
use crate::models::organization::Organization;
use crate::navigation::locations;

pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// Top bar shared by every page.
pub struct Navbar {
    pub app_name: String,
    pub active_page: &'static str,
    pub links: Vec<NavLink>,
    pub account: Option<String>,
    pub short_account: String,
    pub profile_href: String,
    pub sign_in_label: String,
    pub sign_out_label: String,
}

impl Navbar {
    pub fn new(
        account: Option<&str>,
        organization: Option<&Organization>,
        current_path: &str,
        t: &Translations,
    ) -> Self {
        let app_name = organization
            .map(|o| o.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| t.t("app.name"));
        let links = vec![
            NavLink {
                href: locations::proposals(&[]),
                label: t.t("navigation.proposals"),
                active: current_path.starts_with("/proposal"),
            },
            NavLink {
                href: locations::submit_ban_name(),
                label: t.t("navigation.submit_ban_name"),
                active: current_path.starts_with("/submit"),
            },
        ];
        Self {
            app_name,
            active_page: "dao",
            links,
            account: account.map(str::to_string),
            short_account: account.map(short_address).unwrap_or_default(),
            profile_href: account.map(locations::profile).unwrap_or_default(),
            sign_in_label: t.t("navigation.sign_in"),
            sign_out_label: t.t("navigation.sign_out"),
        }
    }
}
