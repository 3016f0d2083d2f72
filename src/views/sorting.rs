use crate::i18n::Translations;
use crate::models::proposal::SortOrder;
use crate::navigation::locations;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub text: String,
    pub href: String,
    pub active: bool,
}

/// Newest/oldest dropdown on the proposal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingMenu {
    pub order: SortOrder,
    pub text: String,
    pub options: Vec<SortOption>,
}

pub fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Copy of `params` with `key` set to `value` (replacing any previous values).
pub fn with_param(params: &[(String, String)], key: &str, value: &str) -> Vec<(String, String)> {
    let mut out = without_param(params, key);
    out.push((key.to_string(), value.to_string()));
    out
}

pub fn without_param(params: &[(String, String)], key: &str) -> Vec<(String, String)> {
    params.iter().filter(|(k, _)| k != key).cloned().collect()
}

impl SortingMenu {
    pub fn new(params: &[(String, String)], t: &Translations) -> Self {
        let order = SortOrder::from_param(param(params, "order"));
        let options = [SortOrder::Desc, SortOrder::Asc]
            .into_iter()
            .map(|o| SortOption {
                text: t.t(&format!("navigation.search.sorting.{}", o.as_str())),
                href: Self::href_for(params, o),
                active: o == order,
            })
            .collect();

        Self {
            order,
            text: t.t(&format!("navigation.search.sorting.{}", order.as_str())),
            options,
        }
    }

    /// Changing the order always goes back to the first page.
    pub fn href_for(params: &[(String, String)], order: SortOrder) -> String {
        let next = without_param(&with_param(params, "order", order.as_str()), "page");
        locations::proposals(&next)
    }

    pub fn arrow_direction(&self) -> &'static str {
        match self.order {
            SortOrder::Asc => "Downwards",
            SortOrder::Desc => "Upwards",
        }
    }

    pub fn class(&self) -> String {
        format!("SortingMenu {}", self.arrow_direction())
    }
}
