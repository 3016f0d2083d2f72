use std::sync::LazyLock;

use crate::auth::validate::is_address;
use crate::form::{Chain, FormValue, RuleSet};

use super::types::BanNameProposalInput;

pub const NAME_MIN_LENGTH: usize = 2;
/// Names of this many characters or more are rejected.
pub const NAME_MAX_LENGTH: usize = 15;
pub const DESCRIPTION_MIN_LENGTH: usize = 20;
pub const DESCRIPTION_MAX_LENGTH: usize = 250;

/// Names are plain ASCII letters and digits.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BanNameState {
    pub name: String,
    pub description: String,
    pub co_authors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BanNameField {
    Name,
    Description,
}

impl BanNameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BanNameField::Name => "name",
            BanNameField::Description => "description",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(BanNameField::Name),
            "description" => Some(BanNameField::Description),
            _ => None,
        }
    }
}

/// Partial update; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct BanNamePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub co_authors: Option<Option<Vec<String>>>,
}

impl BanNamePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..Self::default() }
    }

    pub fn co_authors(addresses: Option<Vec<String>>) -> Self {
        Self { co_authors: Some(addresses), ..Self::default() }
    }
}

impl FormValue for BanNameState {
    type Field = BanNameField;
    type Patch = BanNamePatch;

    fn apply(&mut self, patch: BanNamePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(co_authors) = patch.co_authors {
            self.co_authors = co_authors;
        }
    }
}

impl BanNameState {
    pub fn name_len(&self) -> usize {
        self.name.chars().count()
    }

    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }

    pub fn to_input(&self) -> BanNameProposalInput {
        BanNameProposalInput {
            name: self.name.clone(),
            description: self.description.clone(),
            co_authors: self.co_authors.clone(),
        }
    }
}

pub static BAN_NAME_RULES: LazyLock<RuleSet<BanNameState>> = LazyLock::new(|| {
    RuleSet::new(vec![
        Chain::new(BanNameField::Name)
            .require(|s: &BanNameState| !s.name.is_empty(), "error.ban_name.name_empty")
            .require(
                |s: &BanNameState| s.name_len() >= NAME_MIN_LENGTH,
                "error.ban_name.name_too_short",
            )
            // Short names are left to the length rule while the user is still typing.
            .require_live(
                |s: &BanNameState| s.name_len() < NAME_MIN_LENGTH || is_valid_name(&s.name),
                "error.ban_name.name_invalid",
            )
            .require_live(
                |s: &BanNameState| s.name_len() < NAME_MAX_LENGTH,
                "error.ban_name.name_too_large",
            ),
        Chain::new(BanNameField::Description)
            .require(
                |s: &BanNameState| !s.description.is_empty(),
                "error.ban_name.description_empty",
            )
            .require(
                |s: &BanNameState| s.description_len() >= DESCRIPTION_MIN_LENGTH,
                "error.ban_name.description_too_short",
            )
            .require_live(
                |s: &BanNameState| s.description_len() <= DESCRIPTION_MAX_LENGTH,
                "error.ban_name.description_too_large",
            ),
    ])
});

/// Split a free-text list of co-author addresses. Entries that are not
/// wallet addresses are dropped; nothing left means none.
pub fn parse_co_authors(raw: &str) -> Option<Vec<String>> {
    let mut addresses: Vec<String> = Vec::new();
    for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        let address = part.trim().to_lowercase();
        if !is_address(&address) {
            if !address.is_empty() {
                log::debug!("Ignoring co-author {address:?}: not an address");
            }
            continue;
        }
        if !addresses.contains(&address) {
            addresses.push(address);
        }
    }
    if addresses.is_empty() { None } else { Some(addresses) }
}
