//! The ban-name submission pipeline: denylist fetch, duplicate check,
//! remote creation, cache write, navigation.

use std::fmt;

use crate::cache::ProposalCache;
use crate::client::{ApiError, GovernanceApi};
use crate::form::{ErrorKey, ErrorMap, FormState};
use crate::models::proposal::Proposal;
use crate::models::proposal::ban_name::BanNameState;
use crate::navigation::{NavigateOptions, Navigator, locations};

pub const FETCHING_NAMES: &str = "error.ban_name.fetching_names";
pub const NAME_ALREADY_BANNED: &str = "error.ban_name.name_already_banned";
pub const CREATE_FAILED: &str = "error.ban_name.create_failed";

#[derive(Debug)]
pub enum SubmitError {
    Fetch(ApiError),
    Duplicate,
    Create(ApiError),
}

impl SubmitError {
    /// Translation key, or the server's own message for a rejected create.
    pub fn message(&self) -> String {
        match self {
            SubmitError::Fetch(_) => FETCHING_NAMES.to_string(),
            SubmitError::Duplicate => NAME_ALREADY_BANNED.to_string(),
            SubmitError::Create(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| CREATE_FAILED.to_string()),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Fetch(e) => write!(f, "Failed to fetch banned names: {e}"),
            SubmitError::Duplicate => write!(f, "Name is already banned"),
            SubmitError::Create(e) => write!(f, "Failed to create proposal: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Case-insensitive membership in the denylist.
pub fn is_banned(names: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    names.iter().any(|n| n.to_lowercase() == candidate)
}

async fn create(
    state: &BanNameState,
    api: &dyn GovernanceApi,
) -> Result<Proposal, SubmitError> {
    let names = api.get_ban_names().await.map_err(SubmitError::Fetch)?;

    if is_banned(&names, &state.name) {
        return Err(SubmitError::Duplicate);
    }

    api.create_proposal_ban_name(&state.to_input())
        .await
        .map_err(SubmitError::Create)
}

/// Run the pipeline for a form that has just passed `validate()`.
///
/// On success the proposal is cached under its id and a replacing navigation
/// to its detail page is recorded. On failure the message lands in the
/// wildcard slot and the form is reopened. A form that is not validated is
/// left alone and `None` is returned.
pub async fn submit_ban_name(
    form: &mut FormState<BanNameState>,
    api: &dyn GovernanceApi,
    cache: &ProposalCache,
    navigator: &dyn Navigator,
) -> Option<Proposal> {
    if !form.validated() {
        return None;
    }

    match create(form.value(), api).await {
        Ok(proposal) => {
            log::info!("Created ban name proposal {} for {:?}", proposal.id, form.value().name);
            cache.set(&proposal.id, proposal.clone());
            navigator.navigate(
                &locations::proposal(&proposal.id, true),
                NavigateOptions { replace: true },
            );
            Some(proposal)
        }
        Err(e) => {
            log::warn!("Ban name submission failed: {e}");
            form.error(ErrorMap::from([(ErrorKey::Form, e.message())]));
            form.reopen();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_banned_ignores_case() {
        let names = vec!["alice".to_string(), "Bob".to_string()];
        assert!(is_banned(&names, "Alice"));
        assert!(is_banned(&names, "bob"));
        assert!(!is_banned(&names, "carol"));
    }

    #[test]
    fn test_create_error_prefers_server_message() {
        let e = SubmitError::Create(ApiError::Server {
            status: 400,
            message: Some("Name already has an active proposal".to_string()),
        });
        assert_eq!(e.message(), "Name already has an active proposal");

        let e = SubmitError::Create(ApiError::Server { status: 502, message: None });
        assert_eq!(e.message(), CREATE_FAILED);
    }
}
