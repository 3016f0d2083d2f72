//! Remote collaborators: the governance API and the Catalyst name denylist.

pub mod http;
pub mod rpc;

use async_trait::async_trait;
use std::fmt;

use crate::models::organization::Organization;
use crate::models::proposal::{
    BanNameProposalInput, Proposal, ProposalPage, ProposalQuery, VotedProposal,
};

pub use http::HttpGovernanceClient;

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    /// Non-2xx answer. `message` is the `error` field of the body when present.
    Server { status: u16, message: Option<String> },
    Decode(String),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message: Some(m), .. } if !m.is_empty() => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {e}"),
            ApiError::Server { status, message: Some(m) } => write!(f, "Server error {status}: {m}"),
            ApiError::Server { status, message: None } => write!(f, "Server error {status}"),
            ApiError::Decode(e) => write!(f, "Decode error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

#[async_trait]
pub trait GovernanceApi: Send + Sync {
    /// Names currently on the platform-wide denylist.
    async fn get_ban_names(&self) -> Result<Vec<String>, ApiError>;

    async fn create_proposal_ban_name(
        &self,
        input: &BanNameProposalInput,
    ) -> Result<Proposal, ApiError>;

    /// `Ok(None)` when the API does not know the id.
    async fn get_proposal(&self, id: &str) -> Result<Option<Proposal>, ApiError>;

    async fn get_proposals(&self, query: &ProposalQuery) -> Result<ProposalPage, ApiError>;

    async fn get_voted_proposals(&self, address: &str) -> Result<Vec<VotedProposal>, ApiError>;

    async fn get_organization(&self) -> Result<Organization, ApiError>;
}
