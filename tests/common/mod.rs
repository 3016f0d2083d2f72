//! Shared test infrastructure.
//!
//! - `MockApi` - in-memory `GovernanceApi` with call counters
//! - `RecordingNavigator` - keeps every navigation and what the cache held at that moment
//! - `test_state()` - an `AppState` wired to a `MockApi`

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use dao_portal::cache::ProposalCache;
use dao_portal::client::{ApiError, GovernanceApi};
use dao_portal::config::AppConfig;
use dao_portal::models::organization::Organization;
use dao_portal::models::proposal::{
    BanNameProposalInput, Proposal, ProposalPage, ProposalQuery, ProposalStatus, ProposalType,
    VotedProposal,
};
use dao_portal::navigation::{NavigateOptions, Navigation, Navigator};
use dao_portal::state::{AppState, WalletStatus};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ACCOUNT: &str = "0x1b7c2b2bd0e6a1d6d3f0a0e5a8f47a0c9ad2a3e1";

// ============================================================================
// FIXTURES
// ============================================================================

pub fn sample_proposal(id: &str) -> Proposal {
    Proposal {
        id: id.to_string(),
        title: format!("Ban name proposal {id}"),
        description: "Offensive name that should not be claimable".to_string(),
        status: ProposalStatus::Active,
        proposal_type: Some(ProposalType::BanName),
        user: ACCOUNT.to_string(),
        choices: vec!["yes".to_string(), "no".to_string()],
        scores: vec![10.0, 2.0],
        finish_at: Utc::now() + Duration::days(7),
        start_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        created_at: None,
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Server {
        status: 400,
        message: Some(message.to_string()),
    }
}

// ============================================================================
// MOCK API
// ============================================================================

#[derive(Default)]
pub struct Calls {
    pub get_ban_names: usize,
    pub create: Vec<BanNameProposalInput>,
    pub get_proposal: Vec<String>,
    pub get_proposals: usize,
    pub last_query: Option<ProposalQuery>,
    pub get_organization: usize,
}

/// In-memory governance API.
pub struct MockApi {
    pub ban_names: Vec<String>,
    pub fail_ban_names: bool,
    /// `Ok(id)` creates a sample proposal with that id; `Err(msg)` rejects with a server message.
    pub create_result: Result<String, Option<String>>,
    pub proposals: Vec<Proposal>,
    /// Resolve `42/`, `42?x` and similar to proposal `42`, like a lenient upstream router.
    pub resolve_aliases: bool,
    pub voted: Vec<VotedProposal>,
    pub calls: Mutex<Calls>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            ban_names: vec!["alice".to_string(), "bob".to_string()],
            fail_ban_names: false,
            create_result: Ok("42".to_string()),
            proposals: Vec::new(),
            resolve_aliases: false,
            voted: Vec::new(),
            calls: Mutex::new(Calls::default()),
        }
    }
}

impl MockApi {
    pub fn create_calls(&self) -> usize {
        self.calls.lock().unwrap().create.len()
    }

    pub fn ban_name_calls(&self) -> usize {
        self.calls.lock().unwrap().get_ban_names
    }

    pub fn proposal_calls(&self) -> usize {
        self.calls.lock().unwrap().get_proposal.len()
    }
}

#[async_trait]
impl GovernanceApi for MockApi {
    async fn get_ban_names(&self) -> Result<Vec<String>, ApiError> {
        self.calls.lock().unwrap().get_ban_names += 1;
        if self.fail_ban_names {
            return Err(ApiError::Server { status: 503, message: None });
        }
        Ok(self.ban_names.clone())
    }

    async fn create_proposal_ban_name(
        &self,
        input: &BanNameProposalInput,
    ) -> Result<Proposal, ApiError> {
        self.calls.lock().unwrap().create.push(input.clone());
        match &self.create_result {
            Ok(id) => {
                let mut p = sample_proposal(id);
                p.title = input.name.clone();
                p.description = input.description.clone();
                Ok(p)
            }
            Err(message) => Err(ApiError::Server { status: 400, message: message.clone() }),
        }
    }

    async fn get_proposal(&self, id: &str) -> Result<Option<Proposal>, ApiError> {
        self.calls.lock().unwrap().get_proposal.push(id.to_string());
        let id = if self.resolve_aliases {
            id.split(['/', '?']).next().unwrap_or(id)
        } else {
            id
        };
        Ok(self.proposals.iter().find(|p| p.id == id).cloned())
    }

    async fn get_proposals(&self, query: &ProposalQuery) -> Result<ProposalPage, ApiError> {
        let mut calls = self.calls.lock().unwrap();
        calls.get_proposals += 1;
        calls.last_query = Some(query.clone());
        drop(calls);
        Ok(ProposalPage {
            data: self.proposals.clone(),
            total: self.proposals.len() as u64,
        })
    }

    async fn get_voted_proposals(&self, _address: &str) -> Result<Vec<VotedProposal>, ApiError> {
        Ok(self.voted.clone())
    }

    async fn get_organization(&self) -> Result<Organization, ApiError> {
        self.calls.lock().unwrap().get_organization += 1;
        Ok(Organization {
            name: "Test DAO".to_string(),
            ..Organization::default()
        })
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

/// Records each navigation with the cache contents for `watch_id` at that instant.
pub struct RecordingNavigator {
    pub cache: ProposalCache,
    pub watch_id: String,
    pub seen: Mutex<Vec<(Navigation, bool)>>,
}

impl RecordingNavigator {
    pub fn new(cache: &ProposalCache, watch_id: &str) -> Self {
        Self {
            cache: cache.clone(),
            watch_id: watch_id.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<(Navigation, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        let cached = self.cache.contains(&self.watch_id);
        self.seen.lock().unwrap().push((
            Navigation { path: path.to_string(), options },
            cached,
        ));
    }
}

// ============================================================================
// STATE
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig {
        governance_api_url: "http://127.0.0.1:9/api".to_string(),
        catalyst_url: "http://127.0.0.1:9".to_string(),
        ..AppConfig::default()
    }
}

/// State over `api`, with the wallet already probed.
pub fn test_state(api: Arc<MockApi>) -> AppState {
    let state = AppState::new(test_config(), api);
    state.set_wallet_status(WalletStatus { probed: true, connected: true, chain_id: None });
    state
}
