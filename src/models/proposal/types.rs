use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal. Unknown strings read as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Active,
    Finished,
    Rejected,
    Passed,
    Enacted,
    Deleted,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 7] = [
        ProposalStatus::Pending,
        ProposalStatus::Active,
        ProposalStatus::Finished,
        ProposalStatus::Rejected,
        ProposalStatus::Passed,
        ProposalStatus::Enacted,
        ProposalStatus::Deleted,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            "rejected" => Some(Self::Rejected),
            "passed" => Some(Self::Passed),
            "enacted" => Some(Self::Enacted),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Rejected => "rejected",
            Self::Passed => "passed",
            Self::Enacted => "enacted",
            Self::Deleted => "deleted",
        }
    }
}

impl From<String> for ProposalStatus {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or_default()
    }
}

impl From<ProposalStatus> for String {
    fn from(s: ProposalStatus) -> Self {
        s.as_str().to_string()
    }
}

/// Proposal category as reported by the governance API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProposalType {
    BanName,
    Poll,
    Catalyst,
    Grant,
    LinkedWearables,
    Poi,
    Draft,
    Governance,
    Hiring,
    Pitch,
    Tender,
    Bid,
    Other(String),
}

impl ProposalType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BanName => "ban_name",
            Self::Poll => "poll",
            Self::Catalyst => "catalyst",
            Self::Grant => "grant",
            Self::LinkedWearables => "linked_wearables",
            Self::Poi => "poi",
            Self::Draft => "draft",
            Self::Governance => "governance",
            Self::Hiring => "hiring",
            Self::Pitch => "pitch",
            Self::Tender => "tender",
            Self::Bid => "bid",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ProposalType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ban_name" => Self::BanName,
            "poll" => Self::Poll,
            "catalyst" => Self::Catalyst,
            "grant" => Self::Grant,
            "linked_wearables" => Self::LinkedWearables,
            "poi" => Self::Poi,
            "draft" => Self::Draft,
            "governance" => Self::Governance,
            "hiring" => Self::Hiring,
            "pitch" => Self::Pitch,
            "tender" => Self::Tender,
            "bid" => Self::Bid,
            _ => Self::Other(s),
        }
    }
}

impl From<ProposalType> for String {
    fn from(t: ProposalType) -> Self {
        t.as_str().to_string()
    }
}

/// A governance proposal. Shape follows the governance API contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(alias = "proposal_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(rename = "type", default)]
    pub proposal_type: Option<ProposalType>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
    pub finish_at: DateTime<Utc>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One proposal together with the choice a given account voted for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotedProposal {
    pub proposal: Proposal,
    /// 1-indexed position into `proposal.choices` / `proposal.scores`.
    pub choice: usize,
}

/// Payload sent to the governance API to open a "ban name" proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanNameProposalInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub co_authors: Option<Vec<String>>,
}

/// Sort direction accepted by the proposal list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only an exact `ASC` selects ascending order.
    pub fn from_param(s: Option<&str>) -> Self {
        if s == Some("ASC") { SortOrder::Asc } else { SortOrder::Desc }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters and paging for the proposal list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalQuery {
    pub order: SortOrder,
    pub page: u32,
    pub status: Option<ProposalStatus>,
    pub proposal_type: Option<ProposalType>,
}

impl ProposalQuery {
    pub const PER_PAGE: u32 = 25;
    /// Pages past this are clamped when parsed from a query string.
    pub const MAX_PAGE: u32 = 100_000;

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(Self::PER_PAGE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalPage {
    pub data: Vec<Proposal>,
    #[serde(default)]
    pub total: u64,
}
