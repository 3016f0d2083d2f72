use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiError, GovernanceApi};
use crate::config::AppConfig;
use crate::models::organization::Organization;
use crate::models::proposal::{
    BanNameProposalInput, Proposal, ProposalPage, ProposalQuery, VotedProposal,
};

/// Governance answers are wrapped as `{ ok, data, total?, error? }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Catalyst answers the denylist as `{ data: [ ... ] }`.
#[derive(Deserialize)]
struct DenylistBody {
    #[serde(default)]
    data: Vec<String>,
}

/// `GovernanceApi` backed by the public governance and Catalyst HTTP APIs.
#[derive(Clone)]
pub struct HttpGovernanceClient {
    http: Client,
    governance_url: String,
    catalyst_url: String,
}

impl HttpGovernanceClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            governance_url: config.governance_api_url.clone(),
            catalyst_url: config.catalyst_url.clone(),
        })
    }

    fn governance(&self, path: &str) -> String {
        format!("{}{}", self.governance_url, path)
    }

    /// `/proposals/{id}` with `id` encoded as one path segment.
    fn proposal_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.governance_url)
            .map_err(|e| ApiError::Decode(format!("bad governance URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Decode("governance URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("proposals")
            .push(id);
        Ok(url)
    }

    async fn envelope<T: DeserializeOwned>(resp: Response) -> Result<Envelope<T>, ApiError> {
        let body = read_body(resp).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn data<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let envelope = Self::envelope::<T>(resp).await?;
        match envelope.data {
            Some(data) => Ok(data),
            None => Err(ApiError::Decode(
                envelope.error.unwrap_or_else(|| "missing data".to_string()),
            )),
        }
    }
}

/// Read the body, turning non-2xx answers into `ApiError::Server`.
async fn read_body(resp: Response) -> Result<Vec<u8>, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        return Err(ApiError::Server { status: status.as_u16(), message });
    }
    Ok(body.to_vec())
}

#[async_trait]
impl GovernanceApi for HttpGovernanceClient {
    async fn get_ban_names(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/lambdas/contracts/denylisted-names", self.catalyst_url);
        let resp = self.http.get(url).send().await?;
        let body = read_body(resp).await?;
        let parsed: DenylistBody =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parsed.data)
    }

    async fn create_proposal_ban_name(
        &self,
        input: &BanNameProposalInput,
    ) -> Result<Proposal, ApiError> {
        let resp = self
            .http
            .post(self.governance("/proposals/ban-name"))
            .json(input)
            .send()
            .await?;
        Self::data(resp).await
    }

    async fn get_proposal(&self, id: &str) -> Result<Option<Proposal>, ApiError> {
        let resp = self.http.get(self.proposal_url(id)?).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Self::envelope::<Proposal>(resp).await?.data)
    }

    async fn get_proposals(&self, query: &ProposalQuery) -> Result<ProposalPage, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("limit", ProposalQuery::PER_PAGE.to_string()),
            ("offset", query.offset().to_string()),
            ("order", query.order.as_str().to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(t) = &query.proposal_type {
            params.push(("type", t.as_str().to_string()));
        }

        let resp = self
            .http
            .get(self.governance("/proposals"))
            .query(&params)
            .send()
            .await?;
        let envelope = Self::envelope::<Vec<Proposal>>(resp).await?;
        let data = envelope.data.unwrap_or_default();
        let total = envelope.total.unwrap_or(data.len() as u64);
        Ok(ProposalPage { data, total })
    }

    async fn get_voted_proposals(&self, address: &str) -> Result<Vec<VotedProposal>, ApiError> {
        let resp = self
            .http
            .get(self.governance(&format!("/votes/{}", address.to_lowercase())))
            .send()
            .await?;
        Self::data(resp).await
    }

    async fn get_organization(&self) -> Result<Organization, ApiError> {
        let resp = self.http.get(self.governance("/organization")).send().await?;
        Self::data(resp).await
    }
}
