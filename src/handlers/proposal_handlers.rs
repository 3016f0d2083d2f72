use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::i18n::Translations;
use crate::models::proposal::{ProposalQuery, ProposalStatus, ProposalType, SortOrder};
use crate::navigation::locations;
use crate::state::AppState;
use crate::templates_structs::{
    FilterOption, PageContext, ProposalCard, ProposalDetailTemplate, ProposalListTemplate,
    ResultRow,
};
use crate::views::relative_time::from_now;
use crate::views::sorting::{param, with_param, without_param};
use crate::views::{CategoryPill, SortingMenu, StatusPill};

const FILTER_TYPES: [&str; 6] = ["ban_name", "poll", "grant", "catalyst", "poi", "governance"];

/// Parse the raw query string into ordered pairs, keeping unknown params.
fn query_params(req: &HttpRequest) -> Vec<(String, String)> {
    serde_urlencoded::from_str(req.query_string()).unwrap_or_default()
}

fn filter_href(params: &[(String, String)], key: &str, value: Option<&str>) -> String {
    let next = match value {
        Some(v) => with_param(params, key, v),
        None => without_param(params, key),
    };
    locations::proposals(&without_param(&next, "page"))
}

fn status_filters(params: &[(String, String)], t: &Translations) -> Vec<FilterOption> {
    let current = param(params, "status");
    let mut out = vec![FilterOption {
        label: t.t("navigation.search.all_statuses"),
        href: filter_href(params, "status", None),
        active: current.is_none(),
    }];
    out.extend(ProposalStatus::ALL.iter().map(|s| FilterOption {
        label: t.t(&format!("status.{}", s.as_str())),
        href: filter_href(params, "status", Some(s.as_str())),
        active: current == Some(s.as_str()),
    }));
    out
}

fn type_filters(params: &[(String, String)], t: &Translations) -> Vec<FilterOption> {
    let current = param(params, "type");
    let mut out = vec![FilterOption {
        label: t.t("navigation.search.all_types"),
        href: filter_href(params, "type", None),
        active: current.is_none(),
    }];
    out.extend(FILTER_TYPES.iter().map(|ty| FilterOption {
        label: t.t(&format!("category.{ty}")),
        href: filter_href(params, "type", Some(*ty)),
        active: current == Some(*ty),
    }));
    out
}

/// Build the API query from the page's params.
pub fn proposal_query(params: &[(String, String)]) -> ProposalQuery {
    ProposalQuery {
        order: SortOrder::from_param(param(params, "order")),
        page: param(params, "page")
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p > 0)
            .map(|p| p.min(ProposalQuery::MAX_PAGE))
            .unwrap_or(1),
        status: param(params, "status").and_then(ProposalStatus::parse),
        proposal_type: param(params, "type")
            .filter(|t| !t.is_empty())
            .map(|t| ProposalType::from(t.to_string())),
    }
}

/// GET /proposals
pub async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let params = query_params(&req);
    let query = proposal_query(&params);
    let result = state.api.get_proposals(&query).await?;

    let ctx = PageContext::build(&session, &state, "/proposals");
    let now = Utc::now();
    let cards = result
        .data
        .iter()
        .map(|p| ProposalCard::new(p, now, &ctx.t))
        .collect();

    let page_href = |page: u32| locations::proposals(&with_param(&params, "page", &page.to_string()));
    let prev_href = (query.page > 1).then(|| page_href(query.page - 1));
    let seen = u64::from(query.page) * u64::from(ProposalQuery::PER_PAGE);
    let next_href = (seen < result.total && query.page < ProposalQuery::MAX_PAGE)
        .then(|| page_href(query.page + 1));

    let tmpl = ProposalListTemplate {
        sorting: SortingMenu::new(&params, &ctx.t),
        status_filters: status_filters(&params, &ctx.t),
        type_filters: type_filters(&params, &ctx.t),
        cards,
        page: query.page,
        prev_href,
        next_href,
        ctx,
    };
    render(tmpl)
}

#[derive(Deserialize)]
pub struct DetailQuery {
    pub id: String,
    pub new: Option<String>,
}

/// GET /proposal?id=..
/// Served from the proposal cache when possible, so a freshly created
/// proposal renders without another round-trip.
pub async fn detail(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<DetailQuery>,
) -> Result<HttpResponse, AppError> {
    if query.id.trim().is_empty() {
        return Err(AppError::NotFound);
    }
    let proposal = state
        .cache
        .get_or_fetch(&query.id, state.api.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &state, "/proposal");
    let key = if Utc::now() < proposal.finish_at {
        "page.home.open_proposals.ends_date"
    } else {
        "page.home.open_proposals.ended_date"
    };
    let tmpl = ProposalDetailTemplate {
        status: StatusPill::new(proposal.status, &ctx.t),
        category: proposal.proposal_type.as_ref().map(|pt| CategoryPill::new(pt, &ctx.t)),
        is_new: query.new.as_deref() == Some("true"),
        results: ResultRow::rows(&proposal),
        date_text: ctx.t.t_with(key, &[("value", from_now(proposal.finish_at, Utc::now()))]),
        author_href: locations::profile(&proposal.user),
        proposal,
        ctx,
    };
    render(tmpl)
}
