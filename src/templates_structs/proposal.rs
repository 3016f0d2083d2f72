use askama::Template;
use chrono::{DateTime, Utc};

use super::PageContext;
use crate::i18n::Translations;
use crate::models::proposal::Proposal;
use crate::navigation::locations;
use crate::views::profile_item::winning_choice;
use crate::views::relative_time::from_now;
use crate::views::{CategoryPill, SortingMenu, StatusPill};

/// Proposal as shown in the list view.
pub struct ProposalCard {
    pub href: String,
    pub title: String,
    pub status: StatusPill,
    pub category: Option<CategoryPill>,
    pub date_text: String,
}

impl ProposalCard {
    pub fn new(p: &Proposal, now: DateTime<Utc>, t: &Translations) -> Self {
        let key = if now < p.finish_at {
            "page.home.open_proposals.ends_date"
        } else {
            "page.home.open_proposals.ended_date"
        };
        Self {
            href: locations::proposal(&p.id, false),
            title: p.title.clone(),
            status: StatusPill::new(p.status, t),
            category: p.proposal_type.as_ref().map(|pt| CategoryPill::new(pt, t)),
            date_text: t.t_with(key, &[("value", from_now(p.finish_at, now))]),
        }
    }
}

/// One entry of a filter dropdown.
pub struct FilterOption {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "proposals/list.html")]
pub struct ProposalListTemplate {
    pub ctx: PageContext,
    pub cards: Vec<ProposalCard>,
    pub sorting: SortingMenu,
    pub status_filters: Vec<FilterOption>,
    pub type_filters: Vec<FilterOption>,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// One choice with its tally on the detail page.
pub struct ResultRow {
    pub choice: String,
    pub score: String,
    pub percent: u32,
    pub winning: bool,
}

impl ResultRow {
    pub fn rows(p: &Proposal) -> Vec<ResultRow> {
        let total: f64 = p.scores.iter().sum();
        let winner = winning_choice(&p.scores);
        p.choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let score = p.scores.get(i).copied().unwrap_or(0.0);
                let percent = if total > 0.0 { (score / total * 100.0).round() as u32 } else { 0 };
                ResultRow {
                    choice: choice.clone(),
                    score: format!("{score:.0}"),
                    percent,
                    winning: winner == Some(i) && total > 0.0,
                }
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "proposals/detail.html")]
pub struct ProposalDetailTemplate {
    pub ctx: PageContext,
    pub proposal: Proposal,
    pub status: StatusPill,
    pub category: Option<CategoryPill>,
    /// Arrived here straight after creating the proposal.
    pub is_new: bool,
    pub results: Vec<ResultRow>,
    pub date_text: String,
    pub author_href: String,
}
