use chrono::{DateTime, Utc};

use super::pills::{CategoryPill, StatusPill};
use super::relative_time::from_now;
use crate::i18n::Translations;
use crate::models::proposal::VotedProposal;
use crate::navigation::locations;

/// Index of the first highest score, as the winning choice.
pub fn winning_choice(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// One row of a profile's voting history.
#[derive(Debug, Clone)]
pub struct ProfileProposalItem {
    pub href: String,
    pub title: String,
    pub status: StatusPill,
    pub category: Option<CategoryPill>,
    pub vote_text: String,
    pub date_text: String,
    /// The account voted for the choice that is currently winning.
    pub is_match: bool,
    pub stance_text: String,
}

impl ProfileProposalItem {
    pub fn new(voted: &VotedProposal, now: DateTime<Utc>, t: &Translations) -> Self {
        let proposal = &voted.proposal;
        let choice_idx = voted.choice.checked_sub(1);
        let chosen = choice_idx
            .and_then(|i| proposal.choices.get(i))
            .cloned()
            .unwrap_or_default();

        let date_key = if now < proposal.finish_at {
            "page.home.open_proposals.ends_date"
        } else {
            "page.home.open_proposals.ended_date"
        };
        let date_text = t.t_with(date_key, &[("value", from_now(proposal.finish_at, now))]);

        let is_match = match (winning_choice(&proposal.scores), choice_idx) {
            (Some(w), Some(c)) => w == c,
            _ => false,
        };
        let stance_key = if is_match {
            "page.profile.voted_proposals.match"
        } else {
            "page.profile.voted_proposals.no_match"
        };

        Self {
            href: locations::proposal(&proposal.id, false),
            title: proposal.title.clone(),
            status: StatusPill::new(proposal.status, t),
            category: proposal.proposal_type.as_ref().map(|pt| CategoryPill::new(pt, t)),
            vote_text: t.t_with("page.profile.voted_proposals.vote", &[("vote", chosen)]),
            date_text,
            is_match,
            stance_text: t.t(stance_key),
        }
    }
}
