use crate::i18n::Translations;
use crate::models::proposal::{ProposalStatus, ProposalType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillColor {
    Red,
    Gray,
    Green,
}

impl PillColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PillColor::Red => "red",
            PillColor::Gray => "gray",
            PillColor::Green => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillStyle {
    Shiny,
    Outline,
}

impl PillStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PillStyle::Shiny => "shiny",
            PillStyle::Outline => "outline",
        }
    }
}

/// Color of the check mark shown on successful proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconColor {
    White,
    Green,
}

impl IconColor {
    pub fn css_var(&self) -> &'static str {
        match self {
            IconColor::White => "var(--white-900)",
            IconColor::Green => "var(--green-800)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPill {
    pub status: ProposalStatus,
    pub label: String,
    pub color: PillColor,
    pub style: PillStyle,
    pub icon: Option<IconColor>,
}

pub fn status_color(status: ProposalStatus) -> PillColor {
    match status {
        ProposalStatus::Rejected | ProposalStatus::Deleted => PillColor::Red,
        ProposalStatus::Passed | ProposalStatus::Enacted => PillColor::Green,
        ProposalStatus::Pending | ProposalStatus::Finished | ProposalStatus::Active => {
            PillColor::Gray
        }
    }
}

impl StatusPill {
    pub fn new(status: ProposalStatus, t: &Translations) -> Self {
        let style = if status == ProposalStatus::Enacted { PillStyle::Shiny } else { PillStyle::Outline };
        let icon = match status {
            ProposalStatus::Enacted => Some(IconColor::White),
            ProposalStatus::Passed => Some(IconColor::Green),
            _ => None,
        };
        Self {
            status,
            label: t.t(&format!("status.{}", status.as_str())),
            color: status_color(status),
            style,
            icon,
        }
    }

    pub fn class(&self) -> String {
        format!(
            "Pill StatusPill Pill--{} Pill--{}",
            self.style.as_str(),
            self.color.as_str()
        )
    }

    pub fn icon_color(&self) -> &'static str {
        self.icon.map(|i| i.css_var()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPill {
    pub label: String,
    pub class: String,
}

impl CategoryPill {
    pub fn new(proposal_type: &ProposalType, t: &Translations) -> Self {
        let key = proposal_type.as_str();
        Self {
            label: t.t(&format!("category.{key}")),
            class: format!("Pill CategoryPill CategoryPill--{key}"),
        }
    }
}
