use serde::{Deserialize, Serialize};

/// The DAO organization record shown in the page chrome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub members: u64,
    #[serde(default)]
    pub proposals: u64,
}
