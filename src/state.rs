//! Shared runtime context handed to handlers and background units.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::cache::ProposalCache;
use crate::client::GovernanceApi;
use crate::config::AppConfig;
use crate::i18n::{self, SharedTranslations, Translations};
use crate::models::organization::Organization;

/// Wallet provider connectivity as last probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletStatus {
    /// False until the first probe has finished; pages show a loading view meanwhile.
    pub probed: bool,
    pub connected: bool,
    pub chain_id: Option<u64>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<dyn GovernanceApi>,
    pub cache: ProposalCache,
    pub translations: SharedTranslations,
    pub organization: Arc<RwLock<Option<Organization>>>,
    pub wallet: Arc<RwLock<WalletStatus>>,
    pub booted_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Arc<dyn GovernanceApi>) -> Self {
        Self {
            cache: ProposalCache::with_capacity(config.cache_capacity),
            config,
            api,
            translations: i18n::shared(Translations::builtin()),
            organization: Arc::new(RwLock::new(None)),
            wallet: Arc::new(RwLock::new(WalletStatus::default())),
            booted_at: Arc::new(RwLock::new(None)),
        }
    }

    pub fn translations(&self) -> Translations {
        i18n::snapshot(&self.translations)
    }

    pub fn wallet_status(&self) -> WalletStatus {
        self.wallet.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_wallet_status(&self, status: WalletStatus) {
        *self.wallet.write().unwrap_or_else(|e| e.into_inner()) = status;
    }

    pub fn organization(&self) -> Option<Organization> {
        self.organization.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_organization(&self, org: Organization) {
        *self.organization.write().unwrap_or_else(|e| e.into_inner()) = Some(org);
    }

    pub fn mark_booted(&self) {
        *self.booted_at.write().unwrap_or_else(|e| e.into_inner()) = Some(Utc::now());
    }

    pub fn is_booted(&self) -> bool {
        self.booted_at.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
