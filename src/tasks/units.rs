use std::path::Path;

use async_trait::async_trait;

use super::{Started, Unit};
use crate::client::rpc;
use crate::i18n::Translations;
use crate::state::{AppState, WalletStatus};

/// Loads locale overrides from `LOCALES_DIR` over the built-in table.
pub struct TranslationUnit;

#[async_trait(?Send)]
impl Unit for TranslationUnit {
    fn name(&self) -> &'static str {
        "translation"
    }

    async fn run(self: Box<Self>, state: AppState, mut started: Started) -> Result<(), String> {
        started.signal();
        let Some(dir) = state.config.locales_dir.clone() else {
            return Ok(());
        };
        let locale = state.config.default_locale.clone();

        let (loaded, count) = tokio::task::spawn_blocking(move || {
            let mut loaded = Translations::default();
            loaded
                .load_file(Path::new(&dir), &locale)
                .map(|count| (loaded, count))
        })
        .await
        .map_err(|e| format!("join error: {e}"))?
        .map_err(|e| format!("cannot load locale file: {e}"))?;

        let mut table = state.translations.write().unwrap_or_else(|e| e.into_inner());
        table.absorb(loaded);
        log::info!("Loaded {count} translations for {}", table.locale());
        Ok(())
    }
}

/// Keeps the organization record fresh.
pub struct OrganizationUnit;

#[async_trait(?Send)]
impl Unit for OrganizationUnit {
    fn name(&self) -> &'static str {
        "organization"
    }

    async fn run(self: Box<Self>, state: AppState, mut started: Started) -> Result<(), String> {
        let mut interval = tokio::time::interval(state.config.organization_sync);
        loop {
            started.signal();
            interval.tick().await;
            match state.api.get_organization().await {
                Ok(org) => {
                    log::debug!("Organization synced: {}", org.name);
                    state.set_organization(org);
                }
                Err(e) => log::warn!("Organization sync failed: {e}"),
            }
        }
    }
}

/// One-shot bootstrap of the generic app state.
pub struct AppUnit;

#[async_trait(?Send)]
impl Unit for AppUnit {
    fn name(&self) -> &'static str {
        "app"
    }

    async fn run(self: Box<Self>, state: AppState, mut started: Started) -> Result<(), String> {
        started.signal();
        tokio::task::yield_now().await;
        let config = &state.config;
        log::info!(
            "Governance API {} / Catalyst {} / locale {}",
            config.governance_api_url,
            config.catalyst_url,
            config.default_locale
        );
        state.mark_booted();
        Ok(())
    }
}

/// Refreshes cached proposals so tallies track incoming votes.
pub struct VoteUnit;

#[async_trait(?Send)]
impl Unit for VoteUnit {
    fn name(&self) -> &'static str {
        "vote"
    }

    async fn run(self: Box<Self>, state: AppState, mut started: Started) -> Result<(), String> {
        let mut interval = tokio::time::interval(state.config.vote_sync);
        // The first tick completes immediately; nothing is cached yet at boot.
        interval.tick().await;
        loop {
            started.signal();
            interval.tick().await;
            let ids = state.cache.ids();
            if ids.is_empty() {
                continue;
            }
            let mut refreshed = 0;
            for id in ids {
                match state.api.get_proposal(&id).await {
                    Ok(Some(p)) if p.id == id => {
                        if state.cache.refresh(&id, p) {
                            refreshed += 1;
                        }
                    }
                    Ok(Some(p)) => log::warn!("Vote sync for {id} answered with proposal {}", p.id),
                    Ok(None) => log::debug!("Proposal {id} no longer listed"),
                    Err(e) => log::warn!("Vote sync for proposal {id} failed: {e}"),
                }
            }
            log::debug!("Vote sync refreshed {refreshed} proposals");
        }
    }
}

/// Probes the wallet provider. Without `RPC_URL` the wallet counts as ready at once.
pub struct WalletUnit;

#[async_trait(?Send)]
impl Unit for WalletUnit {
    fn name(&self) -> &'static str {
        "wallet"
    }

    async fn run(self: Box<Self>, state: AppState, mut started: Started) -> Result<(), String> {
        let Some(rpc_url) = state.config.rpc_url.clone() else {
            state.set_wallet_status(WalletStatus { probed: true, connected: true, chain_id: None });
            started.signal();
            return Ok(());
        };

        let http = reqwest::Client::builder()
            .timeout(state.config.request_timeout)
            .build()
            .map_err(|e| format!("cannot build RPC client: {e}"))?;
        let mut interval = tokio::time::interval(state.config.wallet_probe);
        loop {
            started.signal();
            interval.tick().await;
            let status = match rpc::chain_id(&http, &rpc_url).await {
                Ok(chain_id) => WalletStatus { probed: true, connected: true, chain_id: Some(chain_id) },
                Err(e) => {
                    log::warn!("Wallet provider unreachable: {e}");
                    WalletStatus { probed: true, connected: false, chain_id: None }
                }
            };
            if status != state.wallet_status() {
                log::info!("Wallet status: {status:?}");
            }
            state.set_wallet_status(status);
        }
    }
}
