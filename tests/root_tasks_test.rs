//! Root task composer: units start independently and a failure stays contained.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use dao_portal::config::AppConfig;
use dao_portal::state::AppState;
use dao_portal::tasks::{self, Started, Unit};

use common::{MockApi, test_config};

struct FailingUnit;

#[async_trait(?Send)]
impl Unit for FailingUnit {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn run(self: Box<Self>, _state: AppState, _started: Started) -> Result<(), String> {
        Err("boom".to_string())
    }
}

struct FlagUnit(Arc<AtomicBool>);

#[async_trait(?Send)]
impl Unit for FlagUnit {
    fn name(&self) -> &'static str {
        "flag"
    }

    async fn run(self: Box<Self>, _state: AppState, mut started: Started) -> Result<(), String> {
        started.signal();
        self.0.store(true, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(())
    }
}

async fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

fn fresh_state(api: Arc<MockApi>) -> AppState {
    AppState::new(test_config(), api)
}

#[actix_rt::test]
async fn test_compose_starts_all_default_units() {
    let api = Arc::new(MockApi::default());
    let state = fresh_state(api.clone());

    let root = tasks::compose(&state, tasks::default_units()).await;

    let mut names = root.names();
    names.sort();
    assert_eq!(names, vec!["app", "organization", "translation", "vote", "wallet"]);

    assert!(wait_for(|| state.is_booted()).await, "app unit marks boot");
    assert!(wait_for(|| state.organization().is_some()).await, "organization synced once");
    assert_eq!(state.organization().map(|o| o.name), Some("Test DAO".to_string()));
    root.shutdown();
}

#[actix_rt::test]
async fn test_wallet_ready_without_rpc_url() {
    let api = Arc::new(MockApi::default());
    let state = fresh_state(api);
    assert!(!state.wallet_status().probed);

    let root = tasks::compose(&state, tasks::default_units()).await;

    let wallet = state.wallet_status();
    assert!(wallet.probed);
    assert!(wallet.connected);
    assert!(wait_for(|| root.is_finished("wallet")).await);
    root.shutdown();
}

#[actix_rt::test]
async fn test_failing_unit_does_not_affect_others() {
    let api = Arc::new(MockApi::default());
    let state = fresh_state(api);
    let flag = Arc::new(AtomicBool::new(false));

    let units: Vec<Box<dyn Unit>> = vec![Box::new(FailingUnit), Box::new(FlagUnit(flag.clone()))];
    let root = tasks::compose(&state, units).await;

    assert!(flag.load(Ordering::SeqCst));
    assert!(wait_for(|| root.is_finished("failing")).await);
    assert!(!root.is_finished("flag"));
    root.shutdown();
}

#[actix_rt::test]
async fn test_translation_unit_merges_locale_dir() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("es.json"),
        r#"{"navigation": {"proposals": "Propuestas"}}"#,
    )
    .expect("write locale");

    let config = AppConfig {
        locales_dir: Some(dir.path().to_string_lossy().to_string()),
        default_locale: "es".to_string(),
        ..test_config()
    };
    let state = AppState::new(config, Arc::new(MockApi::default()));
    let before = state.translations().t("page.submit_ban_name.title");

    let root = tasks::compose(&state, tasks::default_units()).await;

    assert!(
        wait_for(|| state.translations().t("navigation.proposals") == "Propuestas").await,
        "locale file merged"
    );
    assert_eq!(state.translations().locale(), "es");
    // Keys missing from the file keep their built-in text.
    assert_eq!(state.translations().t("page.submit_ban_name.title"), before);
    root.shutdown();
}

#[actix_rt::test]
async fn test_translation_unit_failure_keeps_builtin_table() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = AppConfig {
        locales_dir: Some(dir.path().to_string_lossy().to_string()),
        default_locale: "fr".to_string(),
        ..test_config()
    };
    let state = AppState::new(config, Arc::new(MockApi::default()));
    let builtin = state.translations().t("navigation.proposals");

    let root = tasks::compose(&state, tasks::default_units()).await;

    assert!(wait_for(|| root.is_finished("translation")).await);
    assert_eq!(state.translations().t("navigation.proposals"), builtin);
    assert!(wait_for(|| state.is_booted()).await);
    root.shutdown();
}

#[actix_rt::test]
async fn test_vote_unit_refreshes_only_cached_ids() {
    let mut fresh = common::sample_proposal("7");
    fresh.scores = vec![99.0, 1.0];
    let api = Arc::new(MockApi {
        proposals: vec![fresh, common::sample_proposal("8")],
        ..MockApi::default()
    });
    let config = AppConfig {
        vote_sync: Duration::from_millis(10),
        ..test_config()
    };
    let state = AppState::new(config, api.clone());
    state.cache.set("7", common::sample_proposal("7"));

    let root = tasks::compose(&state, tasks::default_units()).await;

    assert!(
        wait_for(|| state.cache.get("7").map(|p| p.scores) == Some(vec![99.0, 1.0])).await,
        "cached proposal refreshed"
    );
    assert_eq!(state.cache.ids(), vec!["7".to_string()]);
    assert!(!api.calls.lock().unwrap().get_proposal.iter().any(|id| id == "8"));
    root.shutdown();
}
