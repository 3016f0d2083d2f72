//! Root task composer: starts the independent background units at boot.

pub mod units;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::state::AppState;

pub use units::{AppUnit, OrganizationUnit, TranslationUnit, VoteUnit, WalletUnit};

/// Handed to each unit; signalling (or dropping it) tells the composer the unit is running.
pub struct Started(Option<oneshot::Sender<()>>);

impl Started {
    pub fn signal(&mut self) {
        if let Some(tx) = self.0.take() {
            let _ = tx.send(());
        }
    }
}

#[async_trait(?Send)]
pub trait Unit {
    fn name(&self) -> &'static str;

    async fn run(self: Box<Self>, state: AppState, started: Started) -> Result<(), String>;
}

/// Handles to the spawned units.
pub struct RootTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl RootTasks {
    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(|(n, _)| *n).collect()
    }

    pub fn is_finished(&self, name: &str) -> bool {
        self.handles
            .iter()
            .any(|(n, h)| *n == name && h.is_finished())
    }

    /// Abort whatever is still running.
    pub fn shutdown(self) {
        for (name, handle) in self.handles {
            if !handle.is_finished() {
                log::info!("Stopping {name} unit");
                handle.abort();
            }
        }
    }
}

/// The five units the app runs for its whole lifetime.
pub fn default_units() -> Vec<Box<dyn Unit>> {
    vec![
        Box::new(TranslationUnit),
        Box::new(OrganizationUnit),
        Box::new(AppUnit),
        Box::new(VoteUnit),
        Box::new(WalletUnit),
    ]
}

/// Spawn every unit on the current actix runtime and wait until each has started.
///
/// Units have no ordering between them. A failing unit is logged and does
/// not affect the others.
pub async fn compose(state: &AppState, units: Vec<Box<dyn Unit>>) -> RootTasks {
    let mut handles = Vec::with_capacity(units.len());
    let mut started = Vec::with_capacity(units.len());

    for unit in units {
        let name = unit.name();
        let (tx, rx) = oneshot::channel();
        let state = state.clone();
        let handle = actix_web::rt::spawn(async move {
            log::info!("Starting {name} unit");
            match unit.run(state, Started(Some(tx))).await {
                Ok(()) => log::info!("{name} unit finished"),
                Err(e) => log::error!("{name} unit failed: {e}"),
            }
        });
        handles.push((name, handle));
        started.push(rx);
    }

    for rx in started {
        // A dropped sender means the unit already ran to completion or failed.
        let _ = rx.await;
    }

    RootTasks { handles }
}
