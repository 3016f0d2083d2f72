use actix_session::Session;

use crate::state::AppState;

const ACCOUNT_KEY: &str = "account";

/// Whether the account is still being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    pub loading: bool,
}

/// The connected account (if any) and whether it is still loading.
///
/// Loading lasts until the wallet unit has probed the provider once.
pub fn account(session: &Session, state: &AppState) -> (Option<String>, AccountState) {
    let loading = !state.wallet_status().probed;
    let account = if loading { None } else { get_account(session) };
    (account, AccountState { loading })
}

pub fn get_account(session: &Session) -> Option<String> {
    session.get::<String>(ACCOUNT_KEY).unwrap_or(None)
}

pub fn set_account(session: &Session, address: &str) -> Result<(), String> {
    session
        .insert(ACCOUNT_KEY, address.to_lowercase())
        .map_err(|e| format!("Session error: {e}"))
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// `0x1234…abcd` form for the navbar.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}
