use std::sync::Mutex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// A recorded navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub options: NavigateOptions,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, options: NavigateOptions);
}

/// Records the last intent so the handler can answer with a redirect.
#[derive(Default)]
pub struct RedirectNavigator {
    last: Mutex<Option<Navigation>>,
}

impl RedirectNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<Navigation> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        *last = Some(Navigation { path: path.to_string(), options });
    }
}

/// Route builders for every page the app links to.
pub mod locations {
    pub fn proposals(params: &[(String, String)]) -> String {
        if params.is_empty() {
            return "/proposals".to_string();
        }
        match serde_urlencoded::to_string(params) {
            Ok(qs) => format!("/proposals?{qs}"),
            Err(_) => "/proposals".to_string(),
        }
    }

    /// Detail page; `new` tags the visit as "just created".
    pub fn proposal(id: &str, new: bool) -> String {
        let mut params = vec![("id", id)];
        if new {
            params.push(("new", "true"));
        }
        let qs = serde_urlencoded::to_string(&params).unwrap_or_default();
        format!("/proposal?{qs}")
    }

    pub fn profile(address: &str) -> String {
        let qs = serde_urlencoded::to_string([("address", address)]).unwrap_or_default();
        format!("/profile?{qs}")
    }

    pub fn submit_ban_name() -> String {
        "/submit/ban-name".to_string()
    }

    pub fn connect() -> String {
        "/connect".to_string()
    }
}
