//! Single-domain navigation guard
//!
//! A reactive allow-list over top-level navigations: every location change is
//! inspected, and anything off the allowed domain (or off HTTPS) triggers a
//! corrective load of the canonical URL. The guard is a two-state machine so
//! the dependency "the corrective load must itself pass the predicate" is
//! explicit rather than buried in a callback.

use crate::utils::config::AppConfig;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// The current location passes the predicate
    InDomain,
    /// A corrective load has been issued and its location change is pending
    Redirecting,
}

#[derive(Debug, Clone)]
pub struct NavigationGuard {
    allowed_host_suffix: String,
    canonical_url: Url,
    state: GuardState,
}

impl NavigationGuard {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            allowed_host_suffix: config.allowed_host_suffix.clone(),
            canonical_url: config.canonical_url.clone(),
            state: GuardState::InDomain,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// The allow-list predicate: secure scheme and a host under the allowed
    /// domain suffix.
    pub fn permits(&self, location: &Url) -> bool {
        location.scheme() == "https"
            && location
                .host_str()
                .is_some_and(|host| host.ends_with(&self.allowed_host_suffix))
    }

    /// Inspect a location change. Returns the corrective URL to load when the
    /// location is not permitted; the caller must load it and feed the
    /// resulting change back in, which collapses the state to `InDomain`.
    pub fn inspect(&mut self, location: &Url) -> Option<Url> {
        if self.permits(location) {
            self.state = GuardState::InDomain;
            None
        } else {
            info!(location = %location, "off-domain navigation, redirecting");
            self.state = GuardState::Redirecting;
            Some(self.canonical_url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> NavigationGuard {
        NavigationGuard::new(&AppConfig::default())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL")
    }

    #[test]
    fn in_domain_https_location_passes() {
        let mut guard = guard();
        assert_eq!(guard.inspect(&url("https://sub.youtube.com/x")), None);
        assert_eq!(guard.state(), GuardState::InDomain);
    }

    #[test]
    fn foreign_host_is_redirected_to_canonical() {
        let mut guard = guard();
        let corrective = guard.inspect(&url("http://example.com"));
        assert_eq!(corrective, Some(url("https://www.youtube.com")));
        assert_eq!(guard.state(), GuardState::Redirecting);
    }

    #[test]
    fn insecure_scheme_on_the_right_host_is_redirected() {
        let mut guard = guard();
        assert!(guard.inspect(&url("http://www.youtube.com")).is_some());
        assert_eq!(guard.state(), GuardState::Redirecting);
    }

    #[test]
    fn corrective_change_collapses_back_to_in_domain() {
        let mut guard = guard();
        let corrective = guard
            .inspect(&url("https://evil.example/watch"))
            .expect("redirect");
        // Re-entering with the corrective location must not loop.
        assert_eq!(guard.inspect(&corrective), None);
        assert_eq!(guard.state(), GuardState::InDomain);
    }

    #[test]
    fn guard_keeps_working_after_a_redirect() {
        let mut guard = guard();
        guard.inspect(&url("http://example.com"));
        guard.inspect(&url("https://www.youtube.com"));
        assert_eq!(
            guard.inspect(&url("https://music.youtube.com/explore")),
            None
        );
    }
}
