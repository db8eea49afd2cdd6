//! Integration tests for the surface + guard wiring the shell uses: every
//! location change runs through the guard, and corrective loads go back
//! through it as well.

use elysium::shell::{GuardState, HistorySurface, NavigationGuard, RenderSurface};
use elysium::utils::AppConfig;
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).expect("test URL")
}

/// Apply one location change the way the shell does: inspect, load any
/// corrective URL, and feed the corrective change back into the guard.
fn change_location(surface: &mut HistorySurface, guard: &mut NavigationGuard, target: Url) {
    surface.load(target);
    if let Some(corrective) = guard.inspect(surface.location()) {
        surface.load(corrective);
        guard.inspect(surface.location());
    }
}

#[test]
fn off_domain_navigation_lands_on_the_canonical_url() {
    let config = AppConfig::default();
    let mut surface = HistorySurface::new(config.start_url.clone());
    let mut guard = NavigationGuard::new(&config);

    change_location(&mut surface, &mut guard, url("http://example.com"));

    assert_eq!(surface.location().as_str(), "https://www.youtube.com/");
    assert_eq!(guard.state(), GuardState::InDomain);
}

#[test]
fn in_domain_navigation_is_left_alone() {
    let config = AppConfig::default();
    let mut surface = HistorySurface::new(config.start_url.clone());
    let mut guard = NavigationGuard::new(&config);

    change_location(
        &mut surface,
        &mut guard,
        url("https://sub.youtube.com/x"),
    );

    assert_eq!(surface.location().as_str(), "https://sub.youtube.com/x");
    assert_eq!(guard.state(), GuardState::InDomain);
}

#[test]
fn going_back_to_an_off_domain_entry_redirects_again() {
    let config = AppConfig::default();
    let mut surface = HistorySurface::new(config.start_url.clone());
    let mut guard = NavigationGuard::new(&config);

    change_location(&mut surface, &mut guard, url("http://example.com"));
    // History now ends [..., example.com, canonical]; stepping back re-enters
    // the guard with the off-domain entry.
    surface.back();
    if let Some(corrective) = guard.inspect(surface.location()) {
        surface.load(corrective);
        guard.inspect(surface.location());
    }

    assert_eq!(surface.location().as_str(), "https://www.youtube.com/");
    assert_eq!(guard.state(), GuardState::InDomain);
}
