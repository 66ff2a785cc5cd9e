//! Host policy table and suspicion timeouts.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use rustc_hash::FxHashMap;
use url::{Host, Url};

use crate::error::{Error, Result};
use crate::resolver::ResolverOptions;

use super::host::{HostClass, HostRule, ProviderKind};

// ============================================================================
// Constants
// ============================================================================

/// Suspicion timeout for hosts with no rule.
pub const DEFAULT_GENERIC_TIMEOUT: Duration = Duration::from_millis(5000);

/// Suspicion timeout for providers that usually block framing.
pub const DEFAULT_FRAME_BLOCKING_TIMEOUT: Duration = Duration::from_millis(3000);

/// Suspicion timeout for slow but embeddable providers.
pub const DEFAULT_SLOW_LOADING_TIMEOUT: Duration = Duration::from_millis(10000);

/// Built-in host rules.
pub const DEFAULT_RULES: &[(&str, ProviderKind)] = &[
    ("y8.com", ProviderKind::FrameBlocking),
    ("itch.zone", ProviderKind::SlowLoading),
    ("gamedistribution.com", ProviderKind::SlowLoading),
];

// ============================================================================
// HostPolicy
// ============================================================================

/// Static table mapping hosts to provider kinds and timeouts.
///
/// Matching is done on the parsed host, walking from the full host towards
/// its parent domains, so the most specific rule wins.
#[derive(Debug, Clone)]
pub struct HostPolicy {
    /// Normalized domain to provider kind.
    rules: FxHashMap<String, ProviderKind>,
    /// Timeout for unmatched hosts.
    generic_timeout: Duration,
    /// Timeout for frame-blocking providers.
    frame_blocking_timeout: Duration,
    /// Timeout for slow-loading providers.
    slow_loading_timeout: Duration,
}

impl Default for HostPolicy {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(host, kind)| ((*host).to_string(), *kind))
            .collect();

        Self {
            rules,
            generic_timeout: DEFAULT_GENERIC_TIMEOUT,
            frame_blocking_timeout: DEFAULT_FRAME_BLOCKING_TIMEOUT,
            slow_loading_timeout: DEFAULT_SLOW_LOADING_TIMEOUT,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl HostPolicy {
    /// Builds a policy from resolver options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a timeout is zero or a rule host is
    /// invalid.
    pub fn from_options(options: &ResolverOptions) -> Result<Self> {
        options.validate()?;

        let mut rules = FxHashMap::default();
        for rule in &options.rules {
            insert_rule(&mut rules, rule)?;
        }

        Ok(Self {
            rules,
            generic_timeout: options.generic_timeout(),
            frame_blocking_timeout: options.frame_blocking_timeout(),
            slow_loading_timeout: options.slow_loading_timeout(),
        })
    }
}

// ============================================================================
// Classification
// ============================================================================

impl HostPolicy {
    /// Classifies a URL by its host.
    ///
    /// IP literals and host-less URLs are always generic.
    #[must_use]
    pub fn classify(&self, url: &Url) -> HostClass {
        let Some(Host::Domain(host)) = url.host() else {
            return HostClass::Generic;
        };

        let mut candidate = host.trim_end_matches('.');
        loop {
            if let Some(kind) = self.rules.get(candidate) {
                return HostClass::KnownRestrictive(*kind);
            }
            match candidate.split_once('.') {
                Some((_, parent)) if !parent.is_empty() => candidate = parent,
                _ => return HostClass::Generic,
            }
        }
    }

    /// Returns the suspicion timeout for a host class.
    #[inline]
    #[must_use]
    pub fn timeout_for(&self, class: HostClass) -> Duration {
        match class {
            HostClass::Generic => self.generic_timeout,
            HostClass::KnownRestrictive(ProviderKind::FrameBlocking) => self.frame_blocking_timeout,
            HostClass::KnownRestrictive(ProviderKind::SlowLoading) => self.slow_loading_timeout,
        }
    }

    /// Classifies a URL and returns its suspicion timeout.
    #[inline]
    #[must_use]
    pub fn suspicion_timeout(&self, url: &Url) -> Duration {
        self.timeout_for(self.classify(url))
    }

    /// Returns the longest configured timeout.
    ///
    /// Upper bound on how long any mount can stay loading.
    #[must_use]
    pub fn max_timeout(&self) -> Duration {
        self.generic_timeout
            .max(self.frame_blocking_timeout)
            .max(self.slow_loading_timeout)
    }

    /// Returns the number of host rules.
    #[inline]
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Inserts a rule, rejecting conflicting duplicates.
fn insert_rule(rules: &mut FxHashMap<String, ProviderKind>, rule: &HostRule) -> Result<()> {
    let host = rule.normalized_host()?;

    if let Some(existing) = rules.get(&host)
        && *existing != rule.kind
    {
        return Err(Error::config(format!(
            "Conflicting rules for '{host}': {existing} and {}",
            rule.kind
        )));
    }

    rules.insert(host, rule.kind);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("valid url")
    }

    #[test]
    fn test_blocking_host_timeout() {
        let policy = HostPolicy::default();
        assert_eq!(
            policy.suspicion_timeout(&url("https://www.y8.com/games/foo")),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn test_unrecognized_host_timeout() {
        let policy = HostPolicy::default();
        assert_eq!(
            policy.suspicion_timeout(&url("https://example.org/game")),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn test_slow_host_timeout() {
        let policy = HostPolicy::default();
        let target = url("https://html-classic.itch.zone/html/123/index.html");
        assert_eq!(
            policy.classify(&target),
            HostClass::KnownRestrictive(ProviderKind::SlowLoading)
        );
        assert_eq!(policy.suspicion_timeout(&target), Duration::from_millis(10000));
    }

    #[test]
    fn test_exact_domain_matches() {
        let policy = HostPolicy::default();
        assert_eq!(
            policy.classify(&url("https://y8.com/")),
            HostClass::KnownRestrictive(ProviderKind::FrameBlocking)
        );
    }

    #[test]
    fn test_lookalike_domain_is_generic() {
        let policy = HostPolicy::default();
        assert!(policy.classify(&url("https://notmy8.com/games/foo")).is_generic());
        assert!(policy.classify(&url("https://y8.com.evil.test/")).is_generic());
    }

    #[test]
    fn test_host_in_path_or_query_is_generic() {
        let policy = HostPolicy::default();
        assert!(policy.classify(&url("https://example.org/?ref=y8.com")).is_generic());
        assert!(policy.classify(&url("https://example.org/y8.com/game")).is_generic());
    }

    #[test]
    fn test_case_and_trailing_dot() {
        let policy = HostPolicy::default();
        assert_eq!(
            policy.classify(&url("https://WWW.Y8.COM./games/foo")),
            HostClass::KnownRestrictive(ProviderKind::FrameBlocking)
        );
    }

    #[test]
    fn test_ip_and_hostless_urls_are_generic() {
        let policy = HostPolicy::default();
        assert!(policy.classify(&url("http://127.0.0.1:8080/game")).is_generic());
        assert!(policy.classify(&url("data:text/html,<p>hi</p>")).is_generic());
    }

    #[test]
    fn test_most_specific_rule_wins() {
        let options = ResolverOptions::new()
            .with_rule(HostRule::frame_blocking("y8.com"))
            .with_rule(HostRule::slow_loading("static.y8.com"));
        let policy = HostPolicy::from_options(&options).expect("policy");

        assert_eq!(
            policy.classify(&url("https://static.y8.com/game")),
            HostClass::KnownRestrictive(ProviderKind::SlowLoading)
        );
        assert_eq!(
            policy.classify(&url("https://www.y8.com/game")),
            HostClass::KnownRestrictive(ProviderKind::FrameBlocking)
        );
    }

    #[test]
    fn test_conflicting_rules_rejected() {
        let options = ResolverOptions::new()
            .with_rule(HostRule::frame_blocking("y8.com"))
            .with_rule(HostRule::slow_loading("Y8.com"));
        let err = HostPolicy::from_options(&options).unwrap_err();
        assert!(err.to_string().contains("Conflicting"));
    }

    #[test]
    fn test_custom_timeouts() {
        let options = ResolverOptions::new()
            .with_generic_timeout(Duration::from_millis(7000))
            .with_frame_blocking_timeout(Duration::from_millis(1500));
        let policy = HostPolicy::from_options(&options).expect("policy");

        assert_eq!(
            policy.suspicion_timeout(&url("https://example.org/")),
            Duration::from_millis(7000)
        );
        assert_eq!(
            policy.suspicion_timeout(&url("https://www.y8.com/")),
            Duration::from_millis(1500)
        );
        assert_eq!(policy.max_timeout(), Duration::from_millis(10000));
    }

    #[test]
    fn test_default_rule_count() {
        assert_eq!(HostPolicy::default().rule_count(), DEFAULT_RULES.len());
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(label in "[a-z][a-z0-9]{0,12}", path in "[a-z0-9/]{0,16}") {
            let policy = HostPolicy::default();
            let target = url(&format!("https://{label}.example/{path}"));
            prop_assert_eq!(policy.classify(&target), policy.classify(&target));
        }

        #[test]
        fn prop_any_y8_subdomain_blocks(label in "[a-z][a-z0-9]{0,12}") {
            let policy = HostPolicy::default();
            let target = url(&format!("https://{label}.y8.com/games/x"));
            prop_assert_eq!(policy.suspicion_timeout(&target), DEFAULT_FRAME_BLOCKING_TIMEOUT);
        }

        #[test]
        fn prop_query_never_affects_class(query in "[a-z0-9.=&]{0,24}") {
            let policy = HostPolicy::default();
            let target = url(&format!("https://example.org/game?{query}"));
            prop_assert!(policy.classify(&target).is_generic());
        }
    }
}
