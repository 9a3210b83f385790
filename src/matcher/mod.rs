//! Scan-to-configuration matching
//!
//! Decides which visible network to join. SSID comparison is exact byte
//! equality: no case folding, no trimming, no prefix matching.

use crate::config::{Configuration, NetworkEntry};

/// Which side's ordering wins when several visible networks are
/// configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Join the first SSID in scan order that has any configured entry.
    #[default]
    ScanOrder,
    /// Join the first configured entry that is currently visible.
    ConfigOrder,
}

/// Pick the entry to join, or `None` when nothing visible is
/// configured. Within one SSID, the first configured entry wins.
pub fn select<'a>(
    visible: &[String],
    config: &'a Configuration,
    policy: MatchPolicy,
) -> Option<&'a NetworkEntry> {
    match policy {
        MatchPolicy::ScanOrder => visible
            .iter()
            .find_map(|ssid| config.iter().find(|entry| entry.ssid() == ssid)),
        MatchPolicy::ConfigOrder => config
            .iter()
            .find(|entry| visible.iter().any(|ssid| ssid == entry.ssid())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse;

    fn two_networks() -> Configuration {
        parse("home supersecret\nwork nwid2 key2\n")
    }

    fn visible(ssids: &[&str]) -> Vec<String> {
        ssids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scan_order_prefers_the_first_visible_match() {
        let config = two_networks();
        let scan = visible(&["foo", "work", "home"]);
        let entry = select(&scan, &config, MatchPolicy::ScanOrder).unwrap();
        // "work" was listed first by the scan, even though "home" comes
        // first in the configuration.
        assert_eq!(entry.ssid(), "work");
    }

    #[test]
    fn config_order_prefers_the_first_configured_entry() {
        let config = two_networks();
        let scan = visible(&["foo", "work", "home"]);
        let entry = select(&scan, &config, MatchPolicy::ConfigOrder).unwrap();
        assert_eq!(entry.ssid(), "home");
    }

    #[test]
    fn disjoint_inputs_match_nothing() {
        let config = two_networks();
        let scan = visible(&["coffee", "airport"]);
        assert!(select(&scan, &config, MatchPolicy::ScanOrder).is_none());
        assert!(select(&scan, &config, MatchPolicy::ConfigOrder).is_none());
    }

    #[test]
    fn comparison_is_exact() {
        let config = two_networks();
        let scan = visible(&["HOME", " home", "homenet"]);
        assert!(select(&scan, &config, MatchPolicy::ScanOrder).is_none());
    }

    #[test]
    fn duplicate_configured_ssids_first_entry_wins() {
        let config = parse("net first\nnet second\n");
        let scan = visible(&["net"]);
        let entry = select(&scan, &config, MatchPolicy::ScanOrder).unwrap();
        assert_eq!(entry.args(), "first");
    }

    #[test]
    fn empty_inputs_match_nothing() {
        assert!(select(&[], &two_networks(), MatchPolicy::ScanOrder).is_none());
        assert!(select(&visible(&["home"]), &Configuration::default(), MatchPolicy::ScanOrder).is_none());
    }
}
