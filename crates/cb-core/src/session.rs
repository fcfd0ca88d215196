//! Per-tab session state
//!
//! One component owns the detected-CSP and bypass-count maps, keyed by
//! tab. Entries appear when a CSP is detected and disappear when the
//! tab closes; nothing reads them without an explicit tab key.

use std::collections::HashMap;

/// Browser tab identifier.
pub type TabId = i32;

/// Detected CSPs and bypass counts for the tabs currently open.
#[derive(Debug, Default)]
pub struct SessionState {
    csp_by_tab: HashMap<TabId, String>,
    count_by_tab: HashMap<TabId, usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the CSP detected for a tab, replacing any earlier one.
    pub fn record_csp(&mut self, tab: TabId, csp: impl Into<String>) {
        self.csp_by_tab.insert(tab, csp.into());
    }

    /// The last CSP detected for a tab, if any.
    pub fn csp(&self, tab: TabId) -> Option<&str> {
        self.csp_by_tab.get(&tab).map(String::as_str)
    }

    /// Set the bypass count for a tab.
    pub fn set_count(&mut self, tab: TabId, count: usize) {
        self.count_by_tab.insert(tab, count);
    }

    /// The bypass count for a tab; unknown tabs count as zero.
    pub fn count(&self, tab: TabId) -> usize {
        self.count_by_tab.get(&tab).copied().unwrap_or(0)
    }

    /// Drop all state for a closed tab.
    pub fn close_tab(&mut self, tab: TabId) {
        self.csp_by_tab.remove(&tab);
        self.count_by_tab.remove(&tab);
    }

    pub fn tab_count(&self) -> usize {
        self.csp_by_tab.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_back() {
        let mut state = SessionState::new();
        state.record_csp(7, "script-src 'self'");
        state.set_count(7, 3);
        assert_eq!(state.csp(7), Some("script-src 'self'"));
        assert_eq!(state.count(7), 3);
    }

    #[test]
    fn test_unknown_tab_counts_as_zero() {
        let state = SessionState::new();
        assert_eq!(state.count(42), 0);
        assert_eq!(state.csp(42), None);
    }

    #[test]
    fn test_close_tab_removes_both_entries() {
        let mut state = SessionState::new();
        state.record_csp(1, "default-src *");
        state.set_count(1, 12);
        state.close_tab(1);
        assert_eq!(state.csp(1), None);
        assert_eq!(state.count(1), 0);
        assert_eq!(state.tab_count(), 0);
    }

    #[test]
    fn test_navigation_replaces_csp() {
        let mut state = SessionState::new();
        state.record_csp(1, "script-src a.com");
        state.record_csp(1, "script-src b.com");
        assert_eq!(state.csp(1), Some("script-src b.com"));
    }

    #[test]
    fn test_tabs_are_independent() {
        let mut state = SessionState::new();
        state.set_count(1, 5);
        state.set_count(2, 9);
        state.close_tab(1);
        assert_eq!(state.count(2), 9);
    }
}
