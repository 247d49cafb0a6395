//! Table configuration: enabled families and configured labels.

use std::collections::{BTreeMap, BTreeSet};

use geolocal_schema::Family;

/// Default name of the generated lookup module.
pub const DEFAULT_MODULE: &str = "Geolocal";

/// Normalize a label or provider code (trimmed, upper case).
pub fn normalize_label(label: &str) -> String {
    label.trim().to_uppercase()
}

/// Which buckets a table build creates.
///
/// Every configured label gets one bucket per enabled family. Each label maps
/// to the set of provider codes (sub-labels) whose ranges it collects, so a
/// label such as `EU` can gather several countries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub ipv4: bool,
    pub ipv6: bool,
    pub module: String,
    labels: BTreeMap<String, BTreeSet<String>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Create a config with both families enabled and no labels.
    pub fn new() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
            module: DEFAULT_MODULE.to_string(),
            labels: BTreeMap::new(),
        }
    }

    /// Builder: enable or disable IPv4.
    pub fn with_ipv4(mut self, enabled: bool) -> Self {
        self.ipv4 = enabled;
        self
    }

    /// Builder: enable or disable IPv6.
    pub fn with_ipv6(mut self, enabled: bool) -> Self {
        self.ipv6 = enabled;
        self
    }

    /// Builder: set the generated module name.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Builder: add a label collecting the given provider codes.
    pub fn with_label<I, S>(mut self, label: &str, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_label(label, codes);
        self
    }

    /// Add a label, merging codes into any existing entry.
    pub fn add_label<I, S>(&mut self, label: &str, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.labels.entry(normalize_label(label)).or_default();
        entry.extend(codes.into_iter().map(|c| normalize_label(c.as_ref())));
    }

    /// Whether ranges of `family` are kept.
    pub fn is_enabled(&self, family: Family) -> bool {
        match family {
            Family::V4 => self.ipv4,
            Family::V6 => self.ipv6,
        }
    }

    /// Enabled families in table order.
    pub fn enabled_families(&self) -> impl Iterator<Item = Family> + '_ {
        Family::ALL.into_iter().filter(|f| self.is_enabled(*f))
    }

    /// Configured labels, sorted.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Number of configured labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Whether `label` is configured.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains_key(&normalize_label(label))
    }

    /// Provider codes collected by `label`.
    pub fn codes(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.labels.get(&normalize_label(label))
    }

    /// Labels that collect the provider code `code`, in label order.
    pub fn labels_for(&self, code: &str) -> Vec<&str> {
        let code = normalize_label(code);
        self.labels
            .iter()
            .filter(|(_, codes)| codes.contains(&code))
            .map(|(label, _)| label.as_str())
            .collect()
    }
}
