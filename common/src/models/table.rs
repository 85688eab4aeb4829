//! Access control table entry.

/// Field exposure rules for one upstream table.
///
/// `blocked` wins over `allowed` when a field appears in both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Name callers use in the `table` request field.
    pub name: &'static str,
    /// Table name or id used in the upstream URL.
    pub id_or_name: &'static str,
    /// Whitelisted fields, in the order they are requested upstream by default.
    pub allowed: &'static [&'static str],
    /// Fields that are never exposed.
    pub blocked: &'static [&'static str],
}

impl TableConfig {
    pub fn is_allowed(&self, field: &str) -> bool {
        self.allowed.contains(&field)
    }

    pub fn is_blocked(&self, field: &str) -> bool {
        self.blocked.contains(&field)
    }
}
