//! Field whitelist/blacklist enforcement.

use crate::models::{FieldSelection, TableConfig};

/// Computes which fields of a table may be exposed.
pub struct FieldFilter;

impl FieldFilter {
    /// Returns `true` when `field` is allowed and not blocked.
    pub fn is_exposed(cfg: &TableConfig, field: &str) -> bool {
        cfg.is_allowed(field) && !cfg.is_blocked(field)
    }

    /// Resolves the fields to request upstream.
    ///
    /// `All` yields every exposed field in configuration order. `Only` yields
    /// the requested fields that are exposed, in request order.
    pub fn effective_fields(cfg: &TableConfig, requested: &FieldSelection) -> Vec<String> {
        match requested {
            FieldSelection::Only(requested) => requested
                .iter()
                .filter(|f| Self::is_exposed(cfg, f))
                .cloned()
                .collect(),
            FieldSelection::All => cfg
                .allowed
                .iter()
                .filter(|f| !cfg.is_blocked(f))
                .map(|f| f.to_string())
                .collect(),
        }
    }
}
