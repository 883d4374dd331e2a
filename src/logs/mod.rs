//! Campaign Log Tables
//!
//! Views over fetched campaign logs. Each table keeps the rows from its last
//! successful fetch and a client-local set of expanded row ids. Mutating row
//! actions never patch rows in place; they trigger a full refetch.

mod email;
mod whatsapp;

pub use email::EmailLogTable;
pub use whatsapp::{RowAction, WhatsAppLogTable};

use std::collections::HashSet;

use crate::models::CampaignId;

/// Expanded-row bookkeeping shared by both tables
#[derive(Debug, Clone, Default)]
pub struct ExpandedRows {
    ids: HashSet<CampaignId>,
}

impl ExpandedRows {
    /// Flip a row; returns whether it is now expanded
    pub fn toggle(&mut self, id: CampaignId) -> bool {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: CampaignId) -> bool {
        self.ids.contains(&id)
    }

    pub fn expand_all(&mut self, ids: impl IntoIterator<Item = CampaignId>) {
        self.ids.extend(ids);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut rows = ExpandedRows::default();
        assert!(rows.toggle(3));
        assert!(rows.contains(3));
        assert!(!rows.toggle(3));
        assert!(!rows.contains(3));

        rows.expand_all([1, 2]);
        assert!(rows.contains(1) && rows.contains(2));
    }
}
