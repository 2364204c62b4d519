/// Persistence boundary for the proposal sequence
///
/// The app receives a store at startup, loads the whole ordered sequence
/// once and writes it back after every change.

use super::data::Proposal;
use crate::error::StoreError;

/// Round-trips an ordered sequence of proposals
pub trait PersistenceStore {
    /// Read every saved proposal in order (empty when nothing was saved)
    fn load(&self) -> Result<Vec<Proposal>, StoreError>;

    /// Replace the saved sequence with `proposals`
    fn save(&mut self, proposals: &[Proposal]) -> Result<(), StoreError>;
}

/// Keeps the sequence in memory only
///
/// Used by tests and as a fallback when the catalog cannot be opened.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    proposals: Vec<Proposal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self) -> Result<Vec<Proposal>, StoreError> {
        Ok(self.proposals.clone())
    }

    fn save(&mut self, proposals: &[Proposal]) -> Result<(), StoreError> {
        self.proposals = proposals.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ProposalDraft;
    use chrono::Utc;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let draft = ProposalDraft {
            client_name: "Cliente".into(),
            project_title: "Loft".into(),
            ..ProposalDraft::new()
        };
        let proposal = draft.finalize(Utc::now()).unwrap();

        store.save(&[proposal.clone()]).unwrap();
        assert_eq!(store.load().unwrap(), vec![proposal]);
    }
}
