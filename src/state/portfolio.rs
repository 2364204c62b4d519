/// The ordered sequence of saved proposals shown on the dashboard
///
/// Newest proposals come first. The portfolio only edits the in-memory
/// sequence; the app writes it to the store after every change.

use super::data::Proposal;

#[derive(Debug, Default, Clone)]
pub struct Portfolio {
    proposals: Vec<Proposal>,
}

/// What `upsert` did with a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

impl Portfolio {
    pub fn new(proposals: Vec<Proposal>) -> Self {
        Self { proposals }
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn find(&self, id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    /// Replace a proposal with the same id in place, or put a new one first
    pub fn upsert(&mut self, proposal: Proposal) -> Upsert {
        match self.proposals.iter_mut().find(|p| p.id == proposal.id) {
            Some(existing) => {
                *existing = proposal;
                Upsert::Replaced
            }
            None => {
                self.proposals.insert(0, proposal);
                Upsert::Inserted
            }
        }
    }

    /// Remove the proposal with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.proposals.len();
        self.proposals.retain(|p| p.id != id);
        self.proposals.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ProposalDraft;
    use chrono::Utc;

    fn proposal(id: &str, title: &str) -> Proposal {
        ProposalDraft {
            id: Some(id.into()),
            client_name: "Cliente".into(),
            project_title: title.into(),
            ..ProposalDraft::new()
        }
        .finalize(Utc::now())
        .unwrap()
    }

    #[test]
    fn test_new_proposals_are_prepended() {
        let mut portfolio = Portfolio::default();
        assert_eq!(portfolio.upsert(proposal("1", "Loft")), Upsert::Inserted);
        assert_eq!(portfolio.upsert(proposal("2", "Ático")), Upsert::Inserted);

        let ids: Vec<_> = portfolio.proposals().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_existing_proposals_are_replaced_in_place() {
        let mut portfolio = Portfolio::new(vec![proposal("2", "Ático"), proposal("1", "Loft")]);

        assert_eq!(
            portfolio.upsert(proposal("1", "Loft industrial")),
            Upsert::Replaced
        );
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.proposals()[1].project_title, "Loft industrial");
    }

    #[test]
    fn test_remove() {
        let mut portfolio = Portfolio::new(vec![proposal("1", "Loft")]);

        assert!(!portfolio.remove("missing"));
        assert!(portfolio.remove("1"));
        assert_eq!(portfolio.len(), 0);
        assert!(portfolio.find("1").is_none());
    }
}
