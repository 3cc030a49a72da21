//! In-process party registry.

use std::collections::BTreeMap;

use haulbook_shared::types::PartyId;

use super::types::{Party, PartyRole};
use crate::ledger::error::LedgerError;

/// Registry of parties keyed by id.
///
/// Enforces the two identity rules: ids are unique and roles never change.
#[derive(Debug, Clone, Default)]
pub struct PartyRegistry {
    parties: BTreeMap<PartyId, Party>,
}

impl PartyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new party.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateParty` if the id is already registered.
    pub fn register(&mut self, party: Party) -> Result<(), LedgerError> {
        if self.parties.contains_key(&party.id) {
            return Err(LedgerError::DuplicateParty(party.id));
        }
        self.parties.insert(party.id, party);
        Ok(())
    }

    /// Looks up a party.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PartyNotFound` if the id is unknown.
    pub fn get(&self, id: PartyId) -> Result<&Party, LedgerError> {
        self.parties.get(&id).ok_or(LedgerError::PartyNotFound(id))
    }

    /// Replaces a party's name or status.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PartyNotFound` for unknown ids and
    /// `LedgerError::RoleChangeNotAllowed` if the update changes the role.
    pub fn update(&mut self, party: Party) -> Result<(), LedgerError> {
        let existing = self
            .parties
            .get_mut(&party.id)
            .ok_or(LedgerError::PartyNotFound(party.id))?;

        if existing.role != party.role {
            return Err(LedgerError::RoleChangeNotAllowed {
                party_id: party.id,
                from: existing.role,
                to: party.role,
            });
        }

        *existing = party;
        Ok(())
    }

    /// Lists parties of one role, ordered by id.
    pub fn list_by_role(&self, role: PartyRole) -> impl Iterator<Item = &Party> {
        self.parties.values().filter(move |p| p.role == role)
    }

    /// Iterates all parties, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.values()
    }

    /// Number of registered parties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// Returns true if no party is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

impl FromIterator<Party> for PartyRegistry {
    /// Builds a registry, keeping the first party seen for each id.
    fn from_iter<I: IntoIterator<Item = Party>>(iter: I) -> Self {
        let mut registry = Self::new();
        for party in iter {
            registry.parties.entry(party.id).or_insert(party);
        }
        registry
    }
}
