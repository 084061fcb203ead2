//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{Action, StateKey},
};

/// Q-table mapping a state key to one value estimate per action slot.
///
/// Every vector has exactly `action_count` entries, including slots that are
/// illegal in that state; policies simply never select them. Vectors are
/// created zero-filled on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    action_count: usize,
    values: HashMap<StateKey, Vec<f64>>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new(action_count: usize) -> Self {
        Self {
            action_count,
            values: HashMap::new(),
        }
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Values for a state, zero-initialized on first access.
    ///
    /// Repeated calls for the same key return the same stored vector. A short
    /// stored vector is zero-padded to `action_count`.
    pub fn values_for(&mut self, state: StateKey) -> &mut Vec<f64> {
        let action_count = self.action_count;
        let values = self
            .values
            .entry(state)
            .or_insert_with(|| vec![0.0; action_count]);
        if values.len() < action_count {
            values.resize(action_count, 0.0);
        }
        values
    }

    /// First stored state whose vector length differs from `action_count`
    pub fn find_misshapen(&self) -> Option<(StateKey, usize)> {
        self.values
            .iter()
            .find(|(_, values)| values.len() != self.action_count)
            .map(|(key, values)| (*key, values.len()))
    }

    /// Stored values for a state, without creating an entry
    pub fn get(&self, state: &StateKey) -> Option<&[f64]> {
        self.values.get(state).map(Vec::as_slice)
    }

    /// Q-value for a state-action pair; unseen pairs are 0.0
    pub fn value(&self, state: &StateKey, action: Action) -> f64 {
        self.get(state)
            .and_then(|values| values.get(action).copied())
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if `action` is not an action slot.
    pub fn set(&mut self, state: StateKey, action: Action, value: f64) -> Result<()> {
        let slot = self
            .values_for(state)
            .get_mut(action)
            .ok_or(Error::IllegalMove { action })?;
        *slot = value;
        Ok(())
    }

    /// Highest value over all action slots of a state
    pub fn max_value(&mut self, state: StateKey) -> f64 {
        self.values_for(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value) from legal actions.
    ///
    /// Ties go to the first legal action reaching the maximum. Returns `None`
    /// when `legal_actions` is empty.
    pub fn greedy_action(&mut self, state: StateKey, legal_actions: &[Action]) -> Option<Action> {
        let values = self.values_for(state);
        let mut best: Option<(Action, f64)> = None;
        for &action in legal_actions {
            let q = values.get(action).copied().unwrap_or(0.0);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Get total number of states stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored states in ascending key order
    pub fn sorted_entries(&self) -> Vec<(StateKey, &[f64])> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(key, values)| (*key, values.as_slice()))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}
