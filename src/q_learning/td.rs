//! One-step Q-learning update (off-policy TD control)

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::q_table::QTable,
    types::{Action, StateKey},
};

/// Learning rate and discount factor of the TD update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdUpdate {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
}

impl TdUpdate {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The maximum runs over every action slot of `s'`. Both states are
    /// zero-initialized if unseen. Returns the new Q(s,a).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`](crate::Error::IllegalMove) if `action`
    /// is not an action slot of `table`; the table is then unchanged.
    pub fn update(
        &self,
        table: &mut QTable,
        state: StateKey,
        action: Action,
        reward: f64,
        next_state: StateKey,
    ) -> Result<f64> {
        let future = table.max_value(next_state);
        let current_q = table.value(&state, action);
        let td_target = reward + self.discount_factor * future;
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        table.set(state, action, new_q)?;
        Ok(new_q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_formula() {
        let mut table = QTable::new(6);
        let td = TdUpdate::new(0.5, 0.9);
        let s = StateKey::from_raw(1);
        let next = StateKey::from_raw(2);
        let q = td.update(&mut table, s, 3, 1.0, next).unwrap();
        assert_eq!(q, 0.5);
        assert_eq!(table.value(&s, 3), 0.5);
        // Both states now exist
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_uses_best_next_value() {
        let mut table = QTable::new(9);
        let td = TdUpdate::new(0.5, 0.99);
        let s = StateKey::from_raw(10);
        let next = StateKey::from_raw(20);
        table.set(next, 1, 1.0).unwrap();
        table.set(next, 2, 2.0).unwrap();

        // Q(s,4) = 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0) = 0.99
        let q = td.update(&mut table, s, 4, 0.0, next).unwrap();
        assert!((q - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_updates_converge_without_overshoot() {
        let mut table = QTable::new(6);
        let td = TdUpdate::new(0.5, 0.9);
        let s = StateKey::from_raw(3);
        let next = StateKey::from_raw(4);

        let mut previous = 0.0;
        for _ in 0..60 {
            let q = td.update(&mut table, s, 0, 1.0, next).unwrap();
            assert!(q > previous || (q - previous).abs() < 1e-12);
            assert!(q <= 1.0);
            previous = q;
        }
        assert!((previous - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_self_loop_bounded_by_discounted_sum() {
        let mut table = QTable::new(3);
        let td = TdUpdate::new(0.5, 0.9);
        let s = StateKey::from_raw(8);

        let bound = 1.0 / (1.0 - 0.9);
        let mut previous = 0.0;
        for _ in 0..500 {
            let q = td.update(&mut table, s, 1, 1.0, s).unwrap();
            assert!(q >= previous);
            assert!(q <= bound + 1e-9);
            previous = q;
        }
        assert!((previous - bound).abs() < 1e-6);
    }
}
