//! Append-only record of per-request rewards

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::reward::Outcome};

/// One logged learning request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardLogEntry {
    pub episode: u64,
    pub reward: f64,
    pub outcome: Outcome,
}

/// Aggregate view of a reward log
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardSummary {
    pub entries: usize,
    pub wins: usize,
    pub losses: usize,
    pub ongoing: usize,
    pub total_reward: f64,
    pub mean_reward: f64,
}

/// Ordered, gap-free reward log. Entries are never mutated or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardLog {
    entries: Vec<RewardLogEntry>,
}

impl RewardLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next entry will receive
    pub fn next_episode(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Append an entry with an explicit episode index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpisodeOutOfOrder`] unless `episode` equals the number
    /// of entries already present.
    pub fn append(&mut self, episode: u64, reward: f64, outcome: Outcome) -> Result<()> {
        let expected = self.next_episode();
        if episode != expected {
            return Err(Error::EpisodeOutOfOrder {
                expected,
                got: episode,
            });
        }
        self.entries.push(RewardLogEntry {
            episode,
            reward,
            outcome,
        });
        Ok(())
    }

    /// Append with the next episode index and return the stored entry
    pub fn record(&mut self, reward: f64, outcome: Outcome) -> RewardLogEntry {
        let entry = RewardLogEntry {
            episode: self.next_episode(),
            reward,
            outcome,
        };
        self.entries.push(entry);
        entry
    }

    pub fn entries(&self) -> &[RewardLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> RewardSummary {
        let mut summary = RewardSummary {
            entries: self.entries.len(),
            ..RewardSummary::default()
        };
        for entry in &self.entries {
            match entry.outcome {
                Outcome::Win => summary.wins += 1,
                Outcome::Loss => summary.losses += 1,
                Outcome::Ongoing => summary.ongoing += 1,
            }
            summary.total_reward += entry.reward;
        }
        if summary.entries > 0 {
            summary.mean_reward = summary.total_reward / summary.entries as f64;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_numbers_from_zero() {
        let mut log = RewardLog::new();
        assert_eq!(log.record(0.5, Outcome::Ongoing).episode, 0);
        assert_eq!(log.record(1.0, Outcome::Win).episode, 1);
        assert_eq!(log.next_episode(), 2);
    }

    #[test]
    fn test_append_rejects_gaps() {
        let mut log = RewardLog::new();
        log.append(0, 0.0, Outcome::Ongoing).unwrap();
        let err = log.append(2, 1.0, Outcome::Win).unwrap_err();
        assert!(matches!(
            err,
            Error::EpisodeOutOfOrder {
                expected: 1,
                got: 2
            }
        ));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut log = RewardLog::new();
        log.record(1.0, Outcome::Win);
        log.record(-1.0, Outcome::Loss);
        log.record(0.5, Outcome::Ongoing);
        log.record(0.5, Outcome::Ongoing);
        let summary = log.summary();
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.ongoing, 2);
        assert!((summary.mean_reward - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RewardLog::new().summary();
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.mean_reward, 0.0);
    }
}
