//! Coin reward ledger.
//!
//! The human earns coins by beating the computer. The balance is written
//! through to a [`KeyValueStore`] after every change and read back when the
//! ledger is loaded.

use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{GameMode, Mark, Outcome};
use crate::store::{COINS_KEY, KeyValueStore, StoreError};

/// Coins awarded for a human win against the computer.
pub const WIN_REWARD: u64 = 10;

/// Coin balance persisted in a key/value store.
#[derive(Debug)]
pub struct RewardLedger<S> {
    store: S,
    balance: u64,
}

impl<S: KeyValueStore> RewardLedger<S> {
    /// Loads the balance from `store`.
    ///
    /// A missing, unreadable, or non-numeric value loads as 0.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let balance = match store.get(COINS_KEY) {
            Ok(Some(raw)) => parse_balance(&raw),
            Ok(None) => {
                debug!("No stored balance");
                0
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored balance, starting from 0");
                0
            }
        };
        info!(balance, "Ledger loaded");
        Self { store, balance }
    }

    /// Returns the current balance.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns the underlying store mutably.
    ///
    /// The front-end shares the store for its own preferences.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Credits the reward if `outcome` is a human (X) win in vs-computer mode.
    ///
    /// Returns the amount credited (0 when nothing changed).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new balance could not be persisted; the
    /// in-memory balance is updated regardless.
    #[instrument(skip(self), fields(balance = self.balance))]
    pub fn record_outcome(&mut self, outcome: &Outcome, mode: GameMode) -> Result<u64, StoreError> {
        if mode != GameMode::VsComputer || outcome.winner() != Some(Mark::X) {
            debug!("Outcome earns no coins");
            return Ok(0);
        }

        self.balance = self.balance.saturating_add(WIN_REWARD);
        info!(balance = self.balance, reward = WIN_REWARD, "Coins awarded");
        self.persist()?;
        Ok(WIN_REWARD)
    }

    /// Sets the balance to 0.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the reset could not be persisted.
    #[instrument(skip(self), fields(balance = self.balance))]
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.balance = 0;
        info!("Coins reset");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.set(COINS_KEY, &self.balance.to_string())
    }
}

/// Parses a stored balance, treating anything that is not a base-10
/// unsigned integer as 0.
#[instrument]
fn parse_balance(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(balance) => balance,
        Err(e) => {
            warn!(raw = %raw, error = %e, "Malformed stored balance, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn x_win() -> Outcome {
        Outcome::Win {
            mark: Mark::X,
            line: [0, 1, 2],
        }
    }

    fn o_win() -> Outcome {
        Outcome::Win {
            mark: Mark::O,
            line: [0, 4, 8],
        }
    }

    #[test]
    fn test_fresh_store_loads_zero() {
        let ledger = RewardLedger::load(MemoryStore::new());
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_malformed_value_loads_zero() {
        for raw in ["", "abc", "-5", "1.5"] {
            let mut store = MemoryStore::new();
            store.set(COINS_KEY, raw).unwrap();
            assert_eq!(RewardLedger::load(store).balance(), 0, "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_existing_value_loads() {
        let mut store = MemoryStore::new();
        store.set(COINS_KEY, "30").unwrap();
        assert_eq!(RewardLedger::load(store).balance(), 30);
    }

    #[test]
    fn test_human_win_vs_computer_awards() {
        let mut ledger = RewardLedger::load(MemoryStore::new());
        assert_eq!(ledger.record_outcome(&x_win(), GameMode::VsComputer).unwrap(), 10);
        assert_eq!(ledger.balance(), 10);
        assert_eq!(ledger.store_mut().get(COINS_KEY).unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn test_other_outcomes_award_nothing() {
        let mut ledger = RewardLedger::load(MemoryStore::new());
        let cases = [
            (o_win(), GameMode::VsComputer),
            (Outcome::Draw, GameMode::VsComputer),
            (x_win(), GameMode::TwoPlayer),
            (o_win(), GameMode::TwoPlayer),
            (Outcome::Draw, GameMode::TwoPlayer),
        ];
        for (outcome, mode) in cases {
            assert_eq!(ledger.record_outcome(&outcome, mode).unwrap(), 0);
        }
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_reset_persists_zero() {
        let mut ledger = RewardLedger::load(MemoryStore::new());
        ledger.record_outcome(&x_win(), GameMode::VsComputer).unwrap();
        ledger.reset().unwrap();
        assert_eq!(ledger.balance(), 0);

        let reloaded = RewardLedger::load(ledger.store_mut().clone());
        assert_eq!(reloaded.balance(), 0);
    }
}
