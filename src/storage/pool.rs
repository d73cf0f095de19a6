//! JSONL-backed game and pick store.

use tracing::debug;

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::calculate::PickSet;
use crate::engine::{partition_picks, PoolSource};
use crate::models::{GameResult, Pick};

/// Reads games and picks from `<data_dir>/normalized/<season>/`.
///
/// Every read goes back to disk, so each call sees the files as they are at
/// that moment.
#[derive(Debug, Clone)]
pub struct JsonlPoolStore {
    config: StorageConfig,
}

impl JsonlPoolStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Replace a season's game results.
    pub fn write_games(&self, season: u32, games: &[GameResult]) -> Result<usize, StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Game, season).write_all(games)
    }

    /// Replace a season's picks.
    pub fn write_picks(&self, season: u32, picks: &[Pick]) -> Result<usize, StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Pick, season).write_all(picks)
    }
}

impl PoolSource for JsonlPoolStore {
    fn games(&self, season: u32, week: u32) -> Result<Vec<GameResult>, StorageError> {
        let games = JsonlReader::<GameResult>::for_entity(&self.config, EntityType::Game, season)
            .read_where(|g| g.season == season && g.week == week)?;
        debug!("Loaded {} games for season {} week {}", games.len(), season, week);
        Ok(games)
    }

    fn picks(&self, season: u32, week: u32) -> Result<PickSet, StorageError> {
        let picks = JsonlReader::<Pick>::for_entity(&self.config, EntityType::Pick, season)
            .read_where(|p| p.season == season && p.week == week)?;
        debug!("Loaded {} picks for season {} week {}", picks.len(), season, week);
        Ok(partition_picks(picks))
    }
}
