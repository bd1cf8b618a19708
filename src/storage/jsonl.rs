//! JSONL (JSON Lines) storage.
//!
//! Rosters and parsed player statistics land here as one JSON object per line.
//! The files are produced by an external collaborator; this crate only reads
//! them. The writer exists to lay down fixtures in tests.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    SquadPlayer,
    PlayerStatistics,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::SquadPlayer => "squads.jsonl",
            EntityType::PlayerStatistics => "player_stats.jsonl",
        }
    }
}

/// Path of an entity file under the normalized directory.
pub fn entity_path(config: &StorageConfig, entity: EntityType) -> PathBuf {
    config.normalized_dir().join(entity.filename())
}

/// JSONL file writer for test fixtures.
#[cfg(test)]
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

#[cfg(test)]
impl<T: serde::Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        use std::io::{BufWriter, Write};

        self.ensure_dir()?;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        use std::io::{BufWriter, Write};

        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        debug!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    /// Read all entities from the file. Unparseable lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        idx + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SquadPlayer;
    use tempfile::TempDir;

    fn squad_player(team_id: u32, name: &str, goals: u32) -> SquadPlayer {
        SquadPlayer {
            team_id,
            team_name: format!("Team {}", team_id),
            player_name: name.to_string(),
            position: Some("Midfielder".to_string()),
            rating: 7.0,
            goals,
            assists: 0,
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("squads.jsonl");

        let players = vec![squad_player(57, "Rice", 3), squad_player(57, "Odegaard", 5)];

        let writer: JsonlWriter<SquadPlayer> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&players).unwrap(), 2);

        let reader: JsonlReader<SquadPlayer> = JsonlReader::new(path);
        let read = reader.read_all().unwrap();
        assert_eq!(read, players);
    }

    #[test]
    fn test_jsonl_append_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let writer = JsonlWriter::for_entity(&config, EntityType::SquadPlayer);
        writer.append(&squad_player(57, "Rice", 3)).unwrap();
        writer.append(&squad_player(61, "Palmer", 9)).unwrap();

        let reader: JsonlReader<SquadPlayer> =
            JsonlReader::for_entity(&config, EntityType::SquadPlayer);
        assert_eq!(reader.read_all().unwrap().len(), 2);
        assert!(temp_dir.path().join("normalized/squads.jsonl").exists());
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<SquadPlayer> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mixed.jsonl");
        let good = serde_json::to_string(&squad_player(57, "Rice", 3)).unwrap();
        std::fs::write(&path, format!("{}\nnot json\n\n{}\n", good, good)).unwrap();

        let reader: JsonlReader<SquadPlayer> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_jsonl_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("squads.jsonl");
        JsonlWriter::new(path.clone())
            .write_all(&[squad_player(57, "Rice", 3), squad_player(61, "Palmer", 9)])
            .unwrap();

        let reader: JsonlReader<SquadPlayer> = JsonlReader::new(path);
        let chelsea = reader.read_where(|p| p.team_id == 61).unwrap();
        assert_eq!(chelsea.len(), 1);
        assert_eq!(chelsea[0].player_name, "Palmer");
    }

    #[test]
    fn test_entity_filenames() {
        assert_eq!(EntityType::SquadPlayer.filename(), "squads.jsonl");
        assert_eq!(EntityType::PlayerStatistics.filename(), "player_stats.jsonl");
    }
}
