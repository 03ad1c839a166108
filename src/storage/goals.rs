//! Financial goal repository backed by `goals.json`

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyMapResult;
use crate::models::{FinancialGoal, GoalId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<FinancialGoal>,
}

pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, FinancialGoal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> MoneyMapResult<()> {
        let file_data: GoalData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded goals");
        Ok(())
    }

    pub fn save(&self) -> MoneyMapResult<()> {
        let file_data = GoalData {
            goals: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: GoalId) -> MoneyMapResult<Option<FinancialGoal>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All goals, oldest first
    pub fn get_all(&self) -> MoneyMapResult<Vec<FinancialGoal>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(goals)
    }

    pub fn get_by_name(&self, name: &str) -> MoneyMapResult<Option<FinancialGoal>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .find(|g| g.name.trim().eq_ignore_ascii_case(name.trim()))
            .cloned())
    }

    pub fn upsert(&self, goal: FinancialGoal) -> MoneyMapResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(goal.id, goal);
        Ok(())
    }

    pub fn delete(&self, id: GoalId) -> MoneyMapResult<Option<FinancialGoal>> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> MoneyMapResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn goal(name: &str) -> FinancialGoal {
        FinancialGoal::new(
            name,
            Money::from_units(2000),
            "Savings",
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_round_trip_keeps_contribution() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));

        let g = goal("Vacation").with_contribution(Money::from_units(150), Frequency::Weekly);
        let id = g.id;
        repo.upsert(g).unwrap();
        repo.save().unwrap();

        let reopened = GoalRepository::new(temp_dir.path().join("goals.json"));
        reopened.load().unwrap();
        let loaded = reopened.get(id).unwrap().unwrap();
        assert!(loaded.recurring);
        assert_eq!(loaded.frequency, Some(Frequency::Weekly));
    }

    #[test]
    fn test_get_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        repo.upsert(goal("Emergency Fund")).unwrap();

        assert!(repo.get_by_name("emergency fund").unwrap().is_some());
        assert!(repo.get_by_name("Car").unwrap().is_none());
    }
}
