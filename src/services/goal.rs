//! Goal service
//!
//! CRUD for financial goals plus contributions toward their saved amount.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{FinancialGoal, Frequency, GoalId, Money};
use crate::storage::Storage;

use super::resolve_one;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount: Money,
    pub category: String,
    pub target_date: NaiveDate,
    pub contribution: Option<(Money, Frequency)>,
    pub saved_amount: Money,
}

#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub category: Option<String>,
    pub target_date: Option<NaiveDate>,
    /// `Some(None)` turns the goal into a non-recurring one
    pub contribution: Option<Option<(Money, Frequency)>>,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateGoalInput) -> MoneyMapResult<FinancialGoal> {
        let name = input.name.trim();
        if self.storage.goals.get_by_name(name)?.is_some() {
            return Err(MoneyMapError::Duplicate {
                entity_type: "Goal",
                identifier: name.to_string(),
            });
        }

        let mut goal = FinancialGoal::new(
            name,
            input.target_amount,
            input.category.trim(),
            input.target_date,
        )
        .with_saved(input.saved_amount);
        if let Some((amount, frequency)) = input.contribution {
            goal = goal.with_contribution(amount, frequency);
        }

        goal.validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;
        tracing::info!(id = %goal.id, name = %goal.name, target = %goal.target_amount, "goal created");

        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> MoneyMapResult<Option<FinancialGoal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by name (case-insensitive) or ID reference
    pub fn find(&self, reference: &str) -> MoneyMapResult<FinancialGoal> {
        if let Some(goal) = self.storage.goals.get_by_name(reference)? {
            return Ok(goal);
        }

        let matches = self
            .storage
            .goals
            .get_all()?
            .into_iter()
            .filter(|g| g.id.matches_reference(reference))
            .collect();
        resolve_one(matches, reference, MoneyMapError::goal_not_found)
    }

    pub fn list(&self) -> MoneyMapResult<Vec<FinancialGoal>> {
        self.storage.goals.get_all()
    }

    pub fn update(&self, id: GoalId, changes: GoalUpdate) -> MoneyMapResult<FinancialGoal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| MoneyMapError::goal_not_found(id.to_string()))?;
        let before = goal.clone();

        if let Some(name) = changes.name {
            let name = name.trim();
            if let Some(existing) = self.storage.goals.get_by_name(name)? {
                if existing.id != id {
                    return Err(MoneyMapError::Duplicate {
                        entity_type: "Goal",
                        identifier: name.to_string(),
                    });
                }
            }
            goal.name = name.to_string();
        }
        if let Some(target) = changes.target_amount {
            goal.target_amount = target;
        }
        if let Some(category) = changes.category {
            goal.category = category.trim().to_string();
        }
        if let Some(date) = changes.target_date {
            goal.target_date = date;
        }
        match changes.contribution {
            Some(Some((amount, frequency))) => {
                goal.recurring = true;
                goal.income_amount = Some(amount);
                goal.frequency = Some(frequency);
            }
            Some(None) => goal.clear_contribution(),
            None => {}
        }

        self.persist_update(before, goal)
    }

    /// Add `amount` to the goal's saved amount
    pub fn contribute(&self, id: GoalId, amount: Money) -> MoneyMapResult<FinancialGoal> {
        if !amount.is_positive() {
            return Err(MoneyMapError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| MoneyMapError::goal_not_found(id.to_string()))?;
        let before = goal.clone();
        goal.saved_amount = goal
            .saved_amount
            .checked_add(amount)
            .ok_or_else(|| MoneyMapError::amount_overflow("Saved amount"))?;

        tracing::debug!(id = %goal.id, %amount, saved = %goal.saved_amount, "contribution recorded");
        self.persist_update(before, goal)
    }

    pub fn delete(&self, id: GoalId) -> MoneyMapResult<FinancialGoal> {
        let goal = self
            .storage
            .goals
            .delete(id)?
            .ok_or_else(|| MoneyMapError::goal_not_found(id.to_string()))?;
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;
        tracing::info!(id = %goal.id, name = %goal.name, "goal deleted");

        Ok(goal)
    }

    fn persist_update(
        &self,
        before: FinancialGoal,
        mut goal: FinancialGoal,
    ) -> MoneyMapResult<FinancialGoal> {
        if goal == before {
            return Ok(goal);
        }

        goal.updated_at = Utc::now();
        goal.validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &before,
            &goal,
        )?;
        tracing::info!(id = %goal.id, name = %goal.name, "goal updated");

        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MoneyMapPaths;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyMapPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(name: &str) -> CreateGoalInput {
        CreateGoalInput {
            name: name.into(),
            target_amount: Money::from_units(1000),
            category: "Savings".into(),
            target_date: Utc::now().date_naive() + Duration::days(365),
            contribution: None,
            saved_amount: Money::zero(),
        }
    }

    #[test]
    fn test_create_and_find_by_name() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service.create(input("Emergency Fund")).unwrap();
        assert_eq!(service.find("emergency fund").unwrap().id, goal.id);
        assert_eq!(service.find(&goal.id.to_string()).unwrap().id, goal.id);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        service.create(input("Car")).unwrap();
        assert!(matches!(
            service.create(input("car")),
            Err(MoneyMapError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let mut zero_target = input("Zero");
        zero_target.target_amount = Money::zero();
        assert!(service.create(zero_target).unwrap_err().is_validation());

        let mut past = input("Past");
        past.target_date = Utc::now().date_naive() - Duration::days(1);
        assert!(service.create(past).unwrap_err().is_validation());
    }

    #[test]
    fn test_contribute_adds_to_saved() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.create(input("Trip")).unwrap();

        service.contribute(goal.id, Money::from_units(100)).unwrap();
        let goal = service.contribute(goal.id, Money::from_cents(2550)).unwrap();
        assert_eq!(goal.saved_amount, Money::from_cents(12550));

        assert!(service
            .contribute(goal.id, Money::from_units(-1))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_contribute_overflow_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let mut almost_full = input("Moon");
        almost_full.saved_amount = Money::from_cents(i64::MAX);
        let goal = service.create(almost_full).unwrap();

        let err = service.contribute(goal.id, Money::from_cents(1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.find("Moon").unwrap().saved_amount,
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_update_contribution() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.create(input("House")).unwrap();

        let updated = service
            .update(
                goal.id,
                GoalUpdate {
                    contribution: Some(Some((Money::from_units(300), Frequency::Quarterly))),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.recurring);

        let cleared = service
            .update(
                goal.id,
                GoalUpdate {
                    contribution: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!cleared.recurring);
        assert_eq!(cleared.income_amount, None);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.create(input("Bike")).unwrap();

        service.delete(goal.id).unwrap();
        assert!(service.find("Bike").unwrap_err().is_not_found());
    }
}
