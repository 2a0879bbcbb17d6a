//! Budget goal records and period statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{errors::FinanceError, time::Clock};
use crate::domain::{BudgetGoal, Displayable, GoalStats, GoalStatus, GoalSummary, StatusCounts};
use crate::storage::GoalStore;

use super::{validate_amount, GoalStatsQuery, ServiceResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGoal {
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub deadline: DateTime<Utc>,
}

pub struct GoalService;

impl GoalService {
    pub fn create(
        store: &dyn GoalStore,
        clock: &dyn Clock,
        input: NewGoal,
    ) -> ServiceResult<BudgetGoal> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FinanceError::invalid("goal name cannot be empty"));
        }
        validate_amount(input.target_amount, "target amount")?;
        if input.target_amount <= 0.0 {
            return Err(FinanceError::invalid("target amount must be greater than zero"));
        }
        let goal = BudgetGoal::new(input.user_id, name, input.target_amount, input.deadline)
            .with_created_at(clock.now());
        store.insert_goal(goal.clone())?;
        tracing::info!(user = %goal.user_id, id = %goal.id, goal = %goal.display_label(), "goal created");
        Ok(goal)
    }

    /// Adds `amount` to an active goal and completes it once the target is reached.
    pub fn record_progress(
        store: &dyn GoalStore,
        user_id: Uuid,
        id: Uuid,
        amount: f64,
    ) -> ServiceResult<BudgetGoal> {
        validate_amount(amount, "progress amount")?;
        let mut goal = Self::live(store, user_id, id)?;
        if !goal.is_active() {
            return Err(FinanceError::invalid(format!(
                "goal {} is {} and no longer accepts progress",
                id, goal.status
            )));
        }
        goal.current_amount += amount;
        if goal.target_reached() {
            goal.status = GoalStatus::Completed;
        }
        store.save_goal(&goal)?;
        tracing::info!(user = %user_id, id = %id, status = %goal.status, "goal progress recorded");
        Ok(goal)
    }

    pub fn set_status(
        store: &dyn GoalStore,
        user_id: Uuid,
        id: Uuid,
        status: GoalStatus,
    ) -> ServiceResult<BudgetGoal> {
        let mut goal = Self::live(store, user_id, id)?;
        goal.status = status;
        store.save_goal(&goal)?;
        Ok(goal)
    }

    pub fn soft_delete(
        store: &dyn GoalStore,
        clock: &dyn Clock,
        user_id: Uuid,
        id: Uuid,
    ) -> ServiceResult<BudgetGoal> {
        let mut goal = store
            .find_goal(user_id, id)?
            .ok_or_else(|| not_found(id))?;
        if goal.is_deleted() {
            return Err(FinanceError::invalid(format!("goal {} is already deleted", id)));
        }
        goal.deleted_at = Some(clock.now());
        store.save_goal(&goal)?;
        tracing::info!(user = %user_id, id = %id, "goal soft-deleted");
        Ok(goal)
    }

    /// Live goals ordered by deadline.
    pub fn list(store: &dyn GoalStore, user_id: Uuid) -> ServiceResult<Vec<BudgetGoal>> {
        let mut goals = store.list_goals(user_id)?;
        goals.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.name.cmp(&b.name)));
        Ok(goals)
    }

    /// Summarizes the goals created within the requested period.
    ///
    /// Overdue goals are active goals whose deadline has passed; the closest goals are the
    /// active ones with the nearest upcoming deadlines.
    pub fn get_goal_stats_by_period(
        store: &dyn GoalStore,
        clock: &dyn Clock,
        user_id: Uuid,
        query: &GoalStatsQuery,
    ) -> ServiceResult<GoalStats> {
        let now = clock.now();
        let interval = query.range.resolve(now)?;
        tracing::debug!(user = %user_id, period = %query.range.period, %interval, "computing goal stats");

        let goals = store.fetch_goals(user_id, &interval)?;

        let mut status_counts = StatusCounts::default();
        for goal in &goals {
            status_counts.record(goal.status);
        }
        let overdue_goals = goals.iter().filter(|goal| goal.is_overdue(now)).count();

        let mut upcoming: Vec<&BudgetGoal> = goals
            .iter()
            .filter(|goal| goal.is_active() && goal.deadline >= now)
            .collect();
        upcoming.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.name.cmp(&b.name)));
        let closest_goals = upcoming
            .into_iter()
            .take(query.closest_count)
            .map(|goal| GoalSummary::from_goal(goal, now))
            .collect();

        Ok(GoalStats {
            period: query.range.period,
            interval,
            status_counts,
            total_goals: status_counts.total(),
            overdue_goals,
            closest_goals,
        })
    }

    fn live(store: &dyn GoalStore, user_id: Uuid, id: Uuid) -> ServiceResult<BudgetGoal> {
        store
            .find_goal(user_id, id)?
            .filter(|goal| !goal.is_deleted())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> FinanceError {
    FinanceError::NotFound(format!("goal {}", id))
}
