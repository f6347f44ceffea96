//! Storage plan comparison page.

use super::{load, LoadState, Notice};
use crate::model::storage_plan::{PlanSize, StoragePlan};
use crate::repo::Repository;
use crate::service::StoragePlanService;

pub const PLANS_LOAD_FAILED: &str = "Failed to load storage plans";
pub const PLAN_CHANGE_REQUESTED: &str = "Plan upgrade initiated! We'll contact you shortly.";

/// Size highlighted as the most popular choice.
pub const POPULAR_SIZE: PlanSize = PlanSize::Medium;
/// Size of the plan a new account starts on.
pub const DEFAULT_CURRENT_SIZE: PlanSize = PlanSize::Small;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Current,
    Upgrade,
    Downgrade,
}

impl PlanAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current Plan",
            Self::Upgrade => "Upgrade",
            Self::Downgrade => "Downgrade",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanCard {
    pub plan: StoragePlan,
    pub is_current: bool,
    pub is_popular: bool,
    pub action: PlanAction,
}

/// Builds one card per plan relative to the account's current plan size.
///
/// Plans priced above the current plan are upgrades, the rest downgrades.
/// Without a plan of `current` size every other plan counts as an upgrade.
pub fn plan_cards(plans: &[StoragePlan], current: PlanSize) -> Vec<PlanCard> {
    let current_price = plans
        .iter()
        .find(|plan| plan.size == current)
        .map(|plan| plan.monthly_price);

    plans
        .iter()
        .map(|plan| {
            let is_current = plan.size == current;
            let action = if is_current {
                PlanAction::Current
            } else {
                match current_price {
                    Some(price) if plan.monthly_price <= price => PlanAction::Downgrade,
                    _ => PlanAction::Upgrade,
                }
            };
            PlanCard {
                plan: plan.clone(),
                is_current,
                is_popular: plan.size == POPULAR_SIZE,
                action,
            }
        })
        .collect()
}

pub async fn load_plan_cards<R: Repository<StoragePlan>>(
    service: &StoragePlanService<R>,
    current: PlanSize,
) -> LoadState<Vec<PlanCard>> {
    load("storage_plans", PLANS_LOAD_FAILED, service.get_all())
        .await
        .map(|plans| plan_cards(&plans, current))
}

/// Returns `None` for the current plan, whose button is disabled.
pub fn request_plan_change(card: &PlanCard) -> Option<Notice> {
    (card.action != PlanAction::Current).then(|| Notice::success(PLAN_CHANGE_REQUESTED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: i64, size: PlanSize, price: f64) -> StoragePlan {
        StoragePlan {
            id,
            name: format!("{size}"),
            size,
            monthly_price: price,
            features: Vec::new(),
        }
    }

    #[test]
    fn actions_compare_against_current_plan_price() {
        let plans = vec![
            plan(1, PlanSize::Small, 49.0),
            plan(2, PlanSize::Medium, 89.0),
            plan(3, PlanSize::Large, 149.0),
        ];

        let cards = plan_cards(&plans, PlanSize::Medium);
        let actions: Vec<_> = cards.iter().map(|card| card.action).collect();
        assert_eq!(
            actions,
            vec![PlanAction::Downgrade, PlanAction::Current, PlanAction::Upgrade]
        );
        assert!(cards[1].is_popular && cards[1].is_current);
        assert!(request_plan_change(&cards[1]).is_none());
        assert!(request_plan_change(&cards[2]).is_some());
    }
}
