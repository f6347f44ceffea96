//! Storage plan catalogue record.

use super::{merge_field, Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSize {
    Small,
    Medium,
    Large,
}

impl PlanSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Display for PlanSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePlan {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub size: PlanSize,
    /// Price in whole currency units per month.
    pub monthly_price: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoragePlan {
    pub name: String,
    pub size: PlanSize,
    pub monthly_price: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoragePlanPatch {
    pub name: Option<String>,
    pub size: Option<PlanSize>,
    pub monthly_price: Option<f64>,
    pub features: Option<Vec<String>>,
}

impl Record for StoragePlan {
    type Draft = NewStoragePlan;
    type Patch = StoragePlanPatch;

    const COLLECTION: &'static str = "storage_plans";
    const ENTITY: &'static str = "Storage plan";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewStoragePlan, _created_on: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            size: draft.size,
            monthly_price: draft.monthly_price,
            features: draft.features,
        }
    }

    fn apply_patch(&mut self, patch: &StoragePlanPatch) {
        merge_field(&mut self.name, &patch.name);
        merge_field(&mut self.size, &patch.size);
        merge_field(&mut self.monthly_price, &patch.monthly_price);
        merge_field(&mut self.features, &patch.features);
    }
}
