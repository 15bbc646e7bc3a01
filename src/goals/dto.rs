use serde::Deserialize;

use crate::goals::services::{ActivityLevel, Gender, GoalTemplate};

/// Profile submitted by the client; the server computes and stores the
/// resulting goal set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutGoalsRequest {
    pub weight: f64,
    #[serde(default)]
    pub target_weight: Option<f64>,
    pub height: f64,
    pub age: i32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub template: GoalTemplate,
    #[serde(default)]
    pub weekly_target: f64,
}
