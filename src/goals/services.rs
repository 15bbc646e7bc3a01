//! Daily nutrition goal computation: Mifflin-St Jeor BMR, an activity
//! multiplier, a weekly weight-change adjustment, and per-template macro
//! splits with carbs filling the remaining calories.

use serde::{Deserialize, Serialize};

/// One kilogram of body weight is worth roughly 7700 kcal.
const KCAL_PER_KG: f64 = 7700.0;
const MIN_CARBS_G: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeightGoal {
    Lose,
    Gain,
    Maintain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalTemplate {
    CutSugar,
    GainMuscle,
    LoseFat,
    Balanced,
}

struct TemplateProfile {
    protein_per_kg: f64,
    fat_per_kg: f64,
    sugar_limit: i32,
    weight_goal: WeightGoal,
}

impl GoalTemplate {
    fn profile(self) -> TemplateProfile {
        match self {
            GoalTemplate::CutSugar => TemplateProfile {
                protein_per_kg: 1.6,
                fat_per_kg: 0.8,
                sugar_limit: 25,
                weight_goal: WeightGoal::Lose,
            },
            GoalTemplate::GainMuscle => TemplateProfile {
                protein_per_kg: 2.2,
                fat_per_kg: 0.8,
                sugar_limit: 50,
                weight_goal: WeightGoal::Gain,
            },
            GoalTemplate::LoseFat => TemplateProfile {
                protein_per_kg: 2.2,
                fat_per_kg: 0.9,
                sugar_limit: 30,
                weight_goal: WeightGoal::Lose,
            },
            GoalTemplate::Balanced => TemplateProfile {
                protein_per_kg: 1.6,
                fat_per_kg: 0.9,
                sugar_limit: 50,
                weight_goal: WeightGoal::Maintain,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalInputs {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub template: GoalTemplate,
    /// Target weight change in kg per week; ignored for maintenance
    /// templates.
    pub weekly_target_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComputedGoals {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub sugar: i32,
}

pub fn compute_goals(inputs: &GoalInputs) -> ComputedGoals {
    let GoalInputs {
        weight_kg: weight,
        height_cm: height,
        age,
        ..
    } = *inputs;

    let bmr = match inputs.gender {
        Gender::Male => 10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + 5.0,
        Gender::Female => 10.0 * weight + 6.25 * height - 5.0 * f64::from(age) - 161.0,
    };

    let mut tdee = bmr * inputs.activity_level.multiplier();

    let profile = inputs.template.profile();
    let daily_adjustment = inputs.weekly_target_kg * KCAL_PER_KG / 7.0;
    match profile.weight_goal {
        WeightGoal::Lose => tdee -= daily_adjustment,
        WeightGoal::Gain => tdee += daily_adjustment,
        WeightGoal::Maintain => {}
    }

    let calories = tdee.round() as i32;
    let protein = (weight * profile.protein_per_kg).round() as i32;
    let fat = (weight * profile.fat_per_kg).round() as i32;

    let remaining = f64::from(calories - protein * 4 - fat * 9);
    let carbs = (remaining / 4.0).max(MIN_CARBS_G).round() as i32;

    ComputedGoals {
        calories,
        protein,
        carbs,
        fat,
        sugar: profile.sugar_limit,
    }
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
        }
    }
}

impl GoalTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalTemplate::CutSugar => "cutSugar",
            GoalTemplate::GainMuscle => "gainMuscle",
            GoalTemplate::LoseFat => "loseFat",
            GoalTemplate::Balanced => "balanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> GoalInputs {
        GoalInputs {
            weight_kg: 80.0,
            height_cm: 180.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            template: GoalTemplate::Balanced,
            weekly_target_kg: 0.0,
        }
    }

    #[test]
    fn bmr_follows_mifflin_st_jeor() {
        // male: 10*80 + 6.25*180 - 5*30 + 5 = 1780; * 1.55 = 2759
        let goals = compute_goals(&inputs());
        assert_eq!(goals.calories, 2759);

        let female = GoalInputs {
            gender: Gender::Female,
            ..inputs()
        };
        // female BMR is 166 kcal lower: (1780 - 166) * 1.55 = 2501.7
        assert_eq!(compute_goals(&female).calories, 2502);
    }

    #[test]
    fn losing_weight_subtracts_the_weekly_deficit() {
        let cutting = GoalInputs {
            template: GoalTemplate::LoseFat,
            weekly_target_kg: 0.5,
            ..inputs()
        };
        // 0.5 kg/week = 3850 kcal / 7 = 550/day below maintenance
        assert_eq!(compute_goals(&cutting).calories, 2759 - 550);
    }

    #[test]
    fn gaining_weight_adds_the_weekly_surplus() {
        let bulking = GoalInputs {
            template: GoalTemplate::GainMuscle,
            weekly_target_kg: 0.5,
            ..inputs()
        };
        assert_eq!(compute_goals(&bulking).calories, 2759 + 550);
    }

    #[test]
    fn macros_scale_with_body_weight() {
        let goals = compute_goals(&inputs());
        assert_eq!(goals.protein, 128); // 80 * 1.6
        assert_eq!(goals.fat, 72); // 80 * 0.9
        assert_eq!(goals.sugar, 50);
        // carbs fill the rest: (2759 - 128*4 - 72*9) / 4 = 399.75
        assert_eq!(goals.carbs, 400);
    }

    #[test]
    fn carbs_never_drop_below_the_floor() {
        let tiny_budget = GoalInputs {
            weight_kg: 45.0,
            height_cm: 150.0,
            age: 70,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            template: GoalTemplate::LoseFat,
            weekly_target_kg: 1.0,
        };
        let goals = compute_goals(&tiny_budget);
        assert_eq!(goals.carbs, 50);
    }

    #[test]
    fn activity_multipliers_are_ordered() {
        let mut previous = 0;
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            let goals = compute_goals(&GoalInputs {
                activity_level: level,
                ..inputs()
            });
            assert!(goals.calories > previous);
            previous = goals.calories;
        }
    }
}
