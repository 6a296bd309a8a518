// ABOUTME: Editable meal entry seeded from a photo estimate, with portion-weight rescaling
// ABOUTME: Validates the draft and turns it into a loggable Meal with a fresh identifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nourish_core::models::{Meal, MealEstimate};
use nourish_core::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::units::round_to_tenth;

/// Per-gram nutrient density captured from the estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerGram {
    calories: f64,
    protein: f64,
}

/// A meal being reviewed before it is logged
///
/// While the per-gram density from the estimate is known, changing the
/// portion weight rescales calories and protein. Editing either nutrient by
/// hand drops the density, after which weight changes leave them alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDraft {
    /// Meal title
    pub name: String,
    calories: f64,
    protein: f64,
    weight_g: f64,
    per_gram: Option<PerGram>,
}

impl MealDraft {
    /// Empty draft for manual entry
    #[must_use]
    pub fn manual(name: impl Into<String>, calories: f64, protein: f64) -> Self {
        Self {
            name: name.into(),
            calories: round_to_tenth(calories),
            protein: round_to_tenth(protein),
            weight_g: 0.0,
            per_gram: None,
        }
    }

    /// Draft seeded from a photo estimate
    #[must_use]
    pub fn from_estimate(estimate: &MealEstimate) -> Self {
        let weight = estimate.estimated_weight;
        let per_gram = (weight > 0.0).then(|| PerGram {
            calories: estimate.total_calories / weight,
            protein: estimate.total_protein / weight,
        });

        Self {
            name: estimate.meal_name.clone(),
            calories: round_to_tenth(estimate.total_calories),
            protein: round_to_tenth(estimate.total_protein),
            weight_g: weight.max(0.0),
            per_gram,
        }
    }

    /// Calories (kcal)
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.calories
    }

    /// Protein (g)
    #[must_use]
    pub const fn protein(&self) -> f64 {
        self.protein
    }

    /// Portion weight (g)
    #[must_use]
    pub const fn weight_g(&self) -> f64 {
        self.weight_g
    }

    /// True while weight changes rescale the nutrients
    #[must_use]
    pub const fn scales_with_weight(&self) -> bool {
        self.per_gram.is_some()
    }

    /// Change the portion weight, rescaling nutrients when the density is known
    pub fn set_weight(&mut self, grams: f64) {
        self.weight_g = grams.max(0.0);
        if let Some(density) = self.per_gram {
            self.calories = round_to_tenth(density.calories * self.weight_g);
            self.protein = round_to_tenth(density.protein * self.weight_g);
        }
    }

    /// Override calories by hand
    pub fn set_calories(&mut self, calories: f64) {
        self.calories = calories;
        self.per_gram = None;
    }

    /// Override protein by hand
    pub fn set_protein(&mut self, protein: f64) {
        self.protein = protein;
        self.per_gram = None;
    }

    /// True when the draft would pass [`MealDraft::finalize`]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    fn validation_error(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Meal name is required")
        } else if self.calories.is_nan() || self.calories <= 0.0 {
            Some("Calories must be greater than zero")
        } else if self.protein.is_nan() || self.protein < 0.0 {
            Some("Protein must not be negative")
        } else {
            None
        }
    }

    /// Turn the draft into a meal with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidInput`] when the name is blank, calories are
    /// not positive, or protein is negative.
    pub fn finalize(self, image: Option<String>) -> AppResult<Meal> {
        if let Some(reason) = self.validation_error() {
            return Err(AppError::new(ErrorCode::InvalidInput, reason));
        }

        Ok(Meal {
            id: Uuid::new_v4(),
            name: self.name.trim().to_owned(),
            calories: self.calories,
            protein: self.protein,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oatmeal() -> MealEstimate {
        MealEstimate {
            meal_name: "Bowl of Oatmeal with Berries".to_owned(),
            total_calories: 350.04,
            total_protein: 12.26,
            estimated_weight: 300.0,
        }
    }

    #[test]
    fn test_estimate_rounds_to_one_decimal() {
        let draft = MealDraft::from_estimate(&oatmeal());
        assert!((draft.calories() - 350.0).abs() < 1e-9);
        assert!((draft.protein() - 12.3).abs() < 1e-9);
        assert!(draft.scales_with_weight());
    }

    #[test]
    fn test_weight_change_rescales() {
        let mut draft = MealDraft::from_estimate(&oatmeal());
        draft.set_weight(150.0);
        assert!((draft.calories() - 175.0).abs() < 1e-9);
        assert!((draft.protein() - 6.1).abs() < 1e-9);
    }

    #[test]
    fn test_manual_edit_stops_rescaling() {
        let mut draft = MealDraft::from_estimate(&oatmeal());
        draft.set_calories(400.0);
        draft.set_weight(150.0);
        assert!((draft.calories() - 400.0).abs() < 1e-9);
        assert!(!draft.scales_with_weight());
    }

    #[test]
    fn test_zero_weight_estimate_has_no_density() {
        let estimate = MealEstimate {
            estimated_weight: 0.0,
            ..oatmeal()
        };
        let mut draft = MealDraft::from_estimate(&estimate);
        draft.set_weight(100.0);
        assert!((draft.calories() - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_finalize_validation() {
        assert_eq!(
            MealDraft::manual("  ", 100.0, 5.0).finalize(None).unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert!(MealDraft::manual("Toast", 0.0, 5.0).finalize(None).is_err());
        assert!(MealDraft::manual("Toast", 100.0, -1.0).finalize(None).is_err());

        let meal = MealDraft::manual("Toast", 100.0, 0.0).finalize(None).unwrap();
        assert_eq!(meal.name, "Toast");
        assert!(meal.image.is_none());
    }

    #[test]
    fn test_finalize_assigns_unique_ids() {
        let a = MealDraft::manual("Toast", 100.0, 3.0).finalize(None).unwrap();
        let b = MealDraft::manual("Toast", 100.0, 3.0).finalize(None).unwrap();
        assert_ne!(a.id, b.id);
    }
}
