// ABOUTME: Core data models for surveys, goals, meals, and user profiles
// ABOUTME: Re-exports the types shared by the calculator, stores, and service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models
//!
//! Field names serialize in camelCase so stored documents keep the shape the
//! client applications already read.

/// Derived daily targets
pub mod goals;
/// Meals, meal estimates, and daily totals
pub mod meal;
/// User profile and typed partial updates
pub mod profile;
/// Onboarding survey answers
pub mod survey;

pub use goals::DerivedGoals;
pub use meal::{DaySummary, Meal, MealEstimate};
pub use profile::{ProfileUpdate, StreakData, SurveyHistory, UserProfile, WeeklyProgress};
pub use survey::{ActivityLevel, DateOfBirth, Gender, Goal, SurveyData};
