// ABOUTME: Prompt text sent to the model for meal photo analysis and daily insights
// ABOUTME: Keeps wording in one place so the client stays transport-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Instruction paired with a meal photo
pub const MEAL_ANALYSIS_PROMPT: &str = "Analyze the food in this image. Identify the primary \
food item. Return a JSON object with the item's name (as \"mealName\"), its estimated total \
calories (as \"totalCalories\"), its estimated total protein in grams (as \"totalProtein\"), \
and its estimated weight in grams (as \"estimatedWeight\"). Meal name should be a short, \
descriptive title. For example: \"Bowl of Oatmeal with Berries\".";

/// Build the coaching prompt for a day's meals
#[must_use]
pub fn insight_prompt(meal_summary: &str, daily_goal: i64, daily_protein_goal: i64) -> String {
    format!(
        "Based on the following list of meals I ate today, provide a brief, one-paragraph \
         nutritional analysis focusing on both calories and protein. Offer one positive insight \
         and one simple, actionable suggestion for a healthier choice tomorrow. Keep the tone \
         encouraging and friendly, like a helpful nutrition coach. Do not use markdown.\n\n\
         Here are my meals:\n{meal_summary}\n\n\
         My daily goals are {daily_goal} kcal and {daily_protein_goal}g of protein."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_prompt_embeds_summary_and_goals() {
        let prompt = insight_prompt("- Oatmeal (~300 kcal, ~10g protein)", 1710, 130);
        assert!(prompt.contains("Here are my meals:\n- Oatmeal (~300 kcal, ~10g protein)\n\n"));
        assert!(prompt.ends_with("My daily goals are 1710 kcal and 130g of protein."));
        assert!(prompt.contains("Do not use markdown."));
    }

    #[test]
    fn test_meal_prompt_names_all_fields() {
        for field in ["mealName", "totalCalories", "totalProtein", "estimatedWeight"] {
            assert!(MEAL_ANALYSIS_PROMPT.contains(field));
        }
    }
}
