//! Dietary preference and menu announcement

use rand::Rng;

use super::{Assistant, prompts};
use crate::Result;
use crate::menu::Category;
use crate::voice::{Recognizer, Synthesizer};

/// Answers accepted for each dietary preference; the whole answer must match
const PREFERENCE_ANSWERS: &[(&str, Category)] = &[
    ("vegetarian", Category::Veg),
    ("veg", Category::Veg),
    ("non vegetarian", Category::NonVeg),
    ("non veg", Category::NonVeg),
    ("non-vegetarian", Category::NonVeg),
    ("non-veg", Category::NonVeg),
];

/// Map a normalized answer to a dietary category
///
/// Only the veg and non-veg categories can come out of this.
#[must_use]
pub fn parse_preference(answer: &str) -> Option<Category> {
    PREFERENCE_ANSWERS
        .iter()
        .find(|(accepted, _)| *accepted == answer)
        .map(|(_, category)| *category)
}

impl<R: Recognizer, S: Synthesizer, G: Rng> Assistant<R, S, G> {
    /// Ask whether the customer wants vegetarian or non-vegetarian dishes
    ///
    /// Re-asks after every unrecognized answer, up to the configured number
    /// of attempts. Returns `None` once the attempts are used up.
    ///
    /// # Errors
    ///
    /// Returns error on audio or synthesis failures
    pub async fn ask_for_dietary_preferences(&mut self) -> Result<Option<Category>> {
        let attempts = self.settings.max_preference_attempts;

        for attempt in 1..=attempts {
            self.io.speak(prompts::ASK_PREFERENCE).await?;
            let answer = self.io.listen().await?;

            if let Some(category) = answer.as_deref().and_then(parse_preference) {
                tracing::debug!(%category, attempt, "dietary preference");
                return Ok(Some(category));
            }

            tracing::debug!(answer = ?answer, attempt, attempts, "preference not recognized");
            self.io.speak(prompts::CLARIFY_PREFERENCE).await?;
        }

        tracing::warn!(attempts, "no dietary preference after all attempts");
        Ok(None)
    }

    /// Read out the dishes of the customer's preferred category
    ///
    /// # Errors
    ///
    /// Returns error on audio or synthesis failures
    pub async fn show_menu(&mut self) -> Result<()> {
        let Some(category) = self.ask_for_dietary_preferences().await? else {
            self.io.speak(prompts::PREFERENCE_GIVE_UP).await?;
            return Ok(());
        };

        self.io
            .speak(&format!("Here are the {category} items available:"))
            .await?;

        for dish in self.catalog.dishes(category) {
            self.io.display(&dish.display_line());
            self.io.speak(&dish.spoken_line()).await?;
        }

        // The answer is picked up by the main loop, if at all
        self.io.speak(prompts::OFFER_ORDER).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preference() {
        assert_eq!(parse_preference("veg"), Some(Category::Veg));
        assert_eq!(parse_preference("vegetarian"), Some(Category::Veg));
        assert_eq!(parse_preference("non veg"), Some(Category::NonVeg));
        assert_eq!(parse_preference("non vegetarian"), Some(Category::NonVeg));
        assert_eq!(parse_preference("non-veg"), Some(Category::NonVeg));
    }

    #[test]
    fn test_parse_preference_needs_whole_answer() {
        assert_eq!(parse_preference("veg please"), None);
        assert_eq!(parse_preference("drinks"), None);
        assert_eq!(parse_preference("desserts"), None);
        assert_eq!(parse_preference(""), None);
    }
}
