//! Order intake: match the dish, ask about modifications, send it to the
//! kitchen and announce a wait time

use std::ops::RangeInclusive;

use rand::Rng;

use super::{Assistant, prompts};
use crate::Result;
use crate::db::{KitchenOrder, NO_MODIFICATIONS};
use crate::menu::Dish;
use crate::voice::{Recognizer, Synthesizer};

/// Range order numbers are drawn from; numbers are not checked for reuse
const ORDER_NUMBER_RANGE: RangeInclusive<u32> = 1000..=9999;

/// Dish-specific modification questions, checked in order
const MODIFICATION_PROMPTS: &[(&str, &str)] = &[
    ("biryani", prompts::ASK_SPICE),
    ("dosa", prompts::ASK_DOSA_TEXTURE),
    ("paratha", prompts::ASK_BUTTER),
];

/// A dish that made it to the kitchen
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// Number read out to the customer
    pub order_number: u32,
    pub dish: &'static Dish,
    /// The row written to the kitchen queue
    pub kitchen_order: KitchenOrder,
    /// Announced wait, in minutes
    pub wait_minutes: u32,
}

/// Question to ask about modifications for a dish
#[must_use]
pub fn modification_prompt(item_name: &str) -> &'static str {
    let name = item_name.to_lowercase();
    MODIFICATION_PROMPTS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map_or(prompts::ASK_MODIFICATIONS, |(_, prompt)| *prompt)
}

impl<R: Recognizer, S: Synthesizer, G: Rng> Assistant<R, S, G> {
    /// Take one order
    ///
    /// Listens once. The first catalog dish named in the answer is ordered;
    /// if none is named the customer is asked to repeat and `None` is
    /// returned without retrying. Nothing heard at all ends the flow silently.
    ///
    /// # Errors
    ///
    /// Returns error on audio, synthesis or database failures
    pub async fn place_order(&mut self) -> Result<Option<PlacedOrder>> {
        self.io.speak(prompts::ASK_ORDER).await?;

        let Some(request) = self.io.listen().await? else {
            tracing::debug!("no order heard");
            return Ok(None);
        };

        let Some(dish) = self.catalog.find_in_utterance(&request) else {
            tracing::info!(request = %request, "no dish matched");
            self.io.speak(prompts::ORDER_NOT_UNDERSTOOD).await?;
            return Ok(None);
        };

        self.io
            .speak(&format!("Your order for {} has been placed.", dish.name))
            .await?;

        let order_number = self.rng.gen_range(ORDER_NUMBER_RANGE);
        tracing::info!(dish = dish.name, order_number, "order placed");
        self.io
            .speak(&format!("Your order number is {order_number}."))
            .await?;

        let modifications = self.ask_for_modifications(dish.name).await?;
        let kitchen_order = self.send_order_to_kitchen(dish.name, &modifications).await?;
        let wait_minutes = self.estimate_waiting_time().await?;

        Ok(Some(PlacedOrder {
            order_number,
            dish,
            kitchen_order,
            wait_minutes,
        }))
    }

    /// Ask how the customer wants the dish
    ///
    /// Returns what was heard, or [`NO_MODIFICATIONS`] if nothing was.
    ///
    /// # Errors
    ///
    /// Returns error on audio or synthesis failures
    pub async fn ask_for_modifications(&mut self, item_name: &str) -> Result<String> {
        self.io.speak(modification_prompt(item_name)).await?;

        Ok(self
            .io
            .listen()
            .await?
            .unwrap_or_else(|| NO_MODIFICATIONS.to_string()))
    }

    /// Queue the order for the kitchen and confirm it
    ///
    /// # Errors
    ///
    /// Returns error if the order cannot be stored or the confirmation spoken
    pub async fn send_order_to_kitchen(
        &mut self,
        item_name: &str,
        modifications: &str,
    ) -> Result<KitchenOrder> {
        let order = self.orders.insert(item_name, modifications)?;

        self.io
            .speak(&format!("Your order for {item_name} has been sent to the kitchen."))
            .await?;

        Ok(order)
    }

    /// Announce a made-up wait time, in minutes
    ///
    /// # Errors
    ///
    /// Returns error if the announcement cannot be spoken
    pub async fn estimate_waiting_time(&mut self) -> Result<u32> {
        let minutes = self.rng.gen_range(self.settings.wait_minutes.clone());

        self.io
            .speak(&format!(
                "Your order will be ready in approximately {minutes} minutes."
            ))
            .await?;

        Ok(minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_prompts() {
        assert_eq!(modification_prompt("Chicken Biryani"), prompts::ASK_SPICE);
        assert_eq!(modification_prompt("Masala Dosa"), prompts::ASK_DOSA_TEXTURE);
        assert_eq!(modification_prompt("Aloo Paratha"), prompts::ASK_BUTTER);
        assert_eq!(modification_prompt("Gulab Jamun"), prompts::ASK_MODIFICATIONS);
    }

    #[test]
    fn test_modification_prompt_ignores_case() {
        assert_eq!(modification_prompt("VEG BIRYANI"), prompts::ASK_SPICE);
    }
}
