//! Dialogue controller
//!
//! Listens for a command, dispatches it, and goes back to listening until
//! the customer says goodbye:
//!
//! ```text
//! Idle ──listen──▶ Listening ──heard──▶ Dispatching ──▶ Idle
//!                      │                    │
//!                   nothing               exit/quit
//!                      ▼                    ▼
//!                    Idle                 Exited
//! ```

mod menu;
mod order;
pub mod prompts;

use rand::Rng;
use rand::rngs::StdRng;

pub use menu::parse_preference;
pub use order::{PlacedOrder, modification_prompt};

use crate::config::DialogueConfig;
use crate::db::KitchenOrderRepo;
use crate::menu::Catalog;
use crate::voice::{Recognizer, SpeechIo, Synthesizer};
use crate::{Error, Result};

/// What the customer asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Order,
    Menu,
    Reservation,
    Exit,
    Unknown,
}

/// Keyword rules in precedence order; the first keyword contained in the
/// command decides the intent
const INTENT_RULES: &[(&str, Intent)] = &[
    ("order", Intent::Order),
    ("menu", Intent::Menu),
    ("reservation", Intent::Reservation),
    ("exit", Intent::Exit),
    ("quit", Intent::Exit),
];

impl Intent {
    /// Classify a normalized command by substring containment
    ///
    /// "show me the menu so i can order" is an order: `order` outranks `menu`.
    #[must_use]
    pub fn classify(command: &str) -> Self {
        INTENT_RULES
            .iter()
            .find(|(keyword, _)| command.contains(keyword))
            .map_or(Self::Unknown, |(_, intent)| *intent)
    }
}

/// Whether the dialogue keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The restaurant assistant
///
/// Owns everything a conversation needs; dropping it releases the store
/// connection and the audio devices.
pub struct Assistant<R, S, G = StdRng> {
    io: SpeechIo<R, S>,
    catalog: Catalog,
    orders: KitchenOrderRepo,
    settings: DialogueConfig,
    rng: G,
}

impl<R: Recognizer, S: Synthesizer, G: Rng> Assistant<R, S, G> {
    /// Assemble an assistant from its collaborators
    pub const fn new(
        io: SpeechIo<R, S>,
        catalog: Catalog,
        orders: KitchenOrderRepo,
        settings: DialogueConfig,
        rng: G,
    ) -> Self {
        Self {
            io,
            catalog,
            orders,
            settings,
            rng,
        }
    }

    /// Greet the customer and serve commands until they leave
    ///
    /// Running out of input (console EOF) ends the conversation quietly.
    ///
    /// # Errors
    ///
    /// Returns error on audio, synthesis or database failures
    pub async fn run(&mut self) -> Result<()> {
        match self.serve().await {
            Err(Error::InputClosed) => {
                tracing::info!("input closed, ending conversation");
                Ok(())
            }
            other => other,
        }
    }

    async fn serve(&mut self) -> Result<()> {
        self.io.speak(prompts::GREETING).await?;
        self.io.display(prompts::COMMAND_HINT);

        loop {
            let Some(command) = self.io.listen().await? else {
                continue;
            };

            if self.handle(&command).await? == Flow::Exit {
                tracing::info!("customer left");
                return Ok(());
            }
        }
    }

    /// Dispatch one heard command
    ///
    /// # Errors
    ///
    /// Returns error on audio, synthesis or database failures
    pub async fn handle(&mut self, command: &str) -> Result<Flow> {
        let intent = Intent::classify(command);
        tracing::info!(?intent, command, "dispatching");

        match intent {
            Intent::Order => {
                self.place_order().await?;
            }
            Intent::Menu => self.show_menu().await?,
            Intent::Reservation => self.io.speak(prompts::RESERVATION_STUB).await?,
            Intent::Exit => {
                self.io.speak(prompts::FAREWELL).await?;
                return Ok(Flow::Exit);
            }
            Intent::Unknown => self.io.speak(prompts::FALLBACK).await?,
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(Intent::classify("i would like to order"), Intent::Order);
        assert_eq!(Intent::classify("menu"), Intent::Menu);
        assert_eq!(Intent::classify("make a reservation"), Intent::Reservation);
        assert_eq!(Intent::classify("exit"), Intent::Exit);
        assert_eq!(Intent::classify("please quit now"), Intent::Exit);
        assert_eq!(Intent::classify("hello there"), Intent::Unknown);
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(Intent::classify("show me the menu so i can order"), Intent::Order);
        assert_eq!(Intent::classify("exit the menu"), Intent::Menu);
        assert_eq!(Intent::classify("reservation then quit"), Intent::Reservation);
    }

    #[test]
    fn test_classify_is_substring_based() {
        // "reorder" contains "order"
        assert_eq!(Intent::classify("reorder"), Intent::Order);
        assert_eq!(Intent::classify("menus"), Intent::Menu);
    }
}
