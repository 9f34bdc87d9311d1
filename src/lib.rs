//! Saffron - voice ordering assistant for an Indian restaurant
//!
//! Customers talk to the assistant to hear the menu and order dishes.
//! Orders are written to a local `SQLite` kitchen queue.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Dialogue Controller             │
//! │   order  │  menu  │  reservation  │  exit    │
//! └──────┬──────────────┬──────────────┬─────────┘
//!        │              │              │
//! ┌──────▼─────┐ ┌──────▼─────┐ ┌──────▼───────┐
//! │  Speech IO │ │    Menu    │ │ Kitchen queue│
//! │  STT / TTS │ │  catalog   │ │   (SQLite)   │
//! └────────────┘ └────────────┘ └──────────────┘
//! ```

pub mod config;
pub mod db;
pub mod dialogue;
pub mod error;
pub mod menu;
pub mod voice;

pub use config::Config;
pub use db::{DbConn, DbPool, KitchenOrder, KitchenOrderRepo, OrderStatus};
pub use dialogue::{Assistant, Flow, Intent, PlacedOrder};
pub use error::{Error, Result};
pub use menu::{Catalog, Category, Dish};
pub use voice::{Recognition, Recognizer, SpeechIo, Synthesizer};
