//! Shared test utilities

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use saffron::config::DialogueConfig;
use saffron::{
    Assistant, Catalog, DbPool, Error, KitchenOrderRepo, Recognition, Recognizer, SpeechIo,
    Synthesizer, db,
};

/// Set up an in-memory test database
#[must_use]
pub fn setup_test_db() -> DbPool {
    db::init_memory().expect("failed to init test db")
}

/// Plays back a fixed list of recognition outcomes, then reports closed input
pub struct ScriptedRecognizer {
    script: VecDeque<Recognition>,
}

impl ScriptedRecognizer {
    pub fn new(script: impl IntoIterator<Item = Recognition>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Every line is heard as-is
    pub fn heard(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Recognition::Heard((*l).to_string())))
    }
}

#[async_trait(?Send)]
impl Recognizer for ScriptedRecognizer {
    async fn recognize(&mut self) -> saffron::Result<Recognition> {
        self.script.pop_front().ok_or(Error::InputClosed)
    }
}

/// Something the assistant said or showed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Spoken(String),
    Shown(String),
}

/// Records everything the assistant outputs
#[derive(Clone, Default)]
pub struct RecordingSynthesizer {
    lines: Arc<Mutex<Vec<Line>>>,
}

impl RecordingSynthesizer {
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Spoken(text) => Some(text),
                Line::Shown(_) => None,
            })
            .collect()
    }

    pub fn shown(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Shown(text) => Some(text),
                Line::Spoken(_) => None,
            })
            .collect()
    }

    /// Whether `text` was spoken
    pub fn said(&self, text: &str) -> bool {
        self.spoken().iter().any(|s| s == text)
    }
}

#[async_trait(?Send)]
impl Synthesizer for RecordingSynthesizer {
    async fn speak(&mut self, text: &str) -> saffron::Result<()> {
        self.lines.lock().unwrap().push(Line::Spoken(text.to_string()));
        Ok(())
    }

    fn display(&mut self, text: &str) {
        self.lines.lock().unwrap().push(Line::Shown(text.to_string()));
    }
}

pub type TestAssistant = Assistant<ScriptedRecognizer, RecordingSynthesizer, StdRng>;

/// Build an assistant over an in-memory store with a seeded RNG
///
/// Returns the assistant, a handle on its output and the order repo.
pub fn assistant(
    recognizer: ScriptedRecognizer,
    settings: DialogueConfig,
    seed: u64,
) -> (TestAssistant, RecordingSynthesizer, KitchenOrderRepo) {
    let synth = RecordingSynthesizer::default();
    let orders = KitchenOrderRepo::new(setup_test_db());
    let assistant = Assistant::new(
        SpeechIo::new(recognizer, synth.clone()),
        Catalog::house(),
        orders.clone(),
        settings,
        StdRng::seed_from_u64(seed),
    );
    (assistant, synth, orders)
}
