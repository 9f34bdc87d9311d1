//! Line-based recognizer and synthesizer for terminals without audio
//!
//! Each stdin line stands in for one utterance and everything spoken is
//! printed instead.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{Recognition, Recognizer, Synthesizer};
use crate::{Error, Result};

/// Reads typed commands, one line per utterance
pub struct ConsoleRecognizer<R = BufReader<Stdin>> {
    lines: Lines<R>,
    prompt: bool,
}

impl ConsoleRecognizer {
    /// Read utterances from standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            prompt: true,
        }
    }
}

impl<R: AsyncBufRead + Unpin> ConsoleRecognizer<R> {
    /// Read utterances from any line source, without printing a prompt
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            prompt: false,
        }
    }
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> Recognizer for ConsoleRecognizer<R> {
    async fn recognize(&mut self) -> Result<Recognition> {
        if self.prompt {
            let mut stdout = std::io::stdout();
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        match self.lines.next_line().await? {
            Some(line) if line.trim().is_empty() => Ok(Recognition::Unintelligible),
            Some(line) => Ok(Recognition::Heard(line)),
            None => Err(Error::InputClosed),
        }
    }
}

/// Prints what would have been spoken
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

#[async_trait(?Send)]
impl Synthesizer for ConsoleSynthesizer {
    async fn speak(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_become_utterances() {
        let input: &[u8] = b"Show me the menu\n\nexit\n";
        let mut recognizer = ConsoleRecognizer::new(input);

        assert_eq!(
            recognizer.recognize().await.unwrap(),
            Recognition::Heard("Show me the menu".to_string())
        );
        assert_eq!(recognizer.recognize().await.unwrap(), Recognition::Unintelligible);
        assert_eq!(
            recognizer.recognize().await.unwrap(),
            Recognition::Heard("exit".to_string())
        );
        assert!(matches!(recognizer.recognize().await, Err(Error::InputClosed)));
    }
}
