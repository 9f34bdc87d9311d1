//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use std::io::Cursor;

use saffron::voice::{
    ConsoleRecognizer, DetectorState, SAMPLE_RATE, SpeechIo, UNINTELLIGIBLE_APOLOGY,
    UtteranceDetector, samples_to_wav,
};

mod common;
use common::RecordingSynthesizer;

/// Ten seconds at the capture rate
const MAX_SAMPLES: usize = SAMPLE_RATE as usize * 10;

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

#[test]
fn test_detector_starts_idle() {
    let detector = UtteranceDetector::new(MAX_SAMPLES);
    assert_eq!(detector.state(), DetectorState::Idle);
    assert!(!detector.is_complete());
}

#[test]
fn test_silence_does_not_start_utterance() {
    let mut detector = UtteranceDetector::new(MAX_SAMPLES);

    assert!(!detector.process(&generate_silence(1.0)));
    assert_eq!(detector.state(), DetectorState::Idle);
}

#[test]
fn test_utterance_ends_after_pause() {
    let mut detector = UtteranceDetector::new(MAX_SAMPLES);

    let speech = generate_sine_samples(440.0, 0.5, 0.3);
    assert!(!detector.process(&speech));
    assert_eq!(detector.state(), DetectorState::Speaking);

    // A short pause is part of the utterance
    assert!(!detector.process(&generate_silence(0.2)));

    let more_speech = generate_sine_samples(440.0, 0.5, 0.3);
    assert!(!detector.process(&more_speech));

    let complete = detector.process(&generate_silence(0.9));
    assert!(complete);
    assert!(detector.is_complete());
}

#[test]
fn test_take_utterance_returns_all_audio() {
    let mut detector = UtteranceDetector::new(MAX_SAMPLES);

    let chunk1 = generate_sine_samples(440.0, 0.3, 0.3);
    let chunk2 = generate_sine_samples(440.0, 0.3, 0.3);
    let pause = generate_silence(0.9);
    detector.process(&chunk1);
    detector.process(&chunk2);
    assert!(detector.process(&pause));

    let taken = detector.take_utterance();
    assert_eq!(taken.len(), chunk1.len() + chunk2.len() + pause.len());

    assert_eq!(detector.state(), DetectorState::Idle);
    assert!(!detector.is_complete());
}

#[test]
fn test_noise_burst_is_discarded() {
    let mut detector = UtteranceDetector::new(MAX_SAMPLES);

    // A click too short to be speech, then a long silence
    detector.process(&generate_sine_samples(440.0, 0.05, 0.5));
    assert_eq!(detector.state(), DetectorState::Speaking);

    assert!(!detector.process(&generate_silence(2.0)));
    assert_eq!(detector.state(), DetectorState::Idle);
}

#[test]
fn test_long_speech_is_cut_off() {
    let mut detector = UtteranceDetector::new(SAMPLE_RATE as usize);

    assert!(!detector.process(&generate_sine_samples(440.0, 0.5, 0.3)));
    assert!(detector.process(&generate_sine_samples(440.0, 0.5, 0.3)));
}

#[test]
fn test_samples_to_wav() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = samples_to_wav(&samples, SAMPLE_RATE).unwrap();

    // Check WAV header magic
    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");
    assert!(wav_data.len() > 44);
}

#[test]
fn test_wav_is_16bit_mono() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = samples_to_wav(&original_samples, SAMPLE_RATE).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(wav_data)).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
    assert_eq!(read_samples[0], 0);
    assert!(read_samples[3] > 32000);
    assert!(read_samples[4] < -32000);
}

#[tokio::test]
async fn test_listen_normalizes_console_input() {
    let input: &[u8] = b"  Non-Veg.  \n\n";
    let synth = RecordingSynthesizer::default();
    let mut io = SpeechIo::new(ConsoleRecognizer::new(input), synth.clone());

    assert_eq!(io.listen().await.unwrap().as_deref(), Some("non-veg"));
    assert_eq!(io.listen().await.unwrap(), None);
    assert_eq!(synth.spoken(), vec![UNINTELLIGIBLE_APOLOGY.to_string()]);
}
