use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use saffron::db::{self, KitchenOrderRepo};
use saffron::voice::{
    AudioCapture, AudioPlayback, CloudRecognizer, CloudSynthesizer, ConsoleRecognizer,
    ConsoleSynthesizer, PLAYBACK_SAMPLE_RATE, SpeechToText, TextToSpeech,
};
use saffron::{Assistant, Catalog, Config, Recognizer, SpeechIo, Synthesizer};

/// Saffron - voice ordering assistant for an Indian restaurant
#[derive(Parser)]
#[command(name = "saffron", version, about)]
struct Cli {
    /// Type commands instead of speaking them (no microphone, speaker or API keys needed)
    #[arg(long)]
    text: bool,

    /// Order database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the menu
    Menu,
    /// List orders sent to the kitchen, newest first
    Orders {
        /// Number of orders to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello, welcome to our Indian restaurant!")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the conversation on stdout stays readable
    let filter = match cli.verbose {
        0 => "warn,saffron=info",
        1 => "info,saffron=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(path) = cli.db {
        config.db_path = path;
    }
    tracing::debug!(?config, "loaded configuration");

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Menu => {
                print_menu(&Catalog::house());
                Ok(())
            }
            Command::Orders { limit, json } => list_orders(&config, limit, json),
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestSpeaker => test_speaker().await,
            Command::TestTts { text } => test_tts(&config, &text).await,
        };
    }

    let orders = KitchenOrderRepo::new(db::init(&config.db_path)?);

    if cli.text {
        tracing::info!("starting in text mode");
        let io = SpeechIo::new(ConsoleRecognizer::stdin(), ConsoleSynthesizer);
        return converse(io, orders, &config).await;
    }

    let stt = SpeechToText::from_config(&config.voice, &config.api_keys)?;
    let tts = TextToSpeech::from_config(&config.voice, &config.api_keys)?;
    let io = SpeechIo::new(
        CloudRecognizer::new(stt, config.voice.max_utterance_secs)?,
        CloudSynthesizer::new(tts)?,
    );

    tracing::info!(
        stt = ?config.voice.stt_provider,
        tts = ?config.voice.tts_provider,
        "starting in voice mode"
    );
    converse(io, orders, &config).await
}

/// Hold one conversation, releasing devices and the store when it ends
#[allow(clippy::future_not_send)]
async fn converse<R: Recognizer, S: Synthesizer>(
    io: SpeechIo<R, S>,
    orders: KitchenOrderRepo,
    config: &Config,
) -> anyhow::Result<()> {
    let mut assistant = Assistant::new(
        io,
        Catalog::house(),
        orders,
        config.dialogue.clone(),
        StdRng::from_entropy(),
    );
    assistant.run().await?;
    Ok(())
}

/// Print every section of the menu
fn print_menu(catalog: &Catalog) {
    for section in catalog.sections() {
        println!("[{}]", section.category);
        for dish in section.dishes {
            println!("  {}", dish.display_line());
        }
    }
}

/// Print the kitchen queue
fn list_orders(config: &Config, limit: usize, json: bool) -> anyhow::Result<()> {
    let repo = KitchenOrderRepo::new(db::init(&config.db_path)?);
    let orders = repo.list_recent(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in &orders {
        println!(
            "#{:<5} {}  {:<9} {} ({})",
            order.id, order.order_time, order.status, order.item_name, order.modifications
        );
    }
    println!("---");
    println!("{} of {} orders", orders.len(), repo.count()?);

    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    println!("Sample rate: {} Hz", capture.sample_rate());
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.peek_buffer();
        let energy = calculate_rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "█".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );

        capture.clear_buffer();
    }

    capture.stop();

    println!("\n---");
    println!("If the meter moved, the microphone is working.");
    println!("If RMS stayed near 0, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: pactl info | grep 'Default Source'");
    println!("  3. Run: arecord -l (to list devices)");

    Ok(())
}

/// Calculate RMS energy
#[allow(clippy::cast_precision_loss)]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Test speaker output with a sine wave
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let mut playback = AudioPlayback::new()?;

    #[allow(clippy::cast_precision_loss)]
    let rate = PLAYBACK_SAMPLE_RATE as f32;
    let frequency = 440.0_f32;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..PLAYBACK_SAMPLE_RATE * 2)
        .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / rate).sin() * 0.3)
        .collect();

    println!("Playing {} samples at {PLAYBACK_SAMPLE_RATE} Hz...", samples.len());
    playback.play(samples).await?;

    println!("\n---");
    println!("If you heard the tone, your speakers are working.");
    println!("If not, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Try: pavucontrol (to check output levels)");

    Ok(())
}

/// Test TTS output with the configured provider
async fn test_tts(config: &Config, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let tts = TextToSpeech::from_config(&config.voice, &config.api_keys)?;

    println!("Synthesizing speech with {:?}...", config.voice.tts_provider);
    let mp3_data = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    println!("Playing audio...");
    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data).await?;

    println!("\n---");
    println!("If you heard the speech, TTS is working.");

    Ok(())
}
