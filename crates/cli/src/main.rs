use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use audio_align_core::alignment::domain::timing_checker::verify_timing;
use audio_align_core::alignment::infrastructure::json_alignment_store::JsonAlignmentStore;
use audio_align_core::audio::domain::model_size::ModelSize;
use audio_align_core::audio::infrastructure::file_audio_reader::FileAudioReader;
use audio_align_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use audio_align_core::pipeline::align_audio_use_case::AlignAudioUseCase;
use audio_align_core::shared::constants::DEFAULT_OUTPUT_DIR;
use audio_align_core::shared::model_resolver;

/// Word-level audio-to-JSON alignment.
#[derive(Parser)]
#[command(name = "audio-align")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe an audio file and export word timing to JSON.
    Align {
        /// Path to the audio file to align.
        audio_file: PathBuf,

        /// Output JSON file path (default: outputs/<audio_filename>.json).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Whisper model size: tiny, base, small, medium, large.
        #[arg(short = 'w', long, default_value = "base")]
        whisper_model: String,
    },
    /// Load an exported alignment JSON and check its timing consistency.
    Verify {
        /// Path to an alignment JSON file.
        json_file: PathBuf,
    },
    /// Show the tool version.
    Version,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Align {
            audio_file,
            output,
            whisper_model,
        } => run_align(&audio_file, output, &whisper_model),
        Command::Verify { json_file } => run_verify(&json_file),
        Command::Version => {
            println!("audio-align v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_align(
    audio_file: &Path,
    output: Option<PathBuf>,
    whisper_model: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !audio_file.exists() {
        return Err(format!("Audio file '{}' not found", audio_file.display()).into());
    }
    let model_size: ModelSize = whisper_model.parse()?;
    let output = match output {
        Some(path) => path,
        None => default_output_path(audio_file)?,
    };

    println!("Processing audio file: {}", audio_file.display());

    log::info!("Resolving Whisper model: {}", model_size.file_name());
    let model_path = model_resolver::resolve(
        model_size.file_name(),
        &model_size.url(),
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let recognizer = WhisperRecognizer::new(&model_path)?;
    let use_case = AlignAudioUseCase::new(
        Box::new(FileAudioReader::new()),
        Box::new(recognizer),
        Box::new(JsonAlignmentStore::new()),
    );

    println!("Transcribing with Whisper '{model_size}' model...");
    let summary = use_case.run(audio_file, &output)?;

    println!("Audio length: {:.1}s", summary.audio_secs);
    println!(
        "Transcription complete: {} words detected",
        summary.transcript_words
    );
    println!("Word timing extracted: {} words", summary.aligned_words);
    println!("JSON exported to: {}", output.display());
    Ok(())
}

fn run_verify(json_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = JsonAlignmentStore::new().load(json_file)?;
    verify_timing(&data)?;
    let word_count = data["words"].as_array().map(Vec::len).unwrap_or(0);
    println!("Timing consistent: {word_count} words checked");
    Ok(())
}

/// `outputs/<input-stem>.json`, creating `outputs/` if needed.
fn default_output_path(audio_file: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let stem = audio_file
        .file_stem()
        .ok_or_else(|| format!("Cannot derive output name from '{}'", audio_file.display()))?;
    fs::create_dir_all(DEFAULT_OUTPUT_DIR)?;
    let mut name = stem.to_os_string();
    name.push(".json");
    Ok(Path::new(DEFAULT_OUTPUT_DIR).join(name))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
