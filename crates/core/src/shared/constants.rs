/// Sample rate the Whisper models expect.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Base URL for the ggml Whisper model files.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Where exported alignment JSON goes when no output path is given.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
