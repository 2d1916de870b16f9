pub mod audio_reader;
pub mod audio_segment;
pub mod model_size;
pub mod speech_recognizer;
pub mod transcription;
