pub mod file_audio_reader;
pub mod whisper_recognizer;
