pub mod align_audio_use_case;
