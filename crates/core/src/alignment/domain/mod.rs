pub mod alignment_error;
pub mod alignment_writer;
pub mod record;
pub mod timing_checker;
pub mod validator;
pub mod word_extractor;
