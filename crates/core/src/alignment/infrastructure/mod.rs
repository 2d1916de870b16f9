pub mod json_alignment_store;
