//! Input handling module

pub mod discovery;
pub mod file_reader;
pub mod lexicon_source;

pub use discovery::discover_transcripts;
pub use file_reader::FileReader;
pub use lexicon_source::{load_adverbs, load_sentiment};
