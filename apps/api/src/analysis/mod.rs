pub mod classifier;
pub mod dictionary;
pub mod extractor;
pub mod gaps;
pub mod handlers;
pub mod metadata;
pub mod prompts;
pub mod quantify;
pub mod scorer;
pub mod suggestions;
