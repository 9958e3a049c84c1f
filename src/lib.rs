// Shill: flag low-information product reviews.
//
// This is the library root. Each module corresponds to a stage of the review
// analysis: text normalization, dictionary lookup, scoring, and the
// per-product pipeline that ties them together.

pub mod config;
pub mod dataset;
pub mod lexicon;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
pub mod text;
