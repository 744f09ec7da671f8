// viralscope: viral-worthiness scoring for short-form video
//
// This is the library root. `scoring` is the engine; everything else
// feeds it inputs or stores and displays its results.

pub mod db;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod settings;
pub mod status;
pub mod youtube;
