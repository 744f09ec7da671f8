// Pipeline: composes lookup, scoring and explanation for one video.

pub mod analyze;
