// YouTube helpers: video id parsing and oEmbed metadata lookup.

pub mod oembed;
pub mod video_id;

pub use video_id::extract_video_id;
