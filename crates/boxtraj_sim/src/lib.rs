pub mod generator;
pub mod playback;

pub use generator::Generator;
pub use playback::PlaybackCursor;
