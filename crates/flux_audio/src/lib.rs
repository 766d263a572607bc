pub mod bank;
pub mod channels;

pub use bank::{SoundBank, SoundData};
pub use channels::AudioChannels;
