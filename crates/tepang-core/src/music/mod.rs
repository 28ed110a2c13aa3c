mod player;

pub use player::{MusicPlayer, MusicState};

#[cfg(test)]
pub(crate) use player::tests::FakeBackend;
