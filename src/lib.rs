//! Disguise - pose-sequence matching for a mimicry game
//!
//! The player strikes discrete poses; enemies loop authored animations.
//! The matching core decides each frame whether the player is imitating
//! one of them well enough to wear its disguise.

pub mod core;
pub mod game;
pub mod matching;
pub mod pose;
