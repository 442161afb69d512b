//! Core draw-cycle logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod clock;
pub mod config;
pub mod counters;
pub mod cycle;
pub mod events;
pub mod rng;
pub mod table;

pub use cards::*;
pub use clock::*;
pub use config::*;
pub use counters::*;
pub use cycle::*;
pub use events::*;
pub use rng::*;
pub use table::*;
