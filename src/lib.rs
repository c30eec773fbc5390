#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod events;
mod game;
mod history;
#[cfg(feature = "std")]
mod logging;
mod pool;
#[cfg(feature = "std")]
pub mod render;
#[cfg(feature = "std")]
mod session;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
pub use events::*;
pub use game::*;
pub use history::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use pool::*;
#[cfg(feature = "std")]
pub use session::*;
pub use ship::*;
