pub mod cli;
pub mod draw;
pub mod error;
pub mod pattern;
pub mod proc;

pub use error::{BoardError, PatternError};
pub use pattern::Pattern;
pub use proc::{Board, Cell};
