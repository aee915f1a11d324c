//! API request handlers.

mod health;
mod listing;

pub use health::*;
pub use listing::*;
