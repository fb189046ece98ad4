//! Read MESA `history.data` files and plot stellar evolution tracks.

pub mod plot;
pub mod process;
pub mod prompt;
pub mod schema;
