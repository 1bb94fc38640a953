//! State publication between a controller and whatever renders it.
//!
//! A controller owns its state value, replaces it on every transition and
//! pushes the new value through a [`StateUpdater`]. A renderer holds the
//! matching [`StateReader`] and pulls values at its own pace.

mod error;
mod state;

pub use error::Error;
pub use state::{State, StateReader, StateUpdater, channel};
