use std::any::type_name;

use thiserror::Error;

use crate::State;

#[derive(Debug, Error)]
pub enum Error {
    #[error("State channel closed: {state} ({type_name})")]
    Disconnected {
        state: &'static str,
        type_name: &'static str,
    },
}

impl Error {
    pub fn disconnected<T: State>() -> Self {
        Self::Disconnected {
            state: T::TYPE,
            type_name: type_name::<T>(),
        }
    }
}
