use std::any::{Any, type_name};

use flume::{Receiver, Sender};
use log::trace;

use crate::Error;

/// A value that a controller owns and a renderer observes.
///
/// States are plain values: every change produces a new value that is sent
/// to the reader side in full, so the renderer never shares memory with the
/// controller.
pub trait State: Any + Clone + Default + Send {
    const TYPE: &'static str = "state";
}

/// Create a connected updater/reader pair for `T`.
pub fn channel<T: State>() -> (StateUpdater<T>, StateReader<T>) {
    let (send, recv) = flume::unbounded();
    (StateUpdater { send }, StateReader { recv })
}

/// Write half: publishes new state values.
#[derive(Debug, Clone)]
pub struct StateUpdater<T: State> {
    send: Sender<T>,
}

impl<T> StateUpdater<T>
where
    T: State,
{
    /// Publish a new value.
    ///
    /// Fails only when every reader has been dropped.
    pub fn set(&self, state: T) -> Result<(), Error> {
        trace!("publishing {} ({})", T::TYPE, type_name::<T>());
        self.send
            .send(state)
            .map_err(|_disconnected| Error::disconnected::<T>())
    }
}

/// Read half: receives published state values in publication order.
#[derive(Debug, Clone)]
pub struct StateReader<T: State> {
    recv: Receiver<T>,
}

impl<T> StateReader<T>
where
    T: State,
{
    /// Take the oldest unread value, if any.
    pub fn read(&self) -> Option<T> {
        self.recv.try_recv().ok()
    }

    /// Drain everything pending and keep only the newest value.
    pub fn latest(&self) -> Option<T> {
        self.recv.try_iter().last()
    }

    /// Number of values published but not yet read.
    pub fn pending(&self) -> usize {
        self.recv.len()
    }
}
