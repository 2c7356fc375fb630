//! Font readiness: nothing measures text before the fonts are in
//!
//! Fonts load in the background. The loader holds a [`FontReadySignal`] and
//! fires it exactly once; render code awaits the matching [`FontGate`] and
//! only then gets the resolved value (typically a font library). A loader
//! that goes away without firing surfaces as
//! [`DojangError::FontMeasurementUnavailable`].

use futures::channel::oneshot;

use crate::error::{DojangError, Result};

/// Create a linked signal and gate
pub fn font_gate<T>() -> (FontReadySignal<T>, FontGate<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        FontReadySignal { sender },
        FontGate {
            state: GateState::Pending(receiver),
        },
    )
}

/// The loader's half: fire once with the loaded fonts, or with the reason
/// they could not be loaded
#[derive(Debug)]
pub struct FontReadySignal<T> {
    sender: oneshot::Sender<Result<T>>,
}

impl<T> FontReadySignal<T> {
    pub fn resolve(self, value: T) {
        if self.sender.send(Ok(value)).is_err() {
            log::debug!("font gate: resolved after every waiter left");
        }
    }

    pub fn fail(self, error: DojangError) {
        if self.sender.send(Err(error)).is_err() {
            log::debug!("font gate: failed after every waiter left");
        }
    }
}

#[derive(Debug)]
enum GateState<T> {
    Ready(T),
    Pending(oneshot::Receiver<Result<T>>),
}

/// The waiter's half
#[derive(Debug)]
pub struct FontGate<T> {
    state: GateState<T>,
}

impl<T> FontGate<T> {
    /// A gate that is already open
    pub fn ready(value: T) -> Self {
        Self {
            state: GateState::Ready(value),
        }
    }

    /// Wait until the fonts are loaded
    pub async fn wait(self) -> Result<T> {
        match self.state {
            GateState::Ready(value) => Ok(value),
            GateState::Pending(receiver) => match receiver.await {
                Ok(result) => result,
                Err(oneshot::Canceled) => Err(DojangError::FontMeasurementUnavailable(
                    "font loader stopped before signalling readiness".into(),
                )),
            },
        }
    }
}
