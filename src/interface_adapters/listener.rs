use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::warn;

use crate::domain::errors::ResponseError;
use crate::domain::ports::ResponseListener;

pub type SignInReceiver = oneshot::Receiver<Result<(), ResponseError>>;

// Bridges the callback listener onto a oneshot channel.
pub struct ChannelListener {
    tx: Mutex<Option<oneshot::Sender<Result<(), ResponseError>>>>,
}

impl ChannelListener {
    pub fn channel() -> (Self, SignInReceiver) {
        let (tx, rx) = oneshot::channel();
        let listener = Self {
            tx: Mutex::new(Some(tx)),
        };
        (listener, rx)
    }

    fn complete(&self, result: Result<(), ResponseError>) {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            // A dropped receiver just means nobody is waiting any more.
            Some(sender) => {
                let _ = sender.send(result);
            }
            None => warn!("sign-in listener completed more than once"),
        }
    }
}

impl ResponseListener for ChannelListener {
    fn success(&self) {
        self.complete(Ok(()));
    }

    fn error(&self, error: ResponseError) {
        self.complete(Err(error));
    }
}
