use std::thread::{self, JoinHandle};
use tokio::runtime;
use tokio::sync::{mpsc, oneshot};

use super::{AsyncGrammarService, GrammarError, GrammarRequest, GrammarResponse, GrammarService};

type Reply = oneshot::Sender<Result<GrammarResponse, GrammarError>>;

/// Blocking front for an asynchronous grammar backend.
///
/// The backend runs on a dedicated worker thread with its own
/// single-threaded runtime. Requests travel over a channel of capacity one
/// and the caller blocks until its reply arrives, so at most one request is
/// outstanding per bridge.
///
/// `check` blocks the current thread and must not be called from inside an
/// async runtime.
pub struct GrammarBridge {
    sender: Option<mpsc::Sender<(GrammarRequest, Reply)>>,
    worker: Option<JoinHandle<()>>,
}

impl GrammarBridge {
    pub fn spawn<S: AsyncGrammarService>(service: S) -> std::io::Result<Self> {
        let (sender, mut receiver) = mpsc::channel::<(GrammarRequest, Reply)>(1);
        let runtime = runtime::Builder::new_current_thread().enable_all().build()?;

        let worker = thread::Builder::new()
            .name("grammar-worker".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some((request, reply)) = receiver.recv().await {
                        let result = service.check(request).await;
                        // The caller may have given up; nothing to do then.
                        let _ = reply.send(result);
                    }
                });
                tracing::debug!("Grammar worker stopped");
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }
}

impl GrammarService for GrammarBridge {
    fn check(&self, request: &GrammarRequest) -> Result<GrammarResponse, GrammarError> {
        let sender = self.sender.as_ref().ok_or(GrammarError::Closed)?;
        let (reply, response) = oneshot::channel();
        sender
            .blocking_send((request.clone(), reply))
            .map_err(|_| GrammarError::Closed)?;
        response.blocking_recv().map_err(|_| GrammarError::Closed)?
    }
}

impl Drop for GrammarBridge {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("Grammar worker panicked");
            }
        }
    }
}
