use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::JoinHandle;

use crate::graph::NodeEdgeList;

/// Optional pointer into an algorithm's pseudocode listing, so a consumer
/// can highlight "the line currently executing". Not load-bearing.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct CodePosition {
    pub program: &'static str,
    pub line: u32,
}

/// One published snapshot of algorithm progress. The graph is a defensive
/// deep copy built at the yield point; later pulls never invalidate it.
#[derive(PartialEq, Debug, Clone)]
pub struct Step<N, E> {
    pub graph: NodeEdgeList<N, E>,
    pub code_position: Option<CodePosition>,
}

/// The consumer dropped its end of the sequence; the algorithm body unwinds
/// through `?` and the worker exits quietly.
#[derive(Debug)]
pub struct Aborted;

/// Producer half of a run. Every `emit` is a suspension point: the worker
/// blocks until the consumer pulls the Step, so nested recursion that emits
/// flattens into the sequence in occurrence order.
pub struct Emitter<N, E> {
    tx: SyncSender<Step<N, E>>,
}

impl<N, E> Emitter<N, E> {
    pub fn emit(&self, graph: NodeEdgeList<N, E>) -> Result<(), Aborted> {
        self.tx.send(Step { graph, code_position: None }).map_err(|_| Aborted)
    }

    pub fn emit_at(&self, graph: NodeEdgeList<N, E>, program: &'static str, line: u32) -> Result<(), Aborted> {
        self.tx
            .send(Step { graph, code_position: Some(CodePosition { program, line }) })
            .map_err(|_| Aborted)
    }
}

/// A lazy, single-pass, finite sequence of Steps plus a final result.
///
/// The algorithm body runs on a dedicated worker thread behind a rendezvous
/// channel: nothing executes past a suspension point until the consumer
/// pulls. Dropping the Run mid-iteration closes the channel and joins the
/// worker; a worker panic is re-raised on the consumer at the next pull.
#[derive(Debug)]
pub struct Run<N, E, R> {
    rx: Option<Receiver<Step<N, E>>>,
    worker: Option<JoinHandle<Option<R>>>,
    result: Option<R>,
}

impl<N, E, R> Run<N, E, R>
where
    N: Send + 'static,
    E: Send + 'static,
    R: Send + 'static,
{
    pub(crate) fn spawn<F>(body: F) -> Self
    where
        F: FnOnce(&Emitter<N, E>) -> Result<R, Aborted> + Send + 'static,
    {
        let (tx, rx) = sync_channel(0);
        let worker = std::thread::spawn(move || body(&Emitter { tx }).ok());
        Run { rx: Some(rx), worker: Some(worker), result: None }
    }

    fn join(&mut self) {
        // close our end first so a send blocked in the worker unblocks
        self.rx.take();
        if let Some(worker) = self.worker.take() {
            match worker.join() {
                Ok(result) => self.result = result,
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    }

    /// Drain whatever Steps remain and hand back the final result.
    pub fn into_result(mut self) -> R {
        while self.next().is_some() {}
        self.result.take().unwrap()
    }

    /// The final result, if the sequence has already been exhausted.
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }
}

impl<N, E, R> Iterator for Run<N, E, R>
where
    N: Send + 'static,
    E: Send + 'static,
    R: Send + 'static,
{
    type Item = Step<N, E>;

    fn next(&mut self) -> Option<Step<N, E>> {
        match self.rx.as_ref()?.recv() {
            Ok(step) => Some(step),
            Err(_) => {
                self.join();
                None
            }
        }
    }
}

impl<N, E, R> Drop for Run<N, E, R> {
    fn drop(&mut self) {
        self.rx.take();
        if let Some(worker) = self.worker.take() {
            // abandoning a sequence is "stop pulling"; never re-panic in drop
            let _ = worker.join();
        }
    }
}
