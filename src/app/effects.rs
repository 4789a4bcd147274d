use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::analysis::{AnalysisClient, Completion, dispatch};
use crate::app::Model;

/// Hand every queued request to a worker thread.
pub(super) fn dispatch_pending(
    client: &Arc<AnalysisClient>,
    model: &mut Model,
    tx: &Sender<Completion>,
) {
    for job in model.take_outbox() {
        crate::perf::log_event(
            "request.dispatch",
            format!(
                "id={} endpoint={} tasks={} strategy={}",
                job.id,
                job.endpoint,
                job.request.tasks.len(),
                job.request.strategy
            ),
        );
        dispatch::spawn(Arc::clone(client), job, tx.clone());
    }
}

/// Log a reply before `update` decides whether it still matters.
pub(super) fn log_completion(model: &Model, completion: &Completion) {
    let current = model.in_flight.pending(completion.endpoint) == Some(completion.id);
    crate::perf::log_event(
        "request.complete",
        format!(
            "id={} endpoint={} ok={} current={current}",
            completion.id,
            completion.endpoint,
            completion.outcome.is_ok()
        ),
    );
}
