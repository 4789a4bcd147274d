//! Running service requests off the UI thread and matching their replies.
//!
//! Every request gets a fresh [`RequestId`]. Only the newest id issued for
//! an endpoint is accepted when its completion arrives; replies to requests
//! that were superseded are dropped, whatever order they come back in.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use super::client::{AnalysisClient, AnalysisError, AnalysisResponse, Endpoint};
use super::wire::AnalysisRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request ready to go out.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: RequestId,
    pub endpoint: Endpoint,
    pub request: AnalysisRequest,
}

/// A finished request, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: RequestId,
    pub endpoint: Endpoint,
    pub outcome: Result<AnalysisResponse, AnalysisError>,
}

/// Latest outstanding request per endpoint.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    next: u64,
    analyze: Option<RequestId>,
    suggest: Option<RequestId>,
}

impl InFlight {
    /// Issue a new id for `endpoint`, superseding any pending one.
    pub fn begin(&mut self, endpoint: Endpoint) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        *self.slot(endpoint) = Some(id);
        id
    }

    /// Accept a completion if it belongs to the newest request for its
    /// endpoint. Accepting clears the pending slot.
    pub fn settle(&mut self, endpoint: Endpoint, id: RequestId) -> bool {
        let slot = self.slot(endpoint);
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub const fn pending(&self, endpoint: Endpoint) -> Option<RequestId> {
        match endpoint {
            Endpoint::Analyze => self.analyze,
            Endpoint::Suggest => self.suggest,
        }
    }

    pub const fn any_pending(&self) -> bool {
        self.analyze.is_some() || self.suggest.is_some()
    }

    fn slot(&mut self, endpoint: Endpoint) -> &mut Option<RequestId> {
        match endpoint {
            Endpoint::Analyze => &mut self.analyze,
            Endpoint::Suggest => &mut self.suggest,
        }
    }
}

/// Run `job` on a worker thread and report back on `tx`.
pub fn spawn(client: Arc<AnalysisClient>, job: Job, tx: Sender<Completion>) {
    std::thread::spawn(move || {
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(run(&client, job));
    });
}

/// Send `job` and wrap the outcome. Failures log at debug level only.
fn run(client: &AnalysisClient, job: Job) -> Completion {
    tracing::debug!(request = %job.id, endpoint = %job.endpoint, "request started");
    let outcome = client.send(job.endpoint, &job.request);
    if let Err(err) = &outcome {
        tracing::debug!(request = %job.id, endpoint = %job.endpoint, error = %err, "request failed");
    }
    Completion {
        id: job.id,
        endpoint: job.endpoint,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_across_endpoints() {
        let mut inflight = InFlight::default();
        let a = inflight.begin(Endpoint::Analyze);
        let s = inflight.begin(Endpoint::Suggest);
        assert!(s > a);
        assert_eq!(inflight.pending(Endpoint::Analyze), Some(a));
        assert_eq!(inflight.pending(Endpoint::Suggest), Some(s));
    }

    #[test]
    fn test_superseded_reply_is_rejected_in_any_order() {
        let mut inflight = InFlight::default();
        let first = inflight.begin(Endpoint::Analyze);
        let second = inflight.begin(Endpoint::Analyze);

        assert!(!inflight.settle(Endpoint::Analyze, first));
        assert!(inflight.settle(Endpoint::Analyze, second));
        assert!(!inflight.any_pending());
        // late duplicate after settling
        assert!(!inflight.settle(Endpoint::Analyze, second));
    }

    #[test]
    fn test_endpoints_are_tracked_independently() {
        let mut inflight = InFlight::default();
        let a = inflight.begin(Endpoint::Analyze);
        let s = inflight.begin(Endpoint::Suggest);
        assert!(!inflight.settle(Endpoint::Suggest, a));
        assert!(inflight.settle(Endpoint::Suggest, s));
        assert!(inflight.settle(Endpoint::Analyze, a));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_request_writes_nothing_at_warn_level() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = AnalysisClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let job = Job {
            id: RequestId(3),
            endpoint: Endpoint::Analyze,
            request: AnalysisRequest::new(Vec::new(), "smart"),
        };

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let completion = tracing::subscriber::with_default(subscriber, || run(&client, job));

        assert!(completion.outcome.is_err());
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_spawn_reports_transport_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = Arc::new(AnalysisClient::new(&format!("http://127.0.0.1:{port}")).unwrap());
        let (tx, rx) = std::sync::mpsc::channel();
        let job = Job {
            id: RequestId(7),
            endpoint: Endpoint::Suggest,
            request: AnalysisRequest::new(Vec::new(), "smart"),
        };
        spawn(client, job, tx);
        let completion = rx.recv().unwrap();
        assert_eq!(completion.id, RequestId(7));
        assert_eq!(completion.endpoint, Endpoint::Suggest);
        assert!(matches!(completion.outcome, Err(AnalysisError::Transport(_))));
    }
}
