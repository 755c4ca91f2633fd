use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// At most one run of the guarded job at a time. A run that finds the job
/// still busy is skipped, not queued.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    running: Arc<Mutex<()>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `job` unless another run holds the guard; `None` means skipped.
    pub async fn try_run<F, T>(&self, job: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let Ok(_guard) = self.running.try_lock() else {
            warn!("report generation already in progress, skipping this run");
            return None;
        };
        Some(job.await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn runs_when_idle() {
        let flight = SingleFlight::new();
        assert_eq!(flight.try_run(async { 7 }).await, Some(7));
        assert_eq!(flight.try_run(async { 8 }).await, Some(8));
    }

    #[tokio::test]
    async fn skips_while_busy() {
        let flight = SingleFlight::new();
        let (release, wait) = oneshot::channel::<()>();
        let (started_tx, started) = oneshot::channel::<()>();

        let busy = {
            let flight = flight.clone();
            tokio::spawn(async move {
                flight
                    .try_run(async move {
                        started_tx.send(()).ok();
                        wait.await.ok();
                    })
                    .await
            })
        };
        started.await.unwrap();

        assert_eq!(flight.try_run(async { 1 }).await, None);

        release.send(()).unwrap();
        assert_eq!(busy.await.unwrap(), Some(()));
        assert_eq!(flight.try_run(async { 2 }).await, Some(2));
    }
}
