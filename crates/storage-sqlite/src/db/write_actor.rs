use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use kepengen_core::errors::{DatabaseError, Error, Result};
use log::debug;
use std::any::Any;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

// Type alias for the job to be executed by the writer actor.
// It takes a mutable reference to a SqliteConnection and returns a Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

struct WriteRequest {
    job: Job<Box<dyn Any + Send + 'static>>,
    // Signalled by the actor right before the job starts.
    claimed: oneshot::Sender<()>,
    reply: Reply,
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<WriteRequest>,
    timeout: Duration,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an `IMMEDIATE` transaction: it commits only if it
    /// returns `Ok`, otherwise every statement it issued is rolled back.
    ///
    /// The configured deadline bounds queueing only. When the actor has not
    /// claimed the job in time, the call fails with `DatabaseError::Timeout`
    /// and the job never runs. Once claimed, the call waits for the job's
    /// own outcome, whose lock waits are bounded by SQLite's `busy_timeout`.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (claimed_tx, mut claimed_rx) = oneshot::channel();
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = WriteRequest {
            job: Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
            claimed: claimed_tx,
            reply: reply_tx,
        };

        let deadline = Instant::now() + self.timeout;
        let timed_out = || Error::Database(DatabaseError::Timeout(duration_millis(self.timeout)));

        tokio::time::timeout_at(deadline, self.tx.send(request))
            .await
            .map_err(|_| timed_out())?
            .map_err(|_| actor_gone("Writer actor is not running"))?;

        match tokio::time::timeout_at(deadline, &mut claimed_rx).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => return Err(actor_gone("Writer actor dropped the job")),
            Err(_) => {
                // Closing first makes the outcome final: either the actor
                // claimed the job already, or its claim will fail and it
                // skips the job.
                claimed_rx.close();
                if claimed_rx.try_recv().is_err() {
                    return Err(timed_out());
                }
            }
        }

        let boxed = reply_rx
            .await
            .map_err(|_| actor_gone("Writer actor dropped the reply"))??;

        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Unexpected("Failed to downcast writer actor result".to_string())
        })
    }
}

fn actor_gone(message: &str) -> Error {
    Error::Database(DatabaseError::ConnectionFailed(message.to_string()))
}

pub(crate) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Spawns a background task that acts as the single writer to the database.
/// The actor owns one connection from the pool and processes write jobs
/// serially on a blocking thread.
pub fn spawn_writer(pool: DbPool, timeout: Duration) -> Result<WriteHandle> {
    // The channel is bounded; 1024 is an arbitrary size.
    let (tx, mut rx) = mpsc::channel::<WriteRequest>(1024);

    let mut conn = pool.get().map_err(StorageError::from)?;

    tokio::task::spawn_blocking(move || {
        while let Some(WriteRequest {
            job,
            claimed,
            reply,
        }) = rx.blocking_recv()
        {
            if claimed.send(()).is_err() {
                debug!("Skipping write job whose caller has gone away");
                continue;
            }

            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            if let Err(e) = &result {
                debug!("Write job rolled back: {}", e);
            }

            // A caller cancelled after the claim is gone; the commit stands.
            let _ = reply.send(result);
        }
        // All handles dropped: the actor terminates.
    });

    Ok(WriteHandle { tx, timeout })
}
