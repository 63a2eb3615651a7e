//! Per-request trace identifier.
//!
//! [`crate::middleware::Trace`] opens one scope per inbound request. Code
//! awaited inside it reads the id back with [`TraceId::current`]: error
//! payloads carry it, backend requests forward it as `x-request-id`, and a
//! failed-save backup records it so the snapshot can be matched to the
//! request logs.
//!
//! Task-locals do not follow work onto another task (`tokio::spawn`,
//! `spawn_blocking`); read the id before handing work off.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Response header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Request header forwarding the trace id to the storage backend.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifier shared by everything one request does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for a new request.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// [`Self::current`] in its wire form.
    #[must_use]
    pub fn current_string() -> Option<String> {
        Self::current().map(|id| id.to_string())
    }

    /// Run `fut` as part of this request.
    ///
    /// # Examples
    /// ```
    /// use ward_ops::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id = TraceId::generate();
    /// let observed = trace_id.scope(async { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// assert_eq!(TraceId::current(), None);
    /// # });
    /// ```
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;

    #[tokio::test]
    async fn survives_waiting_for_the_board_lock() {
        let board = Arc::new(Mutex::new(0_usize));
        let held = board.lock().await;
        let trace_id = TraceId::generate();

        let waiter = {
            let board = Arc::clone(&board);
            trace_id.scope(async move {
                let mut assignments = board.lock().await;
                *assignments += 1;
                TraceId::current_string()
            })
        };
        let (observed, ()) = tokio::join!(waiter, async move {
            tokio::task::yield_now().await;
            drop(held);
        });

        assert_eq!(observed, Some(trace_id.to_string()));
        assert_eq!(*board.lock().await, 1);
    }

    #[tokio::test]
    async fn spawned_work_does_not_inherit_the_id() {
        let trace_id = TraceId::generate();
        let inside = trace_id
            .scope(async {
                tokio::spawn(async { TraceId::current() })
                    .await
                    .expect("task completes")
            })
            .await;
        assert_eq!(inside, None);
        assert_eq!(TraceId::current_string(), None);
    }

    #[test]
    fn wire_form_is_a_hyphenated_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let trace_id: TraceId = raw.parse().expect("valid uuid");
        assert_eq!(trace_id.to_string(), raw);
        assert!("nurse_Alice".parse::<TraceId>().is_err());
    }
}
