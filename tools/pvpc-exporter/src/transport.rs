//! HTTP transport with automatic retries.
//!
//! [`Transport`] is the request-execution capability shared by the fetcher and
//! the uploader. [`RetryingTransport`] decorates any transport and retries
//! connection failures and gateway errors with exponential backoff.

use {
    crate::error::TransportError,
    backon::{ExponentialBuilder, Retryable},
    reqwest::{Client, Request, Response, StatusCode},
    std::{
        future::Future,
        sync::atomic::{AtomicU32, Ordering},
        time::Duration,
    },
};

/// Executes a fully-formed HTTP request.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl Transport for Client {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        let pending = Client::execute(self, request);

        async move { Ok(pending.await?) }
    }
}

/// When and how long [`RetryingTransport`] waits before trying again.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries, not counting the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles on every following retry.
    pub base_delay: Duration,
    /// Response statuses that are retried. Any other status is returned as-is.
    pub retryable_statuses: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            retryable_statuses: vec![
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff without jitter: `base_delay * 2^k` before retry `k`.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_factor(2.0)
            .with_max_times(self.max_retries as usize)
    }

    /// Connection failures and timeouts are retried. Errors raised while
    /// building the request would fail the same way again, so they are not.
    pub fn retries_error(&self, error: &TransportError) -> bool {
        match error {
            TransportError::Request(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            TransportError::UnbufferableBody => false,
        }
    }
}

/// Outcome of one attempt that backon gets to look at.
enum Attempt {
    /// Retryable status. The body has already been drained.
    Status(StatusCode),
    Failed(TransportError),
}

/// Decorator that retries requests on the wrapped [`Transport`].
///
/// Once retries are exhausted, the last response or error is handed back
/// unchanged and the caller decides what to make of it.
#[derive(Debug, Clone)]
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingTransport<T> {
    /// Wraps `inner` with the default policy: 3 retries, waiting 1s, 2s and 4s.
    pub fn new(inner: T) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    pub fn with_policy(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn execute_with_retry(&self, request: Request) -> Result<Response, TransportError> {
        let url = request.url().clone();
        let attempts = AtomicU32::new(0);

        let outcome = (|| async {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);

            // Streaming bodies cannot be cloned, and so cannot be replayed.
            let cloned_request = request
                .try_clone()
                .ok_or(Attempt::Failed(TransportError::UnbufferableBody))?;

            let response = self
                .inner
                .execute(cloned_request)
                .await
                .map_err(Attempt::Failed)?;
            let status = response.status();

            // The last attempt hands its response back as-is.
            if attempt < self.policy.max_retries
                && self.policy.retryable_statuses.contains(&status)
            {
                // Drain the body so the connection goes back to the pool.
                let _ = response.bytes().await;

                return Err(Attempt::Status(status));
            }

            Ok(response)
        })
        .retry(&self.policy.backoff())
        .when(|attempt| match attempt {
            Attempt::Status(_) => true,
            Attempt::Failed(e) => self.policy.retries_error(e),
        })
        .notify(|attempt, _| {
            match attempt {
                Attempt::Status(status) => log::warn!("Previous request failed with {status}"),
                Attempt::Failed(e) => log::warn!("Previous request failed: {e}"),
            }

            let retry = attempts.load(Ordering::SeqCst);
            log::warn!("Retry {retry} of request to: {url}");
        })
        .await;

        match outcome {
            Ok(response) => Ok(response),
            Err(Attempt::Failed(e)) => Err(e),
            Err(Attempt::Status(status)) => {
                unreachable!("{status} reported after the retry budget was spent")
            }
        }
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        self.execute_with_retry(request)
    }
}
