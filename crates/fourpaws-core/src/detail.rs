// ── Community detail loader ──
//
// The community page is the one composite, failure-prone view: it
// needs the community record and that community's posts, in order,
// against a backend that can be slow to wake. This loader is the only
// read path with retries; every other read and write in the crate is
// single-attempt.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Community, CommunityId, Post};
use crate::store::{CommunityStore, PostStore};

/// Retry tuning for the community-detail load. Backoff is linear:
/// attempt `n` waits `n * base_delay` before the next try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Which post ordering the detail view asks the server for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrdering {
    /// Newest first.
    #[default]
    Recent,
    /// Most liked first.
    Popular,
}

/// The assembled detail view: the community and its posts in the
/// requested server ordering.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityDetail {
    pub community: Community,
    pub posts: Vec<Post>,
}

/// Load a community and its posts, retrying the composite fetch under
/// the given policy.
///
/// The community fetch completes before the post fetch is issued, so
/// a missing community fails fast instead of racing two requests.
/// `cancel` is checked before every attempt and before results are
/// handed back; a cancelled load never delivers data to a torn-down
/// view.
pub(crate) async fn load_community_detail(
    communities: &CommunityStore,
    posts: &PostStore,
    id: CommunityId,
    ordering: PostOrdering,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<CommunityDetail, CoreError> {
    with_retry(policy, cancel, || async move {
        let community = communities.community(id).await?;
        let posts = match ordering {
            PostOrdering::Recent => posts.recent_by_community(id).await?,
            PostOrdering::Popular => posts.popular_by_community(id).await?,
        };
        Ok(CommunityDetail { community, posts })
    })
    .await
}

/// Run `operation` up to `policy.max_attempts` times with linear
/// backoff between failures.
async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        match operation().await {
            Ok(value) => {
                // The view may have been torn down while the request
                // was in flight; its result must not be applied.
                if cancel.is_cancelled() {
                    debug!("detail load finished after cancellation; discarding result");
                    return Err(CoreError::Cancelled);
                }
                return Ok(value);
            }
            Err(err) => {
                if attempt >= max_attempts {
                    return Err(CoreError::RetriesExhausted {
                        attempts: max_attempts,
                        source: Box::new(err),
                    });
                }

                let delay = policy.base_delay * attempt;
                warn!("detail load attempt {attempt} failed: {err}; retrying in {delay:?}");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(CoreError::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn first_success_returns_immediately() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();

        let value = with_retry(policy(), &cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CoreError>(42)
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_grows_linearly_until_success() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();
        let start = Instant::now();

        let value = with_retry(policy(), &cancel, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(CoreError::Timeout { url: None })
            } else {
                Ok(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two backoffs: 1s after the first failure, 2s after the second.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_the_final_attempt() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();

        let err = with_retry(policy(), &cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(CoreError::Timeout { url: None })
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            CoreError::RetriesExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, CoreError::Timeout { .. }));
            }
            other => panic!("expected RetriesExhausted, got {other}"),
        }
    }

    #[tokio::test]
    async fn cancellation_before_start_runs_nothing() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = with_retry(policy(), &cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CoreError>(1)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_backoff_stops_retrying() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            canceller.cancel();
        });

        let err = with_retry(policy(), &cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(CoreError::Timeout { url: None })
        })
        .await
        .unwrap_err();

        // The cancel lands inside the first 1s backoff window.
        assert!(matches!(err, CoreError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn results_arriving_after_cancellation_are_discarded() {
        let cancel = CancellationToken::new();

        let err = with_retry(policy(), &cancel, || {
            let cancel = cancel.clone();
            async move {
                // Teardown happens while the request is in flight.
                cancel.cancel();
                Ok::<_, CoreError>(7)
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::Cancelled));
    }
}
