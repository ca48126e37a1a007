//! Periodic refresh of one issue's comment thread.

use crate::api::CivicApi;
use crate::domain::Comment;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// A full replacement thread for `issue_id`, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentUpdate {
    pub issue_id: String,
    pub comments: Vec<Comment>,
}

/// Owns the polling task. Dropping the poller aborts it.
#[derive(Debug)]
pub struct CommentPoller {
    issue_id: String,
    handle: JoinHandle<()>,
}

impl CommentPoller {
    /// Fetches immediately, then once per `period` until stopped or until the
    /// receiving side of `tx` is gone.
    pub fn spawn<E>(
        api: Arc<dyn CivicApi>,
        issue_id: impl Into<String>,
        period: Duration,
        tx: UnboundedSender<E>,
    ) -> Self
    where
        E: From<CommentUpdate> + Send + 'static,
    {
        let issue_id = issue_id.into();
        let task_issue_id = issue_id.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let comments = api.fetch_comments(&task_issue_id).await;
                log::debug!(
                    "polled {} comments for issue {task_issue_id}",
                    comments.len()
                );

                let update = CommentUpdate {
                    issue_id: task_issue_id.clone(),
                    comments,
                };
                if tx.send(E::from(update)).is_err() {
                    break;
                }
            }
        });

        Self { issue_id, handle }
    }

    pub fn issue_id(&self) -> &str {
        &self.issue_id
    }
}

impl Drop for CommentPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment, FakeApi};
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn first_fetch_is_immediate_and_ticks_follow() {
        let api = Arc::new(FakeApi::default().with_comments(vec![comment(1, "Looks bad")]));
        let (tx, mut rx) = mpsc::unbounded_channel::<CommentUpdate>();
        let _poller = CommentPoller::spawn(api.clone(), "7", POLL_INTERVAL, tx);

        let first = rx.recv().await.expect("first update");
        assert_eq!(first.issue_id, "7");
        assert_eq!(first.comments.len(), 1);
        assert_eq!(api.comment_fetches(), 1);

        tokio::time::advance(Duration::from_secs(9)).await;
        tokio::task::yield_now().await;
        assert_eq!(api.comment_fetches(), 1);

        let second = rx.recv().await.expect("second update");
        assert_eq!(second.comments, first.comments);
        assert_eq!(api.comment_fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn no_fetch_after_drop() {
        let api = Arc::new(FakeApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<CommentUpdate>();
        let poller = CommentPoller::spawn(api.clone(), "3", POLL_INTERVAL, tx);

        rx.recv().await.expect("first update");
        assert_eq!(poller.issue_id(), "3");
        drop(poller);

        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;

        assert_eq!(api.comment_fetches(), 1);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn closed_receiver_ends_the_task() {
        let api = Arc::new(FakeApi::default());
        let (tx, rx) = mpsc::unbounded_channel::<CommentUpdate>();
        drop(rx);

        let poller = CommentPoller::spawn(api.clone(), "3", POLL_INTERVAL, tx);
        tokio::time::advance(Duration::from_secs(30)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert_eq!(api.comment_fetches(), 1);
        assert!(poller.handle.is_finished());
    }
}
