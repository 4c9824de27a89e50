//! The simulated "typing" pause before a reply, as a cancellable task.

use folio_core::config::ChatConfig;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::rules::Reply;

/// Uniform random delay within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    min: Duration,
    max: Duration,
}

impl ReplyDelay {
    pub fn new(a: Duration, b: Duration) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        let (min, max) = config.reply_delay();
        Self { min, max }
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(lo..=hi))
    }
}

/// A reply on its way to the session that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub session: Uuid,
    pub reply: Reply,
}

/// At most one scheduled reply; starting a new one or cancelling aborts the
/// previous task so it can never deliver.
#[derive(Debug, Default)]
pub struct TypingTimer {
    handle: Option<JoinHandle<()>>,
}

impl TypingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `reply` on `tx` after `delay`. Must run inside a tokio runtime.
    pub fn start(
        &mut self,
        delay: Duration,
        session: Uuid,
        reply: Reply,
        tx: UnboundedSender<PendingReply>,
    ) {
        self.cancel();
        debug!("reply scheduled in {}ms", delay.as_millis());
        let deadline = Instant::now() + delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // The receiver is gone only when the page is torn down.
            let _ = tx.send(PendingReply { session, reply });
        }));
    }

    /// Abort the scheduled reply. Returns whether one was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TypingTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::sync::mpsc;

    fn reply() -> Reply {
        Reply {
            topic: Some("rates".into()),
            text: "€95".into(),
        }
    }

    #[test]
    fn test_delay_within_bounds() {
        let delay = ReplyDelay::from_config(&ChatConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = delay.sample(&mut rng);
            assert!(d >= Duration::from_millis(1500) && d <= Duration::from_millis(2500));
        }
    }

    #[test]
    fn test_delay_bounds_ordered() {
        let delay = ReplyDelay::new(Duration::from_millis(900), Duration::from_millis(100));
        assert_eq!(delay.bounds(), (Duration::from_millis(100), Duration::from_millis(900)));
        let fixed = ReplyDelay::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(fixed.sample(&mut rand::thread_rng()), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TypingTimer::new();
        let session = Uuid::new_v4();
        timer.start(Duration::from_millis(2000), session, reply(), tx);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());
        assert!(timer.is_pending());

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered, PendingReply { session, reply: reply() });
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TypingTimer::new();
        timer.start(Duration::from_millis(1500), Uuid::new_v4(), reply(), tx);

        assert!(timer.cancel());
        assert!(!timer.is_pending());
        tokio::time::sleep(Duration::from_secs(5)).await;
        // The aborted task dropped its sender.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TypingTimer::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        timer.start(Duration::from_millis(1500), first, reply(), tx.clone());
        timer.start(Duration::from_millis(2500), second, reply(), tx);

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.session, second);
        assert!(rx.recv().await.is_none());
    }
}
