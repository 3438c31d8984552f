use std::time::Duration;

use tokio::time::{Instant, sleep};

/// How the pipeline spaces out its requests to stay under the upstream limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottlePolicy {
    /// No delay at all. Used by tests.
    Disabled,
    /// Sleep for the given duration after every request.
    FixedDelay(Duration),
    /// Keep at least the given interval between two requests.
    MinInterval(Duration),
}

impl ThrottlePolicy {
    /// Min-interval policy allowing `requests` requests per second.
    pub fn per_second(requests: u32) -> Self {
        if requests == 0 {
            return ThrottlePolicy::Disabled;
        }
        ThrottlePolicy::MinInterval(Duration::from_secs(1) / requests)
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        ThrottlePolicy::FixedDelay(Duration::from_millis(500))
    }
}

#[derive(Debug)]
pub struct Throttle {
    policy: ThrottlePolicy,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(policy: ThrottlePolicy) -> Self {
        Self { policy, last: None }
    }

    pub fn disabled() -> Self {
        Self::new(ThrottlePolicy::Disabled)
    }

    /// Called after each upstream request has completed.
    pub async fn pause(&mut self) {
        match self.policy {
            ThrottlePolicy::Disabled => {}
            ThrottlePolicy::FixedDelay(delay) => sleep(delay).await,
            ThrottlePolicy::MinInterval(interval) => {
                if let Some(last) = self.last {
                    let elapsed = last.elapsed();
                    if elapsed < interval {
                        sleep(interval - elapsed).await;
                    }
                }
            }
        }
        self.last = Some(Instant::now());
    }
}
