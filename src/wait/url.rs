// ABOUTME: URL-availability waiter.
// ABOUTME: Probes the public preview URL a fixed number of times.

use super::{PollContext, UrlPolicy};
use crate::error::{Error, Result};
use crate::observer::WaitEvent;
use crate::provider::UrlProbe;

/// Probe `url` until it answers successfully or the attempts run out.
///
/// Failed attempts are reported and followed by one interval of delay,
/// except after the final attempt.
pub async fn wait_for_url(
    probe: &dyn UrlProbe,
    ctx: PollContext<'_>,
    url: &str,
    policy: UrlPolicy,
) -> Result<()> {
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
        match probe.probe(url).await {
            Ok(()) => {
                ctx.observer.notify(&WaitEvent::UrlAvailable {
                    url: url.to_string(),
                    attempt,
                });
                return Ok(());
            }
            Err(e) => {
                ctx.observer.notify(&WaitEvent::UrlAttemptFailed {
                    attempt,
                    attempts,
                    error: e.to_string(),
                });
                if attempt < attempts {
                    ctx.clock.sleep(policy.interval).await;
                }
            }
        }
    }

    Err(Error::UrlUnavailable {
        url: url.to_string(),
        attempts,
    })
}
