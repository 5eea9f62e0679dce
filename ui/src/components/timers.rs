//! Browser timers. Native builds (type checking only) never fire.

use std::future::Future;
use std::time::Duration;

#[cfg(target_family = "wasm")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_family = "wasm"))]
pub async fn sleep(_duration: Duration) {
    std::future::pending::<()>().await;
}

/// Deadline for a notification attempt.
pub fn deadline(timeout: Duration) -> impl Future<Output = ()> {
    sleep(timeout)
}
