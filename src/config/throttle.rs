use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use crate::utils::error::AppError;

/// Entries kept in the client map before stale windows are swept.
const SWEEP_THRESHOLD: usize = 1024;

/// Fixed-window request throttle, keyed by client IP.
///
/// Each client gets `max_requests` per `window`; excess requests are
/// answered with 429 before they reach a route handler. Requests arriving
/// without connection info (e.g. in-process test calls) share one fallback
/// window.
#[derive(Clone)]
pub struct ThrottleLayer {
    limiter: Arc<FixedWindowLimiter>,
}

impl ThrottleLayer {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            limiter: Arc::new(FixedWindowLimiter {
                max_requests,
                window,
                windows: Mutex::new(HashMap::new()),
            }),
        }
    }
}

struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<Option<IpAddr>, Window>>,
}

struct Window {
    opened: Instant,
    hits: u32,
}

impl FixedWindowLimiter {
    fn try_acquire(&self, client: Option<IpAddr>) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("throttle mutex poisoned");

        if windows.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.opened) < window);
        }

        let window = windows.entry(client).or_insert(Window {
            opened: now,
            hits: 0,
        });
        if now.duration_since(window.opened) >= self.window {
            window.opened = now;
            window.hits = 0;
        }

        if window.hits < self.max_requests {
            window.hits += 1;
            true
        } else {
            false
        }
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = ThrottleService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ThrottleService {
            inner,
            limiter: Arc::clone(&self.limiter),
        }
    }
}

#[derive(Clone)]
pub struct ThrottleService<S> {
    inner: S,
    limiter: Arc<FixedWindowLimiter>,
}

impl<S> Service<Request<Body>> for ThrottleService<S>
where
    S: Service<Request<Body>, Response = Response>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ThrottleFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        if self.limiter.try_acquire(client) {
            ThrottleFuture::Forward {
                future: self.inner.call(request),
            }
        } else {
            ThrottleFuture::Reject {
                response: Some(AppError::Throttled.into_response()),
            }
        }
    }
}

#[pin_project::pin_project(project = ThrottleFutureProj)]
pub enum ThrottleFuture<F> {
    Forward {
        #[pin]
        future: F,
    },
    Reject {
        response: Option<Response>,
    },
}

impl<F, E> std::future::Future for ThrottleFuture<F>
where
    F: std::future::Future<Output = Result<Response, E>>,
{
    type Output = Result<Response, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            ThrottleFutureProj::Forward { future } => future.poll(cx),
            ThrottleFutureProj::Reject { response } => {
                Poll::Ready(Ok(response.take().expect("polled after completion")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window: Duration) -> FixedWindowLimiter {
        FixedWindowLimiter {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    #[test]
    fn quota_is_enforced_within_a_window() {
        let limiter = limiter(2, Duration::from_secs(60));
        let client = Some(IpAddr::from([10, 0, 0, 1]));

        assert!(limiter.try_acquire(client));
        assert!(limiter.try_acquire(client));
        assert!(!limiter.try_acquire(client));
    }

    #[test]
    fn distinct_clients_have_independent_windows() {
        let limiter = limiter(1, Duration::from_secs(60));

        assert!(limiter.try_acquire(Some(IpAddr::from([10, 0, 0, 1]))));
        assert!(limiter.try_acquire(Some(IpAddr::from([10, 0, 0, 2]))));
        assert!(!limiter.try_acquire(Some(IpAddr::from([10, 0, 0, 1]))));
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let limiter = limiter(1, Duration::from_millis(20));
        let client = Some(IpAddr::from([10, 0, 0, 3]));

        assert!(limiter.try_acquire(client));
        assert!(!limiter.try_acquire(client));

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire(client));
    }
}
