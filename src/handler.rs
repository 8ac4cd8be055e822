//! Route handler abstractions.
//!
//! Handlers run asynchronously once the host invokes the navigation's commit
//! action; their result becomes the navigation's completion signal.

use crate::error::BoxError;
use crate::router::MatchedRoute;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A registered route handler.
///
/// Invoked with the matched-route record after the `"change"` event has been
/// emitted and stream consumers have been notified. Errors propagate through
/// the navigation's commit future; the router neither retries nor swallows
/// them.
#[async_trait]
pub trait RouteHandler: Send + Sync {
	/// Handles one matched navigation.
	async fn handle(&self, route: MatchedRoute) -> Result<(), BoxError>;
}

/// Wraps an async closure as a [`RouteHandler`].
pub(crate) struct FnHandler<F> {
	f: F,
}

impl<F> FnHandler<F> {
	pub(crate) fn new(f: F) -> Self {
		Self { f }
	}
}

#[async_trait]
impl<F, Fut> RouteHandler for FnHandler<F>
where
	F: Fn(MatchedRoute) -> Fut + Send + Sync,
	Fut: Future<Output = Result<(), BoxError>> + Send,
{
	async fn handle(&self, route: MatchedRoute) -> Result<(), BoxError> {
		(self.f)(route).await
	}
}

/// Adapts an async closure into an `Arc<dyn RouteHandler>`.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn RouteHandler>
where
	F: Fn(MatchedRoute) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
	Arc::new(FnHandler::new(f))
}
