//! Async-sequence bridge over route changes.

use crate::router::MatchedRoute;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::debug;

/// Infinite stream of [`MatchedRoute`]s, one per intercepted navigation.
///
/// Obtained from [`Router::changes`](crate::Router::changes). Every stream
/// receives every match that occurs after it was created; matches are never
/// buffered for consumers that do not yet exist. Multiple concurrent streams
/// on one router each observe every change independently.
///
/// The stream never completes on its own while the router is alive; it ends
/// only when the consumer drops it, which deterministically unsubscribes it,
/// or when the router itself is dropped.
pub struct RouteChanges {
	inner: BroadcastStream<MatchedRoute>,
}

impl RouteChanges {
	pub(crate) fn new(receiver: broadcast::Receiver<MatchedRoute>) -> Self {
		Self {
			inner: BroadcastStream::new(receiver),
		}
	}
}

impl Stream for RouteChanges {
	type Item = MatchedRoute;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		loop {
			match ready!(Pin::new(&mut self.inner).poll_next(cx)) {
				Some(Ok(route)) => return Poll::Ready(Some(route)),
				Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
					// A consumer that stopped polling for a while only loses
					// the overwritten entries; the stream itself stays usable.
					debug!(skipped, "route change consumer lagged");
				}
				None => return Poll::Ready(None),
			}
		}
	}
}

impl std::fmt::Debug for RouteChanges {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteChanges").finish_non_exhaustive()
	}
}
