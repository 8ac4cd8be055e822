//! Host navigation-interception capability.
//!
//! The router never touches the platform directly; a host adapter implements
//! [`NavigationSource`] (delivering [`NavigationIntent`]s to the router's
//! sink) and [`InterceptionHandle`] (claiming an interceptable navigation).
//! Interception is a two-phase protocol: the router *claims* the navigation
//! with a deferred commit closure, and the host invokes that closure at its
//! chosen time relative to its own document/state updates.

use crate::error::RouterError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use url::Url;

/// Future returned by a commit closure.
pub type CommitFuture = Pin<Box<dyn Future<Output = Result<(), RouterError>> + Send>>;

/// Deferred action handed to the host when a navigation is claimed.
///
/// Invoked exactly once, by the host. Its future completes when the matched
/// route's handler finishes; a handler failure is the future's error.
pub type CommitFn = Box<dyn FnOnce() -> CommitFuture + Send>;

/// Host-side handle through which a single navigation can be claimed.
pub trait InterceptionHandle: Send {
	/// Claims the navigation, handing the host the deferred commit action.
	fn claim(self: Box<Self>, commit: CommitFn);
}

/// One navigation intent delivered by the host.
///
/// Mirrors the host's navigation-intent object: the interception eligibility
/// flags, the destination URL, and the claim handle.
pub struct NavigationIntent {
	/// Whether the host permits intercepting this navigation at all.
	pub can_intercept: bool,
	/// Whether this is a same-document hash-only change.
	pub hash_change: bool,
	/// Whether this navigation would trigger a download.
	pub download_request: bool,
	/// The navigation's destination.
	pub destination: Url,
	handle: Box<dyn InterceptionHandle>,
}

impl NavigationIntent {
	/// Creates an interceptable intent with no hash-change or download flags.
	pub fn new(destination: Url, handle: Box<dyn InterceptionHandle>) -> Self {
		Self {
			can_intercept: true,
			hash_change: false,
			download_request: false,
			destination,
			handle,
		}
	}

	/// Claims this navigation, consuming the intent.
	pub fn claim(self, commit: CommitFn) {
		self.handle.claim(commit);
	}
}

impl std::fmt::Debug for NavigationIntent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavigationIntent")
			.field("can_intercept", &self.can_intercept)
			.field("hash_change", &self.hash_change)
			.field("download_request", &self.download_request)
			.field("destination", &self.destination.as_str())
			.finish()
	}
}

/// Receiver for navigation intents.
///
/// Implemented by the router; host adapters deliver intents one at a time, in
/// the order the platform produced them.
pub trait NavigationSink: Send + Sync {
	/// Handles one incoming navigation intent.
	fn on_navigate(&self, intent: NavigationIntent);
}

/// Host navigation-interception facility.
pub trait NavigationSource: Send + Sync {
	/// Registers the sink receiving navigation intents.
	///
	/// Called exactly once, at router construction.
	///
	/// # Errors
	///
	/// Returns [`RouterError::CapabilityMissing`] if the platform facility is
	/// unavailable; router construction fails fast, with no fallback.
	fn subscribe(&self, sink: Arc<dyn NavigationSink>) -> Result<(), RouterError>;

	/// Returns the current document's network host, if known.
	///
	/// Used to reject cross-origin destinations before matching.
	fn current_host(&self) -> Option<String>;
}
