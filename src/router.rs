//! Core router: route table, URL resolution, and navigation dispatch.

use crate::error::{BoxError, RouterError};
use crate::event::{CHANGE_EVENT, EventChannel, NOT_FOUND_EVENT, RouterEvent};
use crate::handler::{FnHandler, RouteHandler};
use crate::navigation::{CommitFn, NavigationIntent, NavigationSink, NavigationSource};
use crate::params::Params;
use crate::pattern::{PatternCompiler, RouteMatcher};
use crate::stream::RouteChanges;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};
use url::Url;

/// Capacity of the route-change broadcast channel.
///
/// Navigations are serialized by the host, so consumers only lag if they stop
/// polling entirely; lagged deliveries are dropped, not buffered unboundedly.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// A matched route: the captured parameters and the navigated URL.
///
/// Constructed fresh for every resolved navigation and handed to the `"change"`
/// event, the route-change stream, and the handler.
#[derive(Debug, Clone)]
pub struct MatchedRoute {
	/// Named groups captured by the matching template; empty for static routes.
	pub params: Params,
	/// The full destination URL.
	pub url: Url,
}

/// One ordered pattern-route entry.
struct PatternEntry {
	template: String,
	matcher: Box<dyn RouteMatcher>,
	handler: Arc<dyn RouteHandler>,
}

struct RouterInner {
	source: Arc<dyn NavigationSource>,
	compiler: Arc<dyn PatternCompiler>,
	/// Exact-path routes; last registration for a path wins.
	statics: RwLock<HashMap<String, Arc<dyn RouteHandler>>>,
	/// Pattern routes in registration order; first accepting entry wins.
	patterns: RwLock<Vec<PatternEntry>>,
	events: Arc<EventChannel>,
	changes: broadcast::Sender<MatchedRoute>,
}

/// Client-side URL router bound to a host's navigation interception.
///
/// Cheap to clone; all clones share one route table, event channel and
/// change stream.
///
/// Construction subscribes once to the injected [`NavigationSource`]. Each
/// delivered navigation intent is filtered for eligibility, resolved against
/// the route table, and either claimed (match) or left to the host's default
/// handling (no match, with a `"404"` event).
#[derive(Clone)]
pub struct Router {
	inner: Arc<RouterInner>,
}

impl Router {
	/// Creates a router bound to the given host capabilities.
	///
	/// # Errors
	///
	/// Returns [`RouterError::CapabilityMissing`] if the navigation facility
	/// cannot deliver intents. There is no fallback path.
	pub fn new(
		source: Arc<dyn NavigationSource>,
		compiler: Arc<dyn PatternCompiler>,
	) -> Result<Self, RouterError> {
		let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
		let inner = Arc::new(RouterInner {
			source: Arc::clone(&source),
			compiler,
			statics: RwLock::new(HashMap::new()),
			patterns: RwLock::new(Vec::new()),
			events: Arc::new(EventChannel::new()),
			changes,
		});

		source.subscribe(Arc::clone(&inner) as Arc<dyn NavigationSink>)?;
		Ok(Self { inner })
	}

	/// Registers a handler for `path`.
	///
	/// A path containing a `:` parameter marker is a pattern route, appended
	/// in registration order; anything else is a static route, where a later
	/// registration for the same path silently replaces the handler.
	///
	/// # Errors
	///
	/// Returns [`RouterError::PatternCompile`] if a pattern template fails to
	/// compile; the route is not added.
	pub fn add<H>(&self, path: &str, handler: H) -> Result<(), RouterError>
	where
		H: RouteHandler + 'static,
	{
		self.insert(path, Arc::new(handler))
	}

	/// Registers an async closure as the handler for `path`.
	///
	/// Same semantics as [`Router::add`].
	pub fn add_fn<F, Fut>(&self, path: &str, f: F) -> Result<(), RouterError>
	where
		F: Fn(MatchedRoute) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
	{
		self.insert(path, Arc::new(FnHandler::new(f)))
	}

	fn insert(&self, path: &str, handler: Arc<dyn RouteHandler>) -> Result<(), RouterError> {
		if path.contains(':') {
			let matcher = self.inner.compiler.compile(path)?;
			self.inner.patterns.write().push(PatternEntry {
				template: path.to_string(),
				matcher,
				handler,
			});
			trace!(template = path, "pattern route registered");
		} else {
			self.inner
				.statics
				.write()
				.insert(path.to_string(), handler);
			trace!(path, "static route registered");
		}
		Ok(())
	}

	/// Registers `listener` for router events named `name`.
	///
	/// Emitted names are [`CHANGE_EVENT`] (detail: [`MatchedRoute`]) and
	/// [`NOT_FOUND_EVENT`] (detail: [`Url`]).
	pub fn on<F>(&self, name: &str, listener: F)
	where
		F: Fn(&RouterEvent) + Send + Sync + 'static,
	{
		self.inner.events.on(name, listener);
	}

	/// Returns an infinite stream of matched routes.
	///
	/// Every stream observes every subsequent match; dropping the stream
	/// unsubscribes it deterministically. See [`RouteChanges`].
	pub fn changes(&self) -> RouteChanges {
		RouteChanges::new(self.inner.changes.subscribe())
	}

	/// Returns the number of registered routes (static and pattern).
	pub fn route_count(&self) -> usize {
		self.inner.statics.read().len() + self.inner.patterns.read().len()
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("static_routes", &self.inner.statics.read().len())
			.field("pattern_routes", &self.inner.patterns.read().len())
			.finish()
	}
}

impl RouterInner {
	/// Resolves `url` against the route table.
	///
	/// Static lookup by path first (exact match short-circuits the pattern
	/// scan), then the pattern sequence in registration order against the
	/// full URL.
	fn resolve(&self, url: &Url) -> Option<(Arc<dyn RouteHandler>, MatchedRoute)> {
		if let Some(handler) = self.statics.read().get(url.path()) {
			return Some((
				Arc::clone(handler),
				MatchedRoute {
					params: Params::empty(),
					url: url.clone(),
				},
			));
		}

		for entry in self.patterns.read().iter() {
			if let Some(params) = entry.matcher.exec(url) {
				trace!(template = %entry.template, %url, "pattern route matched");
				return Some((
					Arc::clone(&entry.handler),
					MatchedRoute {
						params,
						url: url.clone(),
					},
				));
			}
		}
		None
	}

	/// Returns whether the intent is eligible for interception at all.
	fn eligible(&self, intent: &NavigationIntent) -> bool {
		if !intent.can_intercept || intent.hash_change || intent.download_request {
			return false;
		}
		// An unknown current host is treated as cross-origin: never intercept
		// what cannot be proven same-origin.
		match (self.source.current_host(), intent.destination.host_str()) {
			(Some(current), Some(destination)) if current == destination => true,
			_ => {
				trace!(destination = %intent.destination, "cross-origin navigation ignored");
				false
			}
		}
	}
}

impl NavigationSink for RouterInner {
	fn on_navigate(&self, intent: NavigationIntent) {
		if !self.eligible(&intent) {
			trace!(?intent, "navigation not eligible for interception");
			return;
		}

		let url = intent.destination.clone();
		match self.resolve(&url) {
			None => {
				debug!(%url, "no route matched");
				self.events.emit(NOT_FOUND_EVENT, Arc::new(url));
			}
			Some((handler, route)) => {
				debug!(%url, "route matched, claiming navigation");
				let events = Arc::clone(&self.events);
				let changes = self.changes.clone();
				let commit: CommitFn = Box::new(move || {
					Box::pin(async move {
						events.emit(CHANGE_EVENT, Arc::new(route.clone()));
						// A send with no live receivers is not an error:
						// nobody is consuming the change stream right now.
						let _ = changes.send(route.clone());
						handler.handle(route).await.map_err(RouterError::Handler)
					})
				});
				intent.claim(commit);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::navigation::InterceptionHandle;
	use crate::pattern::RegexPatternCompiler;
	use parking_lot::Mutex;

	/// Minimal in-process navigation source for unit tests.
	struct TestSource {
		sink: Mutex<Option<Arc<dyn NavigationSink>>>,
		host: &'static str,
	}

	impl TestSource {
		fn new(host: &'static str) -> Arc<Self> {
			Arc::new(Self {
				sink: Mutex::new(None),
				host,
			})
		}
	}

	impl NavigationSource for TestSource {
		fn subscribe(&self, sink: Arc<dyn NavigationSink>) -> Result<(), RouterError> {
			*self.sink.lock() = Some(sink);
			Ok(())
		}

		fn current_host(&self) -> Option<String> {
			Some(self.host.to_string())
		}
	}

	struct NoopHandle;

	impl InterceptionHandle for NoopHandle {
		fn claim(self: Box<Self>, _commit: CommitFn) {}
	}

	struct BrokenSource;

	impl NavigationSource for BrokenSource {
		fn subscribe(&self, _sink: Arc<dyn NavigationSink>) -> Result<(), RouterError> {
			Err(RouterError::CapabilityMissing("navigation"))
		}

		fn current_host(&self) -> Option<String> {
			None
		}
	}

	fn test_router() -> Router {
		Router::new(TestSource::new("site.test"), Arc::new(RegexPatternCompiler)).unwrap()
	}

	fn ok_handler() -> Arc<dyn RouteHandler> {
		crate::handler::handler_fn(|_| async { Ok(()) })
	}

	fn url(s: &str) -> Url {
		Url::parse(s).unwrap()
	}

	#[test]
	fn test_construction_fails_without_navigation_capability() {
		let result = Router::new(Arc::new(BrokenSource), Arc::new(RegexPatternCompiler));
		assert!(matches!(
			result,
			Err(RouterError::CapabilityMissing("navigation"))
		));
	}

	#[test]
	fn test_path_classification() {
		let router = test_router();
		router.add_fn("/about", |_| async { Ok(()) }).unwrap();
		router.add_fn("/posts/:id", |_| async { Ok(()) }).unwrap();

		assert_eq!(router.inner.statics.read().len(), 1);
		assert_eq!(router.inner.patterns.read().len(), 1);
	}

	#[test]
	fn test_invalid_template_not_added() {
		let router = test_router();
		let result = router.add_fn("/posts/:", |_| async { Ok(()) });
		assert!(matches!(result, Err(RouterError::PatternCompile { .. })));
		assert_eq!(router.route_count(), 0);
	}

	#[test]
	fn test_static_route_overwrite() {
		let router = test_router();
		router.insert("/about", ok_handler()).unwrap();
		router.insert("/about", ok_handler()).unwrap();
		assert_eq!(router.route_count(), 1);
	}

	#[test]
	fn test_duplicate_pattern_templates_both_retained() {
		let router = test_router();
		router.insert("/posts/:id", ok_handler()).unwrap();
		router.insert("/posts/:id", ok_handler()).unwrap();
		assert_eq!(router.inner.patterns.read().len(), 2);
	}

	#[test]
	fn test_resolve_static_short_circuits_patterns() {
		let router = test_router();
		router.insert("/posts/:id", ok_handler()).unwrap();
		router.insert("/posts/new", ok_handler()).unwrap();

		let (_, route) = router
			.inner
			.resolve(&url("https://site.test/posts/new"))
			.unwrap();
		assert!(route.params.is_empty());
	}

	#[test]
	fn test_resolve_pattern_registration_order() {
		let router = test_router();
		router.insert("/posts/:id", ok_handler()).unwrap();
		router.insert("/posts/:slug", ok_handler()).unwrap();

		let (_, route) = router
			.inner
			.resolve(&url("https://site.test/posts/42"))
			.unwrap();
		// The earliest-registered matching template wins.
		assert_eq!(route.params.get("id"), Some("42"));
		assert_eq!(route.params.get("slug"), None);
	}

	#[test]
	fn test_resolve_not_found() {
		let router = test_router();
		router.insert("/", ok_handler()).unwrap();
		assert!(
			router
				.inner
				.resolve(&url("https://site.test/missing"))
				.is_none()
		);
	}

	#[test]
	fn test_eligibility_filter() {
		let router = test_router();
		let handle = || Box::new(NoopHandle) as Box<dyn InterceptionHandle>;

		let eligible = NavigationIntent::new(url("https://site.test/a"), handle());
		assert!(router.inner.eligible(&eligible));

		let mut blocked = NavigationIntent::new(url("https://site.test/a"), handle());
		blocked.can_intercept = false;
		assert!(!router.inner.eligible(&blocked));

		let mut hash = NavigationIntent::new(url("https://site.test/a"), handle());
		hash.hash_change = true;
		assert!(!router.inner.eligible(&hash));

		let mut download = NavigationIntent::new(url("https://site.test/a"), handle());
		download.download_request = true;
		assert!(!router.inner.eligible(&download));

		let cross = NavigationIntent::new(url("https://other.test/a"), handle());
		assert!(!router.inner.eligible(&cross));
	}
}
