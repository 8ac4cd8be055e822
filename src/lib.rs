//! # Nav Router
//!
//! Client-side URL router driven by a host's navigation-interception
//! mechanism.
//!
//! Applications register handlers for static and parameterized paths. The
//! router subscribes to the host's navigation signal, filters out navigations
//! that must not be intercepted (hash-only changes, downloads, cross-origin
//! destinations, anything the host forbids intercepting), resolves the
//! destination against the route table, and either claims the navigation or
//! lets the host's default handling proceed.
//!
//! ## Architecture
//!
//! ```text
//! NavigationSource ──intent──▶ Router ──resolve──▶ route table
//!                                │                   static map + pattern list
//!                    claim(commit)│
//!                                ▼
//!            host invokes commit ──▶ "change" event ──▶ RouteChanges stream
//!                                                   ──▶ handler
//! ```
//!
//! Both platform capabilities are injected as traits, so the router never
//! reaches for ambient globals: [`NavigationSource`] delivers navigation
//! intents, and [`PatternCompiler`] turns path templates into matchers
//! ([`RegexPatternCompiler`] is the default).
//!
//! Route changes can be observed two ways: event listeners via
//! [`Router::on`] (`"change"` and `"404"`), and the async stream returned by
//! [`Router::changes`].
//!
//! ## Example
//!
//! ```rust
//! use nav_router::{
//!     CommitFn, InterceptionHandle, NavigationIntent, NavigationSink, NavigationSource,
//!     RegexPatternCompiler, Router, RouterError,
//! };
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//! use url::Url;
//!
//! // In-process stand-in for the platform's navigation facility.
//! struct InProcessNavigation {
//!     sink: Mutex<Option<Arc<dyn NavigationSink>>>,
//! }
//!
//! impl NavigationSource for InProcessNavigation {
//!     fn subscribe(&self, sink: Arc<dyn NavigationSink>) -> Result<(), RouterError> {
//!         *self.sink.lock() = Some(sink);
//!         Ok(())
//!     }
//!
//!     fn current_host(&self) -> Option<String> {
//!         Some("app.test".to_string())
//!     }
//! }
//!
//! // Handle whose host commits the claimed navigation immediately.
//! struct CommitNow;
//!
//! impl InterceptionHandle for CommitNow {
//!     fn claim(self: Box<Self>, commit: CommitFn) {
//!         tokio_test::block_on(commit()).unwrap();
//!     }
//! }
//!
//! let source = Arc::new(InProcessNavigation {
//!     sink: Mutex::new(None),
//! });
//! let router = Router::new(source.clone(), Arc::new(RegexPatternCompiler))?;
//!
//! router.add_fn("/posts/:id", |route| async move {
//!     assert_eq!(route.params.get("id"), Some("42"));
//!     Ok(())
//! })?;
//!
//! let sink = source.sink.lock().clone().unwrap();
//! sink.on_navigate(NavigationIntent::new(
//!     Url::parse("https://app.test/posts/42").unwrap(),
//!     Box::new(CommitNow),
//! ));
//! # Ok::<(), nav_router::RouterError>(())
//! ```

pub mod error;
pub mod event;
pub mod handler;
pub mod navigation;
pub mod params;
pub mod pattern;
pub mod router;
pub mod stream;

pub use error::{BoxError, RouterError};
pub use event::{
	CHANGE_EVENT, EventChannel, EventListener, EventPayload, NOT_FOUND_EVENT, RouterEvent,
};
pub use handler::{RouteHandler, handler_fn};
pub use navigation::{
	CommitFn, CommitFuture, InterceptionHandle, NavigationIntent, NavigationSink, NavigationSource,
};
pub use params::Params;
pub use pattern::{PatternCompiler, RegexPatternCompiler, RouteMatcher};
pub use router::{MatchedRoute, Router};
pub use stream::RouteChanges;
