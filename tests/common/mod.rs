//! Shared fixtures for integration tests: an in-process navigation facility
//! and an interception handle that lets the test act as the host, committing
//! claimed navigations at a time of its choosing.
#![allow(dead_code)]

use nav_router::{
	CommitFn, InterceptionHandle, NavigationIntent, NavigationSink, NavigationSource,
	RegexPatternCompiler, Router, RouterError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

/// In-process navigation source; tests drive intents through [`deliver`].
///
/// [`deliver`]: TestNavigation::deliver
pub struct TestNavigation {
	sink: Mutex<Option<Arc<dyn NavigationSink>>>,
	host: String,
}

impl TestNavigation {
	pub fn new(host: &str) -> Arc<Self> {
		Arc::new(Self {
			sink: Mutex::new(None),
			host: host.to_string(),
		})
	}

	/// Delivers one navigation intent to the subscribed router.
	pub fn deliver(&self, intent: NavigationIntent) {
		let sink = self.sink.lock().clone().expect("router not subscribed");
		sink.on_navigate(intent);
	}
}

impl NavigationSource for TestNavigation {
	fn subscribe(&self, sink: Arc<dyn NavigationSink>) -> Result<(), RouterError> {
		*self.sink.lock() = Some(sink);
		Ok(())
	}

	fn current_host(&self) -> Option<String> {
		Some(self.host.clone())
	}
}

/// Captures the commit action the router hands over when it claims a
/// navigation, so the test can invoke it like the host would.
#[derive(Clone, Default)]
pub struct CommitSlot(Arc<Mutex<Option<CommitFn>>>);

impl CommitSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns an interception handle that stores the commit action here.
	pub fn handle(&self) -> Box<dyn InterceptionHandle> {
		Box::new(SlotHandle(self.clone()))
	}

	/// Whether the router claimed the navigation.
	pub fn claimed(&self) -> bool {
		self.0.lock().is_some()
	}

	/// Takes the captured commit action.
	pub fn take(&self) -> Option<CommitFn> {
		self.0.lock().take()
	}

	/// Invokes the captured commit action, as the host would.
	pub async fn commit(&self) -> Result<(), RouterError> {
		let commit = self.take().expect("navigation was not claimed");
		commit().await
	}
}

struct SlotHandle(CommitSlot);

impl InterceptionHandle for SlotHandle {
	fn claim(self: Box<Self>, commit: CommitFn) {
		*self.0.0.lock() = Some(commit);
	}
}

pub fn url(s: &str) -> Url {
	Url::parse(s).unwrap()
}

/// Builds an interceptable intent for `url_str` claiming into `slot`.
pub fn intent_to(url_str: &str, slot: &CommitSlot) -> NavigationIntent {
	NavigationIntent::new(url(url_str), slot.handle())
}

/// Router wired to a fresh [`TestNavigation`] for `site.test`.
pub fn router_fixture() -> (Router, Arc<TestNavigation>) {
	let source = TestNavigation::new("site.test");
	let router = Router::new(source.clone(), Arc::new(RegexPatternCompiler))
		.expect("test navigation source is always available");
	(router, source)
}
