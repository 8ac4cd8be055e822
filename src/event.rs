//! Event channel for route-change notifications.
//!
//! The router owns a generic publish/subscribe channel keyed by event name
//! rather than inheriting from a platform event type. Listeners are invoked
//! synchronously, in registration order, with no buffering: a listener
//! registered after an emission never sees it.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Event name emitted when a navigation matched a route.
///
/// Detail payload: [`MatchedRoute`](crate::MatchedRoute).
pub const CHANGE_EVENT: &str = "change";

/// Event name emitted when a navigation matched no route.
///
/// Detail payload: the raw [`Url`](url::Url).
pub const NOT_FOUND_EVENT: &str = "404";

/// Opaque payload carried by a [`RouterEvent`].
pub type EventPayload = Arc<dyn Any + Send + Sync>;

/// Listener callback registered through [`EventChannel::on`].
pub type EventListener = Arc<dyn Fn(&RouterEvent) + Send + Sync>;

/// Notification envelope broadcast through the router's event channel.
///
/// Immutable once constructed. The detail payload and the optional per-emission
/// options are opaque to the channel; consumers downcast them to the types the
/// emitter documents.
#[derive(Clone)]
pub struct RouterEvent {
	name: String,
	detail: EventPayload,
	options: Option<EventPayload>,
}

impl RouterEvent {
	/// Creates an event with no options.
	pub fn new(name: impl Into<String>, detail: EventPayload) -> Self {
		Self {
			name: name.into(),
			detail,
			options: None,
		}
	}

	/// Creates an event carrying per-emission options.
	pub fn with_options(
		name: impl Into<String>,
		detail: EventPayload,
		options: EventPayload,
	) -> Self {
		Self {
			name: name.into(),
			detail,
			options: Some(options),
		}
	}

	/// Returns the event name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the raw detail payload.
	pub fn detail(&self) -> &EventPayload {
		&self.detail
	}

	/// Downcasts the detail payload to `T`.
	pub fn detail_as<T: 'static>(&self) -> Option<&T> {
		self.detail.downcast_ref::<T>()
	}

	/// Returns the per-emission options, if any.
	pub fn options(&self) -> Option<&EventPayload> {
		self.options.as_ref()
	}
}

impl std::fmt::Debug for RouterEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterEvent")
			.field("name", &self.name)
			.field("has_options", &self.options.is_some())
			.finish()
	}
}

/// Publish/subscribe channel keyed by event name.
#[derive(Default)]
pub struct EventChannel {
	listeners: RwLock<HashMap<String, Vec<EventListener>>>,
}

impl EventChannel {
	/// Creates an empty channel.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` for events named `name`.
	pub fn on<F>(&self, name: &str, listener: F)
	where
		F: Fn(&RouterEvent) + Send + Sync + 'static,
	{
		self.listeners
			.write()
			.entry(name.to_string())
			.or_default()
			.push(Arc::new(listener));
	}

	/// Emits an event to all listeners registered for `name`.
	pub fn emit(&self, name: &str, detail: EventPayload) {
		self.dispatch(RouterEvent::new(name, detail));
	}

	/// Emits an event carrying per-emission options.
	pub fn emit_with(&self, name: &str, detail: EventPayload, options: EventPayload) {
		self.dispatch(RouterEvent::with_options(name, detail, options));
	}

	/// Returns the number of listeners registered for `name`.
	pub fn listener_count(&self, name: &str) -> usize {
		self.listeners.read().get(name).map_or(0, Vec::len)
	}

	fn dispatch(&self, event: RouterEvent) {
		// Snapshot under the read lock so a listener may register further
		// listeners without deadlocking; those never see the current event.
		let snapshot: Vec<EventListener> = self
			.listeners
			.read()
			.get(event.name())
			.map(|v| v.to_vec())
			.unwrap_or_default();

		tracing::trace!(name = event.name(), listeners = snapshot.len(), "emit");
		for listener in snapshot {
			listener(&event);
		}
	}
}

impl std::fmt::Debug for EventChannel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names: Vec<String> = self.listeners.read().keys().cloned().collect();
		f.debug_struct("EventChannel").field("names", &names).finish()
	}
}
