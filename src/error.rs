//! Error types for router construction, registration and dispatch.

use thiserror::Error;

/// Boxed error type that route handlers may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the router.
///
/// A URL that matches no route is *not* an error: the router emits a `"404"`
/// event and lets the host proceed with its default navigation.
#[derive(Debug, Error)]
pub enum RouterError {
	/// A required host capability is unavailable.
	///
	/// Raised at construction time when the navigation-interception or
	/// pattern-matching facility cannot be obtained. There is no fallback.
	#[error("required capability unavailable: {0}")]
	CapabilityMissing(&'static str),

	/// A route template failed to compile.
	///
	/// Returned from [`Router::add`](crate::Router::add); the route is never
	/// added.
	#[error("invalid route template '{template}': {reason}")]
	PatternCompile {
		/// The template string as passed to `add`.
		template: String,
		/// Compiler-provided reason.
		reason: String,
	},

	/// A route handler failed.
	///
	/// Surfaced through the navigation's commit future so the host's own
	/// navigation-failure handling sees it; never swallowed or retried.
	#[error("route handler failed: {0}")]
	Handler(#[source] BoxError),
}

impl RouterError {
	/// Builds a [`RouterError::PatternCompile`] from a template and reason.
	pub fn pattern_compile(template: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::PatternCompile {
			template: template.into(),
			reason: reason.into(),
		}
	}
}
