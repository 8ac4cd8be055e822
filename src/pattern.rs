//! Path template compilation and URL matching.
//!
//! The router never interprets templates itself; it delegates to an injected
//! [`PatternCompiler`], keeping the core free of any concrete matching engine.
//! [`RegexPatternCompiler`] is the default implementation.
//!
//! # Template Syntax
//!
//! - `:name` - Captures a path segment (excludes `/`)
//! - `:name*` - Captures the rest of the path (includes `/`)
//! - Literal text is matched exactly

use crate::error::RouterError;
use crate::params::Params;
use url::Url;

/// Compiles a path template into a reusable matcher.
///
/// Compilation failures surface as [`RouterError::PatternCompile`] from
/// [`Router::add`](crate::Router::add); the route is never added.
pub trait PatternCompiler: Send + Sync {
	/// Compiles `template` into a matcher.
	fn compile(&self, template: &str) -> Result<Box<dyn RouteMatcher>, RouterError>;
}

/// A compiled template that tests URLs and extracts named groups.
///
/// The matcher receives the full [`Url`], not just its path, so an
/// implementation may also consider other URL components depending on how the
/// template was compiled.
pub trait RouteMatcher: Send + Sync {
	/// Tests `url`; on acceptance returns the captured named groups.
	fn exec(&self, url: &Url) -> Option<Params>;

	/// Returns the original template string.
	fn template(&self) -> &str;
}

/// Maximum allowed length for a route template string in bytes.
const MAX_TEMPLATE_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route template.
const MAX_TEMPLATE_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled template regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Default [`PatternCompiler`] backed by the `regex` crate.
///
/// Matches against the URL's path component only. Templates are bounded in
/// length and segment count, and the compiled regex is size-limited, to keep
/// registration-time input from exhausting memory.
#[derive(Debug, Clone, Default)]
pub struct RegexPatternCompiler;

impl RegexPatternCompiler {
	/// Creates the default compiler.
	pub fn new() -> Self {
		Self
	}

	/// Translates a template into a regex source and its group names.
	fn translate(template: &str) -> Result<(String, Vec<String>), String> {
		let mut regex_str = String::from("^");
		let mut group_names = Vec::new();
		let mut chars = template.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				':' => {
					let mut name = String::new();
					while let Some(&next) = chars.peek() {
						if next.is_ascii_alphanumeric() || next == '_' {
							name.push(next);
							chars.next();
						} else {
							break;
						}
					}
					if name.is_empty() {
						return Err("empty parameter name after ':'".to_string());
					}

					let wildcard = chars.peek() == Some(&'*');
					if wildcard {
						chars.next();
					}

					if group_names.contains(&name) {
						return Err(format!("duplicate parameter name '{}'", name));
					}
					group_names.push(name.clone());

					if wildcard {
						// Rest-of-path capture, including separators.
						regex_str.push_str(&format!("(?P<{}>.*)", name));
					} else {
						// Single segment, no separators.
						regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
					}
				}
				'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' => {
					regex_str.push('\\');
					regex_str.push(c);
				}
				_ => {
					regex_str.push(c);
				}
			}
		}

		regex_str.push('$');
		Ok((regex_str, group_names))
	}
}

impl PatternCompiler for RegexPatternCompiler {
	fn compile(&self, template: &str) -> Result<Box<dyn RouteMatcher>, RouterError> {
		if template.len() > MAX_TEMPLATE_LENGTH {
			return Err(RouterError::pattern_compile(
				template,
				format!(
					"template length {} exceeds maximum of {} bytes",
					template.len(),
					MAX_TEMPLATE_LENGTH
				),
			));
		}

		let segment_count = template.split('/').count();
		if segment_count > MAX_TEMPLATE_SEGMENTS {
			return Err(RouterError::pattern_compile(
				template,
				format!(
					"template has {} path segments, exceeding maximum of {}",
					segment_count, MAX_TEMPLATE_SEGMENTS
				),
			));
		}

		let (regex_str, group_names) = Self::translate(template)
			.map_err(|reason| RouterError::pattern_compile(template, reason))?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| RouterError::pattern_compile(template, e.to_string()))?;

		Ok(Box::new(RegexRouteMatcher {
			template: template.to_string(),
			regex,
			group_names,
		}))
	}
}

/// Matcher produced by [`RegexPatternCompiler`].
#[derive(Debug)]
struct RegexRouteMatcher {
	template: String,
	regex: regex::Regex,
	group_names: Vec<String>,
}

impl RouteMatcher for RegexRouteMatcher {
	fn exec(&self, url: &Url) -> Option<Params> {
		self.regex.captures(url.path()).map(|caps| {
			self.group_names
				.iter()
				.map(|name| {
					(
						name.clone(),
						caps.name(name).map(|m| m.as_str().to_string()),
					)
				})
				.collect()
		})
	}

	fn template(&self) -> &str {
		&self.template
	}
}
