use std::error::Error;
use std::sync::Arc;

/// Boxed error produced by component constructors.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// A type name could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
	#[error("no component type named `{name}` is visible from the current context")]
	Unknown { name: String },
	#[error("cannot resolve `{name}`: no type catalog entered on this thread")]
	NoContext { name: String },
}

impl NotFoundError {
	pub fn unknown(name: impl Into<String>) -> Self {
		Self::Unknown { name: name.into() }
	}

	pub fn no_context(name: impl Into<String>) -> Self {
		Self::NoContext { name: name.into() }
	}

	/// Name that failed to resolve.
	pub fn name(&self) -> &str {
		match self {
			Self::Unknown { name } | Self::NoContext { name } => name,
		}
	}
}

/// A component factory failed to produce an instance.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to construct `{type_name}`: {source}")]
pub struct ConstructionError {
	type_name: String,
	#[source]
	source: Arc<dyn Error + Send + Sync>,
}

impl ConstructionError {
	pub fn new(type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
		Self {
			type_name: type_name.into(),
			source: Arc::from(source.into()),
		}
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}
}

/// Failure reported by a component's own `start` or `stop`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct LifecycleError {
	message: String,
	#[source]
	source: Option<Arc<dyn Error + Send + Sync>>,
}

impl LifecycleError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
		}
	}

	/// Wraps an underlying error, reusing its message.
	pub fn from_source(source: impl Into<BoxError>) -> Self {
		let source: Arc<dyn Error + Send + Sync> = Arc::from(source.into());
		Self {
			message: source.to_string(),
			source: Some(source),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}
