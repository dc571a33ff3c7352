use stasis_lifecycle::{ConstructionError, LifecycleError, NotFoundError};

/// Failure surfaced by a proxy operation.
///
/// Clonable so a proxy can keep the most recent start failure while also
/// returning it to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProxyError {
	#[error(transparent)]
	NotFound(#[from] NotFoundError),

	#[error(transparent)]
	Construction(#[from] ConstructionError),

	#[error("component type `{type_name}` does not provide the {capability} capability")]
	CapabilityMismatch { type_name: String, capability: &'static str },

	#[error("component `{name}` failed to start: {source}")]
	Start {
		name: String,
		#[source]
		source: LifecycleError,
	},

	#[error("component `{name}` failed to stop: {source}")]
	Stop {
		name: String,
		#[source]
		source: LifecycleError,
	},
}
