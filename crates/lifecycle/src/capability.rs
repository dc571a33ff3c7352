use std::any::Any;

use crate::LifecycleError;

/// Capability name reported when a constructed component cannot be driven.
pub const LIFECYCLE_CAPABILITY: &str = "Lifecycle";

/// Start/stop contract for components managed by a lifecycle proxy.
///
/// Both methods take `&self`; implementations keep their running state
/// behind interior mutability.
pub trait Lifecycle: Send + Sync {
	fn start(&self) -> Result<(), LifecycleError>;

	fn stop(&self) -> Result<(), LifecycleError>;
}

/// Any object a component factory can produce.
///
/// Factories are typed against this trait rather than [`Lifecycle`], so the
/// capability is queried after construction.
pub trait Component: Any + Send + Sync {
	/// Returns the lifecycle view of this component, if it has one.
	fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
		None
	}

	/// Returns the state this component exposes to observers.
	///
	/// Must not hand out the component itself or anything implementing
	/// [`Lifecycle`]: start and stop stay with whoever owns the component.
	fn view(&self) -> Option<&dyn Any> {
		None
	}
}
