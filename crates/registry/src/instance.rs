use std::any::Any;
use std::fmt;
use std::sync::Arc;

use stasis_lifecycle::{Component, TypeHandle};

/// Read-only view of a proxy's live component.
///
/// Exposes identity and the component's observer view. Start and stop go
/// only through the owning [`LifecycleProxy`](crate::LifecycleProxy).
#[derive(Clone)]
pub struct InstanceHandle {
	ty: TypeHandle,
	component: Arc<dyn Component>,
}

impl InstanceHandle {
	pub(crate) fn new(ty: TypeHandle, component: Arc<dyn Component>) -> Self {
		Self { ty, component }
	}

	/// Name of the type this instance was built from.
	pub fn type_name(&self) -> &str {
		self.ty.name()
	}

	/// Returns the observer view the component chose to expose, as `T`.
	pub fn view<T: Any>(&self) -> Option<&T> {
		self.component.view()?.downcast_ref::<T>()
	}

	#[cfg(test)]
	pub(crate) fn component<T: Component>(&self) -> Option<&T> {
		let component: &dyn Any = &*self.component;
		component.downcast_ref::<T>()
	}

	/// Returns true when both handles refer to the same instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.component, &other.component)
	}
}

impl fmt::Debug for InstanceHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InstanceHandle").field("type_name", &self.type_name()).finish_non_exhaustive()
	}
}
