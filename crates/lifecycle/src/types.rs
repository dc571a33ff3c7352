use std::fmt;
use std::sync::Arc;

use crate::{BoxError, Component};

type Construct = dyn Fn() -> Result<Arc<dyn Component>, BoxError> + Send + Sync;

/// A resolvable component type: a name bound to a constructor.
pub struct ComponentType {
	name: Box<str>,
	construct: Box<Construct>,
}

impl ComponentType {
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentType").field("name", &self.name).finish_non_exhaustive()
	}
}

/// Shared handle to a resolved [`ComponentType`].
#[derive(Clone, Debug)]
pub struct TypeHandle(Arc<ComponentType>);

impl TypeHandle {
	/// Creates a handle for `name` built by `construct`.
	pub fn new<F>(name: impl Into<Box<str>>, construct: F) -> Self
	where
		F: Fn() -> Result<Arc<dyn Component>, BoxError> + Send + Sync + 'static,
	{
		Self(Arc::new(ComponentType {
			name: name.into(),
			construct: Box::new(construct),
		}))
	}

	pub fn name(&self) -> &str {
		self.0.name()
	}

	/// Runs the constructor once.
	pub fn construct(&self) -> Result<Arc<dyn Component>, BoxError> {
		(self.0.construct)()
	}

	/// Returns true when both handles point at the same type.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}
