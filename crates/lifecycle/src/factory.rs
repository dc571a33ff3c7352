use std::sync::Arc;

use crate::{Component, ConstructionError, TypeHandle};

/// Builds component instances from resolved types.
pub trait ComponentFactory: Send + Sync {
	fn create(&self, ty: &TypeHandle) -> Result<Arc<dyn Component>, ConstructionError>;
}

impl<F> ComponentFactory for F
where
	F: Fn(&TypeHandle) -> Result<Arc<dyn Component>, ConstructionError> + Send + Sync,
{
	fn create(&self, ty: &TypeHandle) -> Result<Arc<dyn Component>, ConstructionError> {
		self(ty)
	}
}

/// Factory that calls the type's own constructor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectFactory;

impl ComponentFactory for DirectFactory {
	fn create(&self, ty: &TypeHandle) -> Result<Arc<dyn Component>, ConstructionError> {
		tracing::trace!(component = ty.name(), "factory.create");
		ty.construct().map_err(|err| ConstructionError::new(ty.name(), err))
	}
}
