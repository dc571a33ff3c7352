use crate::catalog::current_catalog;
use crate::{NotFoundError, TypeCatalog, TypeHandle};

/// Turns a registered name into a component type.
pub trait TypeResolver: Send + Sync {
	fn resolve(&self, name: &str) -> Result<TypeHandle, NotFoundError>;
}

/// Resolves through the [`TypeCatalog`] entered on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmbientResolver;

impl TypeResolver for AmbientResolver {
	fn resolve(&self, name: &str) -> Result<TypeHandle, NotFoundError> {
		let Some(catalog) = current_catalog() else {
			return Err(NotFoundError::no_context(name));
		};
		catalog.resolve(name)
	}
}

impl TypeResolver for TypeCatalog {
	fn resolve(&self, name: &str) -> Result<TypeHandle, NotFoundError> {
		self.lookup(name).ok_or_else(|| NotFoundError::unknown(name))
	}
}
