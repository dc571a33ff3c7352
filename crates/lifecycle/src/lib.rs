//! Capability and collaborator definitions for deferred component lifecycles.
//!
//! A component is described by a [`TypeHandle`]: a named constructor that
//! produces an [`Arc<dyn Component>`](Component). Whether the product can be
//! started and stopped is a runtime question answered by
//! [`Component::as_lifecycle`].
//!
//! Names are turned into handles by a [`TypeResolver`]. The default
//! [`AmbientResolver`] consults whichever [`TypeCatalog`] the calling thread
//! has entered, so the same name may resolve on a bootstrap thread and fail
//! on a management thread.

mod capability;
mod catalog;
mod error;
mod factory;
mod resolver;
mod types;

pub use capability::{Component, LIFECYCLE_CAPABILITY, Lifecycle};
pub use catalog::{ComponentTypeDef, ContextGuard, TypeCatalog, current_catalog};
pub use error::{BoxError, ConstructionError, LifecycleError, NotFoundError};
pub use factory::{ComponentFactory, DirectFactory};
pub use resolver::{AmbientResolver, TypeResolver};
pub use types::{ComponentType, TypeHandle};

#[doc(hidden)]
pub use inventory as __inventory;

/// Registers a component type in the process-wide static catalog.
///
/// The type becomes visible through [`TypeCatalog::from_static`].
///
/// ```ignore
/// stasis_lifecycle::submit_component_type!("metrics.exporter", || Ok(Arc::new(Exporter::default())));
/// ```
#[macro_export]
macro_rules! submit_component_type {
	($name:expr, $construct:expr $(,)?) => {
		$crate::__inventory::submit! {
			$crate::ComponentTypeDef::new($name, $construct)
		}
	};
}
