//! Named type catalogs and the per-thread ambient context.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::{BoxError, Component, TypeHandle};

/// Statically submitted component type, collected by [`TypeCatalog::from_static`].
pub struct ComponentTypeDef {
	pub name: &'static str,
	pub construct: fn() -> Result<Arc<dyn Component>, BoxError>,
}

inventory::collect!(ComponentTypeDef);

impl ComponentTypeDef {
	pub const fn new(name: &'static str, construct: fn() -> Result<Arc<dyn Component>, BoxError>) -> Self {
		Self { name, construct }
	}

	fn handle(&self) -> TypeHandle {
		TypeHandle::new(self.name, self.construct)
	}
}

/// Set of component types visible to one resolution context.
///
/// Lookups that miss fall through to the parent catalog, if any.
#[derive(Debug, Default)]
pub struct TypeCatalog {
	types: HashMap<Box<str>, TypeHandle>,
	parent: Option<Arc<TypeCatalog>>,
}

thread_local! {
	static CURRENT: RefCell<Option<Arc<TypeCatalog>>> = const { RefCell::new(None) };
}

impl TypeCatalog {
	/// Creates an empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a catalog holding every [`ComponentTypeDef`] submitted in the process.
	///
	/// When two definitions share a name the first one seen wins.
	pub fn from_static() -> Self {
		let mut catalog = Self::new();
		for def in inventory::iter::<ComponentTypeDef> {
			if catalog.types.contains_key(def.name) {
				tracing::warn!(component = def.name, "catalog.duplicate_static_type");
				continue;
			}
			catalog.types.insert(Box::from(def.name), def.handle());
		}
		catalog
	}

	/// Sets the catalog consulted when a lookup misses.
	#[must_use]
	pub fn with_parent(mut self, parent: Arc<TypeCatalog>) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Adds a type, returning the catalog for chaining.
	#[must_use]
	pub fn with_type(mut self, handle: TypeHandle) -> Self {
		self.register(handle);
		self
	}

	/// Adds a type, returning the handle it replaced.
	pub fn register(&mut self, handle: TypeHandle) -> Option<TypeHandle> {
		self.types.insert(Box::from(handle.name()), handle)
	}

	/// Finds a type by name in this catalog or its ancestors.
	pub fn lookup(&self, name: &str) -> Option<TypeHandle> {
		match self.types.get(name) {
			Some(handle) => Some(handle.clone()),
			None => self.parent.as_ref()?.lookup(name),
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.lookup(name).is_some()
	}

	/// Number of types defined directly in this catalog.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Makes this catalog the ambient context of the calling thread.
	///
	/// The previous context is restored when the guard drops.
	pub fn enter(self: &Arc<Self>) -> ContextGuard {
		let previous = CURRENT.with(|current| current.borrow_mut().replace(Arc::clone(self)));
		tracing::trace!(types = self.len(), "catalog.enter");
		ContextGuard {
			previous,
			_not_send: PhantomData,
		}
	}

	/// Runs `f` with this catalog entered.
	pub fn scope<R>(self: &Arc<Self>, f: impl FnOnce() -> R) -> R {
		let _guard = self.enter();
		f()
	}
}

/// Returns the catalog entered on the calling thread.
pub fn current_catalog() -> Option<Arc<TypeCatalog>> {
	CURRENT.with(|current| current.borrow().clone())
}

/// Restores the previously entered catalog on drop.
///
/// Bound to the thread that created it.
#[must_use = "the catalog is only entered while the guard is alive"]
pub struct ContextGuard {
	previous: Option<Arc<TypeCatalog>>,
	_not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
	fn drop(&mut self) {
		let previous = self.previous.take();
		CURRENT.with(|current| *current.borrow_mut() = previous);
	}
}
