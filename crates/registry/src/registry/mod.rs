use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use stasis_lifecycle::{AmbientResolver, ComponentFactory, DirectFactory, TypeResolver};

use crate::{LifecycleProxy, ProxyError, ProxyStatus, RegistryManifest};

/// Name-keyed set of [`LifecycleProxy`] entries sharing one factory and resolver.
///
/// The map lock is never held while a proxy operation runs, so a slow
/// resolution or component start does not block [`get_or_create`](Self::get_or_create).
pub struct ProxyRegistry {
	entries: RwLock<IndexMap<Box<str>, Arc<LifecycleProxy>>>,
	resolver: Arc<dyn TypeResolver>,
	factory: Arc<dyn ComponentFactory>,
}

impl Default for ProxyRegistry {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl ProxyRegistry {
	/// Creates a registry building instances with `factory` and resolving
	/// names through the calling thread's ambient catalog.
	pub fn new(factory: impl ComponentFactory + 'static) -> Self {
		Self::builder().factory(factory).build()
	}

	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Returns the proxy for `name`, creating an unresolved one on first use.
	pub fn get_or_create(&self, name: &str) -> Arc<LifecycleProxy> {
		if let Some(proxy) = self.entries.read().get(name) {
			return Arc::clone(proxy);
		}

		let mut entries = self.entries.write();
		let proxy = entries.entry(Box::from(name)).or_insert_with(|| {
			tracing::trace!(proxy = name, "registry.create");
			Arc::new(LifecycleProxy::new(name, Arc::clone(&self.resolver), Arc::clone(&self.factory)))
		});
		Arc::clone(proxy)
	}

	/// Resolves every registered proxy in registration order.
	///
	/// Works on the entries present at call time. Stops at the first failure
	/// and returns it: proxies visited earlier in the pass keep whatever they
	/// reached, later ones are not touched. Callers needing all-or-nothing
	/// behaviour must build it on top of this.
	pub fn initialize_all(&self) -> Result<(), ProxyError> {
		let snapshot: Vec<_> = self.entries.read().values().cloned().collect();
		tracing::debug!(entries = snapshot.len(), "registry.initialize_all");

		for proxy in snapshot {
			if let Err(err) = proxy.resolve() {
				tracing::warn!(proxy = proxy.name(), error = %err, "registry.initialize_all.aborted");
				return Err(err);
			}
		}
		Ok(())
	}

	/// Stops every proxy, ignoring stop failures, and forgets all entries.
	///
	/// Entries stay visible while their stop runs and are removed only once
	/// stopped. Proxies registered during the sweep are stopped in a further
	/// pass before removal. Proxies obtained later are fresh: no resolved
	/// type, no captured error.
	pub fn reset_all(&self) {
		loop {
			let snapshot: Vec<_> = self.entries.read().values().cloned().collect();
			if snapshot.is_empty() {
				return;
			}
			tracing::debug!(entries = snapshot.len(), "registry.reset_all");

			for proxy in &snapshot {
				proxy.force_stop();
			}
			self.entries
				.write()
				.retain(|_, proxy| !snapshot.iter().any(|stopped| Arc::ptr_eq(stopped, proxy)));
		}
	}

	/// Registers every declared component and starts those marked `start`.
	///
	/// Starting an unresolved component only records the intent. The first
	/// start failure is returned; components declared after it are not
	/// registered.
	pub fn apply_manifest(&self, manifest: &RegistryManifest) -> Result<(), ProxyError> {
		for decl in &manifest.components {
			let proxy = self.get_or_create(&decl.name);
			if decl.start {
				proxy.start()?;
			}
		}
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<Arc<LifecycleProxy>> {
		self.entries.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.read().contains_key(name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.entries.read().keys().map(ToString::to_string).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Returns status snapshots sorted by name.
	pub fn snapshots(&self) -> Vec<ProxyStatus> {
		let proxies: Vec<_> = self.entries.read().values().cloned().collect();
		let mut records: Vec<_> = proxies.iter().map(|proxy| proxy.status()).collect();
		records.sort_by(|a, b| a.name.cmp(&b.name));
		records
	}
}

impl fmt::Debug for ProxyRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProxyRegistry").field("names", &self.names()).finish_non_exhaustive()
	}
}

/// Configures the collaborators of a [`ProxyRegistry`].
///
/// Defaults to [`DirectFactory`] and [`AmbientResolver`].
#[derive(Default)]
pub struct RegistryBuilder {
	factory: Option<Arc<dyn ComponentFactory>>,
	resolver: Option<Arc<dyn TypeResolver>>,
}

impl RegistryBuilder {
	#[must_use]
	pub fn factory(self, factory: impl ComponentFactory + 'static) -> Self {
		self.factory_shared(Arc::new(factory))
	}

	#[must_use]
	pub fn factory_shared(mut self, factory: Arc<dyn ComponentFactory>) -> Self {
		self.factory = Some(factory);
		self
	}

	/// Overrides the ambient resolver.
	#[must_use]
	pub fn resolver(self, resolver: impl TypeResolver + 'static) -> Self {
		self.resolver_shared(Arc::new(resolver))
	}

	#[must_use]
	pub fn resolver_shared(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn build(self) -> ProxyRegistry {
		ProxyRegistry {
			entries: RwLock::new(IndexMap::new()),
			resolver: self.resolver.unwrap_or_else(|| Arc::new(AmbientResolver) as Arc<dyn TypeResolver>),
			factory: self.factory.unwrap_or_else(|| Arc::new(DirectFactory) as Arc<dyn ComponentFactory>),
		}
	}
}
