//! Fixtures shared by the unit tests.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use stasis_lifecycle::{Component, ComponentFactory, ConstructionError, DirectFactory, Lifecycle, LifecycleError, NotFoundError, TypeCatalog, TypeHandle, TypeResolver};

use crate::{LifecycleProxy, ProxyRegistry};

/// Component whose start and stop outcomes are scripted per instance.
#[derive(Default)]
pub(crate) struct Service {
	pub fail_start: bool,
	pub fail_stop: bool,
	pub running: AtomicBool,
	pub starts: AtomicUsize,
	pub stops: AtomicUsize,
}

impl Lifecycle for Service {
	fn start(&self) -> Result<(), LifecycleError> {
		self.starts.fetch_add(1, Ordering::SeqCst);
		if self.fail_start {
			return Err(LifecycleError::new("port already bound"));
		}
		self.running.store(true, Ordering::SeqCst);
		Ok(())
	}

	fn stop(&self) -> Result<(), LifecycleError> {
		self.stops.fetch_add(1, Ordering::SeqCst);
		self.running.store(false, Ordering::SeqCst);
		if self.fail_stop {
			return Err(LifecycleError::new("flush timed out"));
		}
		Ok(())
	}
}

impl Component for Service {
	fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
		Some(self)
	}
}

/// Component without the lifecycle capability.
pub(crate) struct Inert;

impl Component for Inert {}

pub(crate) fn service_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || Ok(Arc::new(Service::default()) as Arc<dyn Component>))
}

pub(crate) fn failing_start_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || {
		Ok(Arc::new(Service {
			fail_start: true,
			..Service::default()
		}) as Arc<dyn Component>)
	})
}

pub(crate) fn failing_stop_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || {
		Ok(Arc::new(Service {
			fail_stop: true,
			..Service::default()
		}) as Arc<dyn Component>)
	})
}

pub(crate) fn inert_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || Ok(Arc::new(Inert) as Arc<dyn Component>))
}

pub(crate) fn broken_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || Err("missing configuration".into()))
}

/// Resolver backed by a swappable catalog that counts lookups.
#[derive(Default)]
pub(crate) struct CountingResolver {
	catalog: Mutex<TypeCatalog>,
	pub calls: AtomicUsize,
}

impl CountingResolver {
	pub fn with_types(types: impl IntoIterator<Item = TypeHandle>) -> Arc<Self> {
		let resolver = Self::default();
		for ty in types {
			resolver.catalog.lock().register(ty);
		}
		Arc::new(resolver)
	}

	pub fn define(&self, ty: TypeHandle) {
		self.catalog.lock().register(ty);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl TypeResolver for CountingResolver {
	fn resolve(&self, name: &str) -> Result<TypeHandle, NotFoundError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.catalog.lock().resolve(name)
	}
}

/// Factory that counts how many instances it has built.
#[derive(Default)]
pub(crate) struct CountingFactory {
	pub calls: AtomicUsize,
}

impl CountingFactory {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl ComponentFactory for CountingFactory {
	fn create(&self, ty: &TypeHandle) -> Result<Arc<dyn Component>, ConstructionError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		DirectFactory.create(ty)
	}
}

pub(crate) fn proxy(name: &str, resolver: &Arc<CountingResolver>, factory: &Arc<CountingFactory>) -> LifecycleProxy {
	let resolver: Arc<dyn TypeResolver> = resolver.clone();
	let factory: Arc<dyn ComponentFactory> = factory.clone();
	LifecycleProxy::new(name, resolver, factory)
}

pub(crate) fn registry(resolver: &Arc<CountingResolver>, factory: &Arc<CountingFactory>) -> ProxyRegistry {
	let resolver: Arc<dyn TypeResolver> = resolver.clone();
	let factory: Arc<dyn ComponentFactory> = factory.clone();
	ProxyRegistry::builder().resolver_shared(resolver).factory_shared(factory).build()
}

/// Downcasts the proxy's live instance to the test [`Service`].
pub(crate) fn with_service<R>(proxy: &LifecycleProxy, f: impl FnOnce(&Service) -> R) -> Option<R> {
	let handle = proxy.instance()?;
	handle.component::<Service>().map(f)
}

/// Observable counters published by [`Gauge`].
#[derive(Default)]
pub(crate) struct GaugeStats {
	pub running: AtomicBool,
	pub starts: AtomicUsize,
}

/// Component that exposes its counters, but not itself, to observers.
#[derive(Default)]
pub(crate) struct Gauge {
	stats: GaugeStats,
}

impl Lifecycle for Gauge {
	fn start(&self) -> Result<(), LifecycleError> {
		self.stats.starts.fetch_add(1, Ordering::SeqCst);
		self.stats.running.store(true, Ordering::SeqCst);
		Ok(())
	}

	fn stop(&self) -> Result<(), LifecycleError> {
		self.stats.running.store(false, Ordering::SeqCst);
		Ok(())
	}
}

impl Component for Gauge {
	fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
		Some(self)
	}

	fn view(&self) -> Option<&dyn Any> {
		Some(&self.stats)
	}
}

pub(crate) fn gauge_type(name: &str) -> TypeHandle {
	TypeHandle::new(name, || Ok(Arc::new(Gauge::default()) as Arc<dyn Component>))
}
