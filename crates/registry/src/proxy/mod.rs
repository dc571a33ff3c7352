use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use stasis_lifecycle::{Component, ComponentFactory, LIFECYCLE_CAPABILITY, Lifecycle, TypeHandle, TypeResolver};

use crate::{InstanceHandle, ProxyError, ProxyStatus};

#[derive(Default)]
struct ProxyState {
	resolved: Option<TypeHandle>,
	instance: Option<Arc<dyn Component>>,
	start_requested: bool,
	running: bool,
	last_error: Option<ProxyError>,
}

/// Stable handle for one registered component name.
///
/// Records start/stop intent while the implementation type is unknown and
/// replays it once [`resolve`](Self::resolve) succeeds. All state lives
/// behind one lock, and every transition (including calls into the factory
/// and the component's own `start`/`stop`) runs while holding it.
pub struct LifecycleProxy {
	name: Box<str>,
	resolver: Arc<dyn TypeResolver>,
	factory: Arc<dyn ComponentFactory>,
	state: Mutex<ProxyState>,
}

impl LifecycleProxy {
	pub(crate) fn new(name: &str, resolver: Arc<dyn TypeResolver>, factory: Arc<dyn ComponentFactory>) -> Self {
		Self {
			name: Box::from(name),
			resolver,
			factory,
			state: Mutex::new(ProxyState::default()),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Requests the component to run.
	///
	/// While the type is unresolved only the intent is recorded and `Ok` is
	/// returned. Once resolved, builds the instance if needed and starts it.
	pub fn start(&self) -> Result<(), ProxyError> {
		let mut state = self.state.lock();
		state.start_requested = true;
		tracing::trace!(proxy = %self.name, resolved = state.resolved.is_some(), "proxy.start");
		self.try_start(&mut state)
	}

	/// Withdraws the start request and releases the instance, if any.
	///
	/// The resolved type is kept, so a later [`start`](Self::start) builds a
	/// fresh instance without resolving again. A failing component `stop` is
	/// reported after the instance has already been released.
	pub fn stop(&self) -> Result<(), ProxyError> {
		let mut state = self.state.lock();
		state.start_requested = false;
		state.running = false;
		let Some(instance) = state.instance.take() else {
			return Ok(());
		};
		tracing::trace!(proxy = %self.name, "proxy.stop");

		let Some(lifecycle) = instance.as_lifecycle() else {
			return Ok(());
		};
		lifecycle.stop().map_err(|source| ProxyError::Stop {
			name: self.name.to_string(),
			source,
		})
	}

	/// Stops the proxy, discarding any failure from the component.
	pub(crate) fn force_stop(&self) {
		if let Err(err) = self.stop() {
			tracing::debug!(proxy = %self.name, error = %err, "proxy.force_stop.discarded");
		}
	}

	/// Resolves the implementation type through the resolver's ambient context.
	///
	/// Does nothing once a type is known, even if the instance has since been
	/// stopped or its last start failed. On a resolution failure the proxy is
	/// left untouched. If a start was requested earlier, the component is
	/// built and started here and any failure is returned.
	pub fn resolve(&self) -> Result<(), ProxyError> {
		let mut state = self.state.lock();
		if state.resolved.is_some() {
			return Ok(());
		}

		let ty = self.resolver.resolve(&self.name).inspect_err(|err| {
			tracing::warn!(proxy = %self.name, error = %err, "proxy.resolve.failed");
		})?;
		tracing::debug!(proxy = %self.name, start_requested = state.start_requested, "proxy.resolve");
		state.resolved = Some(ty);

		if state.start_requested { self.try_start(&mut state) } else { Ok(()) }
	}

	/// Returns the live instance, if one has been built and not stopped.
	pub fn instance(&self) -> Option<InstanceHandle> {
		let state = self.state.lock();
		let ty = state.resolved.clone()?;
		let component = Arc::clone(state.instance.as_ref()?);
		Some(InstanceHandle::new(ty, component))
	}

	pub fn is_running(&self) -> bool {
		self.state.lock().running
	}

	/// Returns the failure captured by the most recent unsuccessful start.
	pub fn last_error(&self) -> Option<ProxyError> {
		self.state.lock().last_error.clone()
	}

	pub fn is_resolved(&self) -> bool {
		self.state.lock().resolved.is_some()
	}

	pub fn is_start_requested(&self) -> bool {
		self.state.lock().start_requested
	}

	pub fn resolved_type(&self) -> Option<TypeHandle> {
		self.state.lock().resolved.clone()
	}

	pub fn status(&self) -> ProxyStatus {
		let state = self.state.lock();
		ProxyStatus {
			name: self.name.to_string(),
			resolved: state.resolved.is_some(),
			start_requested: state.start_requested,
			running: state.running,
			last_error: state.last_error.as_ref().map(ToString::to_string),
		}
	}

	fn try_start(&self, state: &mut ProxyState) -> Result<(), ProxyError> {
		let Some(ty) = state.resolved.clone() else {
			tracing::trace!(proxy = %self.name, "proxy.start.deferred");
			return Ok(());
		};

		let instance = match state.instance.clone() {
			Some(instance) => instance,
			None => match self.construct(&ty) {
				Ok(instance) => {
					state.instance = Some(Arc::clone(&instance));
					instance
				}
				Err(err) => return Err(self.capture(state, err)),
			},
		};

		let result = lifecycle_of(&ty, instance.as_ref()).and_then(|lifecycle| {
			lifecycle.start().map_err(|source| ProxyError::Start {
				name: self.name.to_string(),
				source,
			})
		});
		match result {
			Ok(()) => {
				state.running = true;
				state.last_error = None;
				tracing::debug!(proxy = %self.name, component = ty.name(), "proxy.started");
				Ok(())
			}
			Err(err) => Err(self.capture(state, err)),
		}
	}

	fn construct(&self, ty: &TypeHandle) -> Result<Arc<dyn Component>, ProxyError> {
		let instance = self.factory.create(ty)?;
		lifecycle_of(ty, instance.as_ref())?;
		Ok(instance)
	}

	fn capture(&self, state: &mut ProxyState, err: ProxyError) -> ProxyError {
		tracing::warn!(proxy = %self.name, error = %err, "proxy.start.failed");
		state.running = false;
		state.last_error = Some(err.clone());
		err
	}
}

fn lifecycle_of<'a>(ty: &TypeHandle, instance: &'a dyn Component) -> Result<&'a dyn Lifecycle, ProxyError> {
	instance.as_lifecycle().ok_or_else(|| ProxyError::CapabilityMismatch {
		type_name: ty.name().to_string(),
		capability: LIFECYCLE_CAPABILITY,
	})
}

impl fmt::Debug for LifecycleProxy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("LifecycleProxy")
			.field("name", &self.name)
			.field("resolved", &state.resolved.as_ref().map(TypeHandle::name))
			.field("start_requested", &state.start_requested)
			.field("running", &state.running)
			.field("last_error", &state.last_error)
			.finish_non_exhaustive()
	}
}
