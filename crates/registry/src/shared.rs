//! Process-wide registry installed by the composition root.
//!
//! Nothing here creates a registry on its own: the application builds one
//! with the factory it wants and installs it once.

use std::sync::OnceLock;

use crate::ProxyRegistry;

static SHARED: OnceLock<ProxyRegistry> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
#[error("a shared proxy registry is already installed")]
pub struct InstallError;

/// Installs the process-wide registry.
///
/// Fails if a registry is already installed; `registry` is dropped then.
pub fn install(registry: ProxyRegistry) -> Result<&'static ProxyRegistry, InstallError> {
	let mut installed = false;
	let shared = SHARED.get_or_init(|| {
		installed = true;
		registry
	});
	if !installed {
		return Err(InstallError);
	}
	tracing::debug!("registry.shared.install");
	Ok(shared)
}

/// Returns the process-wide registry, if one has been installed.
pub fn get() -> Option<&'static ProxyRegistry> {
	SHARED.get()
}
