//! Registry of lifecycle proxies for components whose implementation may not
//! be resolvable yet.
//!
//! Callers obtain a [`LifecycleProxy`] by name and may start or stop it at any
//! time. Bootstrap code that runs inside a [`TypeCatalog`](stasis_lifecycle::TypeCatalog)
//! able to see the implementations later calls [`ProxyRegistry::initialize_all`],
//! which resolves every registered name and builds the components whose start
//! was requested earlier.

mod error;
mod instance;
pub mod manifest;
mod proxy;
mod registry;
pub mod shared;
mod status;
#[cfg(test)]
mod testing;

pub use error::ProxyError;
pub use instance::InstanceHandle;
pub use manifest::{ComponentDecl, ManifestError, RegistryManifest};
pub use proxy::LifecycleProxy;
pub use registry::{ProxyRegistry, RegistryBuilder};
pub use shared::InstallError;
pub use status::ProxyStatus;
