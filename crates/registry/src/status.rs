use serde::Serialize;

/// Point-in-time snapshot of one proxy, as shown to monitoring surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyStatus {
	pub name: String,
	pub resolved: bool,
	pub start_requested: bool,
	pub running: bool,
	pub last_error: Option<String>,
}
