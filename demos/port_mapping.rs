//! Example ACS-side use of the data model.
//! This example builds a gateway with one WAN IP connection, creates a port
//! mapping through the checked tree operations, reads the mapping back and
//! logs the `ParameterList` an ACS would send in a SetParameterValues call.
//!
//! Run with `RUST_LOG=debug` to see the tree operations.

use cwmp_model::{
	Mount,
	model::tr098::{InternetGatewayDevice, WANConnectionDevice, WANDevice, WANIPConnection},
	wire::ParameterList,
};
use snafu::{OptionExt, ResultExt, Whatever};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
	EnvFilter, Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const CONNECTION: &str =
	"InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANIPConnection.1.";

fn main() -> Result<(), Whatever> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
	let layer = tracing_subscriber::fmt::layer().with_filter(filter);
	tracing_subscriber::registry()
		.with(layer)
		//needed to get the tracing_error working
		.with(ErrorLayer::default().with_filter(EnvFilter::from("debug")))
		.init();

	// WAN devices are fixed by the hardware, so the CPE fills them in directly.
	let mut connection_device = WANConnectionDevice::default();
	connection_device
		.ip_connections
		.push(WANIPConnection::default())
		.whatever_context("Failed to add the IP connection")?;
	let mut wan = WANDevice::default();
	wan.connection_devices
		.push(connection_device)
		.whatever_context("Failed to add the connection device")?;
	let mut gateway = InternetGatewayDevice::default();
	gateway.wan_devices.push(wan).whatever_context("Failed to add the WAN device")?;

	let mut gateway =
		Mount::at_schema_path(gateway).whatever_context("Failed to mount the gateway")?;

	let table = format!("{CONNECTION}PortMapping.").parse().whatever_context("Invalid table path")?;
	let instance = gateway.add_instance(&table).whatever_context("Failed to add a port mapping")?;
	let row = format!("{CONNECTION}PortMapping.{instance}.");
	for (name, value) in [
		("ExternalPort", "8080"),
		("InternalPort", "80"),
		("InternalClient", "192.168.1.50"),
		("PortMappingProtocol", "TCP"),
		("PortMappingDescription", "web server"),
		("PortMappingEnabled", "true"),
	] {
		let path = format!("{row}{name}").parse().whatever_context("Invalid parameter path")?;
		gateway.set_str(&path, value).whatever_context("Failed to set a port mapping parameter")?;
	}

	// Out of range ports are refused before anything is stored.
	let port = format!("{row}ExternalPort").parse().whatever_context("Invalid parameter path")?;
	if let Err(e) = gateway.set_str(&port, "70000") {
		tracing::info!("Rejected: {e}");
	}

	let row_path = row.parse().whatever_context("Invalid row path")?;
	let entries = gateway.get(&row_path).whatever_context("Failed to read the row")?;
	for entry in &entries {
		tracing::info!(writable = entry.writable, "{} = {:?}", entry.path, entry.value);
	}

	let count_path = format!("{CONNECTION}PortMappingNumberOfEntries")
		.parse()
		.whatever_context("Invalid parameter path")?;
	let count = gateway.get(&count_path).whatever_context("Failed to read the entry count")?;
	let count = count
		.first()
		.and_then(|entry| entry.value.as_ref())
		.whatever_context("No entry count")?;
	tracing::info!("Port mappings: {count}");

	let writable: Vec<_> = entries.into_iter().filter(|entry| entry.writable).collect();
	let xml = ParameterList::from_entries(&writable)
		.to_xml()
		.whatever_context("Failed to encode the list")?;
	tracing::info!("ParameterList: {xml}");

	Ok(())
}
