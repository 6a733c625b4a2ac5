//! Typed TR-069/CWMP data-model records.
//!
//! This crate provides the object records of the Broadband Forum data models
//! (TR-098, TR-104, TR-135, TR-140, TR-143, TR-157, TR-181, TR-196 and TR-262)
//! together with the metadata a CWMP engine needs to drive them: the CWMP path
//! of every object, the wire name, type, access mode, units and constraints of
//! every parameter.
//!
//! Records are plain values: public fields, `Default` for the documented
//! defaults and serde for export. Nothing is checked on field assignment. The
//! checked operations (constraint validation, access rights, alias uniqueness,
//! instance creation) go through a [`Mount`], which binds a root record to its
//! path in the device tree:
//!
//! ```
//! use cwmp_model::{Mount, model::tr098::InternetGatewayDevice};
//!
//! let mut gateway = Mount::at_schema_path(InternetGatewayDevice::default()).unwrap();
//! let info = "InternetGatewayDevice.DeviceInfo.ProvisioningCode".parse().unwrap();
//! gateway.set_str(&info, "ABC").unwrap();
//! assert_eq!(gateway.node().device_info.provisioning_code.as_deref(), Some("ABC"));
//! ```
//!
//! The crate performs no I/O and does not implement the CWMP RPCs; it is the
//! data layer under an ACS or CPE protocol engine.

pub mod config;
pub mod model;
pub mod object;
pub mod path;
pub mod reference;
pub mod schema;
pub mod table;
pub mod tree;
pub mod value;
pub mod wire;

pub use config::ModelConfig;
pub use object::{ModelObject, ObjectNode};
pub use path::ParameterPath;
pub use reference::Reference;
pub use schema::registry::{SchemaRegistry, builtin};
pub use table::Table;
pub use tree::Mount;
pub use value::{ParamType, ParameterValue};
