use cwmp_model::{
	ModelConfig, Mount, ObjectNode, ParamType, ParameterPath, ParameterValue, builtin,
	model::{
		tr098::{
			InternetGatewayDevice, PortMapping, WANConnectionDevice, WANDevice, WANIPConnection,
		},
		tr181::{Device, WiFiEndPoint, WiFiEndPointProfile},
	},
	object::ObjectError,
	schema::{ObjectSchema, ParameterSchema},
	wire::ParameterList,
};
use time::macros::datetime;

/// A value of the parameter's type that satisfies its constraints.
fn sample(parameter: &ParameterSchema) -> ParameterValue {
	if let Some(values) = parameter.enumeration() {
		return ParameterValue::String(values[values.len() - 1].to_owned());
	}
	let max_len = parameter.max_length().map_or(usize::MAX, |max| max as usize);
	match parameter.ty {
		ParamType::String => ParameterValue::String("x".repeat(max_len.min(3))),
		ParamType::Boolean => ParameterValue::Boolean(true),
		ParamType::DateTime => ParameterValue::DateTime(datetime!(2024-05-01 12:30:15 UTC)),
		ParamType::Base64 => ParameterValue::Base64([1, 2, 3].into_iter().take(max_len).collect()),
		ParamType::HexBinary => {
			ParameterValue::HexBinary([0xde, 0xad].into_iter().take(max_len).collect())
		}
		ty => {
			let (min, max) = parameter.range().unwrap_or((0, i128::from(u32::MAX)));
			ParameterValue::from_integer(ty, 7_i128.clamp(min, max)).expect("sample fits the type")
		}
	}
}

fn instantiate(schema: &ObjectSchema) -> Box<dyn ObjectNode> {
	let path: ParameterPath = schema.path.parse().expect("schema path parses");
	builtin().instantiate(&path).expect("schema is registered")
}

#[test]
fn every_record_is_registered() {
	let registry = builtin();
	assert_eq!(registry.len(), 76);
	for schema in registry.iter() {
		assert_eq!(instantiate(schema).object_schema(), schema, "{}", schema.path);
	}
}

#[test]
fn every_parameter_round_trips_by_wire_name() {
	for schema in builtin().iter() {
		let mut node = instantiate(schema);
		for parameter in schema.parameters {
			let value = sample(parameter);
			parameter
				.validate(&value, true)
				.unwrap_or_else(|e| panic!("{}{}: {e}", schema.path, parameter.name));
			match node.store(parameter.name, value.clone()) {
				Ok(()) => assert_eq!(
					node.parameter(parameter.name).expect("declared parameter"),
					Some(value),
					"{}{}",
					schema.path,
					parameter.name
				),
				Err(ObjectError::Derived { .. }) => {
					assert!(parameter.name.ends_with("NumberOfEntries"), "{}", parameter.name);
					assert!(!parameter.is_writable());
				}
				Err(e) => panic!("{}{}: {e}", schema.path, parameter.name),
			}
		}
	}
}

#[test]
fn defaults_satisfy_their_constraints() {
	for schema in builtin().iter() {
		let node = instantiate(schema);
		for parameter in schema.parameters {
			if let Some(value) = node.parameter(parameter.name).expect("declared parameter") {
				parameter
					.validate(&value, true)
					.unwrap_or_else(|e| {
						panic!("default of {}{}: {e}", schema.path, parameter.name)
					});
			}
		}
	}
}

#[test]
fn child_paths_compose_from_their_parent() {
	let registry = builtin();
	for schema in registry.iter() {
		let node = instantiate(schema);
		for child in schema.children {
			let child_schema = (child.schema)();
			let suffix = if child.table { ".{i}." } else { "." };
			assert_eq!(child_schema.path, format!("{}{}{suffix}", schema.path, child.name));
			assert_eq!(child_schema.is_multi_instance(), child.table, "{}", child_schema.path);
			assert!(
				registry.lookup_str(child_schema.path).is_some(),
				"{} is not registered",
				child_schema.path
			);

			if child.table {
				assert_eq!(node.rows(child.name).map(|rows| rows.len()), Some(0));
			} else {
				assert!(node.child(child.name).is_some());
			}
		}
	}
}

fn populated_gateway() -> InternetGatewayDevice {
	let mut connection = WANIPConnection { enable: true, ..WANIPConnection::default() };
	connection
		.port_mappings
		.push(PortMapping {
			port_mapping_enabled: true,
			external_port: 8080,
			internal_port: Some(80),
			internal_client: Some("192.168.1.50".into()),
			protocol: Some("TCP".into()),
			..PortMapping::default()
		})
		.expect("row added");
	connection.port_mappings.insert(4, PortMapping::default()).expect("row added");
	let mut connection_device = WANConnectionDevice::default();
	connection_device.ip_connections.push(connection).expect("row added");
	let mut wan = WANDevice::default();
	wan.connection_devices.push(connection_device).expect("row added");

	let mut gateway = InternetGatewayDevice::default();
	gateway.device_info.manufacturer = Some("Acme".into());
	gateway.device_info.first_use_date = Some(datetime!(2023-11-02 08:00 UTC));
	gateway.wan_devices.push(wan).expect("row added");
	gateway
}

#[test]
fn json_export_keeps_wire_names_and_instances() {
	let gateway = populated_gateway();
	let json = serde_json::to_value(&gateway).expect("serialize");
	let connection = &json["WANDevice"]["1"]["WANConnectionDevice"]["1"]["WANIPConnection"]["1"];
	let mapping = &connection["PortMapping"]["1"];
	assert_eq!(mapping["ExternalPort"], 8080);
	assert_eq!(mapping["PortMappingProtocol"], "TCP");
	assert_eq!(json["DeviceInfo"]["Manufacturer"], "Acme");

	let back: InternetGatewayDevice = serde_json::from_value(json).expect("deserialize");
	assert_eq!(back, gateway);
}

#[test]
fn parameter_list_replays_a_tree() {
	let source = Mount::at_schema_path(populated_gateway()).expect("mount");
	let entries = source.get(&"InternetGatewayDevice.".parse().expect("path")).expect("get");
	let writable: Vec<_> = entries.into_iter().filter(|entry| entry.writable).collect();
	let xml = ParameterList::from_entries(&writable).to_xml().expect("encode");

	let mut target = populated_gateway();
	let wan = target.wan_devices.get_mut(1).expect("row");
	let connection_device = wan.connection_devices.get_mut(1).expect("row");
	let connection = connection_device.ip_connections.get_mut(1).expect("row");
	connection.enable = false;
	for (_, mapping) in connection.port_mappings.iter_mut() {
		*mapping = PortMapping::default();
	}
	target.device_info.manufacturer = Some("Acme".into());
	let mut target = Mount::at_schema_path(target).expect("mount");

	let list = ParameterList::from_xml(&xml).expect("decode");
	assert_eq!(list.apply(&mut target).expect("apply"), writable.len());
	assert_eq!(target.node(), source.node());
}

#[test]
fn wifi_profile_reference_resolves() {
	let mut device = Device::default();
	let mut end_point = WiFiEndPoint::default();
	let profile = end_point
		.profiles
		.push(WiFiEndPointProfile {
			ssid: Some("office".into()),
			priority: 2,
			..WiFiEndPointProfile::default()
		})
		.expect("row added");
	end_point.profile_reference =
		cwmp_model::Reference::new(format!("Device.WiFi.EndPoint.1.Profile.{profile}."));
	device.wifi.end_points.push(end_point).expect("row added");

	let mount = Mount::at_schema_path(device)
		.expect("mount")
		.with_config(ModelConfig { include_unset: true, ..ModelConfig::default() });
	let end_point = mount.node().wifi.end_points.get(1).expect("row");
	let target = end_point.profile_reference.resolve(&mount).expect("resolves").expect("set");
	assert_eq!(target.priority, 2);
	assert_eq!(target.ssid.as_deref(), Some("office"));
}
