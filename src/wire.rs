//! The CWMP `ParameterList` XML shape used by `GetParameterValuesResponse`
//! and `SetParameterValues`.
//!
//! Only the list itself is encoded here; the SOAP envelope and the RPC around
//! it belong to the protocol engine.

use quick_xml::{
	Reader,
	events::{BytesStart, Event},
};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt as _, ResultExt as _, Snafu};
use tracing::instrument;

use crate::{
	object::ModelObject,
	path::{ParameterPath, PathError},
	tree::{Mount, ParameterEntry, TreeError},
	value::{ParamType, ParameterValue, ValueError},
};

/// `<ParameterList soap-enc:arrayType="cwmp:ParameterValueStruct[n]">`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename = "ParameterList")]
pub struct ParameterList {
	#[serde(rename = "@soap-enc:arrayType", alias = "@arrayType", default)]
	pub array_type: String,
	#[serde(rename = "ParameterValueStruct", default)]
	pub parameters: Vec<ParameterValueStruct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValueStruct {
	#[serde(rename = "Name")]
	pub name: String,
	#[serde(rename = "Value")]
	pub value: TypedValue,
}

/// `<Value xsi:type="xsd:unsignedInt">8080</Value>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
	#[serde(rename = "@xsi:type", alias = "@type")]
	pub xsi_type: String,
	#[serde(rename = "$text", default)]
	pub text: String,
}

impl ParameterValueStruct {
	const fn empty() -> Self {
		Self {
			name: String::new(),
			value: TypedValue { xsi_type: String::new(), text: String::new() },
		}
	}

	#[must_use]
	pub fn new(path: &ParameterPath, value: &ParameterValue) -> Self {
		Self {
			name: path.to_string(),
			value: TypedValue {
				xsi_type: value.ty().xsd_type().to_owned(),
				text: value.to_string(),
			},
		}
	}

	/// An unset parameter is sent as an empty value of its type.
	#[must_use]
	pub fn from_entry(entry: &ParameterEntry) -> Self {
		match &entry.value {
			Some(value) => Self::new(&entry.path, value),
			None => Self {
				name: entry.path.to_string(),
				value: TypedValue { xsi_type: entry.ty.xsd_type().to_owned(), text: String::new() },
			},
		}
	}

	/// Parse the name and value. An empty non-string value decodes as unset.
	pub fn decode(&self) -> Result<(ParameterPath, Option<ParameterValue>), WireError> {
		let path = self.name.parse().context(Path { name: self.name.as_str() })?;
		let ty = ParamType::from_xsd_type(&self.value.xsi_type)
			.context(UnknownType {
				name: self.name.as_str(),
				xsi_type: self.value.xsi_type.as_str(),
			})?;
		if self.value.text.is_empty() && ty != ParamType::String {
			return Ok((path, None));
		}
		let value = ParameterValue::parse(ty, &self.value.text)
			.context(Value { name: self.name.as_str() })?;
		Ok((path, Some(value)))
	}
}

impl ParameterList {
	#[must_use]
	pub fn new(parameters: Vec<ParameterValueStruct>) -> Self {
		Self { array_type: array_type(parameters.len()), parameters }
	}

	/// An empty list for a `<ParameterList>` start tag.
	fn opened(element: &BytesStart<'_>) -> Result<Self, WireError> {
		let array_type = attribute(element, b"arrayType")?.unwrap_or_default();
		Ok(Self { array_type, parameters: Vec::new() })
	}

	#[must_use]
	pub fn from_entries(entries: &[ParameterEntry]) -> Self {
		Self::new(entries.iter().map(ParameterValueStruct::from_entry).collect())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.parameters.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.parameters.is_empty()
	}

	pub fn push(&mut self, path: &ParameterPath, value: &ParameterValue) {
		self.parameters.push(ParameterValueStruct::new(path, value));
		self.array_type = array_type(self.parameters.len());
	}

	#[instrument(level = "debug", skip(self), fields(count = self.parameters.len()))]
	pub fn to_xml(&self) -> Result<String, WireError> {
		quick_xml::se::to_string(self).map_err(|e| Encode { message: e.to_string() }.build())
	}

	/// Read a `ParameterList` element. Text is kept exactly as sent, so
	/// string values keep their surrounding whitespace.
	#[instrument(level = "debug", skip(xml))]
	pub fn from_xml(xml: &str) -> Result<Self, WireError> {
		let mut reader = Reader::from_str(xml);
		reader.config_mut().trim_text(false);

		let mut list: Option<Self> = None;
		let mut current: Option<ParameterValueStruct> = None;
		let mut field: Option<Field> = None;
		loop {
			match reader.read_event().context(Decode)? {
				Event::Start(element) => {
					let name = element.local_name();
					match name.as_ref() {
						b"ParameterList" => {
							list = Some(Self::opened(&element)?);
						}
						b"ParameterValueStruct" => current = Some(ParameterValueStruct::empty()),
						b"Name" => field = Some(Field::Name),
						b"Value" => {
							let value = current.as_mut().context(Malformed { element: "Value" })?;
							value.value.xsi_type = xsi_type_of(&element)?;
							field = Some(Field::Value);
						}
						_ => {}
					}
				}
				Event::Empty(element) => {
					let name = element.local_name();
					match name.as_ref() {
						b"ParameterList" => {
							list = Some(Self::opened(&element)?);
						}
						b"Value" => {
							let value = current.as_mut().context(Malformed { element: "Value" })?;
							value.value.xsi_type = xsi_type_of(&element)?;
						}
						_ => {}
					}
				}
				Event::Text(text) => {
					if let Some(field) = field {
						let text = text.unescape().context(Decode)?;
						let value =
							current.as_mut().context(Malformed { element: field.element() })?;
						field.target(value).push_str(&text);
					}
				}
				Event::CData(data) => {
					if let Some(field) = field {
						let text = data.decode().map_err(quick_xml::Error::from).context(Decode)?;
						let value =
							current.as_mut().context(Malformed { element: field.element() })?;
						field.target(value).push_str(&text);
					}
				}
				Event::End(element) => {
					let name = element.local_name();
					match name.as_ref() {
						b"Name" | b"Value" => field = None,
						b"ParameterValueStruct" => {
							let element = "ParameterValueStruct";
							let parameter = current.take().context(Malformed { element })?;
							let list = list.as_mut().context(Malformed { element })?;
							list.parameters.push(parameter);
						}
						_ => {}
					}
				}
				Event::Eof => break,
				_ => {}
			}
		}
		list.context(Malformed { element: "ParameterList" })
	}

	/// Decode every entry, stopping at the first malformed one.
	pub fn decode(&self) -> Result<Vec<(ParameterPath, Option<ParameterValue>)>, WireError> {
		self.parameters.iter().map(ParameterValueStruct::decode).collect()
	}

	/// Write every set value into `mount` through its checked
	/// [`Mount::set`], in list order. Unset entries are skipped. Either every
	/// entry is applied or, on the first failure, `mount` is left unchanged.
	#[instrument(level = "debug", skip_all, fields(count = self.parameters.len()))]
	pub fn apply<N: ModelObject>(&self, mount: &mut Mount<N>) -> Result<usize, WireError> {
		let mut staged = mount.clone();
		let mut applied = 0;
		for (path, value) in self.decode()? {
			if let Some(value) = value {
				staged.set(&path, value).context(Apply)?;
				applied += 1;
			}
		}
		*mount = staged;
		Ok(applied)
	}
}

fn array_type(len: usize) -> String {
	format!("cwmp:ParameterValueStruct[{len}]")
}

/// The element whose text is being read.
#[derive(Debug, Clone, Copy)]
enum Field {
	Name,
	Value,
}

impl Field {
	const fn element(self) -> &'static str {
		match self {
			Self::Name => "Name",
			Self::Value => "Value",
		}
	}

	fn target(self, parameter: &mut ParameterValueStruct) -> &mut String {
		match self {
			Self::Name => &mut parameter.name,
			Self::Value => &mut parameter.value.text,
		}
	}
}

/// Value of the attribute with the given local name, ignoring its prefix.
fn attribute(element: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>, WireError> {
	for attribute in element.attributes() {
		let attribute = attribute.map_err(quick_xml::Error::from).context(Decode)?;
		if attribute.key.local_name().as_ref() == local_name {
			return Ok(Some(attribute.unescape_value().context(Decode)?.into_owned()));
		}
	}
	Ok(None)
}


fn xsi_type_of(element: &BytesStart<'_>) -> Result<String, WireError> {
	attribute(element, b"type")?.context(Malformed { element: "Value" })
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum WireError {
	#[snafu(display("Cannot encode the parameter list: {message}"))]
	Encode { message: String },
	#[snafu(display("Cannot decode the parameter list"))]
	Decode { source: quick_xml::Error },
	#[snafu(display("Misplaced or incomplete <{element}> in the parameter list"))]
	Malformed { element: String },
	#[snafu(display("Invalid parameter name {name:?}"))]
	Path { name: String, source: PathError },
	#[snafu(display("Parameter {name} has the unknown type {xsi_type:?}"))]
	UnknownType { name: String, xsi_type: String },
	#[snafu(display("Cannot parse the value of {name}"))]
	Value { name: String, source: ValueError },
	#[snafu(display("Cannot apply the parameter list"))]
	Apply { source: TreeError },
}

#[cfg(test)]
mod tests {
	use super::*;

	const LIST: &str = r#"
<ParameterList soap-enc:arrayType="cwmp:ParameterValueStruct[3]">
	<ParameterValueStruct>
		<Name>Device.WiFi.EndPoint.1.Profile.1.Priority</Name>
		<Value xsi:type="xsd:unsignedInt">7</Value>
	</ParameterValueStruct>
	<ParameterValueStruct>
		<Name>Device.WiFi.EndPoint.1.Enable</Name>
		<Value xsi:type="xsd:boolean">1</Value>
	</ParameterValueStruct>
	<ParameterValueStruct>
		<Name>Device.WiFi.EndPoint.1.Profile.1.Alias</Name>
		<Value xsi:type="xsd:string"></Value>
	</ParameterValueStruct>
</ParameterList>"#;

	#[test]
	fn test_decode_parameter_list() {
		let list = ParameterList::from_xml(LIST).unwrap();
		assert_eq!(list.array_type, "cwmp:ParameterValueStruct[3]");
		assert_eq!(list.len(), 3);

		let decoded = list.decode().unwrap();
		assert_eq!(decoded[0].0.to_string(), "Device.WiFi.EndPoint.1.Profile.1.Priority");
		assert_eq!(decoded[0].1, Some(ParameterValue::UnsignedInt(7)));
		assert_eq!(decoded[1].1, Some(ParameterValue::Boolean(true)));
		assert_eq!(decoded[2].1, Some(ParameterValue::String(String::new())));
	}

	#[test]
	fn test_encode_then_decode() {
		let mut list = ParameterList::default();
		let port: ParameterPath = "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.\
			WANIPConnection.1.PortMapping.1.ExternalPort"
			.parse()
			.unwrap();
		list.push(&port, &ParameterValue::UnsignedInt(8080));
		let key: ParameterPath = "Device.WiFi.EndPoint.1.Security.Certificate".parse().unwrap();
		list.push(&key, &ParameterValue::Base64(b"pem".to_vec()));

		let xml = list.to_xml().unwrap();
		assert!(xml.starts_with("<ParameterList"));
		assert!(xml.contains(r#"soap-enc:arrayType="cwmp:ParameterValueStruct[2]""#));
		assert!(xml.contains(r#"<Value xsi:type="xsd:unsignedInt">8080</Value>"#));
		assert!(xml.contains("cGVt"));

		let back = ParameterList::from_xml(&xml).unwrap();
		assert_eq!(back, list);
	}

	#[test]
	fn test_string_whitespace_survives() {
		let mut list = ParameterList::default();
		let description: ParameterPath =
			"InternetGatewayDevice.DeviceInfo.ProvisioningCode".parse().unwrap();
		list.push(&description, &ParameterValue::String("  a b  ".into()));
		list.push(&description, &ParameterValue::String("x < y & z".into()));

		let back = ParameterList::from_xml(&list.to_xml().unwrap()).unwrap();
		assert_eq!(back, list);
		assert_eq!(back.decode().unwrap()[0].1, Some(ParameterValue::String("  a b  ".into())));

		// Padding around non-string values is still ignored.
		let padded = r#"<ParameterList soap-enc:arrayType="cwmp:ParameterValueStruct[1]">
			<ParameterValueStruct>
				<Name>Device.WiFi.EndPoint.1.Profile.1.Priority</Name>
				<Value xsi:type="xsd:unsignedInt"> 7 </Value>
			</ParameterValueStruct>
		</ParameterList>"#;
		let decoded = ParameterList::from_xml(padded).unwrap().decode().unwrap();
		assert_eq!(decoded[0].1, Some(ParameterValue::UnsignedInt(7)));
	}

	#[test]
	fn test_malformed_list() {
		assert!(matches!(
			ParameterList::from_xml("<Other/>"),
			Err(WireError::Malformed { element }) if element == "ParameterList"
		));
		let untyped = "<ParameterList><ParameterValueStruct>\
			<Name>A.B</Name><Value>1</Value>\
			</ParameterValueStruct></ParameterList>";
		assert!(matches!(ParameterList::from_xml(untyped), Err(WireError::Malformed { .. })));
		assert!(matches!(
			ParameterList::from_xml("<ParameterList></Other>"),
			Err(WireError::Decode { .. })
		));
	}

	#[test]
	fn test_failed_apply_leaves_mount_unchanged() {
		use crate::model::tr098::{
			InternetGatewayDevice, PortMapping, WANConnectionDevice, WANDevice, WANIPConnection,
		};

		let mut connection = WANIPConnection::default();
		connection.port_mappings.push(PortMapping::default()).unwrap();
		let mut connection_device = WANConnectionDevice::default();
		connection_device.ip_connections.push(connection).unwrap();
		let mut wan = WANDevice::default();
		wan.connection_devices.push(connection_device).unwrap();
		let mut gateway = InternetGatewayDevice::default();
		gateway.wan_devices.push(wan).unwrap();
		let mut mount = Mount::at_schema_path(gateway).unwrap();
		let before = mount.clone();

		let row = "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.\
			WANIPConnection.1.PortMapping.1.";
		let external: ParameterPath = format!("{row}ExternalPort").parse().unwrap();
		let internal: ParameterPath = format!("{row}InternalPort").parse().unwrap();
		let mut list = ParameterList::default();
		list.push(&external, &ParameterValue::UnsignedInt(8080));
		list.push(&internal, &ParameterValue::UnsignedInt(70000));

		assert!(matches!(
			list.apply(&mut mount),
			Err(WireError::Apply { source: TreeError::Validation { .. } })
		));
		assert_eq!(mount, before);

		list.parameters.pop();
		list.push(&internal, &ParameterValue::UnsignedInt(80));
		assert_eq!(list.apply(&mut mount).unwrap(), 2);
		let wan = mount.node().wan_devices.get(1).unwrap();
		let connection = wan.connection_devices.get(1).unwrap().ip_connections.get(1).unwrap();
		let mapping = connection.port_mappings.get(1).unwrap();
		assert_eq!(mapping.external_port, 8080);
		assert_eq!(mapping.internal_port, Some(80));
	}

	#[test]
	fn test_decode_errors() {
		let bad_type = ParameterValueStruct {
			name: "Device.WiFi.RadioNumberOfEntries".into(),
			value: TypedValue { xsi_type: "xsd:float".into(), text: "1.5".into() },
		};
		assert!(matches!(bad_type.decode(), Err(WireError::UnknownType { .. })));

		let bad_value = ParameterValueStruct {
			name: "Device.WiFi.RadioNumberOfEntries".into(),
			value: TypedValue { xsi_type: "xsd:unsignedInt".into(), text: "-1".into() },
		};
		assert!(matches!(bad_value.decode(), Err(WireError::Value { .. })));

		let unset = ParameterValueStruct {
			name: "Device.WiFi.RadioNumberOfEntries".into(),
			value: TypedValue { xsi_type: "xsd:unsignedInt".into(), text: String::new() },
		};
		assert_eq!(unset.decode().unwrap().1, None);
	}
}
