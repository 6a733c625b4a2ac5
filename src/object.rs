//! Record traits and the declaration macro every record type is built with.

use std::{any::Any, fmt};

use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;
use time::OffsetDateTime;

use crate::{
	schema::ObjectSchema,
	table::TableError,
	value::{ParamType, ParameterValue, ValueError},
};

/// Object-safe view of a record: parameter access by wire name and navigation
/// to nested objects and table rows.
///
/// Implementations are generated by [`cwmp_object!`](crate::cwmp_object).
pub trait ObjectNode: fmt::Debug + Send + Sync {
	fn object_schema(&self) -> &'static ObjectSchema;

	/// Read a parameter. `Ok(None)` means the parameter is unset.
	fn parameter(&self, name: &str) -> Result<Option<ParameterValue>, ObjectError>;

	/// Write a parameter, converting the value to the field's type.
	///
	/// Access rights and constraints are not checked here; see
	/// [`Mount::set`](crate::tree::Mount::set) for the checked path.
	fn store(&mut self, name: &str, value: ParameterValue) -> Result<(), ObjectError>;

	/// Conditional mutability: whether `name` may be written in the object's
	/// current state.
	fn guard(&self, _name: &str) -> Result<(), ObjectError> {
		Ok(())
	}

	/// The row alias, for objects that live in a table.
	fn alias(&self) -> Option<&str> {
		None
	}

	fn child(&self, name: &str) -> Option<&dyn ObjectNode>;

	fn child_mut(&mut self, name: &str) -> Option<&mut dyn ObjectNode>;

	/// The rows of the table `table`, in instance order.
	fn rows(&self, table: &str) -> Option<Vec<(u32, &dyn ObjectNode)>>;

	fn row_mut(&mut self, table: &str, instance: u32) -> Option<&mut dyn ObjectNode>;

	/// Append a default row to `table`. `None` if there is no such table.
	fn add_row(&mut self, table: &str) -> Option<Result<u32, TableError>>;

	/// Remove a row from `table`. `None` if there is no such table.
	fn remove_row(&mut self, table: &str, instance: u32) -> Option<bool>;

	fn as_any(&self) -> &dyn Any;
}

/// A concrete record type with its static schema.
pub trait ModelObject:
	ObjectNode + Default + Clone + PartialEq + Serialize + DeserializeOwned + 'static
{
	const SCHEMA: &'static ObjectSchema;

	/// Function form of [`ModelObject::SCHEMA`], used by child schema links.
	#[must_use]
	fn schema() -> &'static ObjectSchema {
		Self::SCHEMA
	}
}

/// Conversion between a Rust field type and a [`ParameterValue`] of the
/// declared [`ParamType`].
pub trait LeafValue: Sized {
	/// `None` when the field is unset.
	fn to_value(&self, ty: ParamType) -> Option<ParameterValue>;

	fn from_value(value: ParameterValue, ty: ParamType) -> Result<Self, ValueError>;
}

impl LeafValue for String {
	fn to_value(&self, _ty: ParamType) -> Option<ParameterValue> {
		Some(ParameterValue::String(self.clone()))
	}

	fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
		value.try_into()
	}
}

impl LeafValue for bool {
	fn to_value(&self, _ty: ParamType) -> Option<ParameterValue> {
		Some(ParameterValue::Boolean(*self))
	}

	fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
		value.try_into()
	}
}

impl LeafValue for OffsetDateTime {
	fn to_value(&self, _ty: ParamType) -> Option<ParameterValue> {
		Some(ParameterValue::DateTime(*self))
	}

	fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
		value.try_into()
	}
}

impl LeafValue for Vec<u8> {
	fn to_value(&self, ty: ParamType) -> Option<ParameterValue> {
		Some(match ty {
			ParamType::HexBinary => ParameterValue::HexBinary(self.clone()),
			_ => ParameterValue::Base64(self.clone()),
		})
	}

	fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
		value.try_into()
	}
}

macro_rules! integer_leaf_value {
	($($int:ty),*) => {
		$(
			impl LeafValue for $int {
				fn to_value(&self, ty: ParamType) -> Option<ParameterValue> {
					ParameterValue::from_integer(ty, *self)
				}

				fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
					value.integer()
				}
			}
		)*
	};
}

integer_leaf_value!(i32, u32, i64, u64);

impl<T: LeafValue> LeafValue for Option<T> {
	fn to_value(&self, ty: ParamType) -> Option<ParameterValue> {
		self.as_ref().and_then(|value| value.to_value(ty))
	}

	fn from_value(value: ParameterValue, ty: ParamType) -> Result<Self, ValueError> {
		T::from_value(value, ty).map(Some)
	}
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum ObjectError {
	#[snafu(display("{object} has no parameter {name}"))]
	UnknownParameter { object: String, name: String },
	#[snafu(display("Cannot store {name}"))]
	Conversion { name: String, source: ValueError },
	#[snafu(display("{name} is derived from the table contents and cannot be written"))]
	Derived { name: String },
	#[snafu(display("{name} cannot be changed: {reason}"))]
	Locked { name: String, reason: String },
}

/// Declare a CWMP record type.
///
/// ```ignore
/// cwmp_object! {
///     /// Port forwarding rule.
///     pub struct PortMapping => "…WANIPConnection.{i}.PortMapping.{i}.", RW {
///         params {
///             port_mapping_enabled: bool => "PortMappingEnabled", RW Boolean = false;
///             external_port: u32 => "ExternalPort", RW UnsignedInt, range 0..=65535;
///         }
///     }
/// }
/// ```
///
/// Each parameter line reads `field: Type => "WireName", ACCESS ParamType`
/// followed by optional `, units "…"`, `, max_len N`, `, range MIN..=MAX`,
/// `, one_of [..]` and `= default`, in that order. Parameters without a default
/// start at `Default::default()`.
///
/// The optional `objects { .. }` block declares single nested objects, the
/// optional `tables { .. }` block declares multi-instance tables, each with an
/// optional derived `count "XNumberOfEntries"` parameter. `alias field;` names
/// the row alias field and `guard path;` installs a conditional-mutability
/// check.
#[macro_export]
macro_rules! cwmp_object {
	(
		$(#[$meta:meta])*
		pub struct $name:ident => $path:literal $(, $object_access:ident)? {
			$(alias $alias_field:ident;)?
			$(guard $guard:path;)?
			params {
				$(
					$(#[$pmeta:meta])*
					$field:ident : $fty:ty => $wire:literal, $access:ident $ptype:ident
					$(, units $units:literal)?
					$(, max_len $max_len:literal)?
					$(, range $min:literal ..= $max:literal)?
					$(, one_of [$($allowed:literal),* $(,)?])?
					$(= $default:expr)?;
				)*
			}
			$(objects {
				$(
					$(#[$ometa:meta])*
					$child:ident : $cty:ty => $cwire:literal;
				)*
			})?
			$(tables {
				$(
					$(#[$tmeta:meta])*
					$rows:ident : $rty:ty => $twire:literal $(, count $count_wire:literal)?;
				)*
			})?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
		#[serde(default)]
		pub struct $name {
			$(
				$(#[$pmeta])*
				#[serde(rename = $wire)]
				pub $field: $fty,
			)*
			$($(
				$(#[$ometa])*
				#[serde(rename = $cwire)]
				pub $child: $cty,
			)*)?
			$($(
				$(#[$tmeta])*
				#[serde(rename = $twire)]
				pub $rows: $crate::table::Table<$rty>,
			)*)?
		}

		impl ::core::default::Default for $name {
			fn default() -> Self {
				Self {
					$($field: $crate::__cwmp_default!($($default)?),)*
					$($($child: ::core::default::Default::default(),)*)?
					$($($rows: $crate::table::Table::new(),)*)?
				}
			}
		}

		impl $crate::object::ModelObject for $name {
			const SCHEMA: &'static $crate::schema::ObjectSchema = &$crate::schema::ObjectSchema {
				path: $path,
				access: $crate::__cwmp_access!($($object_access)?),
				parameters: &[
					$(
						$crate::schema::ParameterSchema {
							name: $wire,
							ty: $crate::value::ParamType::$ptype,
							access: $crate::schema::Access::$access,
							units: $crate::__cwmp_option!($($units)?),
							constraints: &[
								$($crate::schema::Constraint::MaxLength($max_len),)?
								$($crate::schema::Constraint::Range { min: $min, max: $max },)?
								$($crate::schema::Constraint::Enumeration(&[$($allowed),*]),)?
							],
						},
					)*
					$($($(
						$crate::schema::ParameterSchema {
							name: $count_wire,
							ty: $crate::value::ParamType::UnsignedInt,
							access: $crate::schema::Access::ReadOnly,
							units: None,
							constraints: &[],
						},
					)?)*)?
				],
				children: &[
					$($(
						$crate::schema::ChildSchema {
							name: $cwire,
							table: false,
							schema: <$cty as $crate::object::ModelObject>::schema,
						},
					)*)?
					$($(
						$crate::schema::ChildSchema {
							name: $twire,
							table: true,
							schema: <$rty as $crate::object::ModelObject>::schema,
						},
					)*)?
				],
			};
		}

		#[allow(unused_variables)]
		impl $crate::object::ObjectNode for $name {
			fn object_schema(&self) -> &'static $crate::schema::ObjectSchema {
				<Self as $crate::object::ModelObject>::SCHEMA
			}

			fn parameter(
				&self,
				name: &str,
			) -> ::core::result::Result<
				::core::option::Option<$crate::value::ParameterValue>,
				$crate::object::ObjectError,
			> {
				match name {
					$(
						$wire => ::core::result::Result::Ok($crate::object::LeafValue::to_value(
							&self.$field,
							$crate::value::ParamType::$ptype,
						)),
					)*
					$($($(
						$count_wire => ::core::result::Result::Ok(::core::option::Option::Some(
							$crate::value::ParameterValue::UnsignedInt(self.$rows.count()),
						)),
					)?)*)?
					_ => $crate::object::UnknownParameter { object: $path, name }.fail(),
				}
			}

			fn store(
				&mut self,
				name: &str,
				value: $crate::value::ParameterValue,
			) -> ::core::result::Result<(), $crate::object::ObjectError> {
				match name {
					$(
						$wire => {
							self.$field = ::snafu::ResultExt::context(
								$crate::object::LeafValue::from_value(
									value,
									$crate::value::ParamType::$ptype,
								),
								$crate::object::Conversion { name: $wire },
							)?;
							::core::result::Result::Ok(())
						}
					)*
					$($($(
						$count_wire => $crate::object::Derived { name: $count_wire }.fail(),
					)?)*)?
					_ => $crate::object::UnknownParameter { object: $path, name }.fail(),
				}
			}

			$(
				fn guard(
					&self,
					name: &str,
				) -> ::core::result::Result<(), $crate::object::ObjectError> {
					$guard(self, name)
				}
			)?

			$(
				fn alias(&self) -> ::core::option::Option<&str> {
					self.$alias_field.as_deref()
				}
			)?

			fn child(&self, name: &str) -> ::core::option::Option<&dyn $crate::object::ObjectNode> {
				match name {
					$($($cwire => ::core::option::Option::Some(&self.$child),)*)?
					_ => ::core::option::Option::None,
				}
			}

			fn child_mut(
				&mut self,
				name: &str,
			) -> ::core::option::Option<&mut dyn $crate::object::ObjectNode> {
				match name {
					$($($cwire => ::core::option::Option::Some(&mut self.$child),)*)?
					_ => ::core::option::Option::None,
				}
			}

			fn rows(
				&self,
				table: &str,
			) -> ::core::option::Option<::std::vec::Vec<(u32, &dyn $crate::object::ObjectNode)>> {
				match table {
					$($(
						$twire => ::core::option::Option::Some(
							self.$rows
								.iter()
								.map(|(instance, row)| {
									(instance, row as &dyn $crate::object::ObjectNode)
								})
								.collect(),
						),
					)*)?
					_ => ::core::option::Option::None,
				}
			}

			fn row_mut(
				&mut self,
				table: &str,
				instance: u32,
			) -> ::core::option::Option<&mut dyn $crate::object::ObjectNode> {
				match table {
					$($(
						$twire => self.$rows
							.get_mut(instance)
							.map(|row| row as &mut dyn $crate::object::ObjectNode),
					)*)?
					_ => ::core::option::Option::None,
				}
			}

			fn add_row(
				&mut self,
				table: &str,
			) -> ::core::option::Option<::core::result::Result<u32, $crate::table::TableError>> {
				match table {
					$($($twire => ::core::option::Option::Some(
						self.$rows.push(::core::default::Default::default()),
					),)*)?
					_ => ::core::option::Option::None,
				}
			}

			fn remove_row(&mut self, table: &str, instance: u32) -> ::core::option::Option<bool> {
				match table {
					$($($twire => {
						::core::option::Option::Some(self.$rows.remove(instance).is_some())
					})*)?
					_ => ::core::option::Option::None,
				}
			}

			fn as_any(&self) -> &dyn ::core::any::Any {
				self
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __cwmp_default {
	() => {
		::core::default::Default::default()
	};
	($default:expr) => {
		$default
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __cwmp_option {
	() => {
		::core::option::Option::None
	};
	($value:expr) => {
		::core::option::Option::Some($value)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __cwmp_access {
	() => {
		$crate::schema::Access::ReadOnly
	};
	($access:ident) => {
		$crate::schema::Access::$access
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{schema::Access, table::Table};

	fn locked_when_enabled(gadget: &Gadget, name: &str) -> Result<(), ObjectError> {
		if gadget.enable && name == "Label" {
			return Locked { name, reason: "Gadget is enabled" }.fail();
		}
		Ok(())
	}

	crate::cwmp_object! {
		/// Test record.
		pub struct Gadget => "Test.Gadget.{i}.", RW {
			alias alias;
			guard locked_when_enabled;
			params {
				enable: bool => "Enable", RW Boolean = false;
				alias: Option<String> => "Alias", RW String, max_len 64;
				label: String => "Label", RW String, max_len 8 = "none".into();
				level: i32 => "Level", RW Int, units "dB", range -10..=10 = -1;
				mode: Option<String> => "Mode", RW String, one_of ["Fast", "Slow"];
				seen: Option<OffsetDateTime> => "Seen", R DateTime;
				key: Vec<u8> => "Key", RW HexBinary, max_len 4;
			}
			objects {
				stats: GadgetStats => "Stats";
			}
			tables {
				parts: Part => "Part", count "PartNumberOfEntries";
			}
		}
	}

	crate::cwmp_object! {
		pub struct GadgetStats => "Test.Gadget.{i}.Stats." {
			params {
				bytes: u64 => "Bytes", R UnsignedLong;
			}
		}
	}

	crate::cwmp_object! {
		pub struct Part => "Test.Gadget.{i}.Part.{i}.", RW {
			params {
				serial: Option<String> => "Serial", RW String;
			}
		}
	}

	#[test]
	fn test_declared_defaults() {
		let gadget = Gadget::default();
		assert!(!gadget.enable);
		assert_eq!(gadget.label, "none");
		assert_eq!(gadget.level, -1);
		assert_eq!(gadget.alias, None);
		assert!(gadget.key.is_empty());
		assert!(gadget.parts.is_empty());
		assert_eq!(gadget.stats, GadgetStats::default());
	}

	#[test]
	fn test_generated_schema() {
		let schema = Gadget::SCHEMA;
		assert_eq!(schema.path, "Test.Gadget.{i}.");
		assert_eq!(schema.access, Access::ReadWrite);
		assert_eq!(schema.name(), "Gadget");

		let level = schema.parameter("Level").unwrap();
		assert_eq!(level.ty, ParamType::Int);
		assert_eq!(level.units, Some("dB"));
		assert_eq!(level.range(), Some((-10, 10)));

		let count = schema.parameter("PartNumberOfEntries").unwrap();
		assert_eq!(count.access, Access::ReadOnly);

		assert_eq!(schema.children.len(), 2);
		assert!(!schema.child("Stats").unwrap().table);
		assert_eq!((schema.child("Part").unwrap().schema)().path, "Test.Gadget.{i}.Part.{i}.");
		assert_eq!(GadgetStats::SCHEMA.access, Access::ReadOnly);
	}

	#[test]
	fn test_parameter_access_by_wire_name() {
		let mut gadget = Gadget::default();
		assert_eq!(gadget.parameter("Mode").unwrap(), None);
		assert_eq!(gadget.parameter("Level").unwrap(), Some(ParameterValue::Int(-1)));

		gadget.store("Mode", "Fast".into()).unwrap();
		gadget.store("Level", ParameterValue::UnsignedInt(7)).unwrap();
		gadget.store("Key", ParameterValue::HexBinary(vec![0xab])).unwrap();
		assert_eq!(gadget.mode.as_deref(), Some("Fast"));
		assert_eq!(gadget.level, 7);
		assert_eq!(gadget.parameter("Key").unwrap(), Some(ParameterValue::HexBinary(vec![0xab])));

		assert!(matches!(
			gadget.store("Level", ParameterValue::Boolean(true)),
			Err(ObjectError::Conversion { .. })
		));
		assert!(matches!(gadget.parameter("Nope"), Err(ObjectError::UnknownParameter { .. })));
	}

	#[test]
	fn test_derived_count() {
		let mut gadget = Gadget::default();
		gadget.parts.push(Part::default()).unwrap();
		gadget.parts.push(Part::default()).unwrap();
		assert_eq!(
			gadget.parameter("PartNumberOfEntries").unwrap(),
			Some(ParameterValue::UnsignedInt(2))
		);
		assert!(matches!(
			gadget.store("PartNumberOfEntries", ParameterValue::UnsignedInt(5)),
			Err(ObjectError::Derived { .. })
		));
	}

	#[test]
	fn test_navigation() {
		let mut gadget = Gadget::default();
		assert_eq!(gadget.add_row("Part").unwrap().unwrap(), 1);
		assert!(gadget.add_row("Stats").is_none());
		assert!(gadget.child("Stats").is_some());
		assert!(gadget.child("Part").is_none());

		let row = gadget.row_mut("Part", 1).unwrap();
		row.store("Serial", "S1".into()).unwrap();
		assert_eq!(gadget.parts.get(1).unwrap().serial.as_deref(), Some("S1"));

		let rows = gadget.rows("Part").unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].0, 1);
		assert_eq!(gadget.remove_row("Part", 1), Some(true));
		assert_eq!(gadget.remove_row("Part", 1), Some(false));
	}

	#[test]
	fn test_guard_and_alias() {
		let mut gadget = Gadget { alias: Some("front".to_owned()), ..Gadget::default() };
		assert_eq!(ObjectNode::alias(&gadget), Some("front"));
		assert!(gadget.guard("Label").is_ok());
		gadget.enable = true;
		assert!(matches!(gadget.guard("Label"), Err(ObjectError::Locked { .. })));
		assert!(gadget.guard("Level").is_ok());

		let mut table = Table::new();
		table.push_unique(gadget.clone()).unwrap();
		assert!(table.push_unique(gadget).is_err());
		assert_eq!(table.instance_of("front").unwrap(), 1);
	}

	#[test]
	fn test_serde_uses_wire_names() {
		let mut gadget = Gadget { label: "x".into(), ..Gadget::default() };
		gadget.parts.insert(4, Part { serial: Some("S4".into()) }).unwrap();
		let json = serde_json::to_value(&gadget).unwrap();
		assert_eq!(json["Label"], "x");
		assert_eq!(json["Part"]["4"]["Serial"], "S4");
		assert!(json.get("PartNumberOfEntries").is_none());

		let back: Gadget = serde_json::from_value(json).unwrap();
		assert_eq!(back, gadget);
	}
}
