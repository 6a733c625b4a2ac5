//! Static metadata describing CWMP objects and parameters.
//!
//! Every record type declared with [`cwmp_object!`](crate::cwmp_object) carries
//! one [`ObjectSchema`]. Nothing here is discovered at runtime: the tables are
//! `'static` data that a protocol engine consults explicitly.

use std::fmt;

use serde::Serialize;
use snafu::{ResultExt as _, Snafu, ensure};

use crate::value::{ParamType, ParameterValue, ValueError};

pub mod registry;

/// Access rights of a parameter or of a multi-instance object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Access {
	ReadOnly,
	ReadWrite,
}

impl Access {
	/// Short alias used in the declaration tables.
	pub const R: Self = Self::ReadOnly;
	/// Short alias used in the declaration tables.
	pub const RW: Self = Self::ReadWrite;

	#[must_use]
	pub const fn is_writable(self) -> bool {
		matches!(self, Self::ReadWrite)
	}
}

impl fmt::Display for Access {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::ReadOnly => "readOnly",
			Self::ReadWrite => "readWrite",
		})
	}
}

/// A validation constraint attached to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Constraint {
	/// Maximum length in characters (strings) or bytes (binary values).
	MaxLength(u32),
	/// Inclusive numeric range.
	Range { min: i128, max: i128 },
	/// The documented set of legal string values.
	Enumeration(&'static [&'static str]),
}

/// Metadata of one leaf parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSchema {
	/// Wire name, e.g. `ExternalPort`.
	pub name: &'static str,
	pub ty: ParamType,
	pub access: Access,
	pub units: Option<&'static str>,
	pub constraints: &'static [Constraint],
}

impl ParameterSchema {
	#[must_use]
	pub const fn is_writable(&self) -> bool {
		self.access.is_writable()
	}

	#[must_use]
	pub fn max_length(&self) -> Option<u32> {
		self.constraints.iter().find_map(|constraint| match constraint {
			Constraint::MaxLength(max) => Some(*max),
			_ => None,
		})
	}

	#[must_use]
	pub fn range(&self) -> Option<(i128, i128)> {
		self.constraints.iter().find_map(|constraint| match constraint {
			Constraint::Range { min, max } => Some((*min, *max)),
			_ => None,
		})
	}

	#[must_use]
	pub fn enumeration(&self) -> Option<&'static [&'static str]> {
		self.constraints.iter().find_map(|constraint| match constraint {
			Constraint::Enumeration(values) => Some(*values),
			_ => None,
		})
	}

	/// Check `value` against the declared type and constraints.
	///
	/// Integer values of a different width are accepted as long as they fall in
	/// the declared range; the record performs the narrowing when it stores them.
	pub fn validate(
		&self,
		value: &ParameterValue,
		strict_enumerations: bool,
	) -> Result<(), ValidationError> {
		ValueError::ensure_compatible(self.ty, value.ty()).context(WrongType { name: self.name })?;

		for constraint in self.constraints {
			match *constraint {
				Constraint::MaxLength(max) => {
					if let Some(len) = value.constrained_len() {
						ensure!(
							len <= max as usize,
							TooLong { name: self.name, max, len }
						);
					}
				}
				Constraint::Range { min, max } => {
					if let Some(number) = value.as_i128() {
						ensure!(
							(min..=max).contains(&number),
							OutOfRange { name: self.name, min, max, value: number }
						);
					}
				}
				Constraint::Enumeration(allowed) => {
					if let (true, ParameterValue::String(text)) = (strict_enumerations, value) {
						ensure!(
							allowed.contains(&text.as_str()),
							NotEnumerated { name: self.name, value: text.clone() }
						);
					}
				}
			}
		}
		Ok(())
	}
}

/// A nested object or table declared on a parent object.
#[derive(Clone, Copy)]
pub struct ChildSchema {
	/// Wire name of the child, e.g. `PortMapping`.
	pub name: &'static str,
	/// Whether the child is a multi-instance table.
	pub table: bool,
	pub schema: fn() -> &'static ObjectSchema,
}

impl fmt::Debug for ChildSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChildSchema")
			.field("name", &self.name)
			.field("table", &self.table)
			.field("path", &(self.schema)().path)
			.finish()
	}
}

/// Metadata of one object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectSchema {
	/// Path pattern, e.g. `Device.DHCPv4.Server.Pool.{i}.Client.{i}.`.
	pub path: &'static str,
	/// For table rows, whether rows can be created and deleted.
	pub access: Access,
	pub parameters: &'static [ParameterSchema],
	pub children: &'static [ChildSchema],
}

impl ObjectSchema {
	/// The last name segment of the path.
	#[must_use]
	pub fn name(&self) -> &'static str {
		self.path
			.trim_end_matches('.')
			.trim_end_matches("{i}")
			.trim_end_matches('.')
			.rsplit('.')
			.next()
			.unwrap_or(self.path)
	}

	/// Whether this object is a row of a multi-instance table.
	#[must_use]
	pub fn is_multi_instance(&self) -> bool {
		self.path.ends_with(".{i}.")
	}

	#[must_use]
	pub fn parameter(&self, name: &str) -> Option<&'static ParameterSchema> {
		self.parameters.iter().find(|parameter| parameter.name == name)
	}

	#[must_use]
	pub fn child(&self, name: &str) -> Option<&'static ChildSchema> {
		self.children.iter().find(|child| child.name == name)
	}
}

impl PartialEq for ObjectSchema {
	fn eq(&self, other: &Self) -> bool {
		self.path == other.path
	}
}

impl Eq for ObjectSchema {}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum ValidationError {
	#[snafu(display("Parameter {name} has the wrong type"))]
	WrongType { name: String, source: ValueError },
	#[snafu(display("Parameter {name} is limited to {max} but got {len}"))]
	TooLong { name: String, max: u32, len: usize },
	#[snafu(display("Parameter {name} must be within {min}..={max}, got {value}"))]
	OutOfRange { name: String, min: i128, max: i128, value: i128 },
	#[snafu(display("Parameter {name} does not allow the value {value:?}"))]
	NotEnumerated { name: String, value: String },
}
