//! CWMP primitive values and their lexical forms.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use num_traits::{NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt as _, ResultExt as _, Snafu, ensure};
use time::{
	OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
	macros::format_description,
};
use tracing::instrument;

/// The "unknown time" sentinel used by CWMP for dateTime parameters.
pub const UNKNOWN_TIME: &str = "0001-01-01T00:00:00Z";

/// The primitive data types a CWMP parameter can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamType {
	String,
	Int,
	UnsignedInt,
	Long,
	UnsignedLong,
	Boolean,
	DateTime,
	Base64,
	HexBinary,
}

impl ParamType {
	/// The `xsi:type` used for this type on the wire.
	#[must_use]
	pub const fn xsd_type(self) -> &'static str {
		match self {
			Self::String => "xsd:string",
			Self::Int => "xsd:int",
			Self::UnsignedInt => "xsd:unsignedInt",
			Self::Long => "xsd:long",
			Self::UnsignedLong => "xsd:unsignedLong",
			Self::Boolean => "xsd:boolean",
			Self::DateTime => "xsd:dateTime",
			Self::Base64 => "xsd:base64",
			Self::HexBinary => "xsd:hexBinary",
		}
	}

	/// Parse an `xsi:type` value, with or without its namespace prefix.
	#[must_use]
	pub fn from_xsd_type(value: &str) -> Option<Self> {
		let local = value.rsplit_once(':').map_or(value, |(_, local)| local);
		Some(match local {
			"string" => Self::String,
			"int" => Self::Int,
			"unsignedInt" => Self::UnsignedInt,
			"long" => Self::Long,
			"unsignedLong" => Self::UnsignedLong,
			"boolean" => Self::Boolean,
			"dateTime" => Self::DateTime,
			"base64" | "base64Binary" => Self::Base64,
			"hexBinary" => Self::HexBinary,
			_ => return None,
		})
	}

	/// Whether this is one of the four integer types.
	#[must_use]
	pub const fn is_integer(self) -> bool {
		matches!(self, Self::Int | Self::UnsignedInt | Self::Long | Self::UnsignedLong)
	}

	/// Whether this is one of the two binary types.
	#[must_use]
	pub const fn is_binary(self) -> bool {
		matches!(self, Self::Base64 | Self::HexBinary)
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.xsd_type().trim_start_matches("xsd:"))
	}
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterValue {
	String(String),
	Int(i32),
	UnsignedInt(u32),
	Long(i64),
	UnsignedLong(u64),
	Boolean(bool),
	DateTime(OffsetDateTime),
	Base64(Vec<u8>),
	HexBinary(Vec<u8>),
}

impl ParameterValue {
	/// The type of this value.
	#[must_use]
	pub const fn ty(&self) -> ParamType {
		match self {
			Self::String(_) => ParamType::String,
			Self::Int(_) => ParamType::Int,
			Self::UnsignedInt(_) => ParamType::UnsignedInt,
			Self::Long(_) => ParamType::Long,
			Self::UnsignedLong(_) => ParamType::UnsignedLong,
			Self::Boolean(_) => ParamType::Boolean,
			Self::DateTime(_) => ParamType::DateTime,
			Self::Base64(_) => ParamType::Base64,
			Self::HexBinary(_) => ParamType::HexBinary,
		}
	}

	/// Parse the lexical form of a value of type `ty`.
	#[instrument(level = "debug")]
	pub fn parse(ty: ParamType, text: &str) -> Result<Self, ValueError> {
		Ok(match ty {
			ParamType::String => Self::String(text.to_owned()),
			ParamType::Int => Self::Int(parse_number(ty, text)?),
			ParamType::UnsignedInt => Self::UnsignedInt(parse_number(ty, text)?),
			ParamType::Long => Self::Long(parse_number(ty, text)?),
			ParamType::UnsignedLong => Self::UnsignedLong(parse_number(ty, text)?),
			ParamType::Boolean => match text.trim() {
				"1" | "true" => Self::Boolean(true),
				"0" | "false" => Self::Boolean(false),
				_ => return Unparsable { ty, text }.fail(),
			},
			ParamType::DateTime => Self::DateTime(parse_date_time(text.trim())?),
			ParamType::Base64 => Self::Base64(STANDARD.decode(text.trim()).context(InvalidBase64)?),
			ParamType::HexBinary => Self::HexBinary(hex::decode(text.trim()).context(InvalidHex)?),
		})
	}

	/// Build an integer value of type `ty`, if `value` fits in it.
	pub fn from_integer<N: ToPrimitive>(ty: ParamType, value: N) -> Option<Self> {
		match ty {
			ParamType::Int => value.to_i32().map(Self::Int),
			ParamType::UnsignedInt => value.to_u32().map(Self::UnsignedInt),
			ParamType::Long => value.to_i64().map(Self::Long),
			ParamType::UnsignedLong => value.to_u64().map(Self::UnsignedLong),
			_ => None,
		}
	}

	/// Convert an integer value of any width into `N`.
	pub fn integer<N: NumCast>(&self) -> Result<N, ValueError> {
		let cast = match *self {
			Self::Int(value) => N::from(value),
			Self::UnsignedInt(value) => N::from(value),
			Self::Long(value) => N::from(value),
			Self::UnsignedLong(value) => N::from(value),
			_ => return NotAnInteger { found: self.ty() }.fail(),
		};
		cast.context(OutOfRange { value: self.to_string() })
	}

	/// The value as a wide integer, for range checks.
	#[must_use]
	pub fn as_i128(&self) -> Option<i128> {
		match *self {
			Self::Int(value) => Some(value.into()),
			Self::UnsignedInt(value) => Some(value.into()),
			Self::Long(value) => Some(value.into()),
			Self::UnsignedLong(value) => Some(value.into()),
			_ => None,
		}
	}

	/// Length used by max-length constraints: characters for strings, bytes for
	/// binary values.
	#[must_use]
	pub fn constrained_len(&self) -> Option<usize> {
		match self {
			Self::String(value) => Some(value.chars().count()),
			Self::Base64(value) | Self::HexBinary(value) => Some(value.len()),
			_ => None,
		}
	}
}

impl fmt::Display for ParameterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String(value) => f.write_str(value),
			Self::Int(value) => write!(f, "{value}"),
			Self::UnsignedInt(value) => write!(f, "{value}"),
			Self::Long(value) => write!(f, "{value}"),
			Self::UnsignedLong(value) => write!(f, "{value}"),
			Self::Boolean(value) => write!(f, "{value}"),
			Self::DateTime(value) => {
				f.write_str(&value.format(&Rfc3339).unwrap_or_else(|_| UNKNOWN_TIME.to_owned()))
			}
			Self::Base64(value) => f.write_str(&STANDARD.encode(value)),
			Self::HexBinary(value) => f.write_str(&hex::encode(value)),
		}
	}
}

impl From<String> for ParameterValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for ParameterValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<bool> for ParameterValue {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}

impl From<i32> for ParameterValue {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}

impl From<u32> for ParameterValue {
	fn from(value: u32) -> Self {
		Self::UnsignedInt(value)
	}
}

impl From<i64> for ParameterValue {
	fn from(value: i64) -> Self {
		Self::Long(value)
	}
}

impl From<u64> for ParameterValue {
	fn from(value: u64) -> Self {
		Self::UnsignedLong(value)
	}
}

impl From<OffsetDateTime> for ParameterValue {
	fn from(value: OffsetDateTime) -> Self {
		Self::DateTime(value)
	}
}

impl TryFrom<ParameterValue> for String {
	type Error = ValueError;
	#[instrument(level = "debug")]
	fn try_from(value: ParameterValue) -> Result<Self, Self::Error> {
		match value {
			ParameterValue::String(value) => Ok(value),
			other => TypeMismatch { expected: ParamType::String, found: other.ty() }.fail(),
		}
	}
}

impl TryFrom<ParameterValue> for bool {
	type Error = ValueError;
	#[instrument(level = "debug")]
	fn try_from(value: ParameterValue) -> Result<Self, Self::Error> {
		match value {
			ParameterValue::Boolean(value) => Ok(value),
			other => TypeMismatch { expected: ParamType::Boolean, found: other.ty() }.fail(),
		}
	}
}

impl TryFrom<ParameterValue> for OffsetDateTime {
	type Error = ValueError;
	#[instrument(level = "debug")]
	fn try_from(value: ParameterValue) -> Result<Self, Self::Error> {
		match value {
			ParameterValue::DateTime(value) => Ok(value),
			other => TypeMismatch { expected: ParamType::DateTime, found: other.ty() }.fail(),
		}
	}
}

impl TryFrom<ParameterValue> for Vec<u8> {
	type Error = ValueError;
	#[instrument(level = "debug")]
	fn try_from(value: ParameterValue) -> Result<Self, Self::Error> {
		match value {
			ParameterValue::Base64(value) | ParameterValue::HexBinary(value) => Ok(value),
			other => TypeMismatch { expected: ParamType::Base64, found: other.ty() }.fail(),
		}
	}
}

fn parse_number<N: std::str::FromStr>(ty: ParamType, text: &str) -> Result<N, ValueError> {
	text.trim().parse().ok().context(Unparsable { ty, text })
}

fn parse_date_time(text: &str) -> Result<OffsetDateTime, ValueError> {
	if let Ok(value) = OffsetDateTime::parse(text, &Rfc3339) {
		return Ok(value);
	}
	// Values without a zone designator are taken as UTC.
	let local = PrimitiveDateTime::parse(
		text,
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
	)
	.context(InvalidDateTime { text })?;
	Ok(local.assume_utc())
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum ValueError {
	#[snafu(display("Expected a value of type {expected}, found {found}"))]
	TypeMismatch { expected: ParamType, found: ParamType },
	#[snafu(display("Expected an integer value, found {found}"))]
	NotAnInteger { found: ParamType },
	#[snafu(display("Value {value} is out of range for the target type"))]
	OutOfRange { value: String },
	#[snafu(display("Cannot parse {text:?} as {ty}"))]
	Unparsable { ty: ParamType, text: String },
	#[snafu(display("Invalid base64 value"))]
	InvalidBase64 { source: base64::DecodeError },
	#[snafu(display("Invalid hexBinary value"))]
	InvalidHex { source: hex::FromHexError },
	#[snafu(display("Invalid dateTime value: {text}"))]
	InvalidDateTime { text: String, source: time::error::Parse },
}

impl ValueError {
	/// Check that `found` can be stored where `expected` is declared.
	pub fn ensure_compatible(expected: ParamType, found: ParamType) -> Result<(), Self> {
		let compatible = expected == found
			|| (expected.is_integer() && found.is_integer())
			|| (expected.is_binary() && found.is_binary());
		ensure!(compatible, TypeMismatch { expected, found });
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn test_parse_booleans() {
		for (text, expected) in [("1", true), ("true", true), ("0", false), ("false", false)] {
			assert_eq!(
				ParameterValue::parse(ParamType::Boolean, text).unwrap(),
				ParameterValue::Boolean(expected)
			);
		}
		assert!(ParameterValue::parse(ParamType::Boolean, "yes").is_err());
	}

	#[test]
	fn test_parse_integers() {
		assert_eq!(
			ParameterValue::parse(ParamType::Int, "-1").unwrap(),
			ParameterValue::Int(-1)
		);
		assert_eq!(
			ParameterValue::parse(ParamType::UnsignedInt, " 8080 ").unwrap(),
			ParameterValue::UnsignedInt(8080)
		);
		assert!(ParameterValue::parse(ParamType::UnsignedInt, "-1").is_err());
		assert!(ParameterValue::parse(ParamType::Int, "4294967295").is_err());
		assert_eq!(
			ParameterValue::parse(ParamType::UnsignedLong, "18446744073709551615").unwrap(),
			ParameterValue::UnsignedLong(u64::MAX)
		);
	}

	#[test]
	fn test_date_time_lexical_forms() {
		let value = ParameterValue::parse(ParamType::DateTime, "2024-01-15T14:30:45Z").unwrap();
		assert_eq!(value, ParameterValue::DateTime(datetime!(2024-01-15 14:30:45 UTC)));
		assert_eq!(value.to_string(), "2024-01-15T14:30:45Z");

		let zoneless = ParameterValue::parse(ParamType::DateTime, "2024-01-15T14:30:45").unwrap();
		assert_eq!(zoneless, value);

		let unknown = ParameterValue::parse(ParamType::DateTime, UNKNOWN_TIME).unwrap();
		assert_eq!(unknown.to_string(), UNKNOWN_TIME);
	}

	#[test]
	fn test_binary_lexical_forms() {
		let base64 = ParameterValue::parse(ParamType::Base64, "AQID").unwrap();
		assert_eq!(base64, ParameterValue::Base64(vec![1, 2, 3]));
		assert_eq!(base64.to_string(), "AQID");

		let hex = ParameterValue::parse(ParamType::HexBinary, "0A0b").unwrap();
		assert_eq!(hex, ParameterValue::HexBinary(vec![0x0a, 0x0b]));
		assert_eq!(hex.to_string(), "0a0b");
		assert!(ParameterValue::parse(ParamType::HexBinary, "0g").is_err());
	}

	#[test]
	fn test_integer_casts() {
		assert_eq!(ParameterValue::UnsignedInt(80).integer::<i32>().unwrap(), 80);
		assert_eq!(ParameterValue::Int(-5).integer::<i64>().unwrap(), -5);
		assert!(matches!(
			ParameterValue::Int(-5).integer::<u32>(),
			Err(ValueError::OutOfRange { .. })
		));
		assert!(matches!(
			ParameterValue::Boolean(true).integer::<u32>(),
			Err(ValueError::NotAnInteger { .. })
		));
		assert_eq!(
			ParameterValue::from_integer(ParamType::UnsignedInt, 5_i64),
			Some(ParameterValue::UnsignedInt(5))
		);
		assert_eq!(ParameterValue::from_integer(ParamType::UnsignedInt, -5_i64), None);
	}

	#[test]
	fn test_xsd_types() {
		for ty in [
			ParamType::String,
			ParamType::Int,
			ParamType::UnsignedInt,
			ParamType::Long,
			ParamType::UnsignedLong,
			ParamType::Boolean,
			ParamType::DateTime,
			ParamType::Base64,
			ParamType::HexBinary,
		] {
			assert_eq!(ParamType::from_xsd_type(ty.xsd_type()), Some(ty));
		}
		assert_eq!(ParamType::from_xsd_type("unsignedInt"), Some(ParamType::UnsignedInt));
		assert_eq!(ParamType::from_xsd_type("xsd:float"), None);
	}

	#[test]
	fn test_compatibility() {
		assert!(ValueError::ensure_compatible(ParamType::UnsignedInt, ParamType::Int).is_ok());
		assert!(ValueError::ensure_compatible(ParamType::HexBinary, ParamType::Base64).is_ok());
		assert!(ValueError::ensure_compatible(ParamType::String, ParamType::Boolean).is_err());
	}
}
