//! Parameter paths: `Device.WiFi.EndPoint.1.Profile.[home].SSID`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{Snafu, ensure};

/// The placeholder used in path patterns for an instance number.
pub const PLACEHOLDER: &str = "{i}";

/// One dot-separated component of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
	/// An object or parameter name.
	Name(String),
	/// A 1-based instance number.
	Instance(u32),
	/// Instance alias addressing: `[alias]`.
	Alias(String),
	/// The `{i}` placeholder of a path pattern.
	Placeholder,
}

impl Segment {
	#[must_use]
	pub fn as_name(&self) -> Option<&str> {
		match self {
			Self::Name(name) => Some(name),
			_ => None,
		}
	}

	/// Whether this segment selects a table row.
	#[must_use]
	pub const fn is_instance(&self) -> bool {
		matches!(self, Self::Instance(_) | Self::Alias(_) | Self::Placeholder)
	}

	fn parse(segment: &str) -> Result<Self, PathError> {
		ensure!(!segment.is_empty(), EmptySegment);
		if segment == PLACEHOLDER {
			return Ok(Self::Placeholder);
		}
		if let Some(alias) = segment.strip_prefix('[') {
			let alias = alias.strip_suffix(']').filter(|alias| !alias.is_empty());
			return match alias {
				Some(alias) => Ok(Self::Alias(alias.to_owned())),
				None => InvalidSegment { segment }.fail(),
			};
		}
		if segment.bytes().all(|b| b.is_ascii_digit()) {
			ensure!(!segment.starts_with('0'), InvalidInstance { segment });
			return segment
				.parse()
				.map(Self::Instance)
				.map_err(|_| InvalidInstance { segment }.build());
		}
		let mut chars = segment.chars();
		let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
		let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
		ensure!(valid_start && valid_rest, InvalidSegment { segment });
		Ok(Self::Name(segment.to_owned()))
	}
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Instance(instance) => write!(f, "{instance}"),
			Self::Alias(alias) => write!(f, "[{alias}]"),
			Self::Placeholder => f.write_str(PLACEHOLDER),
		}
	}
}

/// A parsed parameter or object path.
///
/// A trailing `.` makes the path partial: it names an object, not a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterPath {
	segments: Vec<Segment>,
	partial: bool,
}

impl ParameterPath {
	/// The empty partial path, which addresses the whole tree.
	#[must_use]
	pub const fn root() -> Self {
		Self { segments: Vec::new(), partial: true }
	}

	#[must_use]
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	#[must_use]
	pub const fn is_partial(&self) -> bool {
		self.partial
	}

	#[must_use]
	pub fn is_pattern(&self) -> bool {
		self.segments.contains(&Segment::Placeholder)
	}

	/// The parameter name of a full path.
	#[must_use]
	pub fn parameter_name(&self) -> Option<&str> {
		if self.partial {
			return None;
		}
		self.segments.last().and_then(Segment::as_name)
	}

	/// The object path containing a full path's parameter, or the parent of a
	/// partial path.
	#[must_use]
	pub fn parent(&self) -> Option<Self> {
		if self.segments.is_empty() {
			return None;
		}
		let mut segments = self.segments.clone();
		segments.pop();
		Some(Self { segments, partial: true })
	}

	/// Append a name, keeping the path partial.
	#[must_use]
	pub fn join_object(&self, name: &str) -> Self {
		let mut segments = self.segments.clone();
		segments.push(Segment::Name(name.to_owned()));
		Self { segments, partial: true }
	}

	/// Append an instance number, keeping the path partial.
	#[must_use]
	pub fn join_instance(&self, instance: u32) -> Self {
		let mut segments = self.segments.clone();
		segments.push(Segment::Instance(instance));
		Self { segments, partial: true }
	}

	/// Append a parameter name, producing a full path.
	#[must_use]
	pub fn join_parameter(&self, name: &str) -> Self {
		let mut segments = self.segments.clone();
		segments.push(Segment::Name(name.to_owned()));
		Self { segments, partial: false }
	}

	/// Replace every instance number and alias with `{i}`.
	#[must_use]
	pub fn pattern(&self) -> Self {
		let segments = self
			.segments
			.iter()
			.map(|segment| {
				if segment.is_instance() { Segment::Placeholder } else { segment.clone() }
			})
			.collect();
		Self { segments, partial: self.partial }
	}

	/// Whether this path is an instance of `pattern`.
	#[must_use]
	pub fn matches(&self, pattern: &Self) -> bool {
		self.partial == pattern.partial
			&& self.segments.len() == pattern.segments.len()
			&& self.segments.iter().zip(&pattern.segments).all(|(segment, expected)| {
				match expected {
					Segment::Placeholder => segment.is_instance(),
					expected => segment == expected,
				}
			})
	}

	/// Whether `prefix` is a partial path leading to this one.
	#[must_use]
	pub fn starts_with(&self, prefix: &Self) -> bool {
		prefix.partial
			&& prefix.segments.len() <= self.segments.len()
			&& self.segments.iter().zip(&prefix.segments).all(|(a, b)| a == b)
	}

	/// The segments after `prefix`, if this path starts with it.
	#[must_use]
	pub fn strip_prefix(&self, prefix: &Self) -> Option<&[Segment]> {
		self.starts_with(prefix).then(|| &self.segments[prefix.segments.len()..])
	}
}

impl FromStr for ParameterPath {
	type Err = PathError;

	fn from_str(path: &str) -> Result<Self, Self::Err> {
		ensure!(!path.is_empty(), Empty);
		let (body, partial) = match path.strip_suffix('.') {
			Some(body) => (body, true),
			None => (path, false),
		};
		let segments = body.split('.').map(Segment::parse).collect::<Result<Vec<_>, _>>()?;
		if !partial {
			ensure!(
				segments.last().is_some_and(|segment| segment.as_name().is_some()),
				NotAParameter { path }
			);
		}
		Ok(Self { segments, partial })
	}
}

impl TryFrom<&str> for ParameterPath {
	type Error = PathError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for ParameterPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.segments.iter().enumerate() {
			if i > 0 {
				f.write_str(".")?;
			}
			write!(f, "{segment}")?;
		}
		if self.partial && !self.segments.is_empty() {
			f.write_str(".")?;
		}
		Ok(())
	}
}

impl Serialize for ParameterPath {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for ParameterPath {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let path = String::deserialize(deserializer)?;
		path.parse().map_err(serde::de::Error::custom)
	}
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum PathError {
	#[snafu(display("Empty path"))]
	Empty,
	#[snafu(display("Path contains an empty segment"))]
	EmptySegment,
	#[snafu(display("Invalid path segment: {segment}"))]
	InvalidSegment { segment: String },
	#[snafu(display("Invalid instance number: {segment}"))]
	InvalidInstance { segment: String },
	#[snafu(display("Path does not end in a parameter name: {path}"))]
	NotAParameter { path: String },
}
