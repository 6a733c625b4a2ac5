//! Typed soft references between records.

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{OptionExt as _, ResultExt as _};

use crate::{
	object::{LeafValue, ModelObject},
	path::ParameterPath,
	tree::{self, Mount, TreeError},
	value::{ParamType, ParameterValue, ValueError},
};

/// The path of another object of type `T`, e.g. a WiFi end point's
/// `ProfileReference`. An empty path means no reference.
///
/// The reference does not own or keep alive its target; a dangling reference
/// resolves to a [`TreeError`].
pub struct Reference<T> {
	path: String,
	target: PhantomData<fn() -> T>,
}

impl<T> Reference<T> {
	#[must_use]
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into(), target: PhantomData }
	}

	#[must_use]
	pub const fn none() -> Self {
		Self { path: String::new(), target: PhantomData }
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.path
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.path.is_empty()
	}

	pub fn clear(&mut self) {
		self.path.clear();
	}
}

impl<T: ModelObject> Reference<T> {
	/// Point at an object path, which must fit `T`'s path pattern.
	pub fn to(path: &ParameterPath) -> Result<Self, TreeError> {
		let reference = Self::new(path.to_string());
		reference.check()?;
		Ok(reference)
	}

	/// Whether the path is empty or fits `T`'s path pattern.
	#[must_use]
	pub fn conforms(&self) -> bool {
		self.check().is_ok()
	}

	fn check(&self) -> Result<(), TreeError> {
		if self.is_empty() {
			return Ok(());
		}
		let path = self.object_path()?;
		let pattern: ParameterPath = T::SCHEMA.path.parse().context(tree::Path)?;
		snafu::ensure!(
			path.matches(&pattern),
			tree::WrongTarget { path: self.path.as_str(), expected: T::SCHEMA.path }
		);
		Ok(())
	}

	/// Look the target up in `mount`. `Ok(None)` for an empty reference.
	pub fn resolve<'a, N: ModelObject>(
		&self,
		mount: &'a Mount<N>,
	) -> Result<Option<&'a T>, TreeError> {
		if self.is_empty() {
			return Ok(None);
		}
		self.check()?;
		let node = mount.object(&self.object_path()?)?;
		node.as_any()
			.downcast_ref::<T>()
			.context(tree::WrongTarget { path: self.path.as_str(), expected: T::SCHEMA.path })
			.map(Some)
	}

	/// Reference values are usually written without the trailing dot of an
	/// object path, e.g. `Device.WiFi.EndPoint.1.Profile.1`.
	fn object_path(&self) -> Result<ParameterPath, TreeError> {
		if self.path.ends_with('.') {
			self.path.parse().context(tree::Path)
		} else {
			format!("{}.", self.path).parse().context(tree::Path)
		}
	}
}

impl<T> Clone for Reference<T> {
	fn clone(&self) -> Self {
		Self::new(self.path.clone())
	}
}

impl<T> PartialEq for Reference<T> {
	fn eq(&self, other: &Self) -> bool {
		self.path == other.path
	}
}

impl<T> Eq for Reference<T> {}

impl<T> Default for Reference<T> {
	fn default() -> Self {
		Self::none()
	}
}

impl<T> fmt::Debug for Reference<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Reference").field(&self.path).finish()
	}
}

impl<T> fmt::Display for Reference<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.path)
	}
}

impl<T> From<&str> for Reference<T> {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl<T> Serialize for Reference<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.path)
	}
}

impl<'de, T> Deserialize<'de> for Reference<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::new)
	}
}

impl<T> LeafValue for Reference<T> {
	fn to_value(&self, _ty: ParamType) -> Option<ParameterValue> {
		Some(ParameterValue::String(self.path.clone()))
	}

	fn from_value(value: ParameterValue, _ty: ParamType) -> Result<Self, ValueError> {
		String::try_from(value).map(Self::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tr181::{Device, WiFiEndPoint, WiFiEndPointProfile};

	fn device() -> Mount<Device> {
		let mut device = Device::default();
		let mut end_point = WiFiEndPoint::default();
		end_point
			.profiles
			.push(WiFiEndPointProfile {
				ssid: Some("home".into()),
				..WiFiEndPointProfile::default()
			})
			.unwrap();
		device.wifi.end_points.push(end_point).unwrap();
		Mount::new("Device.".parse().unwrap(), device).unwrap()
	}

	#[test]
	fn test_resolve() {
		let mount = device();
		let reference = Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1.Profile.1.");
		assert!(reference.conforms());
		let profile = reference.resolve(&mount).unwrap().unwrap();
		assert_eq!(profile.ssid.as_deref(), Some("home"));

		assert_eq!(Reference::<WiFiEndPointProfile>::none().resolve(&mount).unwrap(), None);
	}

	#[test]
	fn test_resolve_without_trailing_dot() {
		let mount = device();
		let reference = Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1.Profile.1");
		assert!(reference.conforms());
		let profile = reference.resolve(&mount).unwrap().unwrap();
		assert_eq!(profile.ssid.as_deref(), Some("home"));

		let dangling = Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1.Profile.9");
		assert!(matches!(dangling.resolve(&mount), Err(TreeError::NotFound { .. })));
		assert!(!Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1").conforms());
	}

	#[test]
	fn test_dangling_and_mistyped() {
		let mount = device();
		let dangling = Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1.Profile.9.");
		assert!(matches!(dangling.resolve(&mount), Err(TreeError::NotFound { .. })));

		let mistyped = Reference::<WiFiEndPointProfile>::new("Device.WiFi.EndPoint.1.");
		assert!(!mistyped.conforms());
		assert!(matches!(mistyped.resolve(&mount), Err(TreeError::WrongTarget { .. })));
	}

	#[test]
	fn test_leaf_value_and_serde() {
		let reference = Reference::<WiFiEndPointProfile>::from_value(
			"Device.WiFi.EndPoint.1.Profile.1.".into(),
			ParamType::String,
		)
		.unwrap();
		assert_eq!(
			serde_json::to_string(&reference).unwrap(),
			"\"Device.WiFi.EndPoint.1.Profile.1.\""
		);
		assert_eq!(
			Reference::<WiFiEndPointProfile>::none().to_value(ParamType::String),
			Some(ParameterValue::String(String::new()))
		);
	}
}
