//! Lookup of object schemas by path pattern.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::instrument;

use crate::{
	object::{ModelObject, ObjectNode},
	path::ParameterPath,
	schema::{ObjectSchema, ParameterSchema},
};

/// A registered record type.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
	pub schema: &'static ObjectSchema,
	new: fn() -> Box<dyn ObjectNode>,
}

impl RegistryEntry {
	/// A default-initialized record of this type.
	#[must_use]
	pub fn instantiate(&self) -> Box<dyn ObjectNode> {
		(self.new)()
	}
}

fn new_boxed<T: ModelObject>() -> Box<dyn ObjectNode> {
	Box::new(T::default())
}

/// Maps object path patterns (`Device.WiFi.EndPoint.{i}.`) to record types.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
	entries: HashMap<&'static str, RegistryEntry>,
}

impl SchemaRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `T` under its schema path. Registering the same path twice keeps
	/// the later type.
	pub fn register<T: ModelObject>(&mut self) -> &mut Self {
		let schema = T::schema();
		let entry = RegistryEntry { schema, new: new_boxed::<T> };
		if self.entries.insert(schema.path, entry).is_some() {
			tracing::warn!(path = schema.path, "Schema registered twice");
		}
		self
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Find the entry for an object path, which may carry instance numbers or
	/// aliases.
	#[must_use]
	#[instrument(level = "debug", skip_all, fields(path = %path))]
	pub fn lookup(&self, path: &ParameterPath) -> Option<&RegistryEntry> {
		if !path.is_partial() {
			return None;
		}
		let pattern = path.pattern().to_string();
		self.entries.get(pattern.as_str())
	}

	/// Find the entry for a textual object path.
	#[must_use]
	pub fn lookup_str(&self, path: &str) -> Option<&RegistryEntry> {
		path.parse().ok().and_then(|path| self.lookup(&path))
	}

	/// Metadata of the parameter a full path names.
	#[must_use]
	pub fn parameter(&self, path: &ParameterPath) -> Option<&'static ParameterSchema> {
		let name = path.parameter_name()?;
		let object = self.lookup(&path.parent()?)?;
		object.schema.parameter(name)
	}

	/// A default-initialized record for an object path.
	#[must_use]
	pub fn instantiate(&self, path: &ParameterPath) -> Option<Box<dyn ObjectNode>> {
		self.lookup(path).map(RegistryEntry::instantiate)
	}

	/// All registered schemas, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &'static ObjectSchema> + '_ {
		self.entries.values().map(|entry| entry.schema)
	}
}

lazy_static! {
	static ref BUILTIN: SchemaRegistry = {
		let mut registry = SchemaRegistry::new();
		crate::model::register_all(&mut registry);
		registry
	};
}

/// The registry of every record type this crate defines.
#[must_use]
pub fn builtin() -> &'static SchemaRegistry {
	&BUILTIN
}
