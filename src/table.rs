//! Multi-instance tables.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{OptionExt as _, Snafu, ensure};

use crate::object::ObjectNode;

/// The rows of a multi-instance object, keyed by 1-based instance number.
///
/// Rows iterate in ascending instance order. Instance numbers handed out by
/// [`Table::push`] increase monotonically and are not reused after a row is
/// removed.
#[derive(Debug, Clone)]
pub struct Table<T> {
	rows: BTreeMap<u32, T>,
	next_instance: u32,
	max_rows: Option<u32>,
}

// Two tables are equal when they hold the same rows under the same instance
// numbers; numbering state and limits are not part of the value.
impl<T: PartialEq> PartialEq for Table<T> {
	fn eq(&self, other: &Self) -> bool {
		self.rows == other.rows
	}
}

impl<T: Eq> Eq for Table<T> {}

impl<T> Default for Table<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Table<T> {
	#[must_use]
	pub const fn new() -> Self {
		Self { rows: BTreeMap::new(), next_instance: 1, max_rows: None }
	}

	/// A table that refuses to grow beyond `max_rows` rows.
	#[must_use]
	pub const fn with_limit(max_rows: u32) -> Self {
		Self { rows: BTreeMap::new(), next_instance: 1, max_rows: Some(max_rows) }
	}

	pub fn set_limit(&mut self, max_rows: Option<u32>) {
		self.max_rows = max_rows;
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// The row count as reported by `…NumberOfEntries` parameters.
	#[must_use]
	pub fn count(&self) -> u32 {
		u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// The instance number the next [`Table::push`] will assign.
	#[must_use]
	pub const fn next_instance(&self) -> u32 {
		self.next_instance
	}

	/// Append a row under the next free instance number.
	pub fn push(&mut self, row: T) -> Result<u32, TableError> {
		self.ensure_capacity()?;
		let instance = self.next_instance;
		ensure!(instance != 0, Exhausted);
		self.rows.insert(instance, row);
		self.next_instance = instance.checked_add(1).unwrap_or(0);
		tracing::debug!(instance, "Added table row");
		Ok(instance)
	}

	/// Insert a row under an explicit instance number.
	pub fn insert(&mut self, instance: u32, row: T) -> Result<(), TableError> {
		ensure!(instance != 0, ZeroInstance);
		ensure!(!self.rows.contains_key(&instance), DuplicateInstance { instance });
		self.ensure_capacity()?;
		self.rows.insert(instance, row);
		if instance >= self.next_instance && self.next_instance != 0 {
			self.next_instance = instance.checked_add(1).unwrap_or(0);
		}
		Ok(())
	}

	#[must_use]
	pub fn get(&self, instance: u32) -> Option<&T> {
		self.rows.get(&instance)
	}

	pub fn get_mut(&mut self, instance: u32) -> Option<&mut T> {
		self.rows.get_mut(&instance)
	}

	pub fn remove(&mut self, instance: u32) -> Option<T> {
		let row = self.rows.remove(&instance);
		if row.is_some() {
			tracing::debug!(instance, "Removed table row");
		}
		row
	}

	#[must_use]
	pub fn contains(&self, instance: u32) -> bool {
		self.rows.contains_key(&instance)
	}

	/// Instance numbers in ascending order.
	pub fn instances(&self) -> impl Iterator<Item = u32> + '_ {
		self.rows.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
		self.rows.iter().map(|(instance, row)| (*instance, row))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
		self.rows.iter_mut().map(|(instance, row)| (*instance, row))
	}

	/// Iterate over the rows without their instance numbers.
	pub fn rows(&self) -> impl Iterator<Item = &T> {
		self.rows.values()
	}

	fn ensure_capacity(&self) -> Result<(), TableError> {
		if let Some(max) = self.max_rows {
			ensure!(self.count() < max, Full { max });
		}
		Ok(())
	}

	fn from_rows(rows: BTreeMap<u32, T>) -> Result<Self, TableError> {
		ensure!(!rows.contains_key(&0), ZeroInstance);
		let next_instance = rows.keys().next_back().map_or(Some(1), |last| last.checked_add(1));
		Ok(Self { rows, next_instance: next_instance.unwrap_or(0), max_rows: None })
	}
}

impl<T: ObjectNode> Table<T> {
	/// Find a row by its `Alias` parameter.
	#[must_use]
	pub fn get_by_alias(&self, alias: &str) -> Option<(u32, &T)> {
		self.iter().find(|(_, row)| row.alias() == Some(alias))
	}

	/// The instance number of the row carrying `alias`.
	pub fn instance_of(&self, alias: &str) -> Result<u32, TableError> {
		self.get_by_alias(alias).map(|(instance, _)| instance).context(UnknownAlias { alias })
	}

	/// Append a row, refusing it if its alias is already taken.
	pub fn push_unique(&mut self, row: T) -> Result<u32, TableError> {
		if let Some(alias) = row.alias() {
			ensure!(self.get_by_alias(alias).is_none(), DuplicateAlias { alias });
		}
		self.push(row)
	}

	/// Check that no two rows share an alias.
	pub fn check_aliases(&self) -> Result<(), TableError> {
		let mut seen = HashSet::new();
		for (_, row) in self.iter() {
			if let Some(alias) = row.alias() {
				ensure!(seen.insert(alias), DuplicateAlias { alias });
			}
		}
		Ok(())
	}
}

impl<T: Serialize> Serialize for Table<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.rows.serialize(serializer)
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Table<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let rows = BTreeMap::<u32, T>::deserialize(deserializer)?;
		Self::from_rows(rows).map_err(serde::de::Error::custom)
	}
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum TableError {
	#[snafu(display("Instance numbers start at 1"))]
	ZeroInstance,
	#[snafu(display("Instance {instance} already exists"))]
	DuplicateInstance { instance: u32 },
	#[snafu(display("Alias {alias:?} is already used in this table"))]
	DuplicateAlias { alias: String },
	#[snafu(display("No row carries the alias {alias:?}"))]
	UnknownAlias { alias: String },
	#[snafu(display("Table is limited to {max} rows"))]
	Full { max: u32 },
	#[snafu(display("No instance numbers left"))]
	Exhausted,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_push_assigns_increasing_instances() {
		let mut table = Table::new();
		assert!(table.is_empty());
		assert_eq!(table.push("a").unwrap(), 1);
		assert_eq!(table.push("b").unwrap(), 2);
		assert_eq!(table.remove(2), Some("b"));
		// Removed instance numbers are not handed out again.
		assert_eq!(table.push("c").unwrap(), 3);
		assert_eq!(table.instances().collect::<Vec<_>>(), vec![1, 3]);
		assert_eq!(table.count(), 2);
	}

	#[test]
	fn test_insert_explicit_instances() {
		let mut table = Table::new();
		table.insert(5, "five").unwrap();
		table.insert(2, "two").unwrap();
		assert!(matches!(
			table.insert(5, "again"),
			Err(TableError::DuplicateInstance { instance: 5 })
		));
		assert!(matches!(table.insert(0, "zero"), Err(TableError::ZeroInstance)));
		assert_eq!(table.iter().collect::<Vec<_>>(), vec![(2, &"two"), (5, &"five")]);
		assert_eq!(table.push("six").unwrap(), 6);
	}

	#[test]
	fn test_row_limit() {
		let mut table = Table::with_limit(1);
		table.push(1).unwrap();
		assert!(matches!(table.push(2), Err(TableError::Full { max: 1 })));
		table.set_limit(None);
		assert_eq!(table.push(2).unwrap(), 2);
	}

	#[test]
	fn test_exhausted_instances() {
		let mut table = Table::new();
		table.insert(u32::MAX, ()).unwrap();
		assert!(matches!(table.push(()), Err(TableError::Exhausted)));
	}

	#[test]
	fn test_serde_keeps_instance_numbers() {
		let mut table = Table::new();
		table.insert(3, "x".to_owned()).unwrap();
		table.insert(7, "y".to_owned()).unwrap();
		let json = serde_json::to_string(&table).unwrap();
		assert_eq!(json, r#"{"3":"x","7":"y"}"#);

		let back: Table<String> = serde_json::from_str(&json).unwrap();
		assert_eq!(back.get(7).map(String::as_str), Some("y"));
		assert_eq!(back.next_instance(), 8);
		assert!(serde_json::from_str::<Table<String>>(r#"{"0":"x"}"#).is_err());
	}
}
