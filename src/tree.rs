//! A root record mounted at its place in a device tree, addressed by path.

use std::fmt;

use snafu::{OptionExt as _, ResultExt as _, Snafu, ensure};
use tracing::instrument;
use tracing_error::SpanTrace;

use crate::{
	config::ModelConfig,
	object::{ModelObject, ObjectError, ObjectNode},
	path::{ParameterPath, PathError, Segment},
	schema::{ParameterSchema, ValidationError},
	table::{self, TableError},
	value::{ParamType, ParameterValue, ValueError},
};

#[derive(Debug, Clone)]
pub struct SpanTraceWrapper(SpanTrace);

impl snafu::GenerateImplicitData for Box<SpanTraceWrapper> {
	fn generate() -> Self {
		Box::new(SpanTraceWrapper(SpanTrace::capture()))
	}
}

impl fmt::Display for SpanTraceWrapper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.status() == tracing_error::SpanTraceStatus::CAPTURED {
			write!(f, "\nAt:\n")?;
			self.0.fmt(f)?;
		}
		Ok(())
	}
}

/// One parameter as reported by [`Mount::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
	pub path: ParameterPath,
	pub ty: ParamType,
	/// `None` when the parameter is unset.
	pub value: Option<ParameterValue>,
	pub writable: bool,
}

enum Step<'p> {
	Child(&'p str),
	Row(&'p str, u32),
}

/// Where an object path leads.
struct Located<'a, 'p> {
	node: &'a dyn ObjectNode,
	steps: Vec<Step<'p>>,
	/// Set when the path ends at a table rather than at an object.
	table: Option<&'p str>,
}

/// A root record `N` bound to the concrete path it occupies, e.g. an
/// `InternetGatewayDevice` at `InternetGatewayDevice.` or a `VoiceService` at
/// `VoiceService.1.`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mount<N> {
	path: ParameterPath,
	node: N,
	config: ModelConfig,
}

impl<N: ModelObject> Mount<N> {
	/// Mount `node` at `path`, which must be a concrete instance of the record's
	/// path pattern.
	pub fn new(path: ParameterPath, node: N) -> Result<Self, TreeError> {
		let pattern: ParameterPath = N::SCHEMA.path.parse().context(Path)?;
		let concrete = path
			.segments()
			.iter()
			.all(|segment| matches!(segment, Segment::Name(_) | Segment::Instance(_)));
		ensure!(
			concrete && path.matches(&pattern),
			RootMismatch { path: path.to_string(), expected: N::SCHEMA.path }
		);
		Ok(Self { path, node, config: ModelConfig::default() })
	}

	/// Mount `node` at its schema path. Only valid for records that are not
	/// table rows themselves.
	pub fn at_schema_path(node: N) -> Result<Self, TreeError> {
		Self::new(N::SCHEMA.path.parse().context(Path)?, node)
	}

	#[must_use]
	pub fn with_config(mut self, config: ModelConfig) -> Self {
		self.config = config;
		self
	}

	#[must_use]
	pub const fn path(&self) -> &ParameterPath {
		&self.path
	}

	#[must_use]
	pub const fn config(&self) -> &ModelConfig {
		&self.config
	}

	#[must_use]
	pub const fn node(&self) -> &N {
		&self.node
	}

	pub fn node_mut(&mut self) -> &mut N {
		&mut self.node
	}

	#[must_use]
	pub fn into_inner(self) -> N {
		self.node
	}

	/// Resolve an object path. Rows may be addressed by instance number or by
	/// `[alias]`.
	#[instrument(level = "debug", skip_all, fields(path = %path))]
	pub fn object(&self, path: &ParameterPath) -> Result<&dyn ObjectNode, TreeError> {
		let located = self.locate(path)?;
		ensure!(located.table.is_none(), NotAnObject { path: path.to_string() });
		Ok(located.node)
	}

	/// Read parameters. A full path yields its one parameter; a partial path
	/// yields every parameter beneath it, depth first, with table rows in
	/// instance order.
	#[instrument(level = "debug", skip_all, fields(path = %path))]
	pub fn get(&self, path: &ParameterPath) -> Result<Vec<ParameterEntry>, TreeError> {
		let mut entries = Vec::new();
		if let Some(name) = path.parameter_name() {
			let parent = path.parent().context(NotFound { path: path.to_string() })?;
			let node = self.object(&parent)?;
			let schema = parameter_schema(node, name, path)?;
			let value = node.parameter(name).context(Object { path: path.to_string() })?;
			entries.push(ParameterEntry {
				path: path.clone(),
				ty: schema.ty,
				value,
				writable: schema.is_writable(),
			});
			return Ok(entries);
		}

		let located = self.locate(path)?;
		match located.table {
			Some(table) => {
				for (instance, row) in located.node.rows(table).unwrap_or_default() {
					self.collect(row, &path.join_instance(instance), &mut entries)?;
				}
			}
			None => self.collect(located.node, path, &mut entries)?,
		}
		tracing::debug!(count = entries.len(), "Collected parameters");
		Ok(entries)
	}

	/// Checked write of one parameter.
	///
	/// The write is refused when the parameter is read-only (unless access
	/// checks are disabled), when the value does not satisfy the parameter's
	/// type and constraints, when the object's current state locks the
	/// parameter, or when it would duplicate a sibling row's alias.
	#[instrument(level = "debug", skip(self))]
	pub fn set(&mut self, path: &ParameterPath, value: ParameterValue) -> Result<(), TreeError> {
		let name = path.parameter_name().context(NotAParameter { path: path.to_string() })?;
		let parent = path.parent().context(NotFound { path: path.to_string() })?;
		let located = self.locate(&parent)?;
		ensure!(located.table.is_none(), NotAnObject { path: parent.to_string() });

		let schema = parameter_schema(located.node, name, path)?;
		if self.config.enforce_access {
			ensure!(schema.is_writable(), NotWritable { path: path.to_string() });
		}
		schema
			.validate(&value, self.config.strict_enumerations)
			.context(Validation { path: path.to_string() })?;
		located.node.guard(name).context(Object { path: path.to_string() })?;
		if let (true, ParameterValue::String(alias)) = (name == ALIAS, &value) {
			self.ensure_alias_free(&parent, alias)?;
		}

		let steps = located.steps;
		let node = walk_mut(&mut self.node, &steps, path)?;
		node.store(name, value).context(Object { path: path.to_string() })?;
		tracing::debug!("Parameter set");
		Ok(())
	}

	/// Parse `text` as the parameter's declared type, then [`Mount::set`] it.
	pub fn set_str(&mut self, path: &ParameterPath, text: &str) -> Result<(), TreeError> {
		let name = path.parameter_name().context(NotAParameter { path: path.to_string() })?;
		let parent = path.parent().context(NotFound { path: path.to_string() })?;
		let ty = parameter_schema(self.object(&parent)?, name, path)?.ty;
		let value = ParameterValue::parse(ty, text).context(Value { path: path.to_string() })?;
		self.set(path, value)
	}

	/// Append a default row to the table `table_path` (e.g.
	/// `…WANIPConnection.1.PortMapping.`) and return its instance number.
	#[instrument(level = "debug", skip(self))]
	pub fn add_instance(&mut self, table_path: &ParameterPath) -> Result<u32, TreeError> {
		let located = self.locate(table_path)?;
		let name = located.table.context(NotATable { path: table_path.to_string() })?;
		self.ensure_table_writable(located.node, name, table_path)?;
		if let Some(max) = self.config.max_table_rows {
			let len = located.node.rows(name).map_or(0, |rows| rows.len());
			if len >= max as usize {
				return table::Full { max }.fail().context(Table { path: table_path.to_string() });
			}
		}

		let steps = located.steps;
		let node = walk_mut(&mut self.node, &steps, table_path)?;
		let instance = node
			.add_row(name)
			.context(NotATable { path: table_path.to_string() })?
			.context(Table { path: table_path.to_string() })?;
		tracing::info!(instance, "Added object instance");
		Ok(instance)
	}

	/// Delete the row `row_path` (e.g. `…PortMapping.3.` or `…PortMapping.[web].`).
	#[instrument(level = "debug", skip(self))]
	pub fn delete_instance(&mut self, row_path: &ParameterPath) -> Result<(), TreeError> {
		ensure!(row_path.is_partial(), NotAnObject { path: row_path.to_string() });
		let table_path = row_path.parent().context(NotFound { path: row_path.to_string() })?;
		let located = self.locate(&table_path)?;
		let name = located.table.context(NotATable { path: table_path.to_string() })?;
		self.ensure_table_writable(located.node, name, row_path)?;
		let rows = located.node.rows(name).unwrap_or_default();
		let instance = row_path
			.segments()
			.last()
			.and_then(|selector| select_row(&rows, selector))
			.map(|(instance, _)| instance)
			.context(NotFound { path: row_path.to_string() })?;

		let steps = located.steps;
		let node = walk_mut(&mut self.node, &steps, row_path)?;
		ensure!(
			node.remove_row(name, instance).unwrap_or(false),
			NotFound { path: row_path.to_string() }
		);
		tracing::info!(instance, "Deleted object instance");
		Ok(())
	}

	fn locate<'p>(&self, path: &'p ParameterPath) -> Result<Located<'_, 'p>, TreeError> {
		ensure!(path.is_partial(), NotAnObject { path: path.to_string() });
		let segments = path
			.strip_prefix(&self.path)
			.context(OutsideMount { path: path.to_string(), root: self.path.to_string() })?;

		let mut node: &dyn ObjectNode = &self.node;
		let mut steps = Vec::new();
		let mut segments = segments.iter();
		while let Some(segment) = segments.next() {
			let name = segment.as_name().context(NotFound { path: path.to_string() })?;
			if let Some(child) = node.child(name) {
				steps.push(Step::Child(name));
				node = child;
				continue;
			}
			let rows = node.rows(name).context(NotFound { path: path.to_string() })?;
			let Some(selector) = segments.next() else {
				return Ok(Located { node, steps, table: Some(name) });
			};
			let (instance, row) =
				select_row(&rows, selector).context(NotFound { path: path.to_string() })?;
			steps.push(Step::Row(name, instance));
			node = row;
		}
		Ok(Located { node, steps, table: None })
	}

	fn collect(
		&self,
		node: &dyn ObjectNode,
		path: &ParameterPath,
		entries: &mut Vec<ParameterEntry>,
	) -> Result<(), TreeError> {
		let schema = node.object_schema();
		for parameter in schema.parameters {
			let value = node.parameter(parameter.name).context(Object { path: path.to_string() })?;
			if value.is_some() || self.config.include_unset {
				entries.push(ParameterEntry {
					path: path.join_parameter(parameter.name),
					ty: parameter.ty,
					value,
					writable: parameter.is_writable(),
				});
			}
		}
		for child in schema.children {
			let child_path = path.join_object(child.name);
			if child.table {
				for (instance, row) in node.rows(child.name).unwrap_or_default() {
					self.collect(row, &child_path.join_instance(instance), entries)?;
				}
			} else if let Some(object) = node.child(child.name) {
				self.collect(object, &child_path, entries)?;
			}
		}
		Ok(())
	}

	fn ensure_table_writable(
		&self,
		parent: &dyn ObjectNode,
		table: &str,
		path: &ParameterPath,
	) -> Result<(), TreeError> {
		let child = parent
			.object_schema()
			.child(table)
			.context(NotATable { path: path.to_string() })?;
		if self.config.enforce_access {
			ensure!((child.schema)().access.is_writable(), NotWritable { path: path.to_string() });
		}
		Ok(())
	}

	/// `object_path` is a table row; no other row of its table may carry `alias`.
	fn ensure_alias_free(&self, object_path: &ParameterPath, alias: &str) -> Result<(), TreeError> {
		let Some(Segment::Instance(_) | Segment::Alias(_)) = object_path.segments().last() else {
			return Ok(());
		};
		let Some(table_path) = object_path.parent() else {
			return Ok(());
		};
		let located = self.locate(&table_path)?;
		let Some(table) = located.table else {
			return Ok(());
		};
		let rows = located.node.rows(table).unwrap_or_default();
		let own = object_path.segments().last().and_then(|selector| select_row(&rows, selector));
		let taken = rows.iter().any(|(instance, row)| {
			own.is_none_or(|(own, _)| own != *instance) && row.alias() == Some(alias)
		});
		ensure!(!taken, DuplicateAlias { path: object_path.to_string(), alias });
		Ok(())
	}
}

const ALIAS: &str = "Alias";

fn select_row<'a>(
	rows: &[(u32, &'a dyn ObjectNode)],
	selector: &Segment,
) -> Option<(u32, &'a dyn ObjectNode)> {
	match selector {
		Segment::Instance(instance) => rows.iter().find(|(number, _)| number == instance).copied(),
		Segment::Alias(alias) => {
			rows.iter().find(|(_, row)| row.alias() == Some(alias.as_str())).copied()
		}
		Segment::Name(_) | Segment::Placeholder => None,
	}
}

fn parameter_schema(
	node: &dyn ObjectNode,
	name: &str,
	path: &ParameterPath,
) -> Result<&'static ParameterSchema, TreeError> {
	node.object_schema().parameter(name).context(NotFound { path: path.to_string() })
}

fn walk_mut<'a>(
	mut node: &'a mut dyn ObjectNode,
	steps: &[Step<'_>],
	path: &ParameterPath,
) -> Result<&'a mut dyn ObjectNode, TreeError> {
	for step in steps {
		node = match *step {
			Step::Child(name) => node.child_mut(name),
			Step::Row(table, instance) => node.row_mut(table, instance),
		}
		.context(NotFound { path: path.to_string() })?;
	}
	Ok(node)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
pub enum TreeError {
	#[snafu(display("Invalid path"))]
	Path { source: PathError },
	#[snafu(display("{path} is not an instance of {expected}"))]
	RootMismatch { path: String, expected: &'static str },
	#[snafu(display("{path} is outside the tree mounted at {root}"))]
	OutsideMount { path: String, root: String },
	#[snafu(display("{path} does not exist{context}"))]
	NotFound {
		path: String,
		#[snafu(implicit)]
		context: Box<SpanTraceWrapper>,
	},
	#[snafu(display("{path} is not an object path"))]
	NotAnObject { path: String },
	#[snafu(display("{path} is not a table"))]
	NotATable { path: String },
	#[snafu(display("{path} is not a parameter path"))]
	NotAParameter { path: String },
	#[snafu(display("{path} is not writable"))]
	NotWritable { path: String },
	#[snafu(display("Cannot parse the value of {path}"))]
	Value { path: String, source: ValueError },
	#[snafu(display("Invalid value for {path}"))]
	Validation { path: String, source: ValidationError },
	#[snafu(display("Cannot access {path}"))]
	Object { path: String, source: ObjectError },
	#[snafu(display("Table operation on {path} failed"))]
	Table { path: String, source: TableError },
	#[snafu(display("Alias {alias:?} is already used next to {path}"))]
	DuplicateAlias { path: String, alias: String },
	#[snafu(display("{path} does not point at a {expected} object"))]
	WrongTarget { path: String, expected: &'static str },
}
