//! The record types, one module per technical report.
//!
//! Every record is declared with [`cwmp_object!`](crate::cwmp_object), so its
//! fields, wire names, defaults and metadata live in one table. Field types
//! follow one rule: a parameter with a documented default is a plain value
//! holding that default, a parameter without one is an `Option` that starts
//! unset.

use crate::schema::registry::SchemaRegistry;

pub mod tr098;
pub mod tr104;
pub mod tr135;
pub mod tr140;
pub mod tr143;
pub mod tr157;
pub mod tr181;
pub mod tr196;
pub mod tr262;

pub(crate) fn register_all(registry: &mut SchemaRegistry) {
	tr098::register(registry);
	tr104::register(registry);
	tr135::register(registry);
	tr140::register(registry);
	tr143::register(registry);
	tr157::register(registry);
	tr181::register(registry);
	tr196::register(registry);
	tr262::register(registry);
	tracing::debug!(count = registry.len(), "Registered built-in schemas");
}
