//! TR-157 software module management (`Device.SoftwareModules.`).

use crate::{cwmp_object, reference::Reference, schema::registry::SchemaRegistry};

cwmp_object! {
	pub struct SoftwareModules => "Device.SoftwareModules." {
		params {}
		tables {
			exec_envs: ExecEnv => "ExecEnv", count "ExecEnvNumberOfEntries";
			deployment_units: DeploymentUnit => "DeploymentUnit",
				count "DeploymentUnitNumberOfEntries";
			execution_units: ExecutionUnit => "ExecutionUnit", count "ExecutionUnitNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// An execution environment, e.g. an OSGi framework or a Linux container
	/// runtime.
	pub struct ExecEnv => "Device.SoftwareModules.ExecEnv.{i}." {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Error", "Disabled"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 32;
			env_type: Option<String> => "Type", R String, max_len 64;
			vendor: Option<String> => "Vendor", R String, max_len 128;
			version: Option<String> => "Version", R String, max_len 32;
			allocated_disk_space: Option<i32> => "AllocatedDiskSpace", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			available_disk_space: Option<i32> => "AvailableDiskSpace", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			allocated_memory: Option<i32> => "AllocatedMemory", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			available_memory: Option<i32> => "AvailableMemory", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			active_execution_units: Option<String> => "ActiveExecutionUnits", R String;
		}
	}
}

cwmp_object! {
	/// An installed package.
	pub struct DeploymentUnit => "Device.SoftwareModules.DeploymentUnit.{i}." {
		alias alias;
		params {
			uuid: Option<String> => "UUID", R String, max_len 36;
			duid: Option<String> => "DUID", R String, max_len 64;
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 64;
			status: Option<String> => "Status", R String,
				one_of ["Installing", "Installed", "Updating", "Uninstalling", "Uninstalled"];
			resolved: Option<bool> => "Resolved", R Boolean;
			url: Option<String> => "URL", R String, max_len 1024;
			description: Option<String> => "Description", R String, max_len 256;
			vendor: Option<String> => "Vendor", R String, max_len 128;
			version: Option<String> => "Version", R String, max_len 32;
			execution_unit_list: Option<String> => "ExecutionUnitList", R String;
			execution_env_ref: Reference<ExecEnv> => "ExecutionEnvRef", R String;
		}
	}
}

cwmp_object! {
	/// A running (or runnable) part of a deployment unit.
	pub struct ExecutionUnit => "Device.SoftwareModules.ExecutionUnit.{i}." {
		alias alias;
		params {
			euid: Option<String> => "EUID", R String, max_len 64;
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 32;
			exec_env_label: Option<String> => "ExecEnvLabel", R String, max_len 64;
			status: String => "Status", R String,
				one_of ["Idle", "Starting", "Active", "Stopping"] = "Idle".into();
			requested_state: Option<String> => "RequestedState", RW String,
				one_of ["Idle", "Active"];
			execution_fault_code: String => "ExecutionFaultCode", R String,
				one_of [
					"NoFault", "FailureOnStart", "FailureOnAutoStart", "FailureOnStop",
					"FailureWhileActive", "DependencyFailure", "UnStartable",
				]
				= "NoFault".into();
			auto_start: bool => "AutoStart", RW Boolean = false;
			run_level: Option<u32> => "RunLevel", RW UnsignedInt, range 0..=65535;
			vendor: Option<String> => "Vendor", R String, max_len 128;
			version: Option<String> => "Version", R String, max_len 32;
			description: Option<String> => "Description", R String, max_len 256;
			disk_space_in_use: Option<i32> => "DiskSpaceInUse", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			memory_in_use: Option<i32> => "MemoryInUse", R Int,
				units "kilobytes", range -1..=2_147_483_647;
			execution_env_ref: Reference<ExecEnv> => "ExecutionEnvRef", R String;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<SoftwareModules>()
		.register::<ExecEnv>()
		.register::<DeploymentUnit>()
		.register::<ExecutionUnit>();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{model::tr181::Device, tree::Mount};

	#[test]
	fn test_execution_env_reference() {
		let mut device = Device::default();
		let modules = &mut device.software_modules;
		let env = modules
			.exec_envs
			.push(ExecEnv { name: Some("Linux".into()), ..ExecEnv::default() })
			.unwrap();
		modules
			.execution_units
			.push(ExecutionUnit {
				execution_env_ref: Reference::new(format!("Device.SoftwareModules.ExecEnv.{env}.")),
				..ExecutionUnit::default()
			})
			.unwrap();

		let mount = Mount::at_schema_path(device).unwrap();
		let unit = mount.node().software_modules.execution_units.get(1).unwrap();
		let target = unit.execution_env_ref.resolve(&mount).unwrap().unwrap();
		assert_eq!(target.name.as_deref(), Some("Linux"));
	}
}
