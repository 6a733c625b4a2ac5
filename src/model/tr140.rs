//! TR-140 network storage records (`StorageService.{i}.`).

use crate::{
	cwmp_object,
	object::{Locked, ObjectError},
	reference::Reference,
	schema::registry::SchemaRegistry,
};

/// An enabled array keeps its name and RAID level.
fn storage_array_guard(array: &StorageArray, name: &str) -> Result<(), ObjectError> {
	if array.enable && matches!(name, "Name" | "RaidType") {
		tracing::debug!(name, "Storage array is enabled");
		return Locked { name, reason: "the array is enabled" }.fail();
	}
	Ok(())
}

cwmp_object! {
	pub struct StorageService => "StorageService.{i}." {
		params {
			enable: bool => "Enable", RW Boolean = false;
		}
		objects {
			capabilities: StorageCapabilities => "Capabilities";
			net_info: NetInfo => "NetInfo";
			network_server: NetworkServer => "NetworkServer";
		}
		tables {
			user_accounts: UserAccount => "UserAccount", count "UserAccountNumberOfEntries";
			user_groups: UserGroup => "UserGroup", count "UserGroupNumberOfEntries";
			physical_media: PhysicalMedium => "PhysicalMedium",
				count "PhysicalMediumNumberOfEntries";
			storage_arrays: StorageArray => "StorageArray", count "StorageArrayNumberOfEntries";
			logical_volumes: LogicalVolume => "LogicalVolume", count "LogicalVolumeNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct StorageCapabilities => "StorageService.{i}.Capabilities." {
		params {
			ftp_capable: Option<bool> => "FTPCapable", R Boolean;
			sftp_capable: Option<bool> => "SFTPCapable", R Boolean;
			http_capable: Option<bool> => "HTTPCapable", R Boolean;
			https_capable: Option<bool> => "HTTPSCapable", R Boolean;
			http_writable: Option<bool> => "HTTPWritable", R Boolean;
			supported_network_protocols: Option<String> => "SupportedNetworkProtocols", R String;
			supported_file_systems: Option<String> => "SupportedFileSystems", R String;
			volume_encryption_capable: Option<bool> => "VolumeEncryptionCapable", R Boolean;
		}
	}
}

cwmp_object! {
	pub struct NetInfo => "StorageService.{i}.NetInfo." {
		params {
			host_name: Option<String> => "HostName", RW String, max_len 64;
			domain_name: Option<String> => "DomainName", RW String, max_len 255;
		}
	}
}

cwmp_object! {
	pub struct NetworkServer => "StorageService.{i}.NetworkServer." {
		params {
			afp_enable: bool => "AFPEnable", RW Boolean = false;
			nfs_enable: bool => "NFSEnable", RW Boolean = false;
			smb_enable: bool => "SMBEnable", RW Boolean = false;
			network_protocol_auth_req: bool => "NetworkProtocolAuthReq", RW Boolean = false;
		}
	}
}

cwmp_object! {
	pub struct UserAccount => "StorageService.{i}.UserAccount.{i}.", RW {
		params {
			enable: bool => "Enable", RW Boolean = false;
			username: Option<String> => "Username", RW String, max_len 64;
			password: Option<String> => "Password", RW String, max_len 64;
			/// Comma separated paths of the groups this account belongs to.
			user_group_participation: Option<String> => "UserGroupParticipation", RW String,
				max_len 1024;
			allow_ftp_access: Option<bool> => "AllowFTPAccess", RW Boolean;
			allow_http_access: Option<bool> => "AllowHTTPAccess", RW Boolean;
			allow_smb_access: Option<bool> => "AllowSMBAccess", RW Boolean;
		}
	}
}

cwmp_object! {
	pub struct UserGroup => "StorageService.{i}.UserGroup.{i}.", RW {
		params {
			enable: bool => "Enable", RW Boolean = false;
			group_name: Option<String> => "GroupName", RW String, max_len 64;
		}
	}
}

cwmp_object! {
	/// A disk attached to the storage device.
	pub struct PhysicalMedium => "StorageService.{i}.PhysicalMedium.{i}." {
		params {
			name: Option<String> => "Name", RW String, max_len 64;
			vendor: Option<String> => "Vendor", R String, max_len 64;
			model: Option<String> => "Model", R String, max_len 128;
			serial_number: Option<String> => "SerialNumber", R String, max_len 64;
			firmware_version: Option<String> => "FirmwareVersion", R String, max_len 64;
			connection_type: Option<String> => "ConnectionType", R String,
				one_of [
					"USB 1.1", "USB 2.0", "IEEE1394", "IEEE1394b", "IDE", "EIDE", "ATA/33",
					"ATA/66", "ATA/100", "ATA/133", "SATA/150", "SATA/300", "SCSI-1", "Fast SCSI",
					"Fast-Wide SCSI", "Ultra SCSI", "Ultra Wide SCSI", "Ultra2 SCSI",
					"Ultra2 Wide SCSI", "Ultra3 SCSI", "Ultra-320 SCSI", "Ultra-640 SCSI", "SSA",
					"SSA-40", "Fibre Channel",
				];
			removable: Option<bool> => "Removable", R Boolean;
			capacity: Option<u32> => "Capacity", R UnsignedInt, units "MB";
			status: Option<String> => "Status", R String, one_of ["Online", "Standby", "Offline"];
			uptime: Option<u32> => "Uptime", R UnsignedInt, units "seconds";
			smart_capable: Option<bool> => "SMARTCapable", R Boolean;
			health: Option<String> => "Health", R String, one_of ["OK", "Failing", "Error"];
			hot_swappable: Option<bool> => "HotSwappable", R Boolean;
		}
	}
}

cwmp_object! {
	/// A RAID set built from physical media. `Name` and `RaidType` are fixed
	/// once the array is enabled.
	pub struct StorageArray => "StorageService.{i}.StorageArray.{i}.", RW {
		guard storage_array_guard;
		params {
			name: Option<String> => "Name", RW String, max_len 64;
			raid_type: Option<String> => "RaidType", RW String,
				one_of [
					"RAID0", "RAID1", "RAID4", "RAID5", "RAID6", "RAID10", "RAID0+1", "RAID1+0",
				];
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Offline", "Online", "Degraded", "Rebuilding", "Error"] = "Offline".into();
			physical_medium_reference: Option<String> => "PhysicalMediumReference", RW String,
				max_len 1024;
			capacity: Option<u32> => "Capacity", R UnsignedInt, units "MB";
			used_space: Option<u32> => "UsedSpace", R UnsignedInt, units "MB";
		}
	}
}

cwmp_object! {
	pub struct LogicalVolume => "StorageService.{i}.LogicalVolume.{i}.", RW {
		params {
			name: Option<String> => "Name", RW String, max_len 64;
			status: String => "Status", R String,
				one_of ["Offline", "Online", "Error"] = "Offline".into();
			enable: bool => "Enable", RW Boolean = false;
			/// Path of the physical medium or storage array holding the volume.
			physical_reference: Option<String> => "PhysicalReference", RW String, max_len 256;
			file_system: Option<String> => "FileSystem", R String;
			capacity: Option<u32> => "Capacity", RW UnsignedInt, units "MB";
			used_space: Option<u32> => "UsedSpace", R UnsignedInt, units "MB";
			encrypted: Option<bool> => "Encrypted", R Boolean;
		}
		tables {
			folders: Folder => "Folder", count "FolderNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct Folder => "StorageService.{i}.LogicalVolume.{i}.Folder.{i}.", RW {
		params {
			name: Option<String> => "Name", RW String, max_len 256;
			enable: bool => "Enable", RW Boolean = false;
			/// Access of accounts without a `UserAccess` entry: bit 0 read, bit 1 write.
			user_account_access: u32 => "UserAccountAccess", RW UnsignedInt, range 0..=3 = 0;
		}
		tables {
			group_accesses: GroupAccess => "GroupAccess", count "GroupAccessNumberOfEntries";
			user_accesses: UserAccess => "UserAccess", count "UserAccessNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct GroupAccess
		=> "StorageService.{i}.LogicalVolume.{i}.Folder.{i}.GroupAccess.{i}.", RW {
		params {
			enable: bool => "Enable", RW Boolean = false;
			group: Reference<UserGroup> => "GroupReference", RW String, max_len 256;
			/// Bit 0 read, bit 1 write, bit 2 execute.
			permissions: u32 => "Permissions", RW UnsignedInt, range 0..=7 = 0;
		}
	}
}

cwmp_object! {
	pub struct UserAccess => "StorageService.{i}.LogicalVolume.{i}.Folder.{i}.UserAccess.{i}.", RW {
		params {
			enable: bool => "Enable", RW Boolean = false;
			user: Reference<UserAccount> => "UserReference", RW String, max_len 256;
			permissions: u32 => "Permissions", RW UnsignedInt, range 0..=7 = 0;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<StorageService>()
		.register::<StorageCapabilities>()
		.register::<NetInfo>()
		.register::<NetworkServer>()
		.register::<UserAccount>()
		.register::<UserGroup>()
		.register::<PhysicalMedium>()
		.register::<StorageArray>()
		.register::<LogicalVolume>()
		.register::<Folder>()
		.register::<GroupAccess>()
		.register::<UserAccess>();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		path::ParameterPath,
		tree::{Mount, TreeError},
	};

	const ARRAY: &str = "StorageService.1.StorageArray.1.";

	fn path(suffix: &str) -> ParameterPath {
		format!("{ARRAY}{suffix}").parse().unwrap()
	}

	fn storage() -> Mount<StorageService> {
		let mut mount =
			Mount::new("StorageService.1.".parse().unwrap(), StorageService::default()).unwrap();
		mount.add_instance(&"StorageService.1.StorageArray.".parse().unwrap()).unwrap();
		mount
	}

	#[test]
	fn test_array_locks_name_once_enabled() {
		let mut mount = storage();
		mount.set_str(&path("Name"), "tank").unwrap();
		mount.set_str(&path("RaidType"), "RAID1").unwrap();
		mount.set_str(&path("Enable"), "true").unwrap();

		assert!(matches!(mount.set_str(&path("Name"), "pool"), Err(TreeError::Object { .. })));
		assert!(matches!(mount.set_str(&path("RaidType"), "RAID5"), Err(TreeError::Object { .. })));
		mount
			.set_str(&path("PhysicalMediumReference"), "StorageService.1.PhysicalMedium.1.")
			.unwrap();

		let array = mount.node().storage_arrays.get(1).unwrap();
		assert_eq!(array.name.as_deref(), Some("tank"));
		assert_eq!(array.raid_type.as_deref(), Some("RAID1"));

		mount.set_str(&path("Enable"), "false").unwrap();
		mount.set_str(&path("Name"), "pool").unwrap();
	}

	#[test]
	fn test_folder_access_reference() {
		let mut service = StorageService::default();
		service
			.user_groups
			.push(UserGroup { group_name: Some("staff".into()), ..UserGroup::default() })
			.unwrap();
		let mut folder = Folder::default();
		folder
			.group_accesses
			.push(GroupAccess {
				group: Reference::new("StorageService.1.UserGroup.1."),
				permissions: 3,
				..GroupAccess::default()
			})
			.unwrap();
		let mut volume = LogicalVolume::default();
		volume.folders.push(folder).unwrap();
		service.logical_volumes.push(volume).unwrap();

		let mount = Mount::new("StorageService.1.".parse().unwrap(), service).unwrap();
		let folder = mount.node().logical_volumes.get(1).unwrap().folders.get(1).unwrap();
		let access = folder.group_accesses.get(1).unwrap();
		let group = access.group.resolve(&mount).unwrap().unwrap();
		assert_eq!(group.group_name.as_deref(), Some("staff"));
	}
}
