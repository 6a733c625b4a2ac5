//! TR-181 Device:2 records (`Device.`): DHCPv4 server and WiFi.

use time::OffsetDateTime;

use crate::{
	cwmp_object,
	model::{tr143::IPDiagnostics, tr157::SoftwareModules},
	reference::Reference,
	schema::registry::SchemaRegistry,
};

cwmp_object! {
	/// Root object of a TR-181 device.
	pub struct Device => "Device." {
		params {
			root_data_model_version: Option<String> => "RootDataModelVersion", R String, max_len 32;
		}
		objects {
			dhcpv4: DHCPv4 => "DHCPv4";
			wifi: WiFi => "WiFi";
			ip: IP => "IP";
			software_modules: SoftwareModules => "SoftwareModules";
		}
	}
}

cwmp_object! {
	pub struct IP => "Device.IP." {
		params {}
		objects {
			diagnostics: IPDiagnostics => "Diagnostics";
		}
	}
}

cwmp_object! {
	pub struct DHCPv4 => "Device.DHCPv4." {
		params {}
		objects {
			server: DHCPv4Server => "Server";
		}
	}
}

cwmp_object! {
	pub struct DHCPv4Server => "Device.DHCPv4.Server." {
		params {
			enable: bool => "Enable", RW Boolean = false;
		}
		tables {
			pools: DHCPv4Pool => "Pool", count "PoolNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// An address pool served on one interface.
	pub struct DHCPv4Pool => "Device.DHCPv4.Server.Pool.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Disabled", "Enabled", "Error_Misconfigured", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			/// Position of this pool in the classification order.
			order: Option<u32> => "Order", RW UnsignedInt, range 1..=4_294_967_295;
			interface: Option<String> => "Interface", RW String, max_len 256;
			vendor_class_id: Option<String> => "VendorClassID", RW String, max_len 255;
			client_id: Option<Vec<u8>> => "ClientID", RW HexBinary, max_len 255;
			user_class_id: Option<Vec<u8>> => "UserClassID", RW HexBinary, max_len 255;
			chaddr: Option<String> => "Chaddr", RW String, max_len 17;
			chaddr_mask: Option<String> => "ChaddrMask", RW String, max_len 17;
			min_address: Option<String> => "MinAddress", RW String, max_len 15;
			max_address: Option<String> => "MaxAddress", RW String, max_len 15;
			subnet_mask: Option<String> => "SubnetMask", RW String, max_len 15;
			dns_servers: Option<String> => "DNSServers", RW String, max_len 64;
			domain_name: Option<String> => "DomainName", RW String, max_len 64;
			ip_routers: Option<String> => "IPRouters", RW String, max_len 64;
			/// `-1` means an infinite lease.
			lease_time: i32 => "LeaseTime", RW Int,
				units "seconds", range -1..=2_147_483_647 = 86400;
		}
		tables {
			static_addresses: DHCPv4StaticAddress => "StaticAddress",
				count "StaticAddressNumberOfEntries";
			options: DHCPv4PoolOption => "Option", count "OptionNumberOfEntries";
			clients: DHCPv4Client => "Client", count "ClientNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct DHCPv4StaticAddress => "Device.DHCPv4.Server.Pool.{i}.StaticAddress.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			alias: Option<String> => "Alias", RW String, max_len 64;
			chaddr: Option<String> => "Chaddr", RW String, max_len 17;
			yiaddr: Option<String> => "Yiaddr", RW String, max_len 15;
		}
	}
}

cwmp_object! {
	/// A DHCP option the pool hands out.
	pub struct DHCPv4PoolOption => "Device.DHCPv4.Server.Pool.{i}.Option.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			alias: Option<String> => "Alias", RW String, max_len 64;
			tag: Option<u32> => "Tag", RW UnsignedInt, range 1..=254;
			value: Option<Vec<u8>> => "Value", RW HexBinary, max_len 255;
		}
	}
}

cwmp_object! {
	/// A client currently holding a lease.
	pub struct DHCPv4Client => "Device.DHCPv4.Server.Pool.{i}.Client.{i}." {
		alias alias;
		params {
			alias: Option<String> => "Alias", RW String, max_len 64;
			chaddr: Option<String> => "Chaddr", R String, max_len 17;
			active: Option<bool> => "Active", R Boolean;
		}
		tables {
			ipv4_addresses: DHCPv4ClientIPv4Address => "IPv4Address",
				count "IPv4AddressNumberOfEntries";
			options: DHCPv4ClientOption => "Option", count "OptionNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct DHCPv4ClientIPv4Address
		=> "Device.DHCPv4.Server.Pool.{i}.Client.{i}.IPv4Address.{i}." {
		params {
			ip_address: Option<String> => "IPAddress", R String, max_len 15;
			lease_time_remaining: Option<OffsetDateTime> => "LeaseTimeRemaining", R DateTime;
		}
	}
}

cwmp_object! {
	pub struct DHCPv4ClientOption => "Device.DHCPv4.Server.Pool.{i}.Client.{i}.Option.{i}." {
		params {
			tag: Option<u32> => "Tag", R UnsignedInt, range 0..=255;
			value: Option<Vec<u8>> => "Value", R HexBinary, max_len 255;
		}
	}
}

cwmp_object! {
	pub struct WiFi => "Device.WiFi." {
		params {}
		tables {
			radios: WiFiRadio => "Radio", count "RadioNumberOfEntries";
			end_points: WiFiEndPoint => "EndPoint", count "EndPointNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct WiFiRadio => "Device.WiFi.Radio.{i}." {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Down", "Unknown", "Dormant", "NotPresent", "LowerLayerDown", "Error"]
				= "Down".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 64;
			upstream: Option<bool> => "Upstream", R Boolean;
			max_bit_rate: Option<u32> => "MaxBitRate", R UnsignedInt, units "Mbps";
			supported_frequency_bands: Option<String> => "SupportedFrequencyBands", R String;
			operating_frequency_band: Option<String> => "OperatingFrequencyBand", RW String,
				one_of ["2.4GHz", "5GHz"];
			supported_standards: Option<String> => "SupportedStandards", R String;
			operating_standards: Option<String> => "OperatingStandards", RW String;
			possible_channels: Option<String> => "PossibleChannels", R String, max_len 1024;
			channel: Option<u32> => "Channel", RW UnsignedInt, range 1..=255;
			auto_channel_enable: Option<bool> => "AutoChannelEnable", RW Boolean;
			operating_channel_bandwidth: Option<String> => "OperatingChannelBandwidth", RW String,
				one_of ["20MHz", "40MHz", "80MHz", "160MHz", "Auto"];
			/// Percentage of the maximum power; `-1` selects automatic control.
			transmit_power: i32 => "TransmitPower", RW Int, range -1..=100 = -1;
			regulatory_domain: Option<String> => "RegulatoryDomain", RW String, max_len 3;
		}
	}
}

cwmp_object! {
	/// A WiFi station (client side) interface.
	pub struct WiFiEndPoint => "Device.WiFi.EndPoint.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Disabled", "Enabled", "Error_Misconfigured", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			/// The profile this end point currently uses.
			profile_reference: Reference<WiFiEndPointProfile> => "ProfileReference", RW String,
				max_len 256;
			ssid_reference: Option<String> => "SSIDReference", R String, max_len 256;
		}
		objects {
			stats: WiFiEndPointStats => "Stats";
			security: WiFiEndPointSecurity => "Security";
		}
		tables {
			profiles: WiFiEndPointProfile => "Profile", count "ProfileNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct WiFiEndPointStats => "Device.WiFi.EndPoint.{i}.Stats." {
		params {
			last_data_downlink_rate: Option<u32> => "LastDataDownlinkRate", R UnsignedInt,
				units "kbps", range 1000..=600_000;
			last_data_uplink_rate: Option<u32> => "LastDataUplinkRate", R UnsignedInt,
				units "kbps", range 1000..=600_000;
			signal_strength: Option<i32> => "SignalStrength", R Int, units "dBm", range -200..=0;
			retransmissions: Option<u32> => "Retransmissions", R UnsignedInt, range 0..=100;
		}
	}
}

cwmp_object! {
	pub struct WiFiEndPointSecurity => "Device.WiFi.EndPoint.{i}.Security." {
		params {
			modes_supported: Option<String> => "ModesSupported", R String;
		}
	}
}

cwmp_object! {
	/// Credentials and preferences for one network the end point may join.
	pub struct WiFiEndPointProfile => "Device.WiFi.EndPoint.{i}.Profile.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Active", "Available", "Error", "Disabled"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			ssid: Option<String> => "SSID", RW String, max_len 32;
			location: Option<String> => "Location", RW String, max_len 4096;
			/// Lower values are tried first.
			priority: u32 => "Priority", RW UnsignedInt, range 0..=255 = 0;
		}
		objects {
			security: WiFiProfileSecurity => "Security";
		}
	}
}

cwmp_object! {
	pub struct WiFiProfileSecurity => "Device.WiFi.EndPoint.{i}.Profile.{i}.Security." {
		params {
			mode_enabled: Option<String> => "ModeEnabled", RW String,
				one_of [
					"None", "WEP-64", "WEP-128", "WPA-Personal", "WPA2-Personal",
					"WPA-WPA2-Personal", "WPA-Enterprise", "WPA2-Enterprise", "WPA-WPA2-Enterprise",
				];
			wep_key: Option<Vec<u8>> => "WEPKey", RW HexBinary, max_len 13;
			pre_shared_key: Option<Vec<u8>> => "PreSharedKey", RW HexBinary, max_len 32;
			key_passphrase: Option<String> => "KeyPassphrase", RW String, max_len 63;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<Device>()
		.register::<IP>()
		.register::<DHCPv4>()
		.register::<DHCPv4Server>()
		.register::<DHCPv4Pool>()
		.register::<DHCPv4StaticAddress>()
		.register::<DHCPv4PoolOption>()
		.register::<DHCPv4Client>()
		.register::<DHCPv4ClientIPv4Address>()
		.register::<DHCPv4ClientOption>()
		.register::<WiFi>()
		.register::<WiFiRadio>()
		.register::<WiFiEndPoint>()
		.register::<WiFiEndPointStats>()
		.register::<WiFiEndPointSecurity>()
		.register::<WiFiEndPointProfile>()
		.register::<WiFiProfileSecurity>();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		object::{ModelObject, ObjectNode},
		tree::{Mount, TreeError},
		value::ParameterValue,
	};

	#[test]
	fn test_declared_defaults() {
		let profile = WiFiEndPointProfile::default();
		assert_eq!(profile.priority, 0);
		assert!(!profile.enable);
		assert_eq!(profile.status, "Disabled");
		assert_eq!(DHCPv4Pool::default().lease_time, 86400);
		assert_eq!(WiFiRadio::default().transmit_power, -1);
		assert!(WiFiEndPoint::default().profile_reference.is_empty());
	}

	#[test]
	fn test_pool_alias_uniqueness() {
		let mut mount = Mount::at_schema_path(Device::default()).unwrap();
		let pools = "Device.DHCPv4.Server.Pool.".parse().unwrap();
		mount.add_instance(&pools).unwrap();
		mount.add_instance(&pools).unwrap();

		mount.set_str(&"Device.DHCPv4.Server.Pool.1.Alias".parse().unwrap(), "lan").unwrap();
		assert!(matches!(
			mount.set_str(&"Device.DHCPv4.Server.Pool.2.Alias".parse().unwrap(), "lan"),
			Err(TreeError::DuplicateAlias { .. })
		));
		mount.set_str(&"Device.DHCPv4.Server.Pool.[lan].LeaseTime".parse().unwrap(), "-1").unwrap();
		assert_eq!(mount.node().dhcpv4.server.pools.get(1).unwrap().lease_time, -1);
		assert_eq!(mount.node().dhcpv4.server.pools.instance_of("lan").unwrap(), 1);
	}

	#[test]
	fn test_read_only_client_table() {
		let mut mount = Mount::at_schema_path(Device::default()).unwrap();
		mount.add_instance(&"Device.DHCPv4.Server.Pool.".parse().unwrap()).unwrap();
		assert!(matches!(
			mount.add_instance(&"Device.DHCPv4.Server.Pool.1.Client.".parse().unwrap()),
			Err(TreeError::NotWritable { .. })
		));
		let options = "Device.DHCPv4.Server.Pool.1.Option.".parse().unwrap();
		assert!(mount.add_instance(&options).is_ok());
	}

	#[test]
	fn test_hex_binary_option_value() {
		let mut option = DHCPv4PoolOption::default();
		let value = ParameterValue::parse(crate::value::ParamType::HexBinary, "0A0B").unwrap();
		option.store("Value", value).unwrap();
		assert_eq!(option.value.as_deref(), Some(&[0x0a, 0x0b][..]));
		assert_eq!(option.parameter("Value").unwrap().unwrap().to_string(), "0a0b");
	}

	#[test]
	fn test_nested_paths() {
		assert_eq!(
			WiFiProfileSecurity::SCHEMA.path,
			format!("{}Security.", WiFiEndPointProfile::SCHEMA.path)
		);
		assert_eq!(
			IP::SCHEMA.child("Diagnostics").map(|child| (child.schema)().path),
			Some("Device.IP.Diagnostics.")
		);
	}
}
