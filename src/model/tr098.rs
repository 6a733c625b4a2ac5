//! TR-098 Internet Gateway Device records (`InternetGatewayDevice.`).

use time::OffsetDateTime;

use crate::{cwmp_object, schema::registry::SchemaRegistry};

cwmp_object! {
	/// Root object of a TR-098 gateway.
	pub struct InternetGatewayDevice => "InternetGatewayDevice." {
		params {
			device_summary: Option<String> => "DeviceSummary", R String, max_len 1024;
		}
		objects {
			device_info: DeviceInfo => "DeviceInfo";
			management_server: ManagementServer => "ManagementServer";
		}
		tables {
			lan_devices: LANDevice => "LANDevice", count "LANDeviceNumberOfEntries";
			wan_devices: WANDevice => "WANDevice", count "WANDeviceNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct DeviceInfo => "InternetGatewayDevice.DeviceInfo." {
		params {
			manufacturer: Option<String> => "Manufacturer", R String, max_len 64;
			/// Organizationally unique identifier, six hexadecimal digits.
			manufacturer_oui: Option<String> => "ManufacturerOUI", R String, max_len 6;
			model_name: Option<String> => "ModelName", R String, max_len 64;
			description: Option<String> => "Description", R String, max_len 256;
			product_class: Option<String> => "ProductClass", R String, max_len 64;
			serial_number: Option<String> => "SerialNumber", R String, max_len 64;
			hardware_version: Option<String> => "HardwareVersion", R String, max_len 64;
			software_version: Option<String> => "SoftwareVersion", R String, max_len 64;
			spec_version: Option<String> => "SpecVersion", R String, max_len 16;
			provisioning_code: Option<String> => "ProvisioningCode", RW String, max_len 64;
			up_time: Option<u32> => "UpTime", R UnsignedInt, units "seconds";
			first_use_date: Option<OffsetDateTime> => "FirstUseDate", R DateTime;
			device_log: Option<String> => "DeviceLog", R String, max_len 32768;
		}
	}
}

cwmp_object! {
	/// Connection parameters for the ACS.
	pub struct ManagementServer => "InternetGatewayDevice.ManagementServer." {
		params {
			url: Option<String> => "URL", RW String, max_len 256;
			username: Option<String> => "Username", RW String, max_len 256;
			password: Option<String> => "Password", RW String, max_len 256;
			periodic_inform_enable: bool => "PeriodicInformEnable", RW Boolean = false;
			periodic_inform_interval: Option<u32> => "PeriodicInformInterval", RW UnsignedInt,
				units "seconds", range 1..=4_294_967_295;
			periodic_inform_time: Option<OffsetDateTime> => "PeriodicInformTime", RW DateTime;
			parameter_key: Option<String> => "ParameterKey", R String, max_len 32;
			connection_request_url: Option<String> => "ConnectionRequestURL", R String, max_len 256;
			connection_request_username: Option<String> => "ConnectionRequestUsername", RW String,
				max_len 256;
			connection_request_password: Option<String> => "ConnectionRequestPassword", RW String,
				max_len 256;
			upgrades_managed: bool => "UpgradesManaged", RW Boolean = false;
			kick_url: Option<String> => "KickURL", R String, max_len 256;
			download_progress_url: Option<String> => "DownloadProgressURL", R String, max_len 256;
		}
	}
}

cwmp_object! {
	pub struct WANDevice => "InternetGatewayDevice.WANDevice.{i}." {
		params {}
		tables {
			connection_devices: WANConnectionDevice => "WANConnectionDevice",
				count "WANConnectionNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct WANConnectionDevice
		=> "InternetGatewayDevice.WANDevice.{i}.WANConnectionDevice.{i}.", RW {
		params {}
		tables {
			ip_connections: WANIPConnection => "WANIPConnection",
				count "WANIPConnectionNumberOfEntries";
			ppp_connections: WANPPPConnection => "WANPPPConnection",
				count "WANPPPConnectionNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// An IP (routed or bridged) connection on a WAN interface.
	pub struct WANIPConnection
		=> "InternetGatewayDevice.WANDevice.{i}.WANConnectionDevice.{i}.WANIPConnection.{i}.", RW
	{
		params {
			enable: bool => "Enable", RW Boolean = false;
			connection_status: String => "ConnectionStatus", R String,
				one_of [
					"Unconfigured", "Connecting", "Connected", "PendingDisconnect", "Disconneting",
					"Disconnected",
				]
				= "Unconfigured".into();
			possible_connection_types: Option<String> => "PossibleConnectionTypes", R String;
			connection_type: Option<String> => "ConnectionType", RW String,
				one_of ["Unconfigured", "IP_Routed", "IP_Bridged"];
			name: Option<String> => "Name", RW String, max_len 256;
			uptime: Option<u32> => "Uptime", R UnsignedInt, units "seconds";
			last_connection_error: Option<String> => "LastConnectionError", R String;
			nat_enabled: Option<bool> => "NATEnabled", RW Boolean;
			addressing_type: Option<String> => "AddressingType", RW String,
				one_of ["DHCP", "Static"];
			external_ip_address: Option<String> => "ExternalIPAddress", RW String;
			subnet_mask: Option<String> => "SubnetMask", RW String;
			default_gateway: Option<String> => "DefaultGateway", RW String;
			dns_enabled: Option<bool> => "DNSEnabled", RW Boolean;
			dns_servers: Option<String> => "DNSServers", RW String, max_len 64;
			mac_address: Option<String> => "MACAddress", RW String, max_len 17;
			connection_trigger: Option<String> => "ConnectionTrigger", RW String,
				one_of ["OnDemand", "AlwaysOn", "Manual"];
		}
		tables {
			port_mappings: PortMapping => "PortMapping", count "PortMappingNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct WANPPPConnection
		=> "InternetGatewayDevice.WANDevice.{i}.WANConnectionDevice.{i}.WANPPPConnection.{i}.", RW
	{
		params {
			enable: bool => "Enable", RW Boolean = false;
			connection_status: String => "ConnectionStatus", R String,
				one_of [
					"Unconfigured", "Connecting", "Authenticating", "Connected",
					"PendingDisconnect", "Disconneting", "Disconnected",
				]
				= "Unconfigured".into();
			connection_type: Option<String> => "ConnectionType", RW String,
				one_of [
					"Unconfigured", "IP_Routed", "DHCP_Spoofed", "PPPoE_Bridged", "PPTP_Relay",
					"L2TP_Relay", "PPPoE_Relay",
				];
			name: Option<String> => "Name", RW String, max_len 256;
			uptime: Option<u32> => "Uptime", R UnsignedInt, units "seconds";
			username: Option<String> => "Username", RW String, max_len 64;
			password: Option<String> => "Password", RW String, max_len 64;
			nat_enabled: Option<bool> => "NATEnabled", RW Boolean;
			external_ip_address: Option<String> => "ExternalIPAddress", R String;
			remote_ip_address: Option<String> => "RemoteIPAddress", R String;
			max_mru_size: Option<u32> => "MaxMRUSize", RW UnsignedInt, range 1..=1540;
			dns_servers: Option<String> => "DNSServers", RW String, max_len 64;
			mac_address: Option<String> => "MACAddress", RW String, max_len 17;
			transport_type: Option<String> => "TransportType", R String,
				one_of ["PPPoA", "PPPoE", "L2TP", "PPTP"];
			pppoe_service_name: Option<String> => "PPPoEServiceName", RW String, max_len 256;
			connection_trigger: Option<String> => "ConnectionTrigger", RW String,
				one_of ["OnDemand", "AlwaysOn", "Manual"];
			idle_disconnect_time: Option<u32> => "IdleDisconnectTime", RW UnsignedInt,
				units "seconds";
		}
	}
}

cwmp_object! {
	/// Port forwarding rule on a WAN IP connection.
	pub struct PortMapping
		=> "InternetGatewayDevice.WANDevice.{i}.WANConnectionDevice.{i}.WANIPConnection.{i}.PortMapping.{i}.", RW
	{
		params {
			port_mapping_enabled: bool => "PortMappingEnabled", RW Boolean = false;
			/// Zero means a static mapping.
			lease_duration: Option<u32> => "PortMappingLeaseDuration", RW UnsignedInt,
				units "seconds";
			/// Empty or unset matches any remote host.
			remote_host: Option<String> => "RemoteHost", RW String;
			/// Zero matches any port.
			external_port: u32 => "ExternalPort", RW UnsignedInt, range 0..=65535 = 0;
			internal_port: Option<u32> => "InternalPort", RW UnsignedInt, range 1..=65535;
			protocol: Option<String> => "PortMappingProtocol", RW String, one_of ["TCP", "UDP"];
			internal_client: Option<String> => "InternalClient", RW String, max_len 256;
			description: Option<String> => "PortMappingDescription", RW String, max_len 256;
		}
	}
}

cwmp_object! {
	pub struct LANDevice => "InternetGatewayDevice.LANDevice.{i}." {
		params {}
		objects {
			host_config: LANHostConfigManagement => "LANHostConfigManagement";
			hosts: Hosts => "Hosts";
		}
		tables {
			wlan_configurations: WLANConfiguration => "WLANConfiguration",
				count "LANWLANConfigurationNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// DHCP server and addressing configuration of a LAN.
	pub struct LANHostConfigManagement
		=> "InternetGatewayDevice.LANDevice.{i}.LANHostConfigManagement." {
		params {
			mac_address: Option<String> => "MACAddress", R String, max_len 17;
			dhcp_server_configurable: Option<bool> => "DHCPServerConfigurable", RW Boolean;
			dhcp_server_enable: Option<bool> => "DHCPServerEnable", RW Boolean;
			dhcp_relay: Option<bool> => "DHCPRelay", R Boolean;
			min_address: Option<String> => "MinAddress", RW String;
			max_address: Option<String> => "MaxAddress", RW String;
			reserved_addresses: Option<String> => "ReservedAddresses", RW String, max_len 256;
			subnet_mask: Option<String> => "SubnetMask", RW String;
			dns_servers: Option<String> => "DNSServers", RW String, max_len 64;
			domain_name: Option<String> => "DomainName", RW String, max_len 64;
			ip_routers: Option<String> => "IPRouters", RW String, max_len 64;
			/// `-1` means an infinite lease.
			dhcp_lease_time: Option<i32> => "DHCPLeaseTime", RW Int,
				units "seconds", range -1..=2_147_483_647;
		}
		tables {
			ip_interfaces: IPInterface => "IPInterface", count "IPInterfaceNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct IPInterface
		=> "InternetGatewayDevice.LANDevice.{i}.LANHostConfigManagement.IPInterface.{i}.", RW {
		params {
			enable: bool => "Enable", RW Boolean = false;
			ip_address: Option<String> => "IPInterfaceIPAddress", RW String;
			subnet_mask: Option<String> => "IPInterfaceSubnetMask", RW String;
			addressing_type: Option<String> => "IPInterfaceAddressingType", RW String,
				one_of ["DHCP", "Static", "AutoIP"];
		}
	}
}

cwmp_object! {
	pub struct WLANConfiguration => "InternetGatewayDevice.LANDevice.{i}.WLANConfiguration.{i}." {
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Error", "Disabled"] = "Disabled".into();
			bssid: Option<String> => "BSSID", R String, max_len 17;
			max_bit_rate: Option<String> => "MaxBitRate", RW String, max_len 4;
			channel: Option<u32> => "Channel", RW UnsignedInt, range 0..=255;
			ssid: Option<String> => "SSID", RW String, max_len 32;
			beacon_type: Option<String> => "BeaconType", RW String,
				one_of [
					"None", "Basic", "WPA", "11i", "BasicandWPA", "Basicand11i", "WPAand11i",
					"BasicandWPAand11i",
				];
			mac_address_control_enabled: Option<bool> => "MACAddressControlEnabled", RW Boolean;
			standard: Option<String> => "Standard", R String, one_of ["a", "b", "g", "g-only", "n"];
			wep_key_index: Option<u32> => "WEPKeyIndex", RW UnsignedInt, range 1..=4;
			key_passphrase: Option<String> => "KeyPassphrase", RW String, max_len 63;
			ssid_advertisement_enabled: Option<bool> => "SSIDAdvertisementEnabled", RW Boolean;
			total_bytes_sent: Option<u32> => "TotalBytesSent", R UnsignedInt;
			total_bytes_received: Option<u32> => "TotalBytesReceived", R UnsignedInt;
			total_associations: Option<u32> => "TotalAssociations", R UnsignedInt;
		}
	}
}

cwmp_object! {
	pub struct Hosts => "InternetGatewayDevice.LANDevice.{i}.Hosts." {
		params {}
		tables {
			hosts: Host => "Host", count "HostNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// A device seen on the LAN.
	pub struct Host => "InternetGatewayDevice.LANDevice.{i}.Hosts.Host.{i}." {
		params {
			ip_address: Option<String> => "IPAddress", R String;
			address_source: Option<String> => "AddressSource", R String,
				one_of ["DHCP", "Static", "AutoIP"];
			lease_time_remaining: Option<i32> => "LeaseTimeRemaining", R Int,
				units "seconds", range -1..=2_147_483_647;
			mac_address: Option<String> => "MACAddress", R String, max_len 17;
			host_name: Option<String> => "HostName", R String, max_len 64;
			interface_type: Option<String> => "InterfaceType", R String,
				one_of ["Ethernet", "USB", "802.11", "HomePNA", "HomePlug", "Other"];
			active: Option<bool> => "Active", R Boolean;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<InternetGatewayDevice>()
		.register::<DeviceInfo>()
		.register::<ManagementServer>()
		.register::<WANDevice>()
		.register::<WANConnectionDevice>()
		.register::<WANIPConnection>()
		.register::<WANPPPConnection>()
		.register::<PortMapping>()
		.register::<LANDevice>()
		.register::<LANHostConfigManagement>()
		.register::<IPInterface>()
		.register::<WLANConfiguration>()
		.register::<Hosts>()
		.register::<Host>();
}
