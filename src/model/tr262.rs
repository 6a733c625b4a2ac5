//! TR-262 femto component records (`FAP.`): GPS, performance management and
//! the IPsec tunnel.

use time::OffsetDateTime;

use crate::{cwmp_object, schema::registry::SchemaRegistry};

cwmp_object! {
	pub struct FAP => "FAP." {
		params {}
		objects {
			gps: GPS => "GPS";
			perf_mgmt: PerfMgmt => "PerfMgmt";
			tunnel: Tunnel => "Tunnel";
		}
	}
}

cwmp_object! {
	/// GPS receiver used to locate the femto cell.
	pub struct GPS => "FAP.GPS." {
		params {
			scan_on_boot: bool => "ScanOnBoot", RW Boolean = true;
			scan_periodically: bool => "ScanPeriodically", RW Boolean = false;
			periodic_interval: Option<u32> => "PeriodicInterval", RW UnsignedInt, units "seconds";
			periodic_time: Option<OffsetDateTime> => "PeriodicTime", RW DateTime;
			continuous_gps: bool => "ContinuousGPS", RW Boolean = false;
			scan_timeout: u32 => "ScanTimeout", RW UnsignedInt, units "seconds" = 0;
			scan_status: String => "ScanStatus", R String,
				one_of ["Indeterminate", "InProgress", "Success", "Error", "Error_TIMEOUT"]
				= "Indeterminate".into();
			error_details: Option<String> => "ErrorDetails", R String, max_len 256;
			last_scan_time: Option<OffsetDateTime> => "LastScanTime", R DateTime;
			last_successful_scan_time: Option<OffsetDateTime> => "LastSuccessfulScanTime",
				R DateTime;
			/// Millionths of a degree, north positive.
			locked_latitude: Option<i32> => "LockedLatitude", R Int, range -90_000_000..=90_000_000;
			/// Millionths of a degree, east positive.
			locked_longitude: Option<i32> => "LockedLongitude", R Int,
				range -180_000_000..=180_000_000;
			number_of_satellites: Option<u32> => "NumberOfSatellites", R UnsignedInt;
		}
	}
}

cwmp_object! {
	pub struct PerfMgmt => "FAP.PerfMgmt." {
		params {}
		tables {
			configs: PerfMgmtConfig => "Config", count "ConfigNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// Where and how often performance files are uploaded.
	pub struct PerfMgmtConfig => "FAP.PerfMgmt.Config.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			alias: Option<String> => "Alias", RW String, max_len 64;
			url: Option<String> => "URL", RW String, max_len 256;
			username: Option<String> => "Username", RW String, max_len 256;
			password: Option<String> => "Password", RW String, max_len 256;
			periodic_upload_enable: bool => "PeriodicUploadEnable", RW Boolean = false;
			periodic_upload_interval: Option<u32> => "PeriodicUploadInterval", RW UnsignedInt,
				units "seconds", range 1..=4_294_967_295;
			periodic_upload_time: Option<OffsetDateTime> => "PeriodicUploadTime", RW DateTime;
		}
	}
}

cwmp_object! {
	pub struct Tunnel => "FAP.Tunnel." {
		params {}
		tables {
			crypto_profiles: CryptoProfile => "CryptoProfile", count "CryptoProfileNumberOfEntries";
			ike_sas: IKESA => "IKESA", count "IKESANumberOfEntries";
		}
	}
}

cwmp_object! {
	/// IKEv2 and ESP algorithm choices for the security gateway tunnel.
	pub struct CryptoProfile => "FAP.Tunnel.CryptoProfile.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			alias: Option<String> => "Alias", RW String, max_len 64;
			auth_method: Option<String> => "AuthMethod", RW String, max_len 256;
			ike_encrypt: Option<String> => "IKEEncrypt", RW String;
			ike_prf: Option<String> => "IKEPRF", RW String;
			ike_integrity: Option<String> => "IKEIntegrity", RW String;
			ike_dh: Option<String> => "IKEDH", RW String;
			esp_encrypt: Option<String> => "ESPEncrypt", RW String;
			esp_integrity: Option<String> => "ESPIntegrity", RW String;
			ipsec_window_size: Option<u32> => "IPsecWindowSize", RW UnsignedInt;
			ike_rekey_lifetime: Option<u32> => "IKERekeyLifetime", RW UnsignedInt, units "seconds";
			ipsec_rekey_lifetime_byte: Option<u32> => "IPsecRekeyLifetimeByte", RW UnsignedInt,
				units "kilobytes";
			ipsec_rekey_lifetime_time: Option<u32> => "IPsecRekeyLifetimeTime", RW UnsignedInt,
				units "seconds";
			dpd_timer: Option<u32> => "DPDTimer", RW UnsignedInt, units "seconds";
			nat_t_keepalive_timer: Option<u32> => "NATTKeepaliveTimer", RW UnsignedInt,
				units "seconds";
		}
	}
}

cwmp_object! {
	pub struct IKESA => "FAP.Tunnel.IKESA.{i}." {
		alias alias;
		params {
			status: String => "Status", R String,
				one_of ["Up", "Down", "Unknown", "Dormant", "NotPresent", "LowerLayerDown", "Error"]
				= "Down".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			peer_address: Option<String> => "PeerAddress", R String, max_len 45;
			ip_address: Option<String> => "IPAddress", R String, max_len 45;
			subnet_mask: Option<String> => "SubnetMask", R String, max_len 45;
			dns_servers: Option<String> => "DNSServers", R String;
			dhcp_servers: Option<String> => "DHCPServers", R String;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<FAP>()
		.register::<GPS>()
		.register::<PerfMgmt>()
		.register::<PerfMgmtConfig>()
		.register::<Tunnel>()
		.register::<CryptoProfile>()
		.register::<IKESA>();
}
