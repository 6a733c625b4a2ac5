//! TR-196 femto access point service records (`FAPService.{i}.`), LTE subset.

use crate::{cwmp_object, schema::registry::SchemaRegistry};

cwmp_object! {
	pub struct FAPService => "FAPService.{i}." {
		alias alias;
		params {
			alias: Option<String> => "Alias", RW String, max_len 64;
			/// Prefix for the distinguished names used in performance files.
			dn_prefix: Option<String> => "DNPrefix", RW String, max_len 256;
		}
		objects {
			capabilities: FAPCapabilities => "Capabilities";
			fap_control: FAPControl => "FAPControl";
		}
	}
}

cwmp_object! {
	pub struct FAPCapabilities => "FAPService.{i}.Capabilities." {
		params {
			gps_equipped: Option<bool> => "GPSEquipped", R Boolean;
			max_tx_power: Option<u32> => "MaxTxPower", R UnsignedInt, units "dBm";
			supported_systems: Option<String> => "SupportedSystems", R String;
			beacon: Option<bool> => "Beacon", R Boolean;
		}
	}
}

cwmp_object! {
	pub struct FAPControl => "FAPService.{i}.FAPControl." {
		params {}
		objects {
			lte: FAPControlLTE => "LTE";
		}
	}
}

cwmp_object! {
	/// Administrative control of the LTE radio.
	pub struct FAPControlLTE => "FAPService.{i}.FAPControl.LTE." {
		params {
			op_state: Option<bool> => "OpState", R Boolean;
			admin_state: bool => "AdminState", RW Boolean = false;
			rf_tx_status: Option<bool> => "RFTxStatus", R Boolean;
			pm_config: Option<String> => "PMConfig", RW String, max_len 256;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<FAPService>()
		.register::<FAPCapabilities>()
		.register::<FAPControl>()
		.register::<FAPControlLTE>();
}
