//! TR-104 voice service records (`VoiceService.{i}.`), SIP subset.

use time::OffsetDateTime;

use crate::{
	cwmp_object,
	object::{Locked, ObjectError},
	reference::Reference,
	schema::registry::SchemaRegistry,
};

/// `Origin` of a contact created by the ACS.
pub const ORIGIN_STATIC: &str = "Static";

/// A contact's address and port belong to whoever created it: they can only be
/// written on contacts the ACS configured itself.
fn contact_address_guard(origin: &str, name: &str) -> Result<(), ObjectError> {
	if matches!(name, "IPAddress" | "Port") && origin != ORIGIN_STATIC {
		tracing::debug!(name, origin, "Contact address is not writable");
		return Locked { name, reason: format!("Origin is {origin}") }.fail();
	}
	Ok(())
}

fn client_contact_guard(contact: &SIPClientContact, name: &str) -> Result<(), ObjectError> {
	contact_address_guard(&contact.origin, name)
}

fn registrar_contact_guard(contact: &SIPRegistrarContact, name: &str) -> Result<(), ObjectError> {
	contact_address_guard(&contact.origin, name)
}

cwmp_object! {
	pub struct VoiceService => "VoiceService.{i}." {
		alias alias;
		params {
			alias: Option<String> => "Alias", RW String, max_len 64;
		}
		objects {
			capabilities: VoiceCapabilities => "Capabilities";
			sip: SIP => "SIP";
		}
	}
}

cwmp_object! {
	pub struct VoiceCapabilities => "VoiceService.{i}.Capabilities." {
		params {
			/// `-1` means no limit.
			max_line_count: Option<i32> => "MaxLineCount", R Int, range -1..=2_147_483_647;
			max_session_count: Option<i32> => "MaxSessionCount", R Int, range -1..=2_147_483_647;
			network_connection_modes: Option<String> => "NetworkConnectionModes", R String;
			user_connection_modes: Option<String> => "UserConnectionModes", R String;
		}
	}
}

cwmp_object! {
	pub struct SIP => "VoiceService.{i}.SIP." {
		params {}
		tables {
			clients: SIPClient => "Client", count "ClientNumberOfEntries";
			networks: SIPNetwork => "Network", count "NetworkNumberOfEntries";
			registrars: SIPRegistrar => "Registrar", count "RegistrarNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// A SIP user agent registering with a network.
	pub struct SIPClient => "VoiceService.{i}.SIP.Client.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of [
					"Up", "Initializing", "Registering", "Deregistering", "Error_Misconfigured",
					"Error_Network", "Error_Registration", "Quiescent", "Disabled",
				]
				= "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			network: Reference<SIPNetwork> => "Network", RW String, max_len 256;
			register_mode: Option<String> => "RegisterMode", RW String,
				one_of ["RFC3261", "STATIC", "TISPAN"];
			auth_user_name: Option<String> => "AuthUserName", RW String, max_len 128;
			auth_password: Option<String> => "AuthPassword", RW String, max_len 128;
			register_uri: Option<String> => "RegisterURI", RW String, max_len 389;
			max_sessions: Option<u32> => "MaxSessions", RW UnsignedInt;
		}
		tables {
			contacts: SIPClientContact => "Contact", count "ContactNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// A registered contact of a SIP client. `IPAddress` and `Port` can only be
	/// written while `Origin` is `Static`.
	pub struct SIPClientContact => "VoiceService.{i}.SIP.Client.{i}.Contact.{i}.", RW {
		alias alias;
		guard client_contact_guard;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Disabled", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			origin: String => "Origin", R String,
				one_of ["AutoConfigured", "Static"] = ORIGIN_STATIC.into();
			ip_address: Option<String> => "IPAddress", RW String, max_len 45;
			port: Option<u32> => "Port", RW UnsignedInt, range 0..=65535;
			contact_uri: Option<String> => "ContactURI", RW String, max_len 256;
			expire_time: Option<OffsetDateTime> => "ExpireTime", R DateTime;
			user_agent: Option<String> => "UserAgent", R String, max_len 256;
		}
	}
}

cwmp_object! {
	/// Outbound proxy and registrar settings shared by SIP clients.
	pub struct SIPNetwork => "VoiceService.{i}.SIP.Network.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of [
					"Up", "Resolving", "Error_DNS", "Error_Other", "Disabled",
				] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			proxy_server: Option<String> => "ProxyServer", RW String, max_len 256;
			proxy_server_port: u32 => "ProxyServerPort", RW UnsignedInt, range 0..=65535 = 5060;
			proxy_server_transport: String => "ProxyServerTransport", RW String,
				one_of ["UDP", "TCP", "TLS", "SCTP"] = "UDP".into();
			registrar_server: Option<String> => "RegistrarServer", RW String, max_len 256;
			registrar_server_port: u32 => "RegistrarServerPort", RW UnsignedInt,
				range 0..=65535 = 5060;
			registrar_server_transport: String => "RegistrarServerTransport", RW String,
				one_of ["UDP", "TCP", "TLS", "SCTP"] = "UDP".into();
			user_agent_domain: Option<String> => "UserAgentDomain", RW String, max_len 256;
			outbound_proxy: Option<String> => "OutboundProxy", RW String, max_len 256;
			outbound_proxy_port: u32 => "OutboundProxyPort", RW UnsignedInt, range 0..=65535 = 5060;
			register_expires: u32 => "RegisterExpires", RW UnsignedInt,
				units "seconds", range 1..=4_294_967_295 = 3600;
		}
	}
}

cwmp_object! {
	pub struct SIPRegistrar => "VoiceService.{i}.SIP.Registrar.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Error_Misconfigured", "Error", "Disabled"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			registrar_ip_address: Option<String> => "RegistrarIPAddress", RW String, max_len 45;
			registrar_port: u32 => "RegistrarPort", RW UnsignedInt, range 0..=65535 = 5060;
			realm: Option<String> => "Realm", RW String, max_len 256;
		}
		tables {
			accounts: SIPRegistrarAccount => "Account", count "AccountNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct SIPRegistrarAccount => "VoiceService.{i}.SIP.Registrar.{i}.Account.{i}.", RW {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Error", "Disabled"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			auth_user_name: Option<String> => "AuthUserName", RW String, max_len 128;
			auth_password: Option<String> => "AuthPassword", RW String, max_len 128;
			uri: Option<String> => "URI", RW String, max_len 389;
		}
		tables {
			contacts: SIPRegistrarContact => "Contact", count "ContactNumberOfEntries";
		}
	}
}

cwmp_object! {
	/// A contact registered to an account. Same address rule as
	/// [`SIPClientContact`].
	pub struct SIPRegistrarContact
		=> "VoiceService.{i}.SIP.Registrar.{i}.Account.{i}.Contact.{i}.", RW {
		alias alias;
		guard registrar_contact_guard;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Up", "Disabled", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			origin: String => "Origin", R String,
				one_of ["AutoConfigured", "Static"] = ORIGIN_STATIC.into();
			ip_address: Option<String> => "IPAddress", RW String, max_len 45;
			port: Option<u32> => "Port", RW UnsignedInt, range 0..=65535;
			contact_uri: Option<String> => "ContactURI", RW String, max_len 256;
			expire_time: Option<OffsetDateTime> => "ExpireTime", R DateTime;
			user_agent: Option<String> => "UserAgent", R String, max_len 256;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<VoiceService>()
		.register::<VoiceCapabilities>()
		.register::<SIP>()
		.register::<SIPClient>()
		.register::<SIPClientContact>()
		.register::<SIPNetwork>()
		.register::<SIPRegistrar>()
		.register::<SIPRegistrarAccount>()
		.register::<SIPRegistrarContact>();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		object::ObjectNode,
		tree::{Mount, TreeError},
		value::ParameterValue,
	};

	fn path(path: &str) -> crate::path::ParameterPath {
		path.parse().unwrap()
	}

	fn service() -> Mount<VoiceService> {
		let mut service = VoiceService::default();
		let mut client = SIPClient::default();
		client.contacts.push(SIPClientContact::default()).unwrap();
		client
			.contacts
			.push(SIPClientContact {
				origin: "AutoConfigured".into(),
				..SIPClientContact::default()
			})
			.unwrap();
		service.sip.clients.push(client).unwrap();
		Mount::new(path("VoiceService.1."), service).unwrap()
	}

	#[test]
	fn test_static_contact_address_is_writable() {
		let mut mount = service();
		let contact = "VoiceService.1.SIP.Client.1.Contact.1.";
		mount.set_str(&path(&format!("{contact}IPAddress")), "10.0.0.7").unwrap();
		mount.set(&path(&format!("{contact}Port")), ParameterValue::UnsignedInt(5062)).unwrap();
		let contact = mount.node().sip.clients.get(1).unwrap().contacts.get(1).unwrap();
		assert_eq!(contact.ip_address.as_deref(), Some("10.0.0.7"));
		assert_eq!(contact.port, Some(5062));
	}

	#[test]
	fn test_learned_contact_address_is_locked() {
		let mut mount = service();
		assert!(matches!(
			mount.set_str(&path("VoiceService.1.SIP.Client.1.Contact.2.IPAddress"), "10.0.0.8"),
			Err(TreeError::Object { source: ObjectError::Locked { .. }, .. })
		));
		// Other parameters of the same contact stay writable.
		mount.set_str(&path("VoiceService.1.SIP.Client.1.Contact.2.Enable"), "true").unwrap();
	}

	#[test]
	fn test_registrar_contact_guard() {
		let contact = SIPRegistrarContact {
			origin: "AutoConfigured".into(),
			..SIPRegistrarContact::default()
		};
		assert!(contact.guard("Port").is_err());
		assert!(contact.guard("ContactURI").is_ok());
		assert!(SIPRegistrarContact::default().guard("Port").is_ok());
	}

	#[test]
	fn test_network_defaults() {
		let network = SIPNetwork::default();
		assert_eq!(network.proxy_server_port, 5060);
		assert_eq!(network.proxy_server_transport, "UDP");
		assert_eq!(network.register_expires, 3600);
	}
}
