//! TR-143 throughput and UDP echo diagnostics (`Device.IP.Diagnostics.`).

use time::OffsetDateTime;

use crate::{cwmp_object, schema::registry::SchemaRegistry};

cwmp_object! {
	pub struct IPDiagnostics => "Device.IP.Diagnostics." {
		params {}
		objects {
			download: DownloadDiagnostics => "DownloadDiagnostics";
			upload: UploadDiagnostics => "UploadDiagnostics";
			udp_echo: UDPEchoConfig => "UDPEchoConfig";
		}
	}
}

cwmp_object! {
	/// HTTP or FTP download test. The ACS starts it by writing `Requested` to
	/// `DiagnosticsState`.
	pub struct DownloadDiagnostics => "Device.IP.Diagnostics.DownloadDiagnostics." {
		params {
			diagnostics_state: String => "DiagnosticsState", RW String,
				one_of [
					"None", "Requested", "Completed", "Error_InitConnectionFailed",
					"Error_NoResponse", "Error_TransferFailed", "Error_PasswordRequestFailed",
					"Error_LoginFailed", "Error_NoTransferMode", "Error_NoPASV",
					"Error_IncorrectSize", "Error_Timeout",
				]
				= "None".into();
			interface: Option<String> => "Interface", RW String, max_len 256;
			download_url: Option<String> => "DownloadURL", RW String, max_len 256;
			dscp: u32 => "DSCP", RW UnsignedInt, range 0..=63 = 0;
			ethernet_priority: u32 => "EthernetPriority", RW UnsignedInt, range 0..=7 = 0;
			rom_time: Option<OffsetDateTime> => "ROMTime", R DateTime;
			bom_time: Option<OffsetDateTime> => "BOMTime", R DateTime;
			eom_time: Option<OffsetDateTime> => "EOMTime", R DateTime;
			test_bytes_received: Option<u32> => "TestBytesReceived", R UnsignedInt, units "bytes";
			total_bytes_received: Option<u32> => "TotalBytesReceived", R UnsignedInt, units "bytes";
			tcp_open_request_time: Option<OffsetDateTime> => "TCPOpenRequestTime", R DateTime;
			tcp_open_response_time: Option<OffsetDateTime> => "TCPOpenResponseTime", R DateTime;
		}
	}
}

cwmp_object! {
	pub struct UploadDiagnostics => "Device.IP.Diagnostics.UploadDiagnostics." {
		params {
			diagnostics_state: String => "DiagnosticsState", RW String,
				one_of [
					"None", "Requested", "Completed", "Error_InitConnectionFailed",
					"Error_NoResponse", "Error_PasswordRequestFailed", "Error_LoginFailed",
					"Error_NoTransferMode", "Error_NoPASV", "Error_NoCWD", "Error_NoSTOR",
					"Error_NoTransferComplete", "Error_Timeout",
				]
				= "None".into();
			interface: Option<String> => "Interface", RW String, max_len 256;
			upload_url: Option<String> => "UploadURL", RW String, max_len 256;
			dscp: u32 => "DSCP", RW UnsignedInt, range 0..=63 = 0;
			ethernet_priority: u32 => "EthernetPriority", RW UnsignedInt, range 0..=7 = 0;
			test_file_length: Option<u32> => "TestFileLength", RW UnsignedInt, units "bytes";
			rom_time: Option<OffsetDateTime> => "ROMTime", R DateTime;
			bom_time: Option<OffsetDateTime> => "BOMTime", R DateTime;
			eom_time: Option<OffsetDateTime> => "EOMTime", R DateTime;
			total_bytes_sent: Option<u32> => "TotalBytesSent", R UnsignedInt, units "bytes";
			tcp_open_request_time: Option<OffsetDateTime> => "TCPOpenRequestTime", R DateTime;
			tcp_open_response_time: Option<OffsetDateTime> => "TCPOpenResponseTime", R DateTime;
		}
	}
}

cwmp_object! {
	/// The UDP echo responder used by remote latency tests.
	pub struct UDPEchoConfig => "Device.IP.Diagnostics.UDPEchoConfig." {
		params {
			enable: bool => "Enable", RW Boolean = false;
			interface: Option<String> => "Interface", RW String, max_len 256;
			source_ip_address: Option<String> => "SourceIPAddress", RW String, max_len 45;
			udp_port: Option<u32> => "UDPPort", RW UnsignedInt, range 1..=65535;
			echo_plus_enabled: bool => "EchoPlusEnabled", RW Boolean = false;
			echo_plus_supported: Option<bool> => "EchoPlusSupported", R Boolean;
			packets_received: Option<u32> => "PacketsReceived", R UnsignedInt;
			packets_responded: Option<u32> => "PacketsResponded", R UnsignedInt;
			bytes_received: Option<u32> => "BytesReceived", R UnsignedInt, units "bytes";
			bytes_responded: Option<u32> => "BytesResponded", R UnsignedInt, units "bytes";
			time_first_packet_received: Option<OffsetDateTime> => "TimeFirstPacketReceived",
				R DateTime;
			time_last_packet_received: Option<OffsetDateTime> => "TimeLastPacketReceived",
				R DateTime;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<IPDiagnostics>()
		.register::<DownloadDiagnostics>()
		.register::<UploadDiagnostics>()
		.register::<UDPEchoConfig>();
}
