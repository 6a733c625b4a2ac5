//! TR-135 set-top box records (`STBService.{i}.`).

use crate::{cwmp_object, schema::registry::SchemaRegistry};

cwmp_object! {
	pub struct STBService => "STBService.{i}." {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			alias: Option<String> => "Alias", RW String, max_len 64;
		}
		objects {
			capabilities: STBCapabilities => "Capabilities";
			components: STBComponents => "Components";
		}
	}
}

cwmp_object! {
	pub struct STBCapabilities => "STBService.{i}.Capabilities." {
		params {
			/// `-1` means no limit.
			max_active_av_streams: Option<i32> => "MaxActiveAVStreams", R Int,
				range -1..=2_147_483_647;
			max_active_av_players: Option<i32> => "MaxActiveAVPlayers", R Int,
				range -1..=2_147_483_647;
		}
	}
}

cwmp_object! {
	pub struct STBComponents => "STBService.{i}.Components." {
		params {}
		tables {
			video_decoders: VideoDecoder => "VideoDecoder", count "VideoDecoderNumberOfEntries";
			audio_decoders: AudioDecoder => "AudioDecoder", count "AudioDecoderNumberOfEntries";
		}
	}
}

cwmp_object! {
	pub struct VideoDecoder => "STBService.{i}.Components.VideoDecoder.{i}." {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Disabled", "Enabled", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 256;
			/// Path of the supported MPEG-2 Part 2 profile level, if any.
			mpeg2_part2: Option<String> => "MPEG2Part2", R String, max_len 256;
			mpeg4_part2: Option<String> => "MPEG4Part2", R String, max_len 256;
			mpeg4_part10: Option<String> => "MPEG4Part10", R String, max_len 256;
			smpte_vc1: Option<String> => "SMPTEVC1", R String, max_len 256;
			content_aspect_ratio: Option<String> => "ContentAspectRatio", R String,
				one_of ["4:3", "16:9"];
		}
	}
}

cwmp_object! {
	pub struct AudioDecoder => "STBService.{i}.Components.AudioDecoder.{i}." {
		alias alias;
		params {
			enable: bool => "Enable", RW Boolean = false;
			status: String => "Status", R String,
				one_of ["Disabled", "Enabled", "Error"] = "Disabled".into();
			alias: Option<String> => "Alias", RW String, max_len 64;
			name: Option<String> => "Name", R String, max_len 256;
			audio_standard: Option<String> => "AudioStandard", R String;
		}
	}
}

pub(crate) fn register(registry: &mut SchemaRegistry) {
	registry
		.register::<STBService>()
		.register::<STBCapabilities>()
		.register::<STBComponents>()
		.register::<VideoDecoder>()
		.register::<AudioDecoder>();
}
