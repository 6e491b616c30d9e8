use std::ffi::{c_char, c_float, c_int, c_uint, c_void};

pub const AV_NUM_DATA_POINTERS: usize = 8;

macro_rules! c_enum {
    ($($(#[$attr:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            #[repr(transparent)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name(pub c_int);
        )*
    };
}

c_enum! {
    AVMediaType,
    /// Codec identifier. Stored as a C `enum`, which is `int` sized on every
    /// target FFmpeg supports.
    AVCodecID,
    AVPixelFormat,
    AVSampleFormat,
    AVColorPrimaries,
    AVColorTransferCharacteristic,
    AVColorSpace,
    AVColorRange,
    AVChromaLocation,
    AVFieldOrder,
    AVAudioServiceType,
    AVDiscard,
}

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque! {
    AVClass,
    AVCodec,
    AVCodecInternal,
    AVCodecDescriptor,
    AVFrame,
    AVHWAccel,
    AVPacket,
    RcOverride,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AVRational {
    pub num: c_int,
    pub den: c_int,
}

type ExecuteFn = unsafe extern "C" fn(*mut AVCodecContext, *mut c_void) -> c_int;
type Execute2Fn = unsafe extern "C" fn(*mut AVCodecContext, *mut c_void, c_int, c_int) -> c_int;

/// Main codec context of libavcodec 56, including the members that release
/// still compiled in behind its `FF_API_*` deprecation guards.
#[repr(C)]
pub struct AVCodecContext {
    pub av_class: *const AVClass,
    pub log_level_offset: c_int,
    pub codec_type: AVMediaType,
    pub codec: *const AVCodec,
    pub codec_name: [c_char; 32],
    pub codec_id: AVCodecID,
    pub codec_tag: c_uint,
    pub stream_codec_tag: c_uint,
    pub priv_data: *mut c_void,
    pub internal: *mut AVCodecInternal,
    pub opaque: *mut c_void,
    pub bit_rate: c_int,
    pub bit_rate_tolerance: c_int,
    pub global_quality: c_int,
    pub compression_level: c_int,
    pub flags: c_int,
    pub flags2: c_int,
    pub extradata: *mut u8,
    pub extradata_size: c_int,
    pub time_base: AVRational,
    pub ticks_per_frame: c_int,
    pub delay: c_int,
    pub width: c_int,
    pub height: c_int,
    pub coded_width: c_int,
    pub coded_height: c_int,
    pub gop_size: c_int,
    pub pix_fmt: AVPixelFormat,
    pub me_method: c_int,
    pub draw_horiz_band: Option<
        unsafe extern "C" fn(*mut AVCodecContext, *const AVFrame, *mut c_int, c_int, c_int, c_int),
    >,
    pub get_format:
        Option<unsafe extern "C" fn(*mut AVCodecContext, *const AVPixelFormat) -> AVPixelFormat>,
    pub max_b_frames: c_int,
    pub b_quant_factor: c_float,
    pub rc_strategy: c_int,
    pub b_frame_strategy: c_int,
    pub b_quant_offset: c_float,
    pub has_b_frames: c_int,
    pub mpeg_quant: c_int,
    pub i_quant_factor: c_float,
    pub i_quant_offset: c_float,
    pub lumi_masking: c_float,
    pub temporal_cplx_masking: c_float,
    pub spatial_cplx_masking: c_float,
    pub p_masking: c_float,
    pub dark_masking: c_float,
    pub slice_count: c_int,
    pub prediction_method: c_int,
    pub slice_offset: *mut c_int,
    pub sample_aspect_ratio: AVRational,
    pub me_cmp: c_int,
    pub me_sub_cmp: c_int,
    pub mb_cmp: c_int,
    pub ildct_cmp: c_int,
    pub dia_size: c_int,
    pub last_predictor_count: c_int,
    pub pre_me: c_int,
    pub me_pre_cmp: c_int,
    pub pre_dia_size: c_int,
    pub me_subpel_quality: c_int,
    pub dtg_active_format: c_int,
    pub me_range: c_int,
    pub intra_quant_bias: c_int,
    pub inter_quant_bias: c_int,
    pub slice_flags: c_int,
    pub xvmc_acceleration: c_int,
    pub mb_decision: c_int,
    pub intra_matrix: *mut u16,
    pub inter_matrix: *mut u16,
    pub scenechange_threshold: c_int,
    pub noise_reduction: c_int,
    pub me_threshold: c_int,
    pub mb_threshold: c_int,
    pub intra_dc_precision: c_int,
    pub skip_top: c_int,
    pub skip_bottom: c_int,
    pub border_masking: c_float,
    pub mb_lmin: c_int,
    pub mb_lmax: c_int,
    pub me_penalty_compensation: c_int,
    pub bidir_refine: c_int,
    pub brd_scale: c_int,
    pub keyint_min: c_int,
    pub refs: c_int,
    pub chromaoffset: c_int,
    pub scenechange_factor: c_int,
    pub mv0_threshold: c_int,
    pub b_sensitivity: c_int,
    pub color_primaries: AVColorPrimaries,
    pub color_trc: AVColorTransferCharacteristic,
    pub colorspace: AVColorSpace,
    pub color_range: AVColorRange,
    pub chroma_sample_location: AVChromaLocation,
    pub slices: c_int,
    pub field_order: AVFieldOrder,
    pub sample_rate: c_int,
    pub channels: c_int,
    pub sample_fmt: AVSampleFormat,
    pub frame_size: c_int,
    pub frame_number: c_int,
    pub block_align: c_int,
    pub cutoff: c_int,
    pub request_channels: c_int,
    pub channel_layout: u64,
    pub request_channel_layout: u64,
    pub audio_service_type: AVAudioServiceType,
    pub request_sample_fmt: AVSampleFormat,
    pub get_buffer2:
        Option<unsafe extern "C" fn(*mut AVCodecContext, *mut AVFrame, c_int) -> c_int>,
    pub refcounted_frames: c_int,
    pub qcompress: c_float,
    pub qblur: c_float,
    pub qmin: c_int,
    pub qmax: c_int,
    pub max_qdiff: c_int,
    pub rc_qsquish: c_float,
    pub rc_qmod_amp: c_float,
    pub rc_qmod_freq: c_int,
    pub rc_buffer_size: c_int,
    pub rc_override_count: c_int,
    pub rc_override: *mut RcOverride,
    pub rc_eq: *const c_char,
    pub rc_max_rate: c_int,
    pub rc_min_rate: c_int,
    pub rc_buffer_aggressivity: c_float,
    pub rc_initial_cplx: c_float,
    pub rc_max_available_vbv_use: c_float,
    pub rc_min_vbv_overflow_use: c_float,
    pub rc_initial_buffer_occupancy: c_int,
    pub coder_type: c_int,
    pub context_model: c_int,
    pub lmin: c_int,
    pub lmax: c_int,
    pub frame_skip_threshold: c_int,
    pub frame_skip_factor: c_int,
    pub frame_skip_exp: c_int,
    pub frame_skip_cmp: c_int,
    pub trellis: c_int,
    pub min_prediction_order: c_int,
    pub max_prediction_order: c_int,
    pub timecode_frame_start: i64,
    pub rtp_callback: Option<unsafe extern "C" fn(*mut AVCodecContext, *mut c_void, c_int, c_int)>,
    pub rtp_payload_size: c_int,
    pub mv_bits: c_int,
    pub header_bits: c_int,
    pub i_tex_bits: c_int,
    pub p_tex_bits: c_int,
    pub i_count: c_int,
    pub p_count: c_int,
    pub skip_count: c_int,
    pub misc_bits: c_int,
    pub frame_bits: c_int,
    pub stats_out: *mut c_char,
    pub stats_in: *mut c_char,
    pub workaround_bugs: c_int,
    pub strict_std_compliance: c_int,
    pub error_concealment: c_int,
    pub debug: c_int,
    pub debug_mv: c_int,
    pub err_recognition: c_int,
    pub reordered_opaque: i64,
    pub hwaccel: *mut AVHWAccel,
    pub hwaccel_context: *mut c_void,
    pub error: [u64; AV_NUM_DATA_POINTERS],
    pub dct_algo: c_int,
    pub idct_algo: c_int,
    pub bits_per_coded_sample: c_int,
    pub bits_per_raw_sample: c_int,
    pub lowres: c_int,
    pub coded_frame: *mut AVFrame,
    pub thread_count: c_int,
    pub thread_type: c_int,
    pub active_thread_type: c_int,
    pub thread_safe_callbacks: c_int,
    pub execute: Option<
        unsafe extern "C" fn(
            *mut AVCodecContext,
            Option<ExecuteFn>,
            *mut c_void,
            *mut c_int,
            c_int,
            c_int,
        ) -> c_int,
    >,
    pub execute2: Option<
        unsafe extern "C" fn(*mut AVCodecContext, Option<Execute2Fn>, *mut c_void, *mut c_int, c_int) -> c_int,
    >,
    pub nsse_weight: c_int,
    pub profile: c_int,
    pub level: c_int,
    pub skip_loop_filter: AVDiscard,
    pub skip_idct: AVDiscard,
    pub skip_frame: AVDiscard,
    pub subtitle_header: *mut u8,
    pub subtitle_header_size: c_int,
    pub error_rate: c_int,
    pub pkt: *mut AVPacket,
    pub vbv_delay: u64,
    pub side_data_only_packets: c_int,
    pub initial_padding: c_int,
    pub framerate: AVRational,
    pub sw_pix_fmt: AVPixelFormat,
    pub pkt_timebase: AVRational,
    pub codec_descriptor: *const AVCodecDescriptor,
    pub pts_correction_num_faulty_pts: i64,
    pub pts_correction_num_faulty_dts: i64,
    pub pts_correction_last_pts: i64,
    pub pts_correction_last_dts: i64,
    pub sub_charenc: *mut c_char,
    pub sub_charenc_mode: c_int,
    pub skip_alpha: c_int,
    pub seek_preroll: c_int,
    pub chroma_intra_matrix: *mut u16,
    pub dump_separator: *mut u8,
    pub codec_whitelist: *mut c_char,
    pub properties: c_uint,
}
