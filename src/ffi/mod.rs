//! The `AVCodecContext` binding whose layout is probed.
//!
//! By default this is the declaration bundled in [`avcodec`], written against
//! the libavcodec 56 (FFmpeg 2.8) header. With the `system-ffmpeg` feature the
//! bindgen output of `ffmpeg-sys-next` is probed instead, so the report reflects
//! whatever FFmpeg is installed on the build machine.

#[cfg(not(feature = "system-ffmpeg"))]
mod avcodec;

#[cfg(not(feature = "system-ffmpeg"))]
pub use avcodec::*;

#[cfg(feature = "system-ffmpeg")]
pub use ffmpeg_sys_next::{AVClass, AVCodecContext, AVCodecID, AVPixelFormat, AVSampleFormat};

use serde::Serialize;

/// Human-readable description of the binding the probe was compiled against.
pub fn binding_source() -> &'static str {
    if cfg!(feature = "system-ffmpeg") {
        "ffmpeg-sys-next (system FFmpeg)"
    } else {
        "bundled libavcodec 56"
    }
}

/// The build a report's numbers are valid for.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Target {
    pub binding: &'static str,
    pub arch: &'static str,
    pub os: &'static str,
    pub pointer_width: u32,
    pub endian: &'static str,
}

impl Target {
    pub fn current() -> Self {
        Self {
            binding: binding_source(),
            arch: std::env::consts::ARCH,
            os: std::env::consts::OS,
            pointer_width: usize::BITS,
            endian: if cfg!(target_endian = "big") { "big" } else { "little" },
        }
    }
}
