//! The fixed list of structures and fields the tool reports.

use crate::analysis::analyze_layout;
use crate::ffi::AVCodecContext;
use crate::struct_layout;
use crate::types::StructLayout;

/// `AVCodecContext` members whose position the FFI binding must agree on with
/// the C header: identity, rate control, picture and audio parameters.
pub fn codec_context() -> StructLayout {
    struct_layout!(AVCodecContext {
        av_class,
        codec_id,
        bit_rate,
        bit_rate_tolerance,
        width,
        height,
        coded_width,
        pix_fmt,
        sample_rate,
        channels,
        sample_fmt,
        frame_size,
        frame_number,
        block_align,
    })
}

/// Every probed structure, in report order.
pub fn probed_structs() -> Vec<StructLayout> {
    vec![codec_context()]
}

/// [`probed_structs`] with coverage metrics filled in.
pub fn probed_layouts() -> Vec<StructLayout> {
    let mut layouts = probed_structs();
    for layout in &mut layouts {
        analyze_layout(layout);
    }
    layouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_int;
    use std::mem::size_of;

    #[test]
    fn lists_fields_in_declaration_order() {
        let layout = codec_context();
        let names: Vec<&str> = layout.fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            names,
            [
                "av_class",
                "codec_id",
                "bit_rate",
                "bit_rate_tolerance",
                "width",
                "height",
                "coded_width",
                "pix_fmt",
                "sample_rate",
                "channels",
                "sample_fmt",
                "frame_size",
                "frame_number",
                "block_align",
            ]
        );
    }

    #[test]
    fn int_members_are_int_wide() {
        let layout = codec_context();
        for name in ["width", "height", "coded_width", "sample_rate", "block_align"] {
            let field = layout.field(name).expect("probed field");
            assert_eq!(field.width, size_of::<c_int>() as u64, "{name}");
        }
        let av_class = layout.field("av_class").expect("probed field");
        assert_eq!(av_class.offset, 0);
        assert_eq!(av_class.width, size_of::<*const ()>() as u64);
    }

    #[test]
    fn binding_satisfies_layout_invariants() {
        for layout in probed_layouts() {
            let violations = crate::analysis::check_invariants(&layout);
            assert!(violations.is_empty(), "{:?}", violations);
            assert!(layout.metrics.covered_bytes > 0);
        }
    }

    #[test]
    fn every_field_is_named_after_its_struct() {
        for layout in probed_structs() {
            assert!(layout.fields.iter().all(|f| f.structure == layout.name));
        }
    }
}
