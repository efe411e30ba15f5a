/*!
    H.264 sequence parameter set parsing.
*/

use crate::{BitReader, Resolution, strip_emulation_prevention};

const NAL_TYPE_SPS: u8 = 7;

/// Profiles whose SPS carries chroma format and scaling-list fields.
const EXTENDED_PROFILE_IDCS: &[u32] = &[
    100, 110, 122, 244, 44, 83, 86, 118, 128, 138, 139, 134, 135,
];

struct NalPosition {
    offset: usize,
    start_code_len: usize,
}

/**
    Extract the frame resolution from an Annex-B H.264 stream.

    Locates the first SPS NAL unit (3- or 4-byte start codes), removes
    emulation prevention bytes, and walks the SPS up to and including
    the frame cropping fields. Returns `None` when no SPS is present or
    the payload is malformed.
*/
pub fn parse_sps_resolution(data: &[u8]) -> Option<Resolution> {
    let sps = find_nal_unit(data, NAL_TYPE_SPS)?;

    // Payload starts after the start code and the one-byte NAL header.
    let payload_offset = sps.offset + sps.start_code_len + 1;
    if payload_offset >= data.len() {
        return None;
    }

    // The SPS NAL ends at the next start code, or at end of data.
    let search_start = sps.offset + sps.start_code_len;
    let mut nal_end = data.len();
    for j in search_start..data.len().saturating_sub(2) {
        if data[j] == 0
            && data[j + 1] == 0
            && (data[j + 2] == 1 || (j + 3 < data.len() && data[j + 2] == 0 && data[j + 3] == 1))
        {
            nal_end = j;
            break;
        }
    }
    if payload_offset >= nal_end {
        return None;
    }

    let rbsp = strip_emulation_prevention(&data[payload_offset..nal_end]);
    decode_sps(&rbsp)
}

fn find_nal_unit(data: &[u8], nal_type: u8) -> Option<NalPosition> {
    for i in 0..data.len().saturating_sub(2) {
        if data[i] != 0 || data[i + 1] != 0 {
            continue;
        }

        let (header_offset, start_code_len) = if data[i + 2] == 1 {
            (i + 3, 3)
        } else if i + 3 < data.len() && data[i + 2] == 0 && data[i + 3] == 1 {
            (i + 4, 4)
        } else {
            continue;
        };

        if header_offset < data.len() && data[header_offset] & 0x1F == nal_type {
            return Some(NalPosition {
                offset: i,
                start_code_len,
            });
        }
    }
    None
}

fn decode_sps(rbsp: &[u8]) -> Option<Resolution> {
    let mut br = BitReader::new(rbsp);

    let profile_idc = br.read_bits(8) as u32;
    br.read_bits(8); // constraint_set flags + reserved_zero_2bits
    br.read_bits(8); // level_idc
    br.read_ue(); // seq_parameter_set_id

    let mut chroma_format_idc = 1;
    if EXTENDED_PROFILE_IDCS.contains(&profile_idc) {
        chroma_format_idc = br.read_ue();
        if chroma_format_idc == 3 {
            br.read_bit(); // separate_colour_plane_flag
        }
        br.read_ue(); // bit_depth_luma_minus8
        br.read_ue(); // bit_depth_chroma_minus8
        br.read_bit(); // qpprime_y_zero_transform_bypass_flag
        if br.read_bit() == 1 {
            // seq_scaling_matrix_present_flag
            let scaling_lists = if chroma_format_idc != 3 { 8 } else { 12 };
            for i in 0..scaling_lists {
                if br.read_bit() == 1 {
                    skip_scaling_list(&mut br, if i < 6 { 16 } else { 64 });
                }
            }
        }
    }

    br.read_ue(); // log2_max_frame_num_minus4
    let pic_order_cnt_type = br.read_ue();
    if pic_order_cnt_type == 0 {
        br.read_ue(); // log2_max_pic_order_cnt_lsb_minus4
    } else if pic_order_cnt_type == 1 {
        br.read_bit(); // delta_pic_order_always_zero_flag
        br.read_se(); // offset_for_non_ref_pic
        br.read_se(); // offset_for_top_to_bottom_field
        let cycle_len = br.read_ue();
        if cycle_len == u32::MAX {
            return None;
        }
        for _ in 0..cycle_len {
            br.read_se(); // offset_for_ref_frame[i]
        }
    }

    br.read_ue(); // max_num_ref_frames
    br.read_bit(); // gaps_in_frame_num_value_allowed_flag

    let pic_width_in_mbs_minus1 = br.read_ue();
    let pic_height_in_map_units_minus1 = br.read_ue();
    if pic_width_in_mbs_minus1 == u32::MAX || pic_height_in_map_units_minus1 == u32::MAX {
        return None;
    }

    let frame_mbs_only = br.read_bit() == 1;
    if !frame_mbs_only {
        br.read_bit(); // mb_adaptive_frame_field_flag
    }
    br.read_bit(); // direct_8x8_inference_flag

    let mut width = (pic_width_in_mbs_minus1 + 1) * 16;
    // FrameHeightInMbs = (2 - frame_mbs_only_flag) * PicHeightInMapUnits
    let field_factor = 2 - u32::from(frame_mbs_only);
    let mut height = field_factor * (pic_height_in_map_units_minus1 + 1) * 16;

    if br.read_bit() == 1 {
        // frame_cropping_flag
        let left = br.read_ue();
        let right = br.read_ue();
        let top = br.read_ue();
        let bottom = br.read_ue();
        if [left, right, top, bottom].contains(&u32::MAX) {
            return None;
        }

        let (crop_unit_x, crop_unit_y) = match chroma_format_idc {
            0 | 3 => (1, field_factor),
            1 => (2, 2 * field_factor),
            _ => (2, field_factor), // 4:2:2
        };
        width = width.checked_sub((left + right) * crop_unit_x)?;
        height = height.checked_sub((top + bottom) * crop_unit_y)?;
    }

    Some(Resolution { width, height })
}

fn skip_scaling_list(br: &mut BitReader, size: usize) {
    let mut last_scale = 8i32;
    let mut next_scale = 8i32;
    for _ in 0..size {
        if next_scale != 0 {
            let delta = br.read_se();
            next_scale = (last_scale + delta + 256) % 256;
        }
        last_scale = if next_scale == 0 { last_scale } else { next_scale };
    }
}
