//! Decoder behaviour on full 512-byte images

mod common;

use proptest::prelude::*;
use spd_decode::layout::ModuleType;
use spd_decode::{capacity_mb, compare, decode, ChannelId, Comparison, DecodeWarning, SpdError};

#[test]
fn end_to_end_four_identical_channels() {
    let set = common::four_identical();

    for (id, buffer) in set.iter() {
        let m = decode(buffer, id).expect("decodes");
        assert_eq!(m.channel, id);
        assert_eq!(m.density_per_chip_mb, 1024);
        assert_eq!(m.organization.device_width, 8);
        assert_eq!(m.bus.primary, 64);
        assert_eq!(m.capacity_mb, 1024);
        assert_eq!(m.capacity_gb(), 1);
        assert_eq!(m.form_factor, ModuleType::Udimm);
        assert_eq!(m.speed_grade(), "DDR4-2285");
        assert_eq!(m.declared_bytes, 512);
        assert!(!m.is_partial());
    }

    assert_eq!(compare(&set).unwrap(), Comparison::Identical);
}

#[test]
fn density_boundary() {
    let mut spd = common::udimm_1gb_chips();
    spd[0x004] = (spd[0x004] & 0xF0) | 7;
    let m = decode(&common::buffer(spd.clone()), ChannelId::A).unwrap();
    assert_eq!(m.density_per_chip_mb, 32_768);
    assert_eq!(m.density_per_chip_gb(), 32);
    assert!(m.density_known());

    spd[0x004] = (spd[0x004] & 0xF0) | 8;
    let m = decode(&common::buffer(spd), ChannelId::A).unwrap();
    assert_eq!(m.density_per_chip_mb, 0);
    assert_eq!(m.capacity_mb, 0);
    assert!(!m.density_known());
    assert_eq!(m.warnings, vec![DecodeWarning::UnknownDensity { code: 8 }]);
}

#[test]
fn unsupported_format_yields_no_fields() {
    let mut spd = common::udimm_1gb_chips();
    spd[0x002] = 0x12;
    let err = decode(&common::buffer(spd), ChannelId::C).unwrap_err();
    assert!(matches!(
        err,
        SpdError::UnsupportedFormat {
            channel: ChannelId::C,
            code: 0x12
        }
    ));
}

#[test]
fn partial_download_still_decodes() {
    let spd = common::udimm_1gb_chips()[..384].to_vec();
    let m = decode(&common::buffer(spd), ChannelId::B).unwrap();
    assert_eq!(m.declared_bytes, 512);
    assert_eq!(m.downloaded_bytes, 384);
    assert!(m.is_partial());
    assert_eq!(m.manufacturer_id, Some(0x2C80));
}

#[test]
fn timing_rounds_up() {
    let spd = common::udimm_1gb_chips();
    let m = decode(&common::buffer(spd), ChannelId::A).unwrap();
    // 110 * 0.125 = 13.75 ns at 0.875 ns → 15.71 → 16 cycles
    for t in m.timings.as_array() {
        assert_eq!(t.raw, 0x6E);
        assert!((t.ns - 13.75).abs() < 1e-9);
        assert_eq!(t.cycles, 16);
    }
}

#[test]
fn single_byte_difference_at_0x050() {
    let reference = common::udimm_1gb_chips();
    let mut other = reference.clone();
    other[0x050] ^= 0x01;
    let set = spd_decode::ChannelSet::new([
        (ChannelId::A, common::buffer(reference)),
        (ChannelId::B, common::buffer(other)),
    ])
    .unwrap();

    let verdict = compare(&set).unwrap();
    assert_eq!(verdict.discrepancies().len(), 1);
    let d = verdict.discrepancies()[0];
    assert_eq!(d.offset, 0x050);
    assert_eq!(d.channel, ChannelId::B);
    assert_eq!(d.reference_value ^ d.value, 0x01);
}

#[test]
fn json_output_shape() {
    let m = decode(&common::buffer(common::udimm_1gb_chips()), ChannelId::D).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["channel"], "DDR4_D");
    assert_eq!(json["form_factor"], "UDIMM");
    assert_eq!(json["capacity_mb"], 1024);
    assert_eq!(json["timings"]["cas_latency"]["cycles"], 16);
}

#[test]
fn json_keeps_unknown_form_factor_code() {
    let mut spd = common::udimm_1gb_chips();
    spd[0x003] = 0x07;
    let m = decode(&common::buffer(spd), ChannelId::A).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["form_factor"], serde_json::json!({ "unknown": 7 }));
    assert_eq!(json["warnings"][0]["code"], 7);
}

proptest! {
    #[test]
    fn decode_is_deterministic(mut bytes in proptest::collection::vec(any::<u8>(), 512)) {
        bytes[0x002] = 0x0C;
        bytes[0x012] = bytes[0x012].max(1);
        let buffer = common::buffer(bytes);
        let first = decode(&buffer, ChannelId::A).unwrap();
        let second = decode(&buffer, ChannelId::A).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn capacity_matches_integer_formula(b in 0u32..=7, width in 0u32..=3, bus in 0u32..=3) {
        let density = 256u32 << b;
        let device_width = 4u32 << width;
        let bus_width = 8u32 << bus;
        let cap = capacity_mb(density, bus_width, device_width);
        prop_assert_eq!(cap, u64::from(density) * u64::from(bus_width) / u64::from(device_width) / 8);
    }
}
