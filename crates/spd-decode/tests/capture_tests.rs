//! Whole-capture flow: console text → channels → decode → compare

mod common;

use spd_decode::dump::{read_capture, Markers};
use spd_decode::{compare, decode, ChannelId, Comparison, SpdError};

#[test]
fn four_channel_capture() {
    let channels: Vec<_> = ChannelId::ALL
        .iter()
        .map(|&id| (id, common::udimm_1gb_chips()))
        .collect();
    let text = common::capture(&channels);

    let set = read_capture(&text, &Markers::default()).unwrap();
    assert_eq!(set.len(), 4);
    set.require(&ChannelId::ALL).unwrap();

    for (id, buffer) in set.iter() {
        assert_eq!(buffer.len(), 512);
        assert_eq!(decode(buffer, id).unwrap().capacity_mb, 1024);
    }
    assert!(compare(&set).unwrap().is_identical());
}

#[test]
fn firmware_single_channel_capture() {
    // The board firmware reads 384 bytes from channel B only.
    let bytes = common::udimm_1gb_chips()[..384].to_vec();
    let text = common::capture(&[(ChannelId::B, bytes)]);

    let set = read_capture(&text, &Markers::default()).unwrap();
    assert_eq!(set.reference().0, ChannelId::B);
    assert!(matches!(
        set.require(&ChannelId::ALL),
        Err(SpdError::MissingChannel {
            channel: ChannelId::A
        })
    ));

    let m = decode(set.get(ChannelId::B).unwrap(), ChannelId::B).unwrap();
    assert_eq!(m.downloaded_bytes, 384);
    assert_eq!(compare(&set).unwrap(), Comparison::Identical);
}

#[test]
fn one_bad_channel_does_not_stop_others() {
    let mut ddr3 = common::udimm_1gb_chips();
    ddr3[0x002] = 0x0B;
    let text = common::capture(&[
        (ChannelId::A, common::udimm_1gb_chips()),
        (ChannelId::B, ddr3),
    ]);
    let set = read_capture(&text, &Markers::default()).unwrap();

    let results: Vec<_> = set.iter().map(|(id, buf)| decode(buf, id)).collect();
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(SpdError::UnsupportedFormat { code: 0x0B, .. })
    ));

    let verdict = compare(&set).unwrap();
    assert_eq!(verdict.discrepancies().len(), 1);
    assert_eq!(verdict.discrepancies()[0].offset, 0x002);
}

#[test]
fn mismatched_lengths_rejected_before_comparison() {
    let text = common::capture(&[
        (ChannelId::A, common::udimm_1gb_chips()),
        (ChannelId::C, common::udimm_1gb_chips()[..256].to_vec()),
    ]);
    let set = read_capture(&text, &Markers::default()).unwrap();
    let err = compare(&set).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Channel length mismatch: DDR4_A has 512 bytes, DDR4_C has 256"
    );
}

#[test]
fn truncated_capture_text() {
    let text = common::capture(&[(ChannelId::A, common::udimm_1gb_chips())]);
    let cut = &text[..text.find("JSON DUMP END").unwrap()];
    assert!(matches!(
        read_capture(cut, &Markers::default()),
        Err(SpdError::MalformedInput { .. })
    ));
}
