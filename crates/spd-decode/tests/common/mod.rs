//! Shared SPD fixtures

#![allow(dead_code)]

use spd_decode::{ChannelId, ChannelSet, RawSpdBuffer};

/// 512-byte DDR4 UDIMM image: 1 Gb x8 chips, 64-bit bus, DDR4-2285, CL16.
pub fn udimm_1gb_chips() -> Vec<u8> {
    let mut spd = vec![0u8; 512];
    spd[0x000] = 0x24; // 512 bytes used
    spd[0x001] = 0x11;
    spd[0x002] = 0x0C; // DDR4
    spd[0x003] = 0x02; // UDIMM
    spd[0x004] = 0x42; // 2 bank groups, 4 banks, b=2 (1024 Mb)
    spd[0x005] = 0x19; // 15 row, 10 column
    spd[0x006] = 0x00;
    spd[0x00C] = 0x01; // 1 rank, x8
    spd[0x00D] = 0x03; // 64-bit, no ECC
    spd[0x012] = 0x07; // 0.875 ns
    spd[0x018] = 0x6E;
    spd[0x019] = 0x6E;
    spd[0x01A] = 0x6E;
    spd[0x075] = 0x80;
    spd[0x076] = 0x2C;
    // CRC and serial number region, arbitrary but stable
    for (i, b) in spd.iter_mut().enumerate().skip(0x140) {
        *b = (i % 251) as u8;
    }
    spd
}

pub fn buffer(bytes: Vec<u8>) -> RawSpdBuffer {
    RawSpdBuffer::new(bytes).expect("fixture fits in 512 bytes")
}

/// Same image on all four channels.
pub fn four_identical() -> ChannelSet {
    ChannelSet::new(ChannelId::ALL.map(|id| (id, buffer(udimm_1gb_chips()))))
        .expect("non-empty channel set")
}

/// Console capture as the dumping firmware prints it.
pub fn capture(channels: &[(ChannelId, Vec<u8>)]) -> String {
    let mut text = String::from("nios2-terminal: connected to hardware target\n");
    text.push_str("--------JSON DUMP START--------\n{ ");
    for (i, (id, bytes)) in channels.iter().enumerate() {
        if i > 0 {
            text.push_str(",\n  ");
        }
        text.push_str(&format!("\"{id}\": ["));
        for (j, b) in bytes.iter().enumerate() {
            text.push_str(&format!("{b:3}"));
            if j + 1 < bytes.len() {
                text.push_str(", ");
            }
            if j % 8 == 7 {
                text.push_str("\n             ");
            }
        }
        text.push(']');
    }
    text.push_str(" }\n\n--------JSON DUMP END--------\n\u{4}\n");
    text
}
