/*
    mfmtrack

    Copyright 2026 mfmtrack contributors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/handlers/longtrack.rs

    The seven long-track protection handlers. None of them carry real
    sector data; each matches on sync plus a repeated filler sequence
    plus a minimum track length, which is what the original duplication
    protection actually exploited. `protec_longtrack` is the odd one out:
    its filler byte isn't fixed, it's read from the track and echoed back
    on re-encode, so it gets a one-byte payload instead of an empty one.
*/

use super::{check_length, check_sequence, scan_for_sync16, scan_for_sync32};
use crate::handler::TrackHandler;
use crate::mfm::MfmMode;
use crate::track_buffer::{Speed, TrackBuffer};
use crate::track_info::{TrackInfo, TrackType};
use crate::RawBitStream;

fn pad_with_filler(buf: &mut TrackBuffer, total_bits: u32, filler: u8) {
    while (buf.len() as u32) < total_bits {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, filler as u32)
            .expect("8 data bits is in range");
    }
}

// --- protec_longtrack --------------------------------------------------------------------

const PROTEC_SYNC: u16 = 0x4454;
const PROTEC_SEQ_COUNT: u32 = 1000;
const PROTEC_MIN_BITS: u32 = 107200;
const PROTEC_TOTAL_BITS: u32 = 110000;

pub fn protec_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync16(stream, PROTEC_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        let filler = match stream.next_mfm_scalar(MfmMode::Mfm, 8) {
            Ok(v) => v as u8,
            Err(_) => return false,
        };
        if !check_sequence(stream, PROTEC_SEQ_COUNT - 1, filler) {
            continue;
        }
        if !check_length(stream, PROTEC_MIN_BITS) {
            log::warn!("protec_longtrack: length gate failed, aborting scan");
            return false;
        }
        info.set_payload(vec![filler], 0, 0, 0);
        info.data_bitoff = data_bitoff;
        info.total_bits = PROTEC_TOTAL_BITS;
        log::debug!("protec_longtrack: recognised with filler {filler:#04x}");
        return true;
    }
}

pub fn protec_read_raw(info: &TrackInfo, buf: &mut TrackBuffer) {
    let filler = info.dat().first().copied().unwrap_or(0);
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, PROTEC_SYNC as u32)
        .expect("16 raw bits is in range");
    for _ in 0..PROTEC_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, filler as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, PROTEC_TOTAL_BITS, filler);
}

pub const PROTEC_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(protec_write_raw),
    read_raw: Some(protec_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- gremlin_longtrack / tiertex_longtrack ------------------------------------------------

const GREMLIN_SYNC: u32 = 0x4124_4124;
const GREMLIN_SEQ_COUNT: u32 = 8;
const GREMLIN_FILLER: u8 = 0x00;
const GREMLIN_TOTAL_BITS: u32 = 105500;

fn gremlin_family_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo, set_total_bits: bool) -> bool {
    loop {
        let data_bitoff = match scan_for_sync32(stream, GREMLIN_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        if !check_sequence(stream, GREMLIN_SEQ_COUNT, GREMLIN_FILLER) {
            continue;
        }
        info.set_payload(Vec::new(), 0, 0, 0);
        info.data_bitoff = data_bitoff;
        if set_total_bits {
            info.total_bits = GREMLIN_TOTAL_BITS;
        }
        return true;
    }
}

pub fn gremlin_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    gremlin_family_write_raw(stream, info, true)
}

pub fn gremlin_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 32, GREMLIN_SYNC)
        .expect("32 raw bits is in range");
    for _ in 0..GREMLIN_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, GREMLIN_FILLER as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, GREMLIN_TOTAL_BITS, GREMLIN_FILLER);
}

pub const GREMLIN_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(gremlin_write_raw),
    read_raw: Some(gremlin_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

/// Decode logic identical to `gremlin_longtrack`: same sync, same filler sequence, no length
/// gate. The two are only distinguished by which tag the caller already associated with the
/// track before recognition ran. Unlike `gremlin_longtrack`, this handler leaves `total_bits`
/// untouched on a match rather than overwriting it with the gremlin value.
pub fn tiertex_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    gremlin_family_write_raw(stream, info, false)
}

pub const TIERTEX_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(tiertex_write_raw),
    read_raw: Some(gremlin_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- crystals_of_arborea_longtrack ---------------------------------------------------------

const ARBOREA_SYNC: u16 = 0xa144;
const ARBOREA_MARKER: &[u8; 4] = b"ROD0";
const ARBOREA_SEQ_COUNT: u32 = 6500;
const ARBOREA_FILLER: u8 = 0x00;
const ARBOREA_MIN_BITS: u32 = 104128;
const ARBOREA_TOTAL_BITS: u32 = 110000;

pub fn arborea_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync16(stream, ARBOREA_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        let mut marker = [0u8; 4];
        if stream.next_bytes(&mut marker).is_err() || &marker != ARBOREA_MARKER {
            continue;
        }
        if !check_sequence(stream, ARBOREA_SEQ_COUNT, ARBOREA_FILLER) {
            continue;
        }
        if !check_length(stream, ARBOREA_MIN_BITS) {
            log::warn!("crystals_of_arborea_longtrack: length gate failed, aborting scan");
            return false;
        }
        info.set_payload(Vec::new(), 0, 0, 0);
        info.data_bitoff = data_bitoff;
        info.total_bits = ARBOREA_TOTAL_BITS;
        return true;
    }
}

pub fn arborea_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, ARBOREA_SYNC as u32)
        .expect("16 raw bits is in range");
    buf.bytes(Speed::NOMINAL, MfmMode::Raw, ARBOREA_MARKER)
        .expect("marker bytes");
    for _ in 0..ARBOREA_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, ARBOREA_FILLER as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, ARBOREA_TOTAL_BITS, ARBOREA_FILLER);
}

pub const ARBOREA_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(arborea_write_raw),
    read_raw: Some(arborea_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- infogrames_longtrack -------------------------------------------------------------------

const INFOGRAMES_SYNC: u16 = 0xa144;
const INFOGRAMES_SEQ_COUNT: u32 = 6510;
const INFOGRAMES_FILLER: u8 = 0x00;
const INFOGRAMES_MIN_BITS: u32 = 104160;
const INFOGRAMES_TOTAL_BITS: u32 = 105500;

pub fn infogrames_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync16(stream, INFOGRAMES_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        if !check_sequence(stream, INFOGRAMES_SEQ_COUNT, INFOGRAMES_FILLER) {
            continue;
        }
        if !check_length(stream, INFOGRAMES_MIN_BITS) {
            log::warn!("infogrames_longtrack: length gate failed, aborting scan");
            return false;
        }
        info.set_payload(Vec::new(), 0, 0, 0);
        info.data_bitoff = data_bitoff;
        info.total_bits = INFOGRAMES_TOTAL_BITS;
        return true;
    }
}

pub fn infogrames_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, INFOGRAMES_SYNC as u32)
        .expect("16 raw bits is in range");
    for _ in 0..INFOGRAMES_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, INFOGRAMES_FILLER as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, INFOGRAMES_TOTAL_BITS, INFOGRAMES_FILLER);
}

pub const INFOGRAMES_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(infogrames_write_raw),
    read_raw: Some(infogrames_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- bat_longtrack ---------------------------------------------------------------------------

const BAT_SYNC: u32 = 0xaaaa_8945;
const BAT_SEQ_COUNT: u32 = 6826;
const BAT_FILLER: u8 = 0x00;
const BAT_MIN_BITS: u32 = 109500;
const BAT_TOTAL_BITS: u32 = 110000;

pub fn bat_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync32(stream, BAT_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        if !check_sequence(stream, BAT_SEQ_COUNT, BAT_FILLER) {
            continue;
        }
        if !check_length(stream, BAT_MIN_BITS) {
            log::warn!("bat_longtrack: length gate failed, aborting scan");
            return false;
        }
        info.set_payload(Vec::new(), 0, 0, 0);
        info.data_bitoff = data_bitoff;
        info.total_bits = BAT_TOTAL_BITS;
        return true;
    }
}

pub fn bat_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 32, BAT_SYNC)
        .expect("32 raw bits is in range");
    for _ in 0..BAT_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, BAT_FILLER as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, BAT_TOTAL_BITS, BAT_FILLER);
}

pub const BAT_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(bat_write_raw),
    read_raw: Some(bat_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- app_longtrack ---------------------------------------------------------------------------

const APP_SYNC: u16 = 0x924a;
const APP_SEQ_COUNT: u32 = 6600;
const APP_FILLER: u8 = 0xdc;
const APP_MIN_BITS: u32 = 110000;
const APP_TOTAL_BITS: u32 = 111000;

pub fn app_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync16(stream, APP_SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        if !check_sequence(stream, APP_SEQ_COUNT, APP_FILLER) {
            continue;
        }
        if !check_length(stream, APP_MIN_BITS) {
            log::warn!("app_longtrack: length gate failed, aborting scan");
            return false;
        }
        info.set_payload(Vec::new(), 0, 0, 0);
        info.data_bitoff = data_bitoff;
        info.total_bits = APP_TOTAL_BITS;
        return true;
    }
}

pub fn app_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, APP_SYNC as u32)
        .expect("16 raw bits is in range");
    for _ in 0..APP_SEQ_COUNT {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, APP_FILLER as u32)
            .expect("8 data bits is in range");
    }
    pad_with_filler(buf, APP_TOTAL_BITS, APP_FILLER);
}

pub const APP_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(app_write_raw),
    read_raw: Some(app_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

// --- empty_longtrack -------------------------------------------------------------------------

const EMPTY_MIN_BITS: u32 = 105000;
const EMPTY_TOTAL_BITS: u32 = 110000;

/// No sync at all: matches any track whose current revolution is at least `EMPTY_MIN_BITS`
/// long. Weakest possible pattern - the registry must try this last.
pub fn empty_write_raw(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    if !check_length(stream, EMPTY_MIN_BITS) {
        return false;
    }
    info.set_payload(Vec::new(), 0, 0, 0);
    info.data_bitoff = 0;
    info.total_bits = EMPTY_TOTAL_BITS;
    true
}

pub fn empty_read_raw(_info: &TrackInfo, buf: &mut TrackBuffer) {
    while (buf.len() as u32) < EMPTY_TOTAL_BITS {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, 0)
            .expect("8 data bits is in range");
    }
}

pub const EMPTY_HANDLER: TrackHandler = TrackHandler {
    write_mfm: None,
    read_mfm: None,
    write_raw: Some(empty_write_raw),
    read_raw: Some(empty_read_raw),
    default_bytes_per_sector: 0,
    default_nr_sectors: 0,
};

pub const TRACK_TYPES: [TrackType; 8] = [
    TrackType::ProtecLongtrack,
    TrackType::GremlinLongtrack,
    TrackType::TiertexLongtrack,
    TrackType::CrystalsOfArboreaLongtrack,
    TrackType::InfogramesLongtrack,
    TrackType::BatLongtrack,
    TrackType::AppLongtrack,
    TrackType::EmptyLongtrack,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protec_round_trips_with_non_default_filler() {
        let mut info = TrackInfo::new(TrackType::ProtecLongtrack);
        info.set_payload(vec![0x44], 0, 0, 0);
        let mut buf = TrackBuffer::new();
        protec_read_raw(&info, &mut buf);

        let mut stream = buf.to_raw_bit_stream();
        let mut decoded = TrackInfo::new(TrackType::ProtecLongtrack);
        assert!(protec_write_raw(&mut stream, &mut decoded));
        assert_eq!(decoded.dat(), &[0x44]);
        assert_eq!(decoded.total_bits, PROTEC_TOTAL_BITS);
    }

    #[test]
    fn protec_rejects_a_truncated_revolution() {
        let mut info = TrackInfo::new(TrackType::ProtecLongtrack);
        info.set_payload(vec![0x44], 0, 0, 0);
        let mut buf = TrackBuffer::new();
        protec_read_raw(&info, &mut buf);

        // Same bits, but the revolution is declared shorter than the minimum length gate.
        let mut short = buf.to_raw_bit_stream_with_len(106000);
        let mut decoded = TrackInfo::new(TrackType::ProtecLongtrack);
        assert!(!protec_write_raw(&mut short, &mut decoded));
    }

    #[test]
    fn gremlin_and_tiertex_accept_the_same_stream() {
        let mut buf = TrackBuffer::new();
        gremlin_read_raw(&TrackInfo::new(TrackType::GremlinLongtrack), &mut buf);

        let mut s1 = buf.to_raw_bit_stream();
        let mut i1 = TrackInfo::new(TrackType::GremlinLongtrack);
        assert!(gremlin_write_raw(&mut s1, &mut i1));
        assert_eq!(i1.total_bits, GREMLIN_TOTAL_BITS);

        let mut s2 = buf.to_raw_bit_stream();
        let mut i2 = TrackInfo::new(TrackType::TiertexLongtrack);
        assert!(tiertex_write_raw(&mut s2, &mut i2));
        assert_eq!(i2.total_bits, 0, "tiertex leaves total_bits unchanged");
    }

    #[test]
    fn empty_longtrack_accepts_all_zero_track_gremlin_rejects_it() {
        let mut buf = TrackBuffer::new();
        empty_read_raw(&TrackInfo::new(TrackType::EmptyLongtrack), &mut buf);

        let mut s1 = buf.to_raw_bit_stream();
        let mut i1 = TrackInfo::new(TrackType::GremlinLongtrack);
        assert!(!gremlin_write_raw(&mut s1, &mut i1));

        let mut s2 = buf.to_raw_bit_stream();
        let mut i2 = TrackInfo::new(TrackType::EmptyLongtrack);
        assert!(empty_write_raw(&mut s2, &mut i2));
        assert_eq!(i2.total_bits, EMPTY_TOTAL_BITS);
    }
}
