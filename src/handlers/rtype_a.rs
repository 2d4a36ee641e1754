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

    src/handlers/rtype_a.rs

    R-Type variant A: sync 0x9521, an MFM-encoded zero filler byte, a
    32-bit mfm_odd checksum, then 5968 payload bytes in the flat
    even/odd plane split.
*/

use super::scan_for_sync16;
use crate::handler::TrackHandler;
use crate::mfm::{amigados_checksum, mfm_decode_bytes, MfmMode};
use crate::track_buffer::{Speed, TrackBuffer};
use crate::track_info::{TrackInfo, TrackType};
use crate::RawBitStream;

const SYNC: u16 = 0x9521;
const PAYLOAD_LEN: usize = 5968;

fn try_read_body(stream: &mut RawBitStream) -> Option<Vec<u8>> {
    let filler = stream.next_mfm_scalar(MfmMode::MfmAll, 8).ok()? as u8;
    let checksum = stream.next_mfm_scalar(MfmMode::MfmOdd, 32).ok()?;
    let mut encoded = vec![0u8; PAYLOAD_LEN * 2];
    stream.next_bytes(&mut encoded).ok()?;
    let decoded = mfm_decode_bytes(MfmMode::MfmEvenOdd, PAYLOAD_LEN, &encoded).ok()?;
    if filler != 0 {
        log::trace!("rtype_a: non-zero filler byte {filler:#04x}, spurious sync");
        return None;
    }
    let recomputed = amigados_checksum(&decoded).ok()?;
    if recomputed != checksum {
        log::warn!("rtype_a: checksum mismatch (stored {checksum:#010x}, computed {recomputed:#010x})");
        return None;
    }
    Some(decoded)
}

pub fn write_mfm(stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
    loop {
        let data_bitoff = match scan_for_sync16(stream, SYNC) {
            Ok(off) => off,
            Err(_) => return false,
        };
        log::trace!("rtype_a: sync match at bit {data_bitoff}");
        if let Some(decoded) = try_read_body(stream) {
            info.set_payload(decoded, 1, PAYLOAD_LEN as u32, 1);
            info.data_bitoff = data_bitoff;
            info.total_bits = data_bitoff + 16 + 16 + 64 + (PAYLOAD_LEN as u32 * 2 * 8);
            log::debug!("rtype_a: recognised at bit {data_bitoff}");
            return true;
        }
    }
}

pub fn read_mfm(info: &TrackInfo, buf: &mut TrackBuffer) {
    let checksum = amigados_checksum(info.dat()).expect("rtype_a payload is a multiple of 4 bytes");
    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, SYNC as u32)
        .expect("16 raw bits is in range");
    buf.bits(Speed::NOMINAL, MfmMode::MfmAll, 8, 0)
        .expect("8 data bits is in range");
    buf.scalar(Speed::NOMINAL, MfmMode::MfmOdd, 32, checksum)
        .expect("32 data bits is in range");
    buf.bytes(Speed::NOMINAL, MfmMode::MfmEvenOdd, info.dat())
        .expect("rtype_a payload is a multiple of 4 bytes");
}

pub const HANDLER: TrackHandler = TrackHandler {
    write_mfm: Some(write_mfm),
    read_mfm: Some(read_mfm),
    write_raw: None,
    read_raw: None,
    default_bytes_per_sector: PAYLOAD_LEN,
    default_nr_sectors: 1,
};

pub const TRACK_TYPE: TrackType = TrackType::RtypeA;
