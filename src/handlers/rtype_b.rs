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

    src/handlers/rtype_b.rs

    R-Type variant B: sync 0x9521, an MFM filler byte, then 1638
    longwords each even/odd-split independently (per-long, not a flat
    whole-payload split like variant A), and a trailing checksum long
    with both the even-masked checksum bits and the odd bits forced set.
*/

use super::scan_for_sync16;
use crate::error::TrackError;
use crate::handler::TrackHandler;
use crate::mfm::{amigados_checksum, join_long, split_long, MfmMode};
use crate::track_buffer::{Speed, TrackBuffer};
use crate::track_info::{TrackInfo, TrackType};
use crate::RawBitStream;

const SYNC: u16 = 0x9521;
const PAYLOAD_LEN: usize = 6552;
const NR_LONGWORDS: usize = PAYLOAD_LEN / 4;
const TOTAL_BITS: u32 = 105500;

fn decode_long_even_odd(stream: &mut RawBitStream) -> Result<u32, TrackError> {
    let mut buf = [0u8; 8];
    stream.next_bytes(&mut buf)?;
    let even = u32::from_be_bytes(buf[0..4].try_into().unwrap());
    let odd = u32::from_be_bytes(buf[4..8].try_into().unwrap());
    Ok(join_long(even, odd))
}

fn encode_long_even_odd(buf: &mut TrackBuffer, value: u32) -> Result<(), TrackError> {
    let (even, odd) = split_long(value);
    buf.bytes(Speed::NOMINAL, MfmMode::Raw, &even.to_be_bytes())?;
    buf.bytes(Speed::NOMINAL, MfmMode::Raw, &odd.to_be_bytes())
}

fn try_read_body(stream: &mut RawBitStream) -> Option<Vec<u8>> {
    let filler = stream.next_mfm_scalar(MfmMode::MfmAll, 8).ok()? as u8;
    if filler != 0 {
        log::trace!("rtype_b: non-zero filler byte {filler:#04x}, spurious sync");
        return None;
    }
    let mut decoded = Vec::with_capacity(PAYLOAD_LEN);
    for _ in 0..NR_LONGWORDS {
        let value = decode_long_even_odd(stream).ok()?;
        decoded.extend_from_slice(&value.to_be_bytes());
    }
    let trailing = decode_long_even_odd(stream).ok()?;
    let computed = amigados_checksum(&decoded).ok()?;
    let expected = (computed & 0x5555_5555) | 0xAAAA_AAAA;
    if trailing != expected {
        log::warn!("rtype_b: checksum mismatch (stored {trailing:#010x}, computed {expected:#010x})");
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
        log::trace!("rtype_b: sync match at bit {data_bitoff}");
        if let Some(decoded) = try_read_body(stream) {
            info.set_payload(decoded, 1, PAYLOAD_LEN as u32, 1);
            info.data_bitoff = data_bitoff;
            info.total_bits = TOTAL_BITS;
            log::debug!("rtype_b: recognised at bit {data_bitoff}");
            return true;
        }
    }
}

pub fn read_mfm(info: &TrackInfo, buf: &mut TrackBuffer) {
    let computed = amigados_checksum(info.dat()).expect("rtype_b payload is a multiple of 4 bytes");
    let trailing = (computed & 0x5555_5555) | 0xAAAA_AAAA;

    buf.bits(Speed::NOMINAL, MfmMode::Raw, 16, SYNC as u32)
        .expect("16 raw bits is in range");
    buf.bits(Speed::NOMINAL, MfmMode::MfmAll, 8, 0)
        .expect("8 data bits is in range");
    for chunk in info.dat().chunks_exact(4) {
        let value = u32::from_be_bytes(chunk.try_into().unwrap());
        encode_long_even_odd(buf, value).expect("4-byte chunk");
    }
    encode_long_even_odd(buf, trailing).expect("trailing checksum long");
}

pub const HANDLER: TrackHandler = TrackHandler {
    write_mfm: Some(write_mfm),
    read_mfm: Some(read_mfm),
    write_raw: None,
    read_raw: None,
    default_bytes_per_sector: PAYLOAD_LEN,
    default_nr_sectors: 1,
};

pub const TRACK_TYPE: TrackType = TrackType::RtypeB;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_payload_checksum_is_all_odd_bits() {
        let dat = vec![0u8; PAYLOAD_LEN];
        let computed = amigados_checksum(&dat).unwrap();
        assert_eq!((computed & 0x5555_5555) | 0xAAAA_AAAA, 0xAAAA_AAAA);
    }

    #[test]
    fn round_trips_a_synthetic_payload() {
        let dat: Vec<u8> = (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect();
        let mut info = TrackInfo::new(TRACK_TYPE);
        info.set_payload(dat.clone(), 1, PAYLOAD_LEN as u32, 1);

        let mut buf = TrackBuffer::new();
        read_mfm(&info, &mut buf);

        let mut stream = buf.to_raw_bit_stream();
        let mut decoded = TrackInfo::new(TRACK_TYPE);
        assert!(write_mfm(&mut stream, &mut decoded));
        assert_eq!(decoded.dat(), dat.as_slice());
        assert_eq!(decoded.total_bits, TOTAL_BITS);
    }
}
