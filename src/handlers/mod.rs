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

    src/handlers/mod.rs

    Concrete handler implementations and the bit-level scanning helpers
    they share: scanning bit-by-bit for a sync word (the decode policy in
    spec §4.4 requires this rather than byte-aligned search, so sync-drift
    and spurious syncs are handled uniformly), and the two long-track
    primitives, check_sequence/check_length.
*/

pub mod longtrack;
pub mod rtype_a;
pub mod rtype_b;
pub mod sevencities;

use crate::bitstream::RawBitStream;
use crate::error::TrackError;
use crate::mfm::MfmMode;

/// Scan bit-by-bit for a 16-bit raw sync pattern, returning the bit offset (from the last index
/// pulse) at which the sync began. Scans one bit at a time so up to 15 leading garbage bits, or
/// an earlier spurious occurrence of the sync itself, never prevent recognition.
pub(crate) fn scan_for_sync16(stream: &mut RawBitStream, sync: u16) -> Result<u32, TrackError> {
    loop {
        stream.next_bit()?;
        if (stream.shift_reg() & 0xFFFF) as u16 == sync {
            stream.mark_byte_phase();
            return Ok(stream.index_offset_bc() - 16);
        }
    }
}

/// As [`scan_for_sync16`] but for a 32-bit raw pattern (used by `bat_longtrack`'s
/// lead-in-qualified sync).
pub(crate) fn scan_for_sync32(stream: &mut RawBitStream, sync: u32) -> Result<u32, TrackError> {
    loop {
        stream.next_bit()?;
        if stream.shift_reg() == sync {
            stream.mark_byte_phase();
            return Ok(stream.index_offset_bc() - 32);
        }
    }
}

/// Read `n` successive MFM-encoded bytes and require each to decode to `byte`. Returns `false`
/// (not end-of-stream fatal, just a failed check) on the first mismatch or if the stream ends
/// early.
pub(crate) fn check_sequence(stream: &mut RawBitStream, n: u32, byte: u8) -> bool {
    for _ in 0..n {
        match stream.next_mfm_scalar(MfmMode::Mfm, 8) {
            Ok(decoded) if decoded as u8 == byte => continue,
            _ => return false,
        }
    }
    true
}

/// Advance to the next index pulse and require the just-finished revolution to be at least
/// `min` raw bits long. This is the fatal length gate (§4.4.c): callers must abort their scan
/// entirely on `false`, not continue looking for another sync.
pub(crate) fn check_length(stream: &mut RawBitStream, min: u32) -> bool {
    if stream.next_index().is_err() {
        return false;
    }
    stream.track_len_bc() >= min
}
