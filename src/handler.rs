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

    src/handler.rs

    The four-operation handler contract. A handler is a value polymorphic
    over {decode-mfm, encode-mfm, decode-raw, encode-raw}; any subset of
    the four may be absent, encoded as plain Option<fn> fields rather than
    a dynamic method table.
*/

use crate::bitstream::RawBitStream;
use crate::track_buffer::TrackBuffer;
use crate::track_info::TrackInfo;

/// Scan `stream` for the format's sync and, on a successful match and validation, populate
/// `info` with the decoded payload and geometry. Returns `true` on success; `false` means the
/// stream was exhausted without a match (not recognised) - the caller tries the next handler, or
/// for the long-track length gate, that the sync matched but the length constraint failed, which
/// is fatal to this handler's scan (§4.4.c: abort, do not retry).
pub type DecodeFn = fn(&mut RawBitStream, &mut TrackInfo) -> bool;

/// Emit the track's encoded bit stream into `buf` from the payload and geometry already present
/// in `info`.
pub type EncodeFn = fn(&TrackInfo, &mut TrackBuffer);

/// Immutable per-format descriptor: up to four operation pointers, plus the default sector
/// geometry a caller can seed a fresh [`TrackInfo`] with before calling `write_mfm`/`write_raw`.
#[derive(Copy, Clone, Default)]
pub struct TrackHandler {
    pub write_mfm: Option<DecodeFn>,
    pub read_mfm: Option<EncodeFn>,
    pub write_raw: Option<DecodeFn>,
    pub read_raw: Option<EncodeFn>,
    pub default_bytes_per_sector: usize,
    pub default_nr_sectors: u32,
}

impl TrackHandler {
    /// Run whichever of `write_mfm`/`write_raw` is present against `stream`, preferring
    /// `write_mfm` (a handler implementing both would be unusual, but the contract does not rule
    /// it out). Returns `false` if neither is implemented.
    pub fn decode(&self, stream: &mut RawBitStream, info: &mut TrackInfo) -> bool {
        if let Some(f) = self.write_mfm {
            return f(stream, info);
        }
        if let Some(f) = self.write_raw {
            return f(stream, info);
        }
        false
    }

    /// Run whichever of `read_mfm`/`read_raw` is present against `buf`. No-op if neither is
    /// implemented.
    pub fn encode(&self, info: &TrackInfo, buf: &mut TrackBuffer) {
        if let Some(f) = self.read_mfm {
            f(info, buf);
            return;
        }
        if let Some(f) = self.read_raw {
            f(info, buf);
        }
    }
}
