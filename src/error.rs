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

    src/error.rs

    Error type for the codec primitives. Handler operations themselves never
    return a Result - they return Option<TrackInfo> or nothing, matching the
    contract's null/payload-only error channel. This type covers the layer
    below that: contract violations in the bit-level primitives a handler
    composes.
*/

use thiserror::Error;

/// Errors surfaced by the bit stream, track buffer, and MFM codec primitives.
///
/// Handler decode/encode operations (`write_mfm`, `read_mfm`, `write_raw`, `read_raw`) do not
/// return this type; they report failure by returning `None` per the handler contract. This
/// type exists for the layer the handlers are built on, where misuse (an out-of-range bit
/// count, a misaligned byte read, an unknown track-type tag) is a programmer error worth
/// reporting rather than silently producing garbage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("the raw bit stream ended before the requested read completed")]
    EndOfStream,
    #[error("requested bit count {0} is outside the valid range 1..=32")]
    BitCountOutOfRange(u32),
    #[error("next_bytes called while the cursor is not byte-aligned")]
    NotByteAligned,
    #[error("buffer length {0} is not a multiple of 4 bytes")]
    BufferNotWordAligned(usize),
    #[error("unknown track-type tag")]
    UnknownTrackType,
}
