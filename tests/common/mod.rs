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

    tests/common/mod.rs

    Shared fixture-synthesis helpers for the end-to-end scenario tests.
*/

#![allow(dead_code)]

use mfmtrack::mfm::MfmMode;
use mfmtrack::track_buffer::{Speed, TrackBuffer};

/// Initialize the test logger once; harmless to call from every test file.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Push `n` leading raw garbage bits (alternating pattern), used to exercise sync-drift
/// tolerance without accidentally spelling out a real sync word.
pub fn push_garbage_bits(buf: &mut TrackBuffer, n: u32) {
    let mut remaining = n;
    while remaining > 0 {
        let chunk = remaining.min(16);
        buf.bits(Speed::NOMINAL, MfmMode::Raw, chunk, 0x5555 & ((1u32 << chunk) - 1))
            .unwrap();
        remaining -= chunk;
    }
}

/// Pad `buf` with MFM-encoded zero bytes until it reaches at least `target_bits` raw bits.
pub fn pad_mfm_zero(buf: &mut TrackBuffer, target_bits: u32) {
    while (buf.len() as u32) < target_bits {
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 8, 0).unwrap();
    }
}
