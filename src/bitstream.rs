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

    src/bitstream.rs

    RawBitStream is a forward-only cursor over a sequence of raw bits
    produced by flux decoding. It is the read side handlers consume; the
    write side is TrackBuffer.
*/

use crate::crc::RunningCrc;
use crate::error::TrackError;
use crate::mfm::{mfm_decode_bits, MfmMode};
use bit_vec::BitVec;

/// A forward-only cursor over one or more revolutions of raw MFM bits.
///
/// Observable state matches the data model: a rolling 32-bit shift register of the most
/// recently consumed bits (newest in the low bits), a per-revolution bit offset from the last
/// index pulse, the length of the just-finished revolution once it has been crossed, a running
/// CRC-16/CCITT a handler can reset and sample, and a byte-phase counter `next_bytes` checks
/// alignment against (reset at the most recent matched sync, not the index pulse).
pub struct RawBitStream {
    bits: BitVec,
    pos: usize,
    revolution_len: usize,
    shift_reg: u32,
    index_offset_bc: u32,
    track_len_bc: u32,
    byte_phase_bc: u32,
    crc: RunningCrc,
}

impl RawBitStream {
    /// Build a stream from a raw bit sequence representing `revolution_len` bits per
    /// revolution. `bits` may hold more than one revolution back to back, to support retrying a
    /// scan across an index boundary.
    pub fn new(bits: BitVec, revolution_len: usize) -> Self {
        RawBitStream {
            bits,
            pos: 0,
            revolution_len,
            shift_reg: 0,
            index_offset_bc: 0,
            track_len_bc: 0,
            byte_phase_bc: 0,
            crc: RunningCrc::new(),
        }
    }

    /// Convenience constructor from a plain byte buffer that is already formed of whole raw
    /// bits (MSB first), one revolution long.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = BitVec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1 == 1);
            }
        }
        let len = bits.len();
        RawBitStream::new(bits, len)
    }

    pub fn index_offset_bc(&self) -> u32 {
        self.index_offset_bc
    }

    pub fn track_len_bc(&self) -> u32 {
        self.track_len_bc
    }

    pub fn shift_reg(&self) -> u32 {
        self.shift_reg
    }

    pub fn bit_pos(&self) -> usize {
        self.pos
    }

    pub fn bits_remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.pos)
    }

    /// Consume one raw bit into the shift register.
    pub fn next_bit(&mut self) -> Result<bool, TrackError> {
        if self.pos >= self.bits.len() {
            return Err(TrackError::EndOfStream);
        }
        let bit = self.bits.get(self.pos).unwrap();
        self.pos += 1;
        self.shift_reg = (self.shift_reg << 1) | (bit as u32);
        self.index_offset_bc += 1;
        self.byte_phase_bc += 1;
        Ok(bit)
    }

    /// Reset byte-phase tracking to the current bit position. Called by the sync-scanning
    /// helpers the moment a sync word matches, so `next_bytes`'s alignment check is relative to
    /// the record just found rather than to the index pulse or any earlier garbage/spurious-sync
    /// bits that preceded it.
    pub fn mark_byte_phase(&mut self) {
        self.byte_phase_bc = 0;
    }

    /// Consume `n` raw bits (`1..=32`); the newest bits occupy the low `n` positions of the
    /// returned value.
    pub fn next_bits(&mut self, n: u32) -> Result<u32, TrackError> {
        if !(1..=32).contains(&n) {
            return Err(TrackError::BitCountOutOfRange(n));
        }
        let mut value: u32 = 0;
        for _ in 0..n {
            let bit = self.next_bit()?;
            value = (value << 1) | (bit as u32);
        }
        Ok(value)
    }

    /// Consume `n` bytes. The cursor must currently be byte-aligned relative to the last call to
    /// [`mark_byte_phase`](Self::mark_byte_phase) (`byte_phase_bc % 8 == 0`) — framing is
    /// relative to wherever a handler's record begins, typically a matched sync, not to the
    /// index pulse. A stream that has never had its byte phase marked tracks alignment from its
    /// own start. Alignment is otherwise the handler's responsibility, established by calling
    /// `next_bits` up to a byte boundary beforehand if needed. Bytes consumed this way feed the
    /// running CRC.
    pub fn next_bytes(&mut self, dst: &mut [u8]) -> Result<(), TrackError> {
        if self.byte_phase_bc % 8 != 0 {
            return Err(TrackError::NotByteAligned);
        }
        for slot in dst.iter_mut() {
            let byte = self.next_bits(8)? as u8;
            self.crc.update(byte);
            *slot = byte;
        }
        Ok(())
    }

    /// Decode a single MFM-clocked scalar value of `n_bits` data bits (`1..=32`), consuming
    /// `2 * n_bits` raw bits. `mode` must be one of the scalar clock-bit modes (`Raw`, `Mfm`,
    /// `MfmAll`, `MfmOdd`, `MfmEven`).
    pub fn next_mfm_scalar(&mut self, mode: MfmMode, n_bits: u32) -> Result<u32, TrackError> {
        if !(1..=32).contains(&n_bits) {
            return Err(TrackError::BitCountOutOfRange(n_bits));
        }
        let mut remaining = n_bits;
        let mut value: u32 = 0;
        while remaining > 0 {
            let chunk = remaining.min(16);
            let raw = self.next_bits(chunk * 2)?;
            let decoded = mfm_decode_bits(mode, chunk, raw)?;
            value = (value << chunk) | decoded;
            remaining -= chunk;
        }
        Ok(value)
    }

    /// Advance to the next index pulse. `track_len_bc` becomes the number of raw bits consumed
    /// since the last index crossing (or since the stream started, for the first call).
    pub fn next_index(&mut self) -> Result<(), TrackError> {
        let next_boundary = ((self.pos / self.revolution_len) + 1) * self.revolution_len;
        while self.pos < next_boundary {
            self.next_bit()?;
        }
        self.track_len_bc = self.index_offset_bc;
        self.index_offset_bc = 0;
        Ok(())
    }

    /// Reset the running CRC-16/CCITT accumulator. Bytes consumed by `next_bytes` after this
    /// call accumulate into it.
    pub fn start_crc(&mut self) {
        self.crc = RunningCrc::new();
    }

    /// Sample the running CRC-16/CCITT without resetting it.
    pub fn crc16_ccitt(&self) -> u16 {
        self.crc.value()
    }
}
