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

    src/track_buffer.rs

    TrackBuffer is the write-side counterpart of RawBitStream: it appends
    bits or bytes under a named encoding mode, tracking the previous
    emitted data bit so the MFM clock-bit modes can compute a correct
    clock bit for the next cell.
*/

use crate::bitstream::RawBitStream;
use crate::error::TrackError;
use crate::mfm::{mfm_encode_bytes, MfmMode};
use bit_vec::BitVec;

/// A per-cell timing hint recorded alongside each emitted bit, for downstream flux generation.
/// Carries no bit-level semantics: `decode(encode(x)) = x` holds regardless of the speed values
/// used during encode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Speed(pub u16);

impl Speed {
    pub const NOMINAL: Speed = Speed(1000);
}

/// Write-side bit appender. Appends bits or bytes under a named [`MfmMode`], tracking clock-bit
/// continuity across calls the way a real write to the track would.
pub struct TrackBuffer {
    bits: BitVec,
    speeds: Vec<Speed>,
    last_bit: bool,
}

impl Default for TrackBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackBuffer {
    pub fn new() -> Self {
        TrackBuffer {
            bits: BitVec::new(),
            speeds: Vec::new(),
            last_bit: false,
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn speeds(&self) -> &[Speed] {
        &self.speeds
    }

    /// Build a [`RawBitStream`] over exactly what has been written so far, treating it as one
    /// revolution. Primarily useful for round-tripping a handler's `read_*` output back through
    /// its `write_*` for testing.
    pub fn to_raw_bit_stream(&self) -> RawBitStream {
        let len = self.bits.len();
        RawBitStream::new(self.bits.clone(), len)
    }

    /// As [`TrackBuffer::to_raw_bit_stream`], but with an explicit (typically shorter)
    /// revolution length - useful for simulating a track truncated mid-capture.
    pub fn to_raw_bit_stream_with_len(&self, revolution_len: usize) -> RawBitStream {
        RawBitStream::new(self.bits.clone(), revolution_len)
    }

    fn push_raw_bit(&mut self, bit: bool, speed: Speed) {
        self.bits.push(bit);
        self.speeds.push(speed);
        self.last_bit = bit;
    }

    /// Append the low `n` bits of `value` under `mode`. For the clock-bit modes (`Mfm`,
    /// `MfmAll`, `MfmOdd`, `MfmEven`), `n` must be `1..=16` (the clock-bit mechanism is scalar;
    /// for wider values use [`TrackBuffer::scalar`]). `MfmEvenOdd` is a bulk, buffer-level mode
    /// and is not valid here - use [`TrackBuffer::bytes`].
    pub fn bits(&mut self, speed: Speed, mode: MfmMode, n: u32, value: u32) -> Result<(), TrackError> {
        match mode {
            MfmMode::Raw => {
                if !(1..=32).contains(&n) {
                    return Err(TrackError::BitCountOutOfRange(n));
                }
                for i in (0..n).rev() {
                    let bit = (value >> i) & 1 == 1;
                    self.push_raw_bit(bit, speed);
                }
                Ok(())
            }
            MfmMode::Mfm | MfmMode::MfmAll | MfmMode::MfmOdd | MfmMode::MfmEven => {
                if !(1..=16).contains(&n) {
                    return Err(TrackError::BitCountOutOfRange(n));
                }
                for i in (0..n).rev() {
                    let data_bit = (value >> i) & 1 == 1;
                    let clock_bit = !(self.last_bit || data_bit);
                    self.push_raw_bit(clock_bit, speed);
                    self.push_raw_bit(data_bit, speed);
                }
                Ok(())
            }
            MfmMode::MfmEvenOdd => Err(TrackError::BitCountOutOfRange(n)),
        }
    }

    /// Append a scalar value wider than 16 bits (up to 32) under a clock-bit mode, by chunking
    /// it into `<=16`-bit pieces fed to [`TrackBuffer::bits`] in sequence. Used for the 32-bit
    /// checksum trailers.
    pub fn scalar(&mut self, speed: Speed, mode: MfmMode, n_bits: u32, value: u32) -> Result<(), TrackError> {
        if !(1..=32).contains(&n_bits) {
            return Err(TrackError::BitCountOutOfRange(n_bits));
        }
        let mut remaining = n_bits;
        while remaining > 0 {
            let chunk = remaining.min(16);
            let shift = remaining - chunk;
            let mask: u32 = if chunk == 32 { u32::MAX } else { (1u32 << chunk) - 1 };
            let part = (value >> shift) & mask;
            self.bits(speed, mode, chunk, part)?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Append `src` under `mode`. `Raw`/`Mfm`-family modes encode byte-by-byte; `MfmEvenOdd`
    /// splits `src` (length a multiple of 4) into its even/odd plane wire representation per
    /// [`crate::mfm::mfm_encode_bytes`] and appends the raw plane bytes directly (no further
    /// clock insertion - the plane split already guarantees MFM-safe spacing).
    pub fn bytes(&mut self, speed: Speed, mode: MfmMode, src: &[u8]) -> Result<(), TrackError> {
        match mode {
            MfmMode::Raw => {
                for &byte in src {
                    self.bits(speed, MfmMode::Raw, 8, byte as u32)?;
                }
                Ok(())
            }
            MfmMode::Mfm | MfmMode::MfmAll | MfmMode::MfmOdd | MfmMode::MfmEven => {
                for &byte in src {
                    self.bits(speed, mode, 8, byte as u32)?;
                }
                Ok(())
            }
            MfmMode::MfmEvenOdd => {
                let encoded = mfm_encode_bytes(src.len(), src)?;
                for &byte in &encoded {
                    self.bits(speed, MfmMode::Raw, 8, byte as u32)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mfm::mfm_decode_bits;

    #[test]
    fn mfm_round_trips_through_raw_bit_stream() {
        let mut buf = TrackBuffer::new();
        buf.bits(Speed::NOMINAL, MfmMode::Mfm, 16, 0xA5A5).unwrap();
        let mut stream = buf.to_raw_bit_stream();
        let raw = stream.next_bits(32).unwrap();
        assert_eq!(mfm_decode_bits(MfmMode::Mfm, 16, raw).unwrap(), 0xA5A5);
    }

    #[test]
    fn scalar_32_bit_round_trips() {
        let mut buf = TrackBuffer::new();
        buf.scalar(Speed::NOMINAL, MfmMode::MfmOdd, 32, 0xDEAD_BEEF).unwrap();
        let mut stream = buf.to_raw_bit_stream();
        assert_eq!(stream.next_mfm_scalar(MfmMode::MfmOdd, 32).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn even_odd_bytes_round_trip_through_stream() {
        let decoded: Vec<u8> = (0..32u32).map(|i| i as u8).collect();
        let mut buf = TrackBuffer::new();
        buf.bytes(Speed::NOMINAL, MfmMode::MfmEvenOdd, &decoded).unwrap();
        let mut stream = buf.to_raw_bit_stream();
        let mut encoded = vec![0u8; decoded.len() * 2];
        stream.next_bytes(&mut encoded).unwrap();
        let redecoded = crate::mfm::mfm_decode_bytes(MfmMode::MfmEvenOdd, decoded.len(), &encoded).unwrap();
        assert_eq!(redecoded, decoded);
    }
}
