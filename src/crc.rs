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

    src/crc.rs

    A running CRC-16/CCITT accumulator, wrapping the `crc16` crate's
    CCITT_FALSE table. RawBitStream::start_crc resets one of these and feeds
    it every byte subsequently consumed by next_bytes.
*/

/// A running CRC-16/CCITT accumulator.
///
/// Bytes are fed one at a time as the bit stream consumes them; the running value can be
/// sampled at any point without disturbing the accumulator.
#[derive(Debug, Default, Clone)]
pub struct RunningCrc {
    state: crc16::State<crc16::CCITT_FALSE>,
}

impl RunningCrc {
    /// Start (or restart) the accumulator from its initial value.
    pub fn new() -> Self {
        RunningCrc {
            state: crc16::State::<crc16::CCITT_FALSE>::new(),
        }
    }

    /// Feed a single byte into the running CRC.
    pub fn update(&mut self, byte: u8) {
        self.state.update(&[byte]);
    }

    /// Feed a slice of bytes into the running CRC.
    pub fn update_slice(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Sample the current CRC-16/CCITT value without resetting the accumulator.
    pub fn value(&self) -> u16 {
        self.state.get()
    }
}

/// One-shot CRC-16/CCITT over a byte slice, for callers (such as `sevencities_longtrack`) that
/// already have the full buffer in hand rather than accumulating it incrementally.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc = RunningCrc::new();
    crc.update_slice(data);
    crc.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_matches_one_shot() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut running = RunningCrc::new();
        for &b in data {
            running.update(b);
        }
        assert_eq!(running.value(), crc16_ccitt(data));
    }

    #[test]
    fn empty_buffer_is_initial_state() {
        assert_eq!(crc16_ccitt(&[]), RunningCrc::new().value());
    }
}
