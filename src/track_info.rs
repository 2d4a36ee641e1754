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

    src/track_info.rs

    TrackType tags the eleven handlers this crate ships; TrackInfo is the
    per-track record a handler's decode op populates and its encode op
    reads back from.
*/

use strum::{Display, EnumIter, EnumString};

/// The track-type tags known to this crate's handler registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TrackType {
    RtypeA,
    RtypeB,
    ProtecLongtrack,
    GremlinLongtrack,
    TiertexLongtrack,
    CrystalsOfArboreaLongtrack,
    InfogramesLongtrack,
    BatLongtrack,
    AppLongtrack,
    SevencitiesLongtrack,
    EmptyLongtrack,
}

/// Per-track metadata and owned payload, produced by exactly one handler's decode operation and
/// consumed by that same handler's encode operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    pub track_type: TrackType,
    dat: Vec<u8>,
    nr_sectors: u32,
    bytes_per_sector: u32,
    valid_sectors: u32,
    pub data_bitoff: u32,
    pub total_bits: u32,
}

impl TrackInfo {
    /// An empty record for `track_type`, with no sectors recovered yet. Handlers populate it via
    /// [`TrackInfo::set_payload`] on successful decode.
    pub fn new(track_type: TrackType) -> Self {
        TrackInfo {
            track_type,
            dat: Vec::new(),
            nr_sectors: 0,
            bytes_per_sector: 0,
            valid_sectors: 0,
            data_bitoff: 0,
            total_bits: 0,
        }
    }

    pub fn dat(&self) -> &[u8] {
        &self.dat
    }

    pub fn len(&self) -> usize {
        self.dat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dat.is_empty()
    }

    pub fn nr_sectors(&self) -> u32 {
        self.nr_sectors
    }

    pub fn bytes_per_sector(&self) -> u32 {
        self.bytes_per_sector
    }

    pub fn valid_sectors(&self) -> u32 {
        self.valid_sectors
    }

    /// Record a successfully decoded payload. Enforces the invariant that a non-zero
    /// `valid_sectors` mask implies `dat.len() == nr_sectors * bytes_per_sector`, unless
    /// `bytes_per_sector` is zero (a handler-declared override for non-sectored payloads such as
    /// the long-track protections).
    pub fn set_payload(
        &mut self,
        dat: Vec<u8>,
        nr_sectors: u32,
        bytes_per_sector: u32,
        valid_sectors: u32,
    ) {
        if valid_sectors != 0 && bytes_per_sector != 0 {
            debug_assert_eq!(
                dat.len() as u32,
                nr_sectors * bytes_per_sector,
                "dat length must equal nr_sectors * bytes_per_sector when valid_sectors is set"
            );
        }
        self.dat = dat;
        self.nr_sectors = nr_sectors;
        self.bytes_per_sector = bytes_per_sector;
        self.valid_sectors = valid_sectors;
    }

    /// `data_bitoff < total_bits` whenever a long-track or re-encode geometry has been recorded.
    pub fn geometry_is_consistent(&self) -> bool {
        self.total_bits == 0 || self.data_bitoff < self.total_bits
    }
}
