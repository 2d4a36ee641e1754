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
*/

//! # mfmtrack
//!
//! `mfmtrack` is a small Rust library implementing the track-handler framework used to
//! recognise and re-encode Amiga floppy-disk tracks written in game- and protection-specific
//! on-disk formats.
//!
//! The crate does not read flux, parse disk-image containers, or provide a CLI: it consumes a
//! raw MFM bit sequence (already decoded from flux by an upstream collaborator) through
//! [`bitstream::RawBitStream`], and hands it to a [`handler::TrackHandler`] looked up from the
//! [`registry::HandlerRegistry`]. A handler either decodes the stream into a [`track_info::TrackInfo`]
//! payload, or re-encodes a stored payload back into a synthesized bit sequence via
//! [`track_buffer::TrackBuffer`].
//!
//! See [`registry::HandlerRegistry::standard`] for the entry point most callers want.

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod mfm;
pub mod registry;
pub mod track_buffer;
pub mod track_info;

pub use bitstream::RawBitStream;
pub use error::TrackError;
pub use handler::TrackHandler;
pub use mfm::MfmMode;
pub use registry::HandlerRegistry;
pub use track_info::{TrackInfo, TrackType};
