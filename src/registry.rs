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

    src/registry.rs

    Maps a track-type tag to its handler. Built once, read-only
    afterwards. Recognition tries handlers in registration order and
    takes the first match - weaker patterns must be registered last.
*/

use crate::bitstream::RawBitStream;
use crate::handler::TrackHandler;
use crate::handlers::{longtrack, rtype_a, rtype_b, sevencities};
use crate::track_info::{TrackInfo, TrackType};

/// An immutable, process-wide table of track-type tag to handler. Construct once via
/// [`HandlerRegistry::standard`]; safe to share across threads (`Send + Sync`) since lookups
/// never mutate it.
pub struct HandlerRegistry {
    entries: Vec<(TrackType, TrackHandler)>,
}

impl HandlerRegistry {
    /// The registry this crate ships: `rtype_a`, `rtype_b`, the seven long-track protections,
    /// `sevencities_longtrack`, registered in the order recognition should try them. Stronger,
    /// more specific patterns come first; `empty_longtrack` - which accepts on length alone - is
    /// last, so it never shadows a format that actually matches structurally.
    pub fn standard() -> Self {
        let mut entries = vec![
            (rtype_a::TRACK_TYPE, rtype_a::HANDLER),
            (rtype_b::TRACK_TYPE, rtype_b::HANDLER),
            (sevencities::TRACK_TYPE, sevencities::HANDLER),
            (TrackType::ProtecLongtrack, longtrack::PROTEC_HANDLER),
            (TrackType::GremlinLongtrack, longtrack::GREMLIN_HANDLER),
            (TrackType::TiertexLongtrack, longtrack::TIERTEX_HANDLER),
            (
                TrackType::CrystalsOfArboreaLongtrack,
                longtrack::ARBOREA_HANDLER,
            ),
            (TrackType::InfogramesLongtrack, longtrack::INFOGRAMES_HANDLER),
            (TrackType::BatLongtrack, longtrack::BAT_HANDLER),
            (TrackType::AppLongtrack, longtrack::APP_HANDLER),
        ];
        entries.push((TrackType::EmptyLongtrack, longtrack::EMPTY_HANDLER));
        HandlerRegistry { entries }
    }

    /// Look up a handler by tag. An unknown tag is a contract violation (every [`TrackType`]
    /// variant is registered by [`HandlerRegistry::standard`]) - panics rather than returning an
    /// error, matching the "programmer error, implementations should assert" guidance for this
    /// failure mode.
    pub fn get(&self, tag: TrackType) -> &TrackHandler {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, h)| h)
            .unwrap_or_else(|| panic!("unregistered track type tag: {tag:?}"))
    }

    /// Iterate the registered `(TrackType, TrackHandler)` pairs in registration order.
    pub fn iter_in_order(&self) -> impl Iterator<Item = &(TrackType, TrackHandler)> {
        self.entries.iter()
    }

    /// Try every registered handler in order against a fresh `stream` built the same way each
    /// time (the caller supplies `make_stream` since a `RawBitStream` is single-use once
    /// partially consumed); returns the tag and populated [`TrackInfo`] of the first handler that
    /// recognises it.
    pub fn recognize(
        &self,
        mut make_stream: impl FnMut() -> RawBitStream,
    ) -> Option<(TrackType, TrackInfo)> {
        for (tag, handler) in self.iter_in_order() {
            let mut stream = make_stream();
            let mut info = TrackInfo::new(*tag);
            if handler.decode(&mut stream, &mut info) {
                return Some((*tag, info));
            }
        }
        None
    }
}
