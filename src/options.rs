// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// What to do with frames that have no rank label.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnrankedFrames {
    /// Append them after ranked frames, top-to-bottom and left-to-right.
    ReadingOrder,
    /// Do not export them.
    Skip,
}

impl Default for UnrankedFrames {
    fn default() -> Self {
        UnrankedFrames::ReadingOrder
    }
}

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Only `rect` elements inside a group with this `inkscape:label` become frames.
    ///
    /// Default: `None`, which means all `rect` elements
    pub frame_layer: Option<String>,

    /// Only `text` elements inside a group with this `inkscape:label` are
    /// treated as annotations.
    ///
    /// Default: `None`, which means all `text` elements
    pub annotation_layer: Option<String>,

    /// `path` elements inside a group with this `inkscape:label` set
    /// `transition-path` of the frame nearest to the path end.
    ///
    /// Default: `None`, which means paths are not used
    pub path_layer: Option<String>,

    /// A row height used to order unranked frames.
    ///
    /// Frames which anchors are closer than this vertically are in the same row.
    ///
    /// Default: 50
    pub row_height: f64,

    /// Unranked frames handling.
    ///
    /// Default: `ReadingOrder`
    pub unranked: UnrankedFrames,

    /// Frame attributes overrides applied to every frame.
    ///
    /// Keys are attribute names, like `timeout-ms`.
    ///
    /// Default: empty
    pub defaults: Vec<(String, String)>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            frame_layer: None,
            annotation_layer: None,
            path_layer: None,
            row_height: 50.0,
            unranked: UnrankedFrames::default(),
            defaults: Vec::new(),
        }
    }
}
