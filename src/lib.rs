// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgframes` extracts presentation frames from an annotated SVG drawing.

Every `rect` of a drawing is a frame candidate. Small `text` labels placed
near a rectangle annotate it:

- an integer, like `3`, is the frame rank
- a duration, like `1.5s`, is the transition duration into the frame

Every label belongs to the nearest frame. When several labels of the same kind
compete for a frame, the closest one wins. Frames are then ordered by rank
and written as an XML document with one `frame` element per rectangle,
using the Sozi presentation namespace.

```no_run
let svg = std::fs::read_to_string("slides.svg").unwrap();
let opt = svgframes::Options::default();
let doc = svgframes::Document::convert(&svg, &opt).unwrap();
println!("{}", doc.to_string(&svgframes::XmlOptions::default()));
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod binning;
mod document;
mod error;
mod frame;
mod geom;
mod options;
mod path;
mod rect;
mod svgnode;
mod text;
mod transform;
mod writer;

pub use roxmltree;
pub use svgtypes;

pub use crate::binning::{bin_objects_1d, Bins, MAX_BINS};
pub use crate::document::Document;
pub use crate::error::Error;
pub use crate::frame::{AttributeKey, Frame, FrameAttributes, Nearest};
pub use crate::geom::Point;
pub use crate::options::{Options, UnrankedFrames};
pub use crate::path::PathPoints;
pub use crate::rect::FrameRect;
pub use crate::text::{Annotation, AnnotationText, TextSpan};
pub use crate::transform::Transform;
pub use crate::writer::{Element, Indent, Name, XmlOptions};

/// The SVG namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The Inkscape namespace. Used for layer labels.
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// The Sozi presentation namespace.
pub const SOZI_NS: &str = "http://sozi.baierouge.fr";
