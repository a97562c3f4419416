// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use roxmltree::Node;

use crate::svgnode::SvgNodeExt;
use crate::{Error, Point, Transform};

/// A frame rectangle.
#[derive(Clone, PartialEq, Debug)]
pub struct FrameRect {
    /// Element's ID.
    ///
    /// Becomes the frame `refid`.
    pub id: String,

    /// The `x`/`y` point with the element transform applied.
    pub anchor: Point,

    /// Untransformed width.
    pub width: f64,

    /// Untransformed height.
    pub height: f64,
}

impl FrameRect {
    /// Parses a `rect` element.
    ///
    /// `id`, `x`, `y`, `width` and `height` are required.
    pub fn from_node(node: Node) -> Result<Self, Error> {
        let id = node.attribute("id").ok_or_else(|| Error::MissingAttribute {
            element: node.element_id().to_string(),
            attribute: "id",
        })?;

        let x = node.parse_attribute("x")?;
        let y = node.parse_attribute("y")?;
        let ts: Transform = node.transform()?;
        let width = node.parse_attribute("width")?;
        let height = node.parse_attribute("height")?;

        let anchor = ts.apply(Point::new(x, y));
        log::debug!("Frame '{}' @ {}", id, anchor);

        Ok(FrameRect {
            id: id.to_string(),
            anchor,
            width,
            height,
        })
    }
}
