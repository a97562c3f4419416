// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use roxmltree::Node;

use crate::svgnode::SvgNodeExt;
use crate::{Error, Point};

/// A polyline made of an absolute start point and relative steps.
///
/// Parsed from path data like `m 10,20 5,0 0,5`. The leading command is kept
/// as is, but every following pair is treated as a relative step, so curve
/// commands are not supported.
#[derive(Clone, PartialEq, Debug)]
pub struct PathPoints {
    id: String,
    mode: String,
    points: Vec<Point>,
}

impl PathPoints {
    /// Parses a `path` element.
    pub fn from_node(node: Node) -> Result<Self, Error> {
        let id = node.attribute("id").ok_or_else(|| Error::MissingAttribute {
            element: node.element_id().to_string(),
            attribute: "id",
        })?;

        let d = node.attribute("d").ok_or_else(|| Error::MissingAttribute {
            element: id.to_string(),
            attribute: "d",
        })?;

        Self::parse(id, d).ok_or_else(|| Error::InvalidAttribute {
            element: id.to_string(),
            attribute: "d",
            value: d.to_string(),
        })
    }

    /// Parses path data.
    ///
    /// Returns `None` when the command is missing, a coordinate is malformed
    /// or coordinates cannot be split into pairs.
    pub fn parse(id: &str, data: &str) -> Option<Self> {
        let data = data.trim_start();
        let split = data
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(data.len());
        let (mode, coords) = data.split_at(split);
        if mode.is_empty() {
            return None;
        }

        let mut numbers = Vec::new();
        for n in svgtypes::NumberListParser::from(coords) {
            numbers.push(n.ok()?);
        }

        if numbers.is_empty() || numbers.len() % 2 != 0 {
            return None;
        }

        let mut steps = numbers.chunks_exact(2).map(|v| Point::new(v[0], v[1]));
        let mut points = Vec::with_capacity(numbers.len() / 2);
        let mut prev = steps.next()?;
        points.push(prev);
        for step in steps {
            prev = prev + step;
            points.push(prev);
        }

        Some(PathPoints {
            id: id.to_string(),
            mode: mode.to_string(),
            points,
        })
    }

    /// Element's ID.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The leading path command.
    #[inline]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Absolute points. Never empty.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first point.
    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The last point.
    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}
