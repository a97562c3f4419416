// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use roxmltree::Node;

use crate::{Error, Transform, INKSCAPE_NS, SVG_NS};

/// A trait for parsing attribute values.
pub(crate) trait FromValue: Sized {
    /// Parses an attribute value.
    ///
    /// When `None` is returned, the attribute value will be reported as invalid.
    fn parse(value: &str) -> Option<Self>;
}

impl FromValue for f64 {
    fn parse(value: &str) -> Option<Self> {
        svgtypes::Number::from_str(value).ok().map(|v| v.0)
    }
}

impl FromValue for Transform {
    fn parse(value: &str) -> Option<Self> {
        match Transform::parse(value) {
            Ok(ts) => Some(ts),
            Err(e) => {
                log::debug!("Failed to parse transform '{}' cause {}.", value, e);
                None
            }
        }
    }
}

pub(crate) trait SvgNodeExt<'a> {
    /// Returns the element `id` or `unnamed`.
    fn element_id(&self) -> &'a str;

    /// Checks that node is an SVG element with the specified local name.
    fn is_svg_element(&self, name: &str) -> bool;

    /// Parses a required attribute.
    fn parse_attribute<T: FromValue>(&self, name: &'static str) -> Result<T, Error>;

    /// Parses an optional attribute.
    fn parse_optional<T: FromValue>(&self, name: &'static str) -> Result<Option<T>, Error>;

    /// Returns the node `transform` or `Transform::Identity` when not set.
    fn transform(&self) -> Result<Transform, Error> {
        Ok(self.parse_optional("transform")?.unwrap_or_default())
    }

    /// Checks that one of the ancestor groups has the specified `inkscape:label`.
    fn in_layer(&self, label: &str) -> bool;
}

impl<'a, 'input: 'a> SvgNodeExt<'a> for Node<'a, 'input> {
    fn element_id(&self) -> &'a str {
        self.attribute("id").unwrap_or("unnamed")
    }

    #[inline]
    fn is_svg_element(&self, name: &str) -> bool {
        self.is_element() && self.has_tag_name((SVG_NS, name))
    }

    fn parse_attribute<T: FromValue>(&self, name: &'static str) -> Result<T, Error> {
        self.parse_optional(name)?
            .ok_or_else(|| Error::MissingAttribute {
                element: self.element_id().to_string(),
                attribute: name,
            })
    }

    fn parse_optional<T: FromValue>(&self, name: &'static str) -> Result<Option<T>, Error> {
        let value = match self.attribute(name) {
            Some(v) => v,
            None => return Ok(None),
        };

        match T::parse(value) {
            Some(v) => Ok(Some(v)),
            None => Err(Error::InvalidAttribute {
                element: self.element_id().to_string(),
                attribute: name,
                value: value.to_string(),
            }),
        }
    }

    fn in_layer(&self, label: &str) -> bool {
        self.ancestors()
            .skip(1)
            .filter(|n| n.is_svg_element("g"))
            .any(|n| n.attribute((INKSCAPE_NS, "label")) == Some(label))
    }
}
