// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::Range;
use std::str::FromStr;

use roxmltree::Node;

use crate::svgnode::SvgNodeExt;
use crate::{Error, Point, Transform};

/// What a text annotation means for the nearest frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Annotation {
    /// An integer label, like `3`.
    Rank(i64),
    /// A duration label in seconds, like `1.5s`.
    Transition(f64),
    /// Anything else, including an empty text.
    Note,
}

/// The last `tspan` with text of a `text` element.
///
/// When all spans are empty, the first one is used.
#[derive(Clone, PartialEq, Debug)]
pub struct TextSpan {
    /// Byte range of the span's text node in the source document.
    ///
    /// `None` when the span has no text.
    pub range: Option<Range<usize>>,

    /// A new content set via [`AnnotationText::set`].
    pub replacement: Option<String>,
}

/// A `text` element.
#[derive(Clone, PartialEq, Debug)]
pub struct AnnotationText {
    id: String,
    position: Point,
    text: String,
    lines: Vec<String>,
    span: Option<TextSpan>,
}

impl AnnotationText {
    /// Parses a `text` element.
    ///
    /// `x` and `y` are required. Only direct `tspan` children are used,
    /// one line per non-empty span.
    pub fn from_node(node: Node) -> Result<Self, Error> {
        let x = node.parse_attribute("x")?;
        let y = node.parse_attribute("y")?;
        let ts: Transform = node.transform()?;
        let position = ts.apply(Point::new(x, y));

        let mut lines = Vec::new();
        let mut span = None;
        for child in node.children().filter(|n| n.is_svg_element("tspan")) {
            let text_node = child.first_child().filter(|n| n.is_text());
            // Empty spans never replace a span with text.
            if text_node.is_some() || span.is_none() {
                span = Some(TextSpan {
                    range: text_node.map(|n| n.range()),
                    replacement: None,
                });
            }

            match child.text() {
                Some(line) if !line.is_empty() => lines.push(line.to_string()),
                _ => {}
            }
        }

        let text = lines.join("\n");
        log::debug!("Text '{}' @ {}", text, position);

        Ok(AnnotationText {
            id: node.element_id().to_string(),
            position,
            text,
            lines,
            span,
        })
    }

    /// Element's ID or `unnamed`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `x`/`y` point with the element transform applied.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Lines joined with `\n`.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty span contents.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The last `tspan` with text.
    #[inline]
    pub fn span(&self) -> Option<&TextSpan> {
        self.span.as_ref()
    }

    /// Checks that text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checks that text is an integer.
    #[inline]
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Parses text as an integer.
    ///
    /// Surrounding whitespace is allowed.
    pub fn as_number(&self) -> Option<i64> {
        self.text.trim().parse().ok()
    }

    /// Parses text as a duration in seconds, like `0.5s`.
    pub fn as_duration(&self) -> Option<f64> {
        let value = self.text.trim().strip_suffix('s')?;
        let n = svgtypes::Number::from_str(value.trim_end()).ok()?.0;
        if n.is_finite() && n >= 0.0 {
            Some(n)
        } else {
            None
        }
    }

    /// Classifies the text.
    pub fn annotation(&self) -> Annotation {
        if let Some(n) = self.as_number() {
            Annotation::Rank(n)
        } else if let Some(n) = self.as_duration() {
            Annotation::Transition(n)
        } else {
            Annotation::Note
        }
    }

    /// Replaces the content of the last `tspan` with text.
    ///
    /// Cached `text` and `lines` stay unchanged.
    pub fn set(&mut self, text: &str) -> Result<(), Error> {
        match self.span {
            Some(ref mut span) => {
                span.replacement = Some(text.to_string());
                Ok(())
            }
            None => Err(Error::MissingTextSpan(self.id.clone())),
        }
    }
}
