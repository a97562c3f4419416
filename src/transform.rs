// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::Error;

use crate::Point;

/// A subset of the SVG [`<transform>`] type.
///
/// Only the first recognized function is used and the lookup order is
/// `matrix`, `scale`, `translate`. So `translate(10) scale(2)` is resolved
/// as `scale(2)`.
///
/// [`<transform>`]: https://www.w3.org/TR/SVG11/coords.html#TransformAttribute
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Transform {
    /// No transform or an unsupported one.
    Identity,
    /// The linear part of `matrix(a, b, c, d, e, f)`.
    ///
    /// The translation components `e` and `f` are not stored and never applied.
    #[allow(missing_docs)]
    Matrix { a: f64, b: f64, c: f64, d: f64 },
    #[allow(missing_docs)]
    Scale { sx: f64, sy: f64 },
    #[allow(missing_docs)]
    Translate { tx: f64, ty: f64 },
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::Identity
    }
}

impl Transform {
    /// Parses a `transform` attribute value.
    ///
    /// An empty string or a transform list without `matrix`, `scale` and
    /// `translate` resolves to `Transform::Identity`. The latter is reported
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Malformed arguments of a recognized function are errors.
    pub fn parse(text: &str) -> Result<Self, Error> {
        if let Some(args) = arguments(text, "matrix")? {
            if args.len() < 4 {
                return Err(Error::UnexpectedEndOfStream);
            }

            if args.len() > 6 {
                return Err(Error::InvalidValue);
            }

            if args[4..].iter().any(|v| *v != 0.0) {
                log::debug!("Translation part of '{}' is ignored.", text);
            }

            return Ok(Transform::Matrix {
                a: args[0],
                b: args[1],
                c: args[2],
                d: args[3],
            });
        }

        if let Some(args) = arguments(text, "scale")? {
            // 'If <sy> is not provided, it is assumed to be equal to <sx>.'
            return match *args.as_slice() {
                [s] => Ok(Transform::Scale { sx: s, sy: s }),
                [sx, sy] => Ok(Transform::Scale { sx, sy }),
                [] => Err(Error::UnexpectedEndOfStream),
                _ => Err(Error::InvalidValue),
            };
        }

        if let Some(args) = arguments(text, "translate")? {
            // 'If <ty> is not provided, it is assumed to be zero.'
            return match *args.as_slice() {
                [tx] => Ok(Transform::Translate { tx, ty: 0.0 }),
                [tx, ty] => Ok(Transform::Translate { tx, ty }),
                [] => Err(Error::UnexpectedEndOfStream),
                _ => Err(Error::InvalidValue),
            };
        }

        if !text.trim().is_empty() {
            log::warn!("Unsupported transform '{}'. Ignored.", text);
        }

        Ok(Transform::Identity)
    }

    /// Checks that transform is `Identity`.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::Identity
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Transform::Identity => p,
            Transform::Matrix { a, b, c, d } => Point::new(a * p.x + c * p.y, b * p.x + d * p.y),
            Transform::Scale { sx, sy } => Point::new(p.x * sx, p.y * sy),
            Transform::Translate { tx, ty } => Point::new(p.x + tx, p.y + ty),
        }
    }
}

impl FromStr for Transform {
    type Err = Error;

    #[inline]
    fn from_str(text: &str) -> Result<Self, Error> {
        Transform::parse(text)
    }
}

/// Returns the numbers inside `name(...)`, if `name` is present at all.
fn arguments(text: &str, name: &str) -> Result<Option<Vec<f64>>, Error> {
    let start = match text.find(name) {
        Some(idx) => idx + name.len(),
        None => return Ok(None),
    };

    let rest = text[start..].trim_start();
    let rest = match rest.strip_prefix('(') {
        Some(rest) => rest,
        None => return Err(Error::InvalidValue),
    };

    let end = rest.find(')').ok_or(Error::UnexpectedEndOfStream)?;

    let mut list = Vec::new();
    for n in svgtypes::NumberListParser::from(&rest[..end]) {
        list.push(n?);
    }

    Ok(Some(list))
}
