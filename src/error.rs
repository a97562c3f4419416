// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// A required attribute is not set.
    MissingAttribute {
        /// The `id` of the failing element.
        element: String,
        /// The attribute name.
        attribute: &'static str,
    },

    /// An attribute value cannot be parsed.
    ///
    /// Non-numeric coordinates, malformed transforms and path data.
    InvalidAttribute {
        /// The `id` of the failing element.
        element: String,
        /// The attribute name.
        attribute: &'static str,
        /// The raw attribute value.
        value: String,
    },

    /// A `text` element without a `tspan` child cannot be rewritten.
    MissingTextSpan(String),

    /// Binning input cannot be bucketed.
    InvalidBinning(&'static str),
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::MissingAttribute {
                ref element,
                attribute,
            } => {
                write!(f, "element '{}' has no '{}' attribute", element, attribute)
            }
            Error::InvalidAttribute {
                ref element,
                attribute,
                ref value,
            } => {
                write!(
                    f,
                    "element '{}' has an invalid '{}' value: '{}'",
                    element, attribute, value
                )
            }
            Error::MissingTextSpan(ref element) => {
                write!(f, "text '{}' has no 'tspan' to rewrite", element)
            }
            Error::InvalidBinning(reason) => {
                write!(f, "binning failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for Error {}
