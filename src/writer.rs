// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::XmlWriter;

pub use xmlwriter::Indent;

use crate::{INKSCAPE_NS, SOZI_NS, SVG_NS};

const DEFAULT_PREFIX: &str = "ns1";

/// A namespaced XML name.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Name {
    pub namespace: Option<&'static str>,
    pub local: &'static str,
}

impl Name {
    /// Creates a new name.
    #[inline]
    pub fn new(namespace: Option<&'static str>, local: &'static str) -> Self {
        Name { namespace, local }
    }
}

/// An output XML element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Element {
    pub name: Name,
    pub attributes: Vec<(Name, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element without attributes and children.
    pub fn new(name: Name) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: Name) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute value, replacing the existing one.
    pub fn set_attribute<S: Into<String>>(&mut self, name: Name, value: S) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(attr) => attr.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Writes the element tree as an XML document.
    pub fn to_string(&self, opt: &XmlOptions) -> String {
        let mut xml = XmlWriter::new(xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent,
            attributes_indent: opt.attributes_indent,
        });

        if opt.namespace_prefix.is_empty() {
            log::warn!("Namespace prefix is empty. '{}' is used instead.", DEFAULT_PREFIX);
        }

        let mut namespaces = Vec::new();
        collect_namespaces(self, &mut namespaces);

        xml.start_element(&qualified(self.name, opt));
        for ns in namespaces {
            match prefix(ns, opt) {
                Some(prefix) => xml.write_attribute(&format!("xmlns:{}", prefix), ns),
                None => xml.write_attribute("xmlns", ns),
            }
        }
        write_content(self, opt, &mut xml);
        xml.end_element();

        xml.end_document()
    }
}

/// XML writing options.
#[derive(Clone, Debug)]
pub struct XmlOptions {
    /// A prefix for the presentation namespace.
    ///
    /// An empty prefix is replaced with the default one.
    ///
    /// Default: `ns1`
    pub namespace_prefix: String,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            namespace_prefix: DEFAULT_PREFIX.to_string(),
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

fn write_content(element: &Element, opt: &XmlOptions, xml: &mut XmlWriter) {
    for (name, value) in &element.attributes {
        xml.write_attribute(&qualified(*name, opt), value);
    }

    for child in &element.children {
        xml.start_element(&qualified(child.name, opt));
        write_content(child, opt, xml);
        xml.end_element();
    }
}

fn collect_namespaces(element: &Element, list: &mut Vec<&'static str>) {
    let names = std::iter::once(element.name).chain(element.attributes.iter().map(|(n, _)| *n));
    for ns in names.filter_map(|n| n.namespace) {
        if !list.contains(&ns) {
            list.push(ns);
        }
    }

    for child in &element.children {
        collect_namespaces(child, list);
    }
}

fn prefix<'a>(ns: &str, opt: &'a XmlOptions) -> Option<&'a str> {
    match ns {
        SVG_NS => None,
        SOZI_NS if opt.namespace_prefix.is_empty() => Some(DEFAULT_PREFIX),
        SOZI_NS => Some(opt.namespace_prefix.as_str()),
        INKSCAPE_NS => Some("inkscape"),
        _ => Some("ns"),
    }
}

fn qualified(name: Name, opt: &XmlOptions) -> String {
    match name.namespace.and_then(|ns| prefix(ns, opt)) {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}
