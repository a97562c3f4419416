// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::Range;

use crate::frame::root_element;
use crate::svgnode::SvgNodeExt;
use crate::writer::{Element, XmlOptions};
use crate::{
    bin_objects_1d, Annotation, AnnotationText, Error, Frame, Nearest, Options, PathPoints, Point,
    UnrankedFrames,
};

/// Frames and annotations of an SVG document.
#[derive(Clone, Debug)]
pub struct Document<'input> {
    source: &'input str,
    frames: Vec<Frame>,
    texts: Vec<AnnotationText>,
    paths: Vec<PathPoints>,
    // Index of the text that set the frame rank. Parallel to `frames`.
    rank_labels: Vec<Nearest<usize>>,
}

impl<'input> Document<'input> {
    /// Parses, resolves and arranges a document in one go.
    pub fn convert(text: &'input str, opt: &Options) -> Result<Self, Error> {
        let mut doc = Self::parse(text, opt)?;
        doc.resolve();
        doc.arrange(opt)?;
        Ok(doc)
    }

    /// Parses an SVG document.
    ///
    /// Elements are collected in document order. Any invalid element
    /// aborts parsing.
    pub fn parse(text: &'input str, opt: &Options) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let tree = roxmltree::Document::parse_with_options(text, xml_opt)?;
        Self::from_xmltree(&tree, opt)
    }

    /// Collects frames and annotations from an already parsed XML tree.
    pub fn from_xmltree(
        tree: &roxmltree::Document<'input>,
        opt: &Options,
    ) -> Result<Self, Error> {
        let mut frames = Vec::new();
        let mut texts = Vec::new();
        let mut paths = Vec::new();
        for node in tree.descendants() {
            if node.is_svg_element("rect") {
                if in_layer(node, opt.frame_layer.as_deref()) {
                    let mut frame = Frame::from_node(node)?;
                    frame.update_properties(opt.defaults.iter().map(|(k, v)| (k, v.as_str())));
                    frames.push(frame);
                }
            } else if node.is_svg_element("text") {
                if in_layer(node, opt.annotation_layer.as_deref()) {
                    texts.push(AnnotationText::from_node(node)?);
                }
            } else if node.is_svg_element("path") {
                if let Some(ref label) = opt.path_layer {
                    if node.in_layer(label) {
                        paths.push(PathPoints::from_node(node)?);
                    }
                }
            }
        }

        log::debug!(
            "Found {} frames, {} texts and {} paths.",
            frames.len(),
            texts.len(),
            paths.len()
        );

        Ok(Document {
            source: tree.input_text(),
            rank_labels: vec![Nearest::new(); frames.len()],
            frames,
            texts,
            paths,
        })
    }

    /// Frames in the current order.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// All text annotations, including notes.
    #[inline]
    pub fn texts(&self) -> &[AnnotationText] {
        &self.texts
    }

    /// Transition paths.
    #[inline]
    pub fn paths(&self) -> &[PathPoints] {
        &self.paths
    }

    /// Assigns every rank and transition label to its nearest frame
    /// and every path to the frame nearest to its end.
    pub fn resolve(&mut self) {
        for (idx, text) in self.texts.iter().enumerate() {
            let annotation = text.annotation();
            if annotation == Annotation::Note {
                if !text.is_empty() {
                    log::debug!("Text '{}' is not an annotation.", text.text());
                }
                continue;
            }

            let (frame_idx, dist) = match nearest_frame(&self.frames, text.position()) {
                Some(v) => v,
                None => continue,
            };

            let frame = &mut self.frames[frame_idx];
            match annotation {
                Annotation::Rank(rank) => {
                    frame.set_rank(rank, dist);
                    self.rank_labels[frame_idx].offer(idx, dist);
                }
                Annotation::Transition(duration) => {
                    frame.set_transition(duration, dist);
                }
                Annotation::Note => {}
            }
        }

        for path in &self.paths {
            if let Some((frame_idx, dist)) = nearest_frame(&self.frames, path.end()) {
                self.frames[frame_idx].set_transition_path(path.id(), dist);
            }
        }
    }

    /// Orders frames and assigns sequence indices starting from 1.
    ///
    /// Ranked frames go first, sorted by rank. Equal ranks keep the document
    /// order. Rank labels are rewritten to the assigned indices.
    pub fn arrange(&mut self, opt: &Options) -> Result<(), Error> {
        let (mut order, unranked): (Vec<usize>, Vec<usize>) =
            (0..self.frames.len()).partition(|i| self.frames[*i].rank().is_some());
        order.sort_by_key(|i| self.frames[*i].rank());

        match opt.unranked {
            UnrankedFrames::ReadingOrder => {
                order.extend(reading_order(&self.frames, unranked, opt.row_height)?);
            }
            UnrankedFrames::Skip => {
                for idx in unranked {
                    log::warn!("Frame '{}' has no rank. Skipped.", self.frames[idx].rect().id);
                }
            }
        }

        let mut slots: Vec<Option<(Frame, Nearest<usize>)>> = std::mem::take(&mut self.frames)
            .into_iter()
            .zip(std::mem::take(&mut self.rank_labels))
            .map(Some)
            .collect();

        for (n, idx) in order.into_iter().enumerate() {
            let (mut frame, label) = match slots[idx].take() {
                Some(v) => v,
                None => continue,
            };

            let index = n + 1;
            frame.set_sequence_index(index);
            if let Some(text_idx) = label.value() {
                self.texts[*text_idx].set(&index.to_string())?;
            }

            self.frames.push(frame);
            self.rank_labels.push(label);
        }

        Ok(())
    }

    /// Returns a root element with a `frame` child per frame.
    pub fn to_element(&self) -> Element {
        let mut root = root_element();
        root.children.extend(self.frames.iter().map(|f| f.frame_element()));
        root
    }

    /// Writes frames as an XML document.
    pub fn to_string(&self, opt: &XmlOptions) -> String {
        self.to_element().to_string(opt)
    }

    /// Returns the source SVG with rewritten text labels.
    ///
    /// Only a text node of the last non-empty `tspan` can be replaced.
    pub fn relabeled_svg(&self) -> String {
        let mut edits: Vec<(Range<usize>, &str)> = Vec::new();
        for text in &self.texts {
            let span = match text.span() {
                Some(span) => span,
                None => continue,
            };

            let replacement = match span.replacement {
                Some(ref v) => v.as_str(),
                None => continue,
            };

            match span.range {
                Some(ref range) => edits.push((range.clone(), replacement)),
                None => log::warn!("Text '{}' has an empty 'tspan'. Not relabeled.", text.id()),
            }
        }

        edits.sort_by_key(|(range, _)| range.start);

        let mut svg = String::with_capacity(self.source.len());
        let mut pos = 0;
        for (range, text) in edits {
            svg.push_str(&self.source[pos..range.start]);
            escape_text(text, &mut svg);
            pos = range.end;
        }
        svg.push_str(&self.source[pos..]);

        svg
    }
}

fn in_layer(node: roxmltree::Node, layer: Option<&str>) -> bool {
    match layer {
        Some(label) => node.in_layer(label),
        None => true,
    }
}

fn nearest_frame(frames: &[Frame], p: Point) -> Option<(usize, f64)> {
    let nearest: Nearest<usize> = frames
        .iter()
        .enumerate()
        .map(|(i, f)| (i, f.rect().anchor.distance(p)))
        .collect();
    nearest.value().copied().zip(nearest.distance())
}

/// Sorts frames into rows by `y`, then by `x` inside a row.
fn reading_order(
    frames: &[Frame],
    indices: Vec<usize>,
    row_height: f64,
) -> Result<Vec<usize>, Error> {
    if indices.is_empty() {
        return Ok(indices);
    }

    let values: Vec<f64> = indices.iter().map(|i| frames[*i].rect().anchor.y).collect();
    let rows = bin_objects_1d(&values, indices, None, Some(row_height))?;

    let mut order = Vec::with_capacity(values.len());
    for mut row in rows.contents {
        row.sort_by(|a, b| {
            let a = frames[*a].rect().anchor.x;
            let b = frames[*b].rect().anchor.x;
            a.total_cmp(&b)
        });
        order.extend(row);
    }

    Ok(order)
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
