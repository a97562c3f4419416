// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use roxmltree::Node;

use crate::writer::{Element, Name};
use crate::{Error, FrameRect, SOZI_NS, SVG_NS};

/// A presentation frame attribute name.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AttributeKey {
    Id,
    Title,
    RefId,
    Sequence,
    TransitionPathHide,
    TransitionProfile,
    TransitionZoomPercent,
    TransitionDurationMs,
    TransitionPath,
    TimeoutMs,
    TimeoutEnable,
    ShowInFrameList,
    Clip,
    Hide,
    SoziNs,
}

impl AttributeKey {
    /// All keys in the serialization order.
    pub const ALL: [AttributeKey; 15] = [
        AttributeKey::Id,
        AttributeKey::Title,
        AttributeKey::RefId,
        AttributeKey::Sequence,
        AttributeKey::TransitionPathHide,
        AttributeKey::TransitionProfile,
        AttributeKey::TransitionZoomPercent,
        AttributeKey::TransitionDurationMs,
        AttributeKey::TransitionPath,
        AttributeKey::TimeoutMs,
        AttributeKey::TimeoutEnable,
        AttributeKey::ShowInFrameList,
        AttributeKey::Clip,
        AttributeKey::Hide,
        AttributeKey::SoziNs,
    ];

    /// Returns the attribute name as written to XML.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKey::Id => "id",
            AttributeKey::Title => "title",
            AttributeKey::RefId => "refid",
            AttributeKey::Sequence => "sequence",
            AttributeKey::TransitionPathHide => "transition-path-hide",
            AttributeKey::TransitionProfile => "transition-profile",
            AttributeKey::TransitionZoomPercent => "transition-zoom-percent",
            AttributeKey::TransitionDurationMs => "transition-duration-ms",
            AttributeKey::TransitionPath => "transition-path",
            AttributeKey::TimeoutMs => "timeout-ms",
            AttributeKey::TimeoutEnable => "timeout-enable",
            AttributeKey::ShowInFrameList => "show-in-frame-list",
            AttributeKey::Clip => "clip",
            AttributeKey::Hide => "hide",
            AttributeKey::SoziNs => "sozi_ns",
        }
    }

    /// Parses an attribute name.
    pub fn from_name(name: &str) -> Option<Self> {
        AttributeKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Frame attributes.
///
/// `None` means "not set" and such attributes are not written at all.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct FrameAttributes {
    pub id: Option<String>,
    pub title: Option<String>,
    pub refid: Option<String>,
    pub sequence: Option<String>,
    pub transition_path_hide: Option<String>,
    pub transition_profile: Option<String>,
    pub transition_zoom_percent: Option<String>,
    pub transition_duration_ms: Option<String>,
    pub transition_path: Option<String>,
    pub timeout_ms: Option<String>,
    pub timeout_enable: Option<String>,
    pub show_in_frame_list: Option<String>,
    pub clip: Option<String>,
    pub hide: Option<String>,
    pub sozi_ns: Option<String>,
}

impl FrameAttributes {
    /// Creates default attributes for a frame that refers to `refid`.
    pub fn new(refid: &str) -> Self {
        let s = |v: &str| Some(v.to_string());
        FrameAttributes {
            id: None,
            title: None,
            refid: s(refid),
            sequence: None,
            transition_path_hide: s("true"),
            transition_profile: s("accelerate-decelerate"),
            transition_zoom_percent: s("0.0"),
            transition_duration_ms: s("1000.0"),
            transition_path: None,
            timeout_ms: s("5000.0"),
            timeout_enable: s("false"),
            show_in_frame_list: s("true"),
            clip: s("false"),
            hide: s("true"),
            sozi_ns: s("ns1"),
        }
    }

    /// Returns an attribute value.
    pub fn get(&self, key: AttributeKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    /// Sets an attribute value.
    pub fn set<S: Into<String>>(&mut self, key: AttributeKey, value: S) {
        *self.slot_mut(key) = Some(value.into());
    }

    /// Returns set attributes in the serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &str)> + '_ {
        AttributeKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|v| (key, v)))
    }

    fn slot(&self, key: AttributeKey) -> &Option<String> {
        match key {
            AttributeKey::Id => &self.id,
            AttributeKey::Title => &self.title,
            AttributeKey::RefId => &self.refid,
            AttributeKey::Sequence => &self.sequence,
            AttributeKey::TransitionPathHide => &self.transition_path_hide,
            AttributeKey::TransitionProfile => &self.transition_profile,
            AttributeKey::TransitionZoomPercent => &self.transition_zoom_percent,
            AttributeKey::TransitionDurationMs => &self.transition_duration_ms,
            AttributeKey::TransitionPath => &self.transition_path,
            AttributeKey::TimeoutMs => &self.timeout_ms,
            AttributeKey::TimeoutEnable => &self.timeout_enable,
            AttributeKey::ShowInFrameList => &self.show_in_frame_list,
            AttributeKey::Clip => &self.clip,
            AttributeKey::Hide => &self.hide,
            AttributeKey::SoziNs => &self.sozi_ns,
        }
    }

    fn slot_mut(&mut self, key: AttributeKey) -> &mut Option<String> {
        match key {
            AttributeKey::Id => &mut self.id,
            AttributeKey::Title => &mut self.title,
            AttributeKey::RefId => &mut self.refid,
            AttributeKey::Sequence => &mut self.sequence,
            AttributeKey::TransitionPathHide => &mut self.transition_path_hide,
            AttributeKey::TransitionProfile => &mut self.transition_profile,
            AttributeKey::TransitionZoomPercent => &mut self.transition_zoom_percent,
            AttributeKey::TransitionDurationMs => &mut self.transition_duration_ms,
            AttributeKey::TransitionPath => &mut self.transition_path,
            AttributeKey::TimeoutMs => &mut self.timeout_ms,
            AttributeKey::TimeoutEnable => &mut self.timeout_enable,
            AttributeKey::ShowInFrameList => &mut self.show_in_frame_list,
            AttributeKey::Clip => &mut self.clip,
            AttributeKey::Hide => &mut self.hide,
            AttributeKey::SoziNs => &mut self.sozi_ns,
        }
    }
}

/// The best-so-far candidate by distance.
///
/// A candidate replaces the current one only when it is strictly closer,
/// so on ties the first one wins. `NaN` distances are never accepted.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Nearest<T> {
    best: Option<(T, f64)>,
}

impl<T> Default for Nearest<T> {
    #[inline]
    fn default() -> Self {
        Nearest { best: None }
    }
}

impl<T> Nearest<T> {
    /// Creates an empty reducer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that a candidate at `distance` would replace the current one.
    #[inline]
    pub fn accepts(&self, distance: f64) -> bool {
        if distance.is_nan() {
            return false;
        }

        match self.best {
            Some((_, best)) => distance < best,
            None => true,
        }
    }

    /// Returns the reducer after considering one more candidate.
    pub fn merge(self, value: T, distance: f64) -> Self {
        if self.accepts(distance) {
            Nearest {
                best: Some((value, distance)),
            }
        } else {
            self
        }
    }

    /// Considers one more candidate in place.
    ///
    /// Returns `true` when the candidate was taken.
    pub fn offer(&mut self, value: T, distance: f64) -> bool {
        if self.accepts(distance) {
            self.best = Some((value, distance));
            true
        } else {
            false
        }
    }

    /// Checks that a candidate was taken.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.best.is_some()
    }

    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.best.as_ref().map(|(v, _)| v)
    }

    /// Returns the distance of the current value.
    #[inline]
    pub fn distance(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, d)| *d)
    }
}

impl<T> FromIterator<(T, f64)> for Nearest<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Nearest::new(), |acc, (value, distance)| acc.merge(value, distance))
    }
}

/// A presentation frame.
#[derive(Clone, PartialEq, Debug)]
pub struct Frame {
    rect: FrameRect,
    attributes: FrameAttributes,
    rank: Nearest<i64>,
    transition: Nearest<f64>,
    transition_path: Nearest<String>,
}

impl Frame {
    /// Creates a frame with default attributes.
    pub fn new(rect: FrameRect) -> Self {
        let attributes = FrameAttributes::new(&rect.id);
        Frame {
            rect,
            attributes,
            rank: Nearest::new(),
            transition: Nearest::new(),
            transition_path: Nearest::new(),
        }
    }

    /// Parses a `rect` element into a frame.
    pub fn from_node(node: Node) -> Result<Self, Error> {
        FrameRect::from_node(node).map(Frame::new)
    }

    /// The frame rectangle.
    #[inline]
    pub fn rect(&self) -> &FrameRect {
        &self.rect
    }

    /// Frame attributes.
    #[inline]
    pub fn attributes(&self) -> &FrameAttributes {
        &self.attributes
    }

    /// The rank from the nearest rank label.
    #[inline]
    pub fn rank(&self) -> Option<i64> {
        self.rank.value().copied()
    }

    /// The transition duration in seconds from the nearest transition label.
    #[inline]
    pub fn transition(&self) -> Option<f64> {
        self.transition.value().copied()
    }

    /// Offers a rank from a label at `distance`.
    ///
    /// Returns `true` when it was taken.
    pub fn set_rank(&mut self, rank: i64, distance: f64) -> bool {
        self.rank.offer(rank, distance)
    }

    /// Offers a transition duration in seconds from a label at `distance`.
    ///
    /// When taken, `transition-duration-ms` is updated too.
    pub fn set_transition(&mut self, transition: f64, distance: f64) -> bool {
        if !self.transition.offer(transition, distance) {
            return false;
        }

        self.attributes.set(
            AttributeKey::TransitionDurationMs,
            format!("{:.3}", transition * 1000.0),
        );
        true
    }

    /// Offers a transition path ID from a path at `distance`.
    ///
    /// When taken, `transition-path` is updated too.
    pub fn set_transition_path(&mut self, id: &str, distance: f64) -> bool {
        if !self.transition_path.offer(id.to_string(), distance) {
            return false;
        }

        self.attributes.set(AttributeKey::TransitionPath, id);
        true
    }

    /// Sets the final position in the presentation.
    ///
    /// Overwrites `sequence`, `title` and `id`. Not related to `rank`.
    pub fn set_sequence_index(&mut self, index: usize) {
        let index = index.to_string();
        self.attributes.set(AttributeKey::Sequence, index.clone());
        self.attributes.set(AttributeKey::Title, index.clone());
        self.attributes.set(AttributeKey::Id, index);
    }

    /// Merges attribute values by name.
    ///
    /// Unknown names are reported and skipped.
    pub fn update_properties<I, K, V>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in defaults {
            match AttributeKey::from_name(key.as_ref()) {
                Some(key) => self.attributes.set(key, value),
                None => log::warn!("Invalid defaults key '{}'. Skipped.", key.as_ref()),
            }
        }
    }

    /// Returns the `frame` element.
    ///
    /// `id` is not namespaced, all other attributes are.
    pub fn frame_element(&self) -> Element {
        let mut element = Element::new(Name::new(Some(SOZI_NS), "frame"));
        for (key, value) in self.attributes.iter() {
            let ns = if key == AttributeKey::Id {
                None
            } else {
                Some(SOZI_NS)
            };
            element.set_attribute(Name::new(ns, key.name()), value);
        }

        element
    }

    /// Returns a root element with a single `frame` child.
    pub fn to_element(&self) -> Element {
        let mut root = root_element();
        root.children.push(self.frame_element());
        root
    }
}

/// Returns an empty root element with the creator marker.
pub(crate) fn root_element() -> Element {
    let mut root = Element::new(Name::new(Some(SVG_NS), "svg"));
    root.set_attribute(Name::new(Some(SOZI_NS), "creator"), "creator");
    root
}
