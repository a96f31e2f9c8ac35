//! Node candidate collection.
//!
//! Turns the raw text layer of a surface into a deduplicated list of
//! [`NodeCandidate`]s. Whether a single fragment is usable at all is decided
//! by [`classify_text_element`], a pure function with no knowledge of the
//! rest of the surface.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::elements::TextElement;
use crate::geometry::{Point, Rect};
use crate::pipeline::config::CollectorConfig;
use crate::pipeline::ReconstructionStats;
use crate::surface::Surface;
use crate::utils::safe_float_cmp;

lazy_static! {
    /// Arrowheads, bullets and page indices: glyphs that render edges or
    /// list markers rather than concept labels.
    static ref NOISE_TEXT: Regex = Regex::new(concat!(
        r"^(?:\d+|[\s",
        r"\x{2190}-\x{21FF}",  // Arrows
        r"\x{27F0}-\x{27FF}",  // Supplemental Arrows-A
        r"\x{2900}-\x{297F}",  // Supplemental Arrows-B
        r"\x{2794}-\x{27BF}",  // Dingbat arrows
        r"\x{2B00}-\x{2B2F}",  // Misc symbols and arrows
        r"\x{25A0}-\x{25CF}",  // Squares, triangles, circles
        r"\x{2022}\x{2023}\x{2043}\x{2219}\x{00B7}\x{25E6}",  // Bullets
        r"]+)$",
    ))
    .unwrap();
}

/// Outcome of classifying one text-bearing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Usable as a node candidate
    Accepted,
    /// No text after trimming
    RejectedEmpty,
    /// Arrow glyphs, bullets or a bare number
    RejectedNoise,
    /// Hidden, not displayed, or near-transparent
    RejectedInvisible,
    /// Zero-sized, an icon glyph, or too much text for a label
    RejectedSize,
}

impl Classification {
    /// Whether the element may become a candidate.
    pub fn is_accepted(self) -> bool {
        self == Classification::Accepted
    }
}

/// Decide whether a text element can be a diagram node.
///
/// Checks run cheapest-first and the first failing check decides the
/// outcome: layout size, visibility, icon glyph size, text length, noise.
///
/// # Examples
///
/// ```
/// use diagram_oxide::elements::TextElement;
/// use diagram_oxide::extractors::{classify_text_element, Classification};
/// use diagram_oxide::geometry::Rect;
/// use diagram_oxide::pipeline::CollectorConfig;
///
/// let config = CollectorConfig::default();
/// let label = TextElement::new("Goals", Rect::new(0.0, 0.0, 50.0, 16.0));
/// let arrow = TextElement::new("→", Rect::new(60.0, 0.0, 12.0, 16.0));
///
/// assert_eq!(classify_text_element(&label, &config), Classification::Accepted);
/// assert_eq!(classify_text_element(&arrow, &config), Classification::RejectedNoise);
/// ```
pub fn classify_text_element(element: &TextElement, config: &CollectorConfig) -> Classification {
    let bbox = &element.bbox;
    if bbox.is_degenerate() {
        return Classification::RejectedSize;
    }

    let style = &element.style;
    if !style.is_rendered() || style.opacity.is_nan() || style.opacity < config.min_opacity {
        return Classification::RejectedInvisible;
    }

    if bbox.height < config.min_glyph_height && style.font_size < config.min_font_size {
        return Classification::RejectedSize;
    }

    let text = element.trimmed_text();
    if text.is_empty() {
        return Classification::RejectedEmpty;
    }
    if text.chars().count() >= config.max_text_chars {
        return Classification::RejectedSize;
    }

    if is_noise_text(text) {
        return Classification::RejectedNoise;
    }

    Classification::Accepted
}

/// True for text made only of arrow/bullet glyphs, or a bare number.
pub fn is_noise_text(text: &str) -> bool {
    NOISE_TEXT.is_match(text.trim())
}

/// One visually distinct text fragment, eligible to become a tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCandidate {
    /// Dense id assigned in discovery order, valid for one pass only
    pub id: usize,
    /// Trimmed label text
    pub text: String,
    /// Screen-space bounding box
    pub bbox: Rect,
}

impl NodeCandidate {
    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Rounded position plus text; two fragments with the same key are the
    /// same node drawn twice.
    pub fn dedup_key(&self) -> (i64, i64, String) {
        dedup_key(&self.bbox, &self.text)
    }
}

fn dedup_key(bbox: &Rect, text: &str) -> (i64, i64, String) {
    (bbox.x.round() as i64, bbox.y.round() as i64, text.to_string())
}

/// Sort candidate references by ascending center x.
///
/// The sort is stable, so candidates sharing a center x keep discovery
/// order.
pub fn sort_by_center_x(candidates: &[NodeCandidate]) -> Vec<&NodeCandidate> {
    let mut ordered: Vec<&NodeCandidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| safe_float_cmp(a.center().x, b.center().x));
    ordered
}

/// Collects node candidates from a surface.
#[derive(Debug, Clone)]
pub struct CandidateCollector<'a> {
    config: &'a CollectorConfig,
}

impl<'a> CandidateCollector<'a> {
    /// Create a collector with the given thresholds.
    pub fn new(config: &'a CollectorConfig) -> Self {
        Self { config }
    }

    /// Collect deduplicated candidates.
    ///
    /// Vector text is scanned first, then node containers. A container
    /// contributes only its first accepted descendant. An empty result is a
    /// normal outcome for surfaces without diagram content.
    pub fn collect(
        &self,
        surface: &Surface,
        stats: &mut ReconstructionStats,
    ) -> Vec<NodeCandidate> {
        let mut candidates = Vec::new();
        let mut seen: HashSet<(i64, i64, String)> = HashSet::new();

        for element in &surface.text_elements {
            if self.accept(element, stats) {
                self.push_unique(element, &mut candidates, &mut seen, stats);
            }
        }

        for container in &surface.node_containers {
            let first = container
                .descendants
                .iter()
                .find(|element| self.accept(element, stats));
            if let Some(element) = first {
                self.push_unique(element, &mut candidates, &mut seen, stats);
            }
        }

        stats.candidates = candidates.len();
        log::debug!(
            "Collected {} candidates ({} duplicates dropped)",
            candidates.len(),
            stats.duplicates
        );
        candidates
    }

    fn accept(&self, element: &TextElement, stats: &mut ReconstructionStats) -> bool {
        let outcome = classify_text_element(element, self.config);
        stats.record_classification(outcome);
        if !outcome.is_accepted() {
            log::trace!("Rejected {:?}: {:?}", element.trimmed_text(), outcome);
        }
        outcome.is_accepted()
    }

    fn push_unique(
        &self,
        element: &TextElement,
        candidates: &mut Vec<NodeCandidate>,
        seen: &mut HashSet<(i64, i64, String)>,
        stats: &mut ReconstructionStats,
    ) {
        let text = element.trimmed_text();
        if !seen.insert(dedup_key(&element.bbox, text)) {
            stats.duplicates += 1;
            return;
        }
        candidates.push(NodeCandidate {
            id: candidates.len(),
            text: text.to_string(),
            bbox: element.bbox,
        });
    }
}
