//! SVG word cloud.
//!
//! Words are sized linearly by frequency and placed along an Archimedean
//! spiral from the canvas centre; a position is taken when the word's
//! estimated bounding box stays on the canvas and clears every word already
//! placed. Identical input always yields the identical image.

use indexmap::IndexMap;
use quick_xml::escape::escape;
use serde::Serialize;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "shall", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

const PALETTE: &[&str] = &[
    "#1f3b73", "#2a6f97", "#468faf", "#6a4c93", "#8f2d56", "#c05746", "#2d6a4f", "#40916c",
];

/// Glyph width as a fraction of font size; a rough average for sans-serif.
const GLYPH_WIDTH_RATIO: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.35;
const SPIRAL_MAX_STEPS: usize = 4000;
/// Placement is quadratic in placed words; larger requests are cut to this.
pub const MAX_CLOUD_WORDS: usize = 500;

#[derive(Debug, Clone)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub background: String,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 100,
            min_font_size: 12.0,
            max_font_size: 72.0,
            background: "white".to_string(),
        }
    }
}

impl WordCloudConfig {
    /// Words considered for placement after applying [`MAX_CLOUD_WORDS`].
    pub fn word_budget(&self) -> usize {
        self.max_words.min(MAX_CLOUD_WORDS)
    }
}

/// A word positioned on the canvas; `x`/`y` are the box centre.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

impl PlacedWord {
    fn bounds(&self) -> Rect {
        Rect::centred(self.x, self.y, text_width(&self.word, self.font_size), self.font_size)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    pub fn generate(text: &str, config: &WordCloudConfig) -> Self {
        let frequencies = cloud_frequencies(text, config.word_budget());
        let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());

        let max_count = frequencies.first().map(|(_, c)| *c).unwrap_or(1);
        let min_count = frequencies.last().map(|(_, c)| *c).unwrap_or(1);

        for (i, (word, count)) in frequencies.into_iter().enumerate() {
            let font_size = scale_font(count, min_count, max_count, config);
            let color = PALETTE[i % PALETTE.len()];
            if let Some((x, y)) = find_position(&word, font_size, &placed, config) {
                placed.push(PlacedWord { word, count, font_size, x, y, color });
            }
        }

        tracing::debug!(placed = placed.len(), "word cloud generated");

        Self {
            width: config.width,
            height: config.height,
            background: config.background.clone(),
            words: placed,
        }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape(&self.background)
        ));
        for word in &self.words {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" font-family="sans-serif" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                word.color,
                escape(&word.word),
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Lowercased, edge-trimmed tokens minus stopwords, most frequent first.
fn cloud_frequencies(text: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() < 2
            || word.chars().all(|c| c.is_ascii_digit())
            || STOPWORDS.contains(&word.as_str())
        {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(max_words);
    ranked
}

fn scale_font(count: usize, min_count: usize, max_count: usize, config: &WordCloudConfig) -> f64 {
    if max_count <= min_count {
        return config.max_font_size;
    }
    let t = (count - min_count) as f64 / (max_count - min_count) as f64;
    config.min_font_size + t * (config.max_font_size - config.min_font_size)
}

fn text_width(word: &str, font_size: f64) -> f64 {
    word.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO
}

fn find_position(
    word: &str,
    font_size: f64,
    placed: &[PlacedWord],
    config: &WordCloudConfig,
) -> Option<(f64, f64)> {
    let (w, h) = (config.width as f64, config.height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let box_w = text_width(word, font_size);
    // Stretch the spiral horizontally to match the canvas aspect ratio.
    let aspect = w / h;

    for step in 0..SPIRAL_MAX_STEPS {
        let t = step as f64 * SPIRAL_STEP;
        let x = cx + aspect * t * t.cos();
        let y = cy + t * t.sin();
        let candidate = Rect::centred(x, y, box_w, font_size);
        if !candidate.inside(w, h) {
            continue;
        }
        if placed.iter().all(|p| !p.bounds().overlaps(&candidate)) {
            return Some((x, y));
        }
    }
    None
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rect {
    fn centred(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x - width / 2.0,
            top: y - height / 2.0,
            right: x + width / 2.0,
            bottom: y + height / 2.0,
        }
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right <= width && self.bottom <= height
    }

    fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
