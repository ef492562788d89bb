use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::error::OsmViewError;
use super::{Hsl, Rgb};

/// Ten-entry categorical palette (the Tableau/D3 "category10" set).
pub const DEFAULT_PALETTE: [Rgb; 10] = [
    Rgb::new( 31, 119, 180),
    Rgb::new(255, 127,  14),
    Rgb::new( 44, 160,  44),
    Rgb::new(214,  39,  40),
    Rgb::new(148, 103, 189),
    Rgb::new(140,  86,  75),
    Rgb::new(227, 119, 194),
    Rgb::new(127, 127, 127),
    Rgb::new(188, 189,  34),
    Rgb::new( 23, 190, 207),
];

/// `n` CSS colors spaced around the hue wheel by the golden angle.
pub fn golden_angle_palette(n: usize) -> Vec<String> {
    (0..n).map(|i| Hsl::golden_angle(i).to_string()).collect()
}

/// Distinct values in order of first occurrence.
pub fn distinct_values<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = AHashSet::new();
    let mut out = Vec::new();
    for value in values {
        let value = value.as_ref();
        if seen.insert(value.to_string()) {
            out.push(value.to_string());
        }
    }
    out
}

/// Mapping from categorical value to palette entry, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryColorMap {
    entries: Vec<(String, String)>,
    index: AHashMap<String, usize>,
}

impl CategoryColorMap {
    pub fn get(&self, value: &str) -> Option<&str> {
        self.index.get(value).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// `(value, color)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(v, c)| (v.as_str(), c.as_str()))
    }
}

/// Assign `palette[i mod len]` to the i-th distinct value of `values`.
///
/// Assignment follows first-seen order, not sorted order, so the same values
/// in a different order may receive different colors. Once there are more
/// distinct values than palette entries, colors repeat.
pub fn assign_colors<I, V, P>(values: I, palette: &[P]) -> Result<CategoryColorMap, OsmViewError>
where
    I: IntoIterator<Item = V>,
    V: AsRef<str>,
    P: AsRef<str>,
{
    if palette.is_empty() {
        return Err(OsmViewError::invalid("palette is empty"));
    }

    let mut map = CategoryColorMap::default();
    for value in values {
        let value = value.as_ref();
        if map.index.contains_key(value) { continue }
        let color = palette[map.entries.len() % palette.len()].as_ref().to_string();
        map.index.insert(value.to_string(), map.entries.len());
        map.entries.push((value.to_string(), color));
    }
    Ok(map)
}

/// Palette index for each distinct key, `i mod len` for the i-th key first seen.
///
/// Same assignment as [`assign_colors`], for keys that are not plain strings.
pub(crate) fn palette_slots<I, K>(keys: I, len: usize) -> AHashMap<K, usize>
where
    I: IntoIterator<Item = K>,
    K: Hash + Eq,
{
    let mut slots = AHashMap::new();
    let mut seen = 0;
    for key in keys {
        slots.entry(key).or_insert_with(|| {
            seen += 1;
            (seen - 1) % len.max(1)
        });
    }
    slots
}
