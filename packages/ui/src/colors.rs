//! # Note colors
//!
//! Each note card is drawn with a `{background, border}` pair from
//! [`NOTE_COLORS`]. Colors are a client-only concern and are never sent to
//! the API:
//!
//! - a note created in this session gets a random pair ([`random_color`]),
//!   remembered in a [`NoteColorMap`] for as long as the screen lives;
//! - every other note falls back to [`color_for`], which hashes the id into
//!   the palette so the same note always gets the same pair.

use std::collections::HashMap;

use api::ResourceId;
use rand::Rng;

/// Background and border color of a note card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteColors {
    pub background: &'static str,
    pub border: &'static str,
}

const fn pair(background: &'static str, border: &'static str) -> NoteColors {
    NoteColors { background, border }
}

/// Warm, peach, lavender and neutral tones.
pub const NOTE_COLORS: [NoteColors; 18] = [
    pair("#FFF6E5", "#FFE8B6"), // Soft mango cream
    pair("#FFF1D6", "#FFE8B6"), // Warm pastel yellow
    pair("#FFECC8", "#FFE8B6"), // Muted mango
    pair("#FBE7C6", "#FFE8B6"), // Vanilla cream
    pair("#FAF3E0", "#FBE7C6"), // Almond white
    pair("#F9EED7", "#FBE7C6"), // Pale sand
    pair("#FFEFE6", "#FFDCD2"), // Peach milk
    pair("#FFDCD2", "#FFE3D6"), // Soft blush
    pair("#FFE3D6", "#FADADD"), // Warm rose
    pair("#FADADD", "#F6E1E1"), // Dusty pink
    pair("#F3F0FF", "#ECE9FF"), // Lavender white
    pair("#ECE9FF", "#E8E6F5"), // Soft lavender
    pair("#E8E6F5", "#E6E1F0"), // Grey-lavender
    pair("#F1ECF8", "#E6E1F0"), // Cloud lavender
    pair("#F5F5F7", "#EFEFF4"), // System white
    pair("#EFEFF4", "#EDEDED"), // Cool grey
    pair("#F0F4EC", "#EEF3E8"), // Sage white
    pair("#EEF3E8", "#E8F1EC"), // Soft olive cream
];

/// Used by the detail screen when it is opened without colors.
pub const DETAIL_FALLBACK: NoteColors = pair("#FFFFFF", "#F0F0F0");

/// `palette[|id| mod len]`. Ids without a numeric value count as 0.
/// `None` only for an empty palette.
pub fn color_for<'a, T>(id: &ResourceId, palette: &'a [T]) -> Option<&'a T> {
    if palette.is_empty() {
        return None;
    }
    let index = id.numeric().unsigned_abs() % palette.len() as u64;
    palette.get(index as usize)
}

/// Deterministic colors from the default palette.
pub fn note_colors(id: &ResourceId) -> NoteColors {
    color_for(id, &NOTE_COLORS)
        .copied()
        .unwrap_or(DETAIL_FALLBACK)
}

/// Random pair for a note being created.
pub fn random_color() -> NoteColors {
    NOTE_COLORS[rand::thread_rng().gen_range(0..NOTE_COLORS.len())]
}

/// Colors picked for notes during the lifetime of one list screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteColorMap {
    assigned: HashMap<ResourceId, NoteColors>,
}

impl NoteColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the colors chosen for a freshly created note.
    pub fn remember(&mut self, id: ResourceId, colors: NoteColors) {
        self.assigned.insert(id, colors);
    }

    /// Remembered colors, else the deterministic fallback.
    pub fn colors_for(&self, id: &ResourceId) -> NoteColors {
        self.assigned
            .get(id)
            .copied()
            .unwrap_or_else(|| note_colors(id))
    }

    pub fn clear(&mut self) {
        self.assigned.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_is_deterministic() {
        let id = ResourceId::Int(123);
        assert_eq!(color_for(&id, &NOTE_COLORS), color_for(&id, &NOTE_COLORS));
        assert_eq!(note_colors(&id), NOTE_COLORS[123 % 18]);
    }

    #[test]
    fn test_negative_ids_use_absolute_value() {
        let palette = [0, 1, 2, 3, 4, 5, 6];
        assert_eq!(
            color_for(&ResourceId::Int(-7), &palette),
            color_for(&ResourceId::Int(7), &palette)
        );
        assert_eq!(color_for(&ResourceId::Int(-9), &palette), Some(&2));
        assert_eq!(
            note_colors(&ResourceId::Int(i64::MIN)),
            NOTE_COLORS[(i64::MIN.unsigned_abs() % 18) as usize]
        );
    }

    #[test]
    fn test_non_numeric_ids_fall_back_to_first_entry() {
        assert_eq!(note_colors(&ResourceId::from("abc")), NOTE_COLORS[0]);
        assert_eq!(note_colors(&ResourceId::from("20")), NOTE_COLORS[2]);
    }

    #[test]
    fn test_empty_palette() {
        let palette: [NoteColors; 0] = [];
        assert!(color_for(&ResourceId::Int(1), &palette).is_none());
    }

    #[test]
    fn test_random_color_comes_from_palette() {
        for _ in 0..50 {
            assert!(NOTE_COLORS.contains(&random_color()));
        }
    }

    #[test]
    fn test_color_map_prefers_remembered_colors() {
        let mut map = NoteColorMap::new();
        let id = ResourceId::Int(4);
        assert_eq!(map.colors_for(&id), NOTE_COLORS[4]);

        map.remember(id.clone(), NOTE_COLORS[11]);
        assert_eq!(map.colors_for(&id), NOTE_COLORS[11]);
        assert_eq!(map.colors_for(&ResourceId::Int(5)), NOTE_COLORS[5]);

        // After a reload the remembered color is gone.
        map.clear();
        assert_eq!(map.colors_for(&id), NOTE_COLORS[4]);
    }
}
