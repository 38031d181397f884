use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palettes
// ---------------------------------------------------------------------------

/// Look of a generated categorical palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteStyle {
    pub saturation: f32,
    pub lightness: f32,
    /// Hue of the first colour, in degrees.
    pub hue_offset: f32,
}

impl PaletteStyle {
    pub const VIVID: Self = Self {
        saturation: 0.75,
        lightness: 0.55,
        hue_offset: 210.0,
    };
    pub const BOLD: Self = Self {
        saturation: 0.85,
        lightness: 0.45,
        hue_offset: 20.0,
    };
    pub const PASTEL: Self = Self {
        saturation: 0.60,
        lightness: 0.75,
        hue_offset: 150.0,
    };
    pub const DARK: Self = Self {
        saturation: 0.55,
        lightness: 0.40,
        hue_offset: 170.0,
    };
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize, style: PaletteStyle) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = style.hue_offset + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, style.saturation, style.lightness);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to distinct colours, so a category keeps its colour
/// across charts.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given labels, in order.
    pub fn new<I, S>(labels: I, style: PaletteStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len(), style);
        ColorMap {
            mapping: labels.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Blue → light grey → red for coefficients in `[-1, 1]`.  `NaN` is transparent.
pub fn coolwarm(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::TRANSPARENT;
    }
    let cold: LinSrgb = Srgb::new(0.23, 0.30, 0.75).into_linear();
    let neutral: LinSrgb = Srgb::new(0.87, 0.87, 0.87).into_linear();
    let warm: LinSrgb = Srgb::new(0.71, 0.02, 0.15).into_linear();

    let t = value.clamp(-1.0, 1.0) as f32;
    let mixed = if t < 0.0 {
        neutral.mix(cold, -t)
    } else {
        neutral.mix(warm, t)
    };
    to_color32(Srgb::from_linear(mixed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sizes_and_distinct() {
        assert!(generate_palette(0, PaletteStyle::VIVID).is_empty());
        let colors = generate_palette(4, PaletteStyle::BOLD);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_color_map_lookup() {
        let map = ColorMap::new(["Major", "Minor"], PaletteStyle::PASTEL);
        assert_ne!(map.color_for("Major"), map.color_for("Minor"));
        assert_eq!(map.color_for("Dorian"), Color32::GRAY);
    }

    #[test]
    fn test_coolwarm_ends() {
        let cold = coolwarm(-1.0);
        let warm = coolwarm(1.0);
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert_eq!(coolwarm(f64::NAN), Color32::TRANSPARENT);
    }
}
