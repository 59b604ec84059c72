use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scale
// ---------------------------------------------------------------------------

/// Anchor colours of the viridis scale, dark purple to yellow.
const VIRIDIS: [(f32, f32, f32); 5] = [
    (0.267, 0.005, 0.329),
    (0.231, 0.322, 0.545),
    (0.129, 0.569, 0.553),
    (0.369, 0.788, 0.384),
    (0.993, 0.906, 0.144),
];

/// A continuous colour scale sampled on `[0, 1]`, interpolated in linear RGB.
#[derive(Debug, Clone)]
pub struct Colormap {
    stops: Vec<LinSrgb>,
}

impl Default for Colormap {
    fn default() -> Self {
        Self::viridis()
    }
}

impl Colormap {
    pub fn viridis() -> Self {
        let stops = VIRIDIS
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_linear())
            .collect();
        Colormap { stops }
    }

    /// Colour at position `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f32;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - idx as f32;

        let mixed = self.stops[idx].mix(self.stops[idx + 1], local);
        let rgb: Srgb = Srgb::from_linear(mixed);
        Color32::from_rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// Colour for class `class` out of `n_classes`, spread evenly over the scale.
    pub fn class_color(&self, class: usize, n_classes: usize) -> Color32 {
        if n_classes <= 1 {
            return self.sample(0.0);
        }
        self.sample(class as f32 / (n_classes - 1) as f32)
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luminance = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luminance > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
