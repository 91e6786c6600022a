use serde::{Deserialize, Serialize};

use crate::core::aligner::AlignedChartData;
use crate::error::{AnalysisError, AnalysisResult};

/// Fill alpha applied to series backgrounds (`0x20` of `0xFF`).
pub const SERIES_FILL_ALPHA: f64 = 32.0 / 255.0;
pub const SERIES_LINE_TENSION: f64 = 0.1;
pub const SERIES_BORDER_WIDTH: f64 = 2.0;

const LIGHT_SERIES_RGB: [(u8, u8, u8); 5] = [
    (124, 58, 237),
    (249, 115, 22),
    (59, 130, 246),
    (16, 185, 129),
    (236, 72, 153),
];

const DARK_SERIES_RGB: [(u8, u8, u8); 5] = [
    (167, 139, 250),
    (251, 146, 60),
    (96, 165, 250),
    (52, 211, 153),
    (251, 113, 133),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    #[must_use]
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> AnalysisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// CSS form: `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let (red, green, blue) = (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        );
        if self.alpha >= 1.0 {
            format!("rgb({red}, {green}, {blue})")
        } else {
            format!("rgba({red}, {green}, {blue}, {:.3})", self.alpha)
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Line color of the series at `series_index`, cycling through five colors
/// per theme.
#[must_use]
pub fn palette_for(series_index: usize, theme: Theme) -> Color {
    let table = match theme {
        Theme::Light => &LIGHT_SERIES_RGB,
        Theme::Dark => &DARK_SERIES_RGB,
    };
    let (red, green, blue) = table[series_index % table.len()];
    Color::from_rgb8(red, green, blue)
}

/// Chrome colors shared by the chart surface for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub text: Color,
    pub grid: Color,
    pub background: Color,
}

impl ThemeColors {
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::from_rgb8(0x1f, 0x29, 0x37),
                grid: Color::from_rgb8(0xd1, 0xd5, 0xdb),
                background: Color::from_rgb8(0xff, 0xff, 0xff),
            },
            Theme::Dark => Self {
                text: Color::from_rgb8(0xe5, 0xe7, 0xeb),
                grid: Color::from_rgb8(0x37, 0x41, 0x51),
                background: Color::transparent(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub athlete_id: String,
    pub border_color: Color,
    pub background_color: Color,
    pub tension: f64,
    pub border_width: f64,
}

/// Styles every series of already aligned data; alignment is not recomputed.
#[must_use]
pub fn series_styles(data: &AlignedChartData, theme: Theme) -> Vec<SeriesStyle> {
    data.series
        .iter()
        .enumerate()
        .map(|(index, series)| {
            let border_color = palette_for(index, theme);
            SeriesStyle {
                athlete_id: series.athlete_id.clone(),
                border_color,
                background_color: border_color.with_alpha(SERIES_FILL_ALPHA),
                tension: SERIES_LINE_TENSION,
                border_width: SERIES_BORDER_WIDTH,
            }
        })
        .collect()
}
