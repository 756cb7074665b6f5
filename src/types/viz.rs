use crate::types::palette::parse_hex_color;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    /// Space under the grid reserved for the legend.
    pub legend_height: u32,
}

impl RenderOptions {
    pub fn calendar_defaults() -> Self {
        Self {
            width: 700,
            height: 600,
            padding: 20,
            legend_height: 60,
        }
    }
}

/// Fill painted under the calendar before it is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Transparent,
    Solid(u8, u8, u8),
}

impl Default for Background {
    fn default() -> Self {
        Background::WHITE
    }
}

impl Background {
    pub const WHITE: Background = Background::Solid(255, 255, 255);

    /// `white`, `transparent`, or a `#RRGGBB` colour.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "white" => Some(Background::WHITE),
            "transparent" => Some(Background::Transparent),
            hex => parse_hex_color(hex).map(|(r, g, b)| Background::Solid(r, g, b)),
        }
    }
}

/// Pixel size and fill of a rendered calendar PNG.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub background: Background,
}

impl OutputConfig {
    /// Output at the size the SVG was laid out for.
    pub fn for_calendar(options: &RenderOptions, background: Background) -> Self {
        Self {
            width: options.width,
            height: options.height,
            background,
        }
    }
}
