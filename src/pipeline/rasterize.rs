use std::cell::RefCell;

use crate::error::RasterError;
use crate::types::viz::{Background, OutputConfig};

thread_local! {
    static FONT_DB: RefCell<usvg::fontdb::Database> = RefCell::new(load_font_db());
}

/// Rasterizes a rendered calendar SVG to PNG bytes.
pub fn rasterize(svg: &str, output: &OutputConfig) -> Result<Vec<u8>, RasterError> {
    FONT_DB.with(|fontdb| render_png(svg, output, &fontdb.borrow()))
}

fn load_font_db() -> usvg::fontdb::Database {
    let mut fontdb = usvg::fontdb::Database::new();
    // Day numbers and the legend need a sans face even in slim containers.
    for path in [
        "/app/assets/fonts/DejaVuSans-Bold.ttf",
        "./assets/fonts/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ] {
        let _ = fontdb.load_font_file(path);
    }
    fontdb.load_system_fonts();
    fontdb
}

fn render_png(
    svg: &str,
    output: &OutputConfig,
    fontdb: &usvg::fontdb::Database,
) -> Result<Vec<u8>, RasterError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default(), fontdb)
        .map_err(|e| RasterError::RenderFailed(format!("Failed to parse calendar SVG: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(output.width, output.height).ok_or_else(|| {
        RasterError::RenderFailed(format!(
            "Failed to create {}x{} pixmap",
            output.width, output.height
        ))
    })?;

    if let Background::Solid(r, g, b) = output.background {
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    }

    let size = tree.size();
    let transform = fit_transform(size.width(), size.height(), output.width, output.height);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RasterError::RenderFailed(format!("Failed to encode PNG: {}", e)))
}

/// Uniform scale centred in the output, so day circles stay round when the
/// requested aspect differs from the SVG's.
fn fit_transform(svg_width: f32, svg_height: f32, width: u32, height: u32) -> tiny_skia::Transform {
    let (width, height) = (width as f32, height as f32);
    let scale = (width / svg_width).min(height / svg_height);
    let dx = (width - svg_width * scale) / 2.0;
    let dy = (height - svg_height * scale) / 2.0;
    tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy)
}
