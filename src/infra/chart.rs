// ============================================================
// Layer 6 — Chart Drawing Context
// ============================================================
// Draws a frequency histogram into an in-memory RGB buffer and
// encodes it as PNG (and optionally base64 for inline <img>).
//
// Lifecycle of one chart, all inside one `ChartContext` value:
//
//   ChartContext::new(w, h)     create  (owns the pixel buffer)
//     .draw_histogram(&h)?      draw    (consumes and returns self)
//     .encode_png()?            encode  (consumes self → buffer freed)
//
// No plotting state outlives the value. Text (title, axis names,
// category names) is left to the caller's page or console output;
// the bitmap holds bars, grid lines and axes only.

use base64::{Engine as _, engine::general_purpose};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Color, IntoDrawingArea, IntoSegmentedCoord, PathElement,
    RGBColor, SegmentValue, BLACK, WHITE,
};
use plotters::series::Histogram as HistogramSeries;

use crate::domain::error::ChartError;
use crate::domain::histogram::Histogram;

/// 6 x 4 inches at 100 dpi
pub const DEFAULT_SIZE: (u32, u32) = (600, 400);

const MARGIN: u32 = 24;
/// Widest gap on each side of a bar; narrowed when slots get thin
const BAR_GAP: u32 = 12;
const GRID_LINES: u32 = 4;
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

pub struct ChartContext {
    width:  u32,
    height: u32,
    /// Packed RGB, 3 bytes per pixel
    buffer: Vec<u8>,
}

impl ChartContext {
    /// Allocate a blank `width` x `height` RGB canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    /// Draw one bar per histogram bin, left to right in bin order.
    ///
    /// # Arguments
    /// * `histogram` - counts to draw; an empty histogram leaves only axes and grid
    ///
    /// Returns the same context with the pixels filled in, ready to encode.
    pub fn draw_histogram(mut self, histogram: &Histogram) -> Result<Self, ChartError> {
        let size = (self.width, self.height);
        {
            let root = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let bins  = histogram.bins();
            let n     = bins.len().max(1) as u32;
            let y_top = headroom(histogram.max_count());

            let mut chart = ChartBuilder::on(&root)
                .margin(MARGIN)
                .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y_top)
                .map_err(draw_err)?;

            let (xs, ys) = chart.plotting_area().get_pixel_range();
            let gap = bar_gap((xs.end - xs.start).max(0) as u32, n + 1);

            for k in 1..=GRID_LINES {
                let y = y_top * k / (GRID_LINES + 1);
                let (_, py) = chart.backend_coord(&(SegmentValue::Exact(0), y));
                root.draw(&PathElement::new(
                    vec![(xs.start, py), (xs.end, py)],
                    GRID_COLOR.stroke_width(1),
                ))
                .map_err(draw_err)?;
            }

            chart
                .draw_series(
                    HistogramSeries::vertical(&chart)
                        .style(BAR_COLOR.filled())
                        .margin(gap)
                        .data(bins.iter().enumerate().map(|(i, (_, c))| (i as u32, *c as u32))),
                )
                .map_err(draw_err)?;

            root.draw(&PathElement::new(
                vec![(xs.start, ys.start), (xs.start, ys.end), (xs.end, ys.end)],
                BLACK.stroke_width(2),
            ))
            .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }
        Ok(self)
    }

    /// Encode the buffer as PNG and release it.
    pub fn encode_png(self) -> Result<Vec<u8>, ChartError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.buffer, self.width, self.height, ColorType::Rgb8)
            .map_err(|e| ChartError::Encode(e.to_string()))?;
        Ok(png)
    }

    /// Encode as PNG, then base64 for a `data:image/png;base64,` URI.
    pub fn encode_base64(self) -> Result<String, ChartError> {
        let png = self.encode_png()?;
        Ok(general_purpose::STANDARD.encode(png))
    }
}

/// create → draw → encode in one call
///
/// # Arguments
/// * `histogram` - value counts of one column
/// * `(width, height)` - bitmap size in pixels
///
/// Returns the PNG bytes.
pub fn histogram_png(histogram: &Histogram, (width, height): (u32, u32)) -> Result<Vec<u8>, ChartError> {
    ChartContext::new(width, height)
        .draw_histogram(histogram)?
        .encode_png()
}

/// create → draw → encode → base64 in one call
pub fn histogram_base64(histogram: &Histogram, (width, height): (u32, u32)) -> Result<String, ChartError> {
    ChartContext::new(width, height)
        .draw_histogram(histogram)?
        .encode_base64()
}

/// Gap on each side of a bar, at most a quarter of one slot so that
/// thin slots (many bins) still show separate bars.
fn bar_gap(plot_width: u32, slots: u32) -> u32 {
    BAR_GAP.min(plot_width / slots.max(1) / 4)
}

/// Top of the y axis: ~10% above the tallest bar, never 0
fn headroom(max: usize) -> u32 {
    let max = max as u32;
    max + max / 10 + 1
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Table;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

    fn histogram(values: &[&str]) -> Histogram {
        let table = Table::new(
            vec!["protocol_type".to_string()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
        .unwrap();
        Histogram::of(&table, "protocol_type").unwrap()
    }

    #[test]
    fn test_png_signature() {
        let png = histogram_png(&histogram(&["tcp", "tcp", "udp", "icmp"]), DEFAULT_SIZE).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_base64_is_png() {
        let b64 = histogram_base64(&histogram(&["tcp", "udp"]), (200, 150)).unwrap();
        // base64 of the PNG signature
        assert!(b64.starts_with("iVBORw0KGgo"));
    }

    #[test]
    fn test_empty_histogram_still_renders() {
        let png = histogram_png(&histogram(&[]), (120, 80)).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_bars_are_drawn() {
        let ctx = ChartContext::new(300, 200)
            .draw_histogram(&histogram(&["tcp", "tcp", "udp"]))
            .unwrap();
        let colored = ctx
            .buffer
            .chunks(3)
            .any(|px| px == [BAR_COLOR.0, BAR_COLOR.1, BAR_COLOR.2]);
        assert!(colored);
    }

    #[test]
    fn test_many_bins_stay_separate() {
        let values: Vec<String> = (0..70).map(|i| format!("svc{i}")).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let ctx = ChartContext::new(600, 400).draw_histogram(&histogram(&refs)).unwrap();

        let bar = [BAR_COLOR.0, BAR_COLOR.1, BAR_COLOR.2];
        let width = ctx.width as usize;
        // Row crossing the most bars: count the separate runs of bar colour
        let runs = ctx
            .buffer
            .chunks(width * 3)
            .map(|row| {
                let px: Vec<bool> = row.chunks(3).map(|p| p == bar).collect();
                px.windows(2).filter(|w| w[1] && !w[0]).count() + usize::from(px[0])
            })
            .max()
            .unwrap();
        assert_eq!(runs, 70);
    }

    #[test]
    fn test_bar_gap_shrinks_with_slot_width() {
        assert_eq!(bar_gap(552, 4), BAR_GAP);
        assert_eq!(bar_gap(552, 71), 1);
        assert_eq!(bar_gap(552, 0), BAR_GAP);
    }

    #[test]
    fn test_headroom() {
        assert_eq!(headroom(0), 1);
        assert_eq!(headroom(100), 111);
    }
}
