use ndarray::Array2;

use super::landmarks::PixelPoint;

/// Horizontal run of masked pixels: columns `col_start..col_end` of `row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn is_empty(&self) -> bool {
        self.col_end <= self.col_start
    }
}

/// Scan-fill a polygon into per-row spans, clipped to a `height` x `width` frame.
///
/// A pixel is inside iff its center lies inside the polygon under the
/// even-odd rule. Centers exactly on a left or top boundary are included,
/// centers exactly on a right or bottom boundary are excluded, so two
/// polygons sharing an edge never both claim a pixel.
///
/// Fewer than three vertices or zero enclosed area yield no spans.
pub fn polygon_spans(vertices: &[PixelPoint], height: usize, width: usize) -> Vec<Span> {
    if vertices.len() < 3 || height == 0 || width == 0 {
        return Vec::new();
    }

    let (y_min, y_max) = vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let row_start = first_center_at_or_after(y_min, height);
    let row_end = first_center_at_or_after(y_max, height);

    let n = vertices.len();
    let mut spans = Vec::new();
    let mut crossings: Vec<f64> = Vec::with_capacity(n);

    for row in row_start..row_end {
        let yc = row as f64 + 0.5;
        crossings.clear();

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            // Half-open in y: an edge owns its lower endpoint only.
            if (a.y <= yc) != (b.y <= yc) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let col_start = first_center_at_or_after(pair[0], width);
            let col_end = first_center_at_or_after(pair[1], width);
            if col_end > col_start {
                spans.push(Span {
                    row,
                    col_start,
                    col_end,
                });
            }
        }
    }

    spans
}

/// Index of the first pixel whose center is >= `coord`, clamped to `0..=limit`.
fn first_center_at_or_after(coord: f64, limit: usize) -> usize {
    let idx = (coord - 0.5).ceil();
    if idx <= 0.0 {
        0
    } else if idx >= limit as f64 {
        limit
    } else {
        idx as usize
    }
}

/// Rasterize spans into a binary mask.
pub fn spans_to_mask(spans: &[Span], height: usize, width: usize) -> Array2<bool> {
    let mut mask = Array2::from_elem((height, width), false);
    for span in spans {
        for col in span.col_start..span.col_end {
            mask[[span.row, col]] = true;
        }
    }
    mask
}

/// Binary mask covering exactly the filled polygon interior.
pub fn polygon_mask(vertices: &[PixelPoint], height: usize, width: usize) -> Array2<bool> {
    spans_to_mask(&polygon_spans(vertices, height, width), height, width)
}
