#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use heartcam_core::consts::FACE_MESH_LANDMARK_COUNT;
use heartcam_core::frame::{Channel, Frame};
use heartcam_core::roi::{
    polygon_mask, polygon_spans, reduce_region, LandmarkPoint, PixelPoint, Region, RoiConfig,
    RoiReducer, RoiStrategy,
};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<PixelPoint> {
    vec![
        PixelPoint::new(x0, y0),
        PixelPoint::new(x1, y0),
        PixelPoint::new(x1, y1),
        PixelPoint::new(x0, y1),
    ]
}

fn pixel_count(vertices: &[PixelPoint], h: usize, w: usize) -> usize {
    polygon_spans(vertices, h, w).iter().map(|s| s.len()).sum()
}

/// Plane whose value at (row, col) is `col`.
fn column_ramp(h: usize, w: usize) -> Frame {
    Frame::new(Array2::from_shape_fn((h, w), |(_, c)| c as f32), 8)
}

fn normalized_square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<LandmarkPoint> {
    vec![
        LandmarkPoint::new(x0, y0),
        LandmarkPoint::new(x1, y0),
        LandmarkPoint::new(x1, y1),
        LandmarkPoint::new(x0, y1),
    ]
}

#[test]
fn test_integer_square_covers_sixteen_pixels() {
    let mask = polygon_mask(&square(2.0, 2.0, 6.0, 6.0), 10, 10);
    assert_eq!(mask.iter().filter(|&&m| m).count(), 16);
    assert!(mask[[2, 2]]);
    assert!(mask[[5, 5]]);
    assert!(!mask[[6, 6]]);
    assert!(!mask[[1, 3]]);
}

#[test]
fn test_half_pixel_offset_square() {
    // Centers at 2.5 lie on the top/left boundary (in), 6.5 on bottom/right (out).
    let spans = polygon_spans(&square(2.5, 2.5, 6.5, 6.5), 10, 10);
    assert_eq!(spans.len(), 4);
    assert_eq!(spans[0].row, 2);
    assert_eq!((spans[0].col_start, spans[0].col_end), (2, 6));
}

#[test]
fn test_shared_edge_not_double_counted() {
    let left = polygon_mask(&square(2.0, 2.0, 6.0, 6.0), 10, 10);
    let right = polygon_mask(&square(6.0, 2.0, 10.0, 6.0), 10, 10);
    let overlap = left.iter().zip(right.iter()).filter(|(a, b)| **a && **b).count();
    assert_eq!(overlap, 0);

    let covered = left.iter().zip(right.iter()).filter(|(a, b)| **a || **b).count();
    assert_eq!(covered, 32);
}

#[test]
fn test_triangle_area() {
    // Centers on the hypotenuse (x + y = 8) are on a right boundary and excluded.
    let tri = vec![
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(8.0, 0.0),
        PixelPoint::new(0.0, 8.0),
    ];
    assert_eq!(pixel_count(&tri, 8, 8), 28);
}

#[test]
fn test_polygon_clipped_to_frame() {
    assert_eq!(pixel_count(&square(-5.0, -5.0, 3.0, 3.0), 10, 10), 9);
    assert_eq!(pixel_count(&square(12.0, 12.0, 20.0, 20.0), 10, 10), 0);
}

#[test]
fn test_degenerate_polygons_have_no_pixels() {
    let collinear = vec![
        PixelPoint::new(1.0, 1.0),
        PixelPoint::new(5.0, 5.0),
        PixelPoint::new(9.0, 9.0),
    ];
    assert_eq!(pixel_count(&collinear, 10, 10), 0);
    assert_eq!(pixel_count(&square(2.0, 2.0, 6.0, 6.0)[..2], 10, 10), 0);
}

#[test]
fn test_reduce_region_mean() {
    let plane = column_ramp(10, 10);
    let region = Region::Polygon(square(2.0, 2.0, 6.0, 6.0));
    // Columns 2..6 average to 3.5.
    assert_abs_diff_eq!(reduce_region(&plane, &region).unwrap(), 3.5, epsilon = 1e-12);
}

#[test]
fn test_reduce_empty_region_is_none() {
    let plane = column_ramp(10, 10);
    let region = Region::Polygon(square(20.0, 20.0, 30.0, 30.0));
    assert!(reduce_region(&plane, &region).is_none());
}

#[test]
fn test_reducer_channel_selection() {
    let frame = common::solid_frame(8, 8, 0.25, 0.5, 0.75);
    let landmarks = normalized_square(0.25, 0.25, 0.75, 0.75);
    let strategy = RoiStrategy::Polygon {
        indices: vec![0, 1, 2, 3],
    };

    for (channel, expected) in [
        (Channel::Red, 0.25),
        (Channel::Green, 0.5),
        (Channel::Blue, 0.75),
    ] {
        let reducer = RoiReducer::new(&RoiConfig {
            strategy: strategy.clone(),
            channel,
        });
        let value = reducer.reduce(&frame, &landmarks).unwrap();
        assert_abs_diff_eq!(value, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_reducer_does_not_mutate_frame() {
    let frame = common::solid_frame(8, 8, 0.1, 0.2, 0.3);
    let before = frame.green.data.clone();
    let reducer = RoiReducer::new(&RoiConfig {
        strategy: RoiStrategy::BoundingBox { indices: vec![] },
        channel: Channel::Green,
    });
    reducer.reduce(&frame, &normalized_square(0.0, 0.0, 1.0, 1.0));
    assert_eq!(frame.green.data, before);
}

#[test]
fn test_unresolvable_indices_are_dropped() {
    let landmarks = normalized_square(0.25, 0.25, 0.75, 0.75);

    let partial = RoiStrategy::Polygon {
        indices: vec![0, 1, 2, 3, 500],
    };
    let region = Region::from_landmarks(&partial, &landmarks, 8, 8).unwrap();
    assert_eq!(pixel_count(&region_vertices(&region), 8, 8), 16);

    let too_few = RoiStrategy::Polygon {
        indices: vec![0, 500, 501],
    };
    assert!(Region::from_landmarks(&too_few, &landmarks, 8, 8).is_none());
}

fn region_vertices(region: &Region) -> Vec<PixelPoint> {
    match region {
        Region::Polygon(v) => v.clone(),
        Region::BoundingBox { x0, y0, x1, y1 } => square(*x0, *y0, *x1, *y1),
    }
}

#[test]
fn test_non_finite_landmarks_are_dropped() {
    let mut landmarks = normalized_square(0.25, 0.25, 0.75, 0.75);
    landmarks.push(LandmarkPoint::new(f32::NAN, 0.5));
    let strategy = RoiStrategy::BoundingBox { indices: vec![] };
    let region = Region::from_landmarks(&strategy, &landmarks, 8, 8).unwrap();
    assert_eq!(
        region,
        Region::BoundingBox {
            x0: 2.0,
            y0: 2.0,
            x1: 6.0,
            y1: 6.0
        }
    );
}

#[test]
fn test_bounding_box_of_selected_indices() {
    let landmarks = vec![
        LandmarkPoint::new(0.5, 0.25),
        LandmarkPoint::new(0.125, 0.625),
        LandmarkPoint::new(0.75, 0.5),
        LandmarkPoint::new(0.0, 0.0),
    ];
    let strategy = RoiStrategy::BoundingBox {
        indices: vec![0, 1, 2],
    };
    let region = Region::from_landmarks(&strategy, &landmarks, 8, 8).unwrap();
    assert_eq!(
        region,
        Region::BoundingBox {
            x0: 1.0,
            y0: 2.0,
            x1: 6.0,
            y1: 5.0
        }
    );
    assert_eq!(region.spans(8, 8).iter().map(|s| s.len()).sum::<usize>(), 15);
}

#[test]
fn test_no_landmarks_is_none() {
    let reducer = RoiReducer::default();
    let frame = common::solid_frame(8, 8, 0.0, 0.5, 0.0);
    assert!(reducer.reduce(&frame, &[]).is_none());
}

#[test]
fn test_default_strategy_is_forehead_polygon() {
    let config = RoiConfig::default();
    assert_eq!(config.channel, Channel::Green);
    assert_eq!(config.strategy.to_string(), "Polygon (6 points)");
    assert_eq!(
        RoiStrategy::BoundingBox { indices: vec![] }.to_string(),
        "Bounding Box (all landmarks)"
    );
}

#[test]
fn test_forehead_polygon_on_full_mesh() {
    // Place the six forehead landmarks on a hexagon, everything else at the origin.
    let mut mesh = vec![LandmarkPoint::new(0.0, 0.0); FACE_MESH_LANDMARK_COUNT];
    let hexagon = [
        (0.25, 0.375),
        (0.375, 0.25),
        (0.625, 0.25),
        (0.75, 0.375),
        (0.625, 0.5),
        (0.375, 0.5),
    ];
    if let RoiStrategy::Polygon { indices } = RoiStrategy::default() {
        for (&i, &(x, y)) in indices.iter().zip(hexagon.iter()) {
            mesh[i] = LandmarkPoint::new(x, y);
        }
    }
    let frame = common::solid_frame(16, 16, 0.0, 0.5, 0.0);
    let value = RoiReducer::default().reduce(&frame, &mesh).unwrap();
    assert_abs_diff_eq!(value, 0.5, epsilon = 1e-9);
}
