use std::f64::consts::TAU;
use std::path::Path;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use heartcam_core::frame::{ColorFrame, Frame};
use heartcam_core::io::ser::SER_HEADER_SIZE;

/// Build a SER file header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 100=RGB, 101=BGR
pub fn build_ser_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID (4 bytes)
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (treated as little-endian)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // Width
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    // Height
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    // PixelDepth
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    // FrameCount
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // Instrument (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // Telescope (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // DateTime (8 bytes)
    buf.extend_from_slice(&0u64.to_le_bytes());
    // DateTimeUTC (8 bytes)
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Build a complete 8-bit RGB SER file. Each frame is interleaved RGB bytes.
pub fn build_rgb_ser(width: u32, height: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = build_ser_header_full(width, height, 8, frames.len(), 100);
    for frame in frames {
        assert_eq!(frame.len(), (width * height * 3) as usize);
        buf.extend_from_slice(frame);
    }
    buf
}

/// Interleaved 8-bit RGB frame filled with one color.
pub fn solid_rgb_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    data
}

/// Write a SER buffer to a temporary file and return the temp file handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_test_ser(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write SER data");
    f.flush().expect("flush");
    f
}

/// Color frame with constant planes.
pub fn solid_frame(height: usize, width: usize, r: f32, g: f32, b: f32) -> ColorFrame {
    ColorFrame::new(
        Frame::new(Array2::from_elem((height, width), r), 8),
        Frame::new(Array2::from_elem((height, width), g), 8),
        Frame::new(Array2::from_elem((height, width), b), 8),
    )
}

/// Seeded uniform noise in [-1, 1).
pub fn uniform_noise(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
}

/// `sin(2*pi*freq*t) + drift_per_sample * i` plus white Gaussian noise of
/// standard deviation `noise_sigma`.
pub fn synthetic_pulse(
    sampling_rate: f64,
    len: usize,
    freq_hz: f64,
    drift_per_sample: f64,
    noise_sigma: f64,
) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, noise_sigma).expect("valid noise sigma");
    (0..len)
        .map(|i| {
            let t = i as f64 / sampling_rate;
            (TAU * freq_hz * t).sin() + drift_per_sample * i as f64 + noise.sample(&mut rng)
        })
        .collect()
}

/// Write a color frame as an 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let img = image::RgbImage::from_fn(color.width() as u32, color.height() as u32, |x, y| {
        let (r, c) = (y as usize, x as usize);
        image::Rgb([
            to_u8(color.red.data[[r, c]]),
            to_u8(color.green.data[[r, c]]),
            to_u8(color.blue.data[[r, c]]),
        ])
    });
    img.save_with_format(path, image::ImageFormat::Png)
        .expect("write PNG frame");
}

/// Pure sinusoid sampled at `sampling_rate`.
pub fn tone(sampling_rate: f64, len: usize, freq_hz: f64) -> Vec<f64> {
    (0..len)
        .map(|i| (TAU * freq_hz * i as f64 / sampling_rate).sin())
        .collect()
}
