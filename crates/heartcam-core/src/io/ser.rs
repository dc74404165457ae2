use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;
use tracing::debug;

use crate::consts::SER_TICKS_PER_SECOND;
use crate::error::{HeartcamError, Result};
use crate::frame::{ColorFrame, ColorMode, Frame, FrameMetadata, SourceInfo};

use super::FrameSource;

pub const SER_HEADER_SIZE: usize = 178;
const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";
const SER_TIMESTAMP_SIZE: usize = 8;

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame, or `None` if the dimensions overflow.
    pub fn frame_byte_size(&self) -> Option<usize> {
        let pixels = (self.width as usize).checked_mul(self.height as usize)?;
        pixels.checked_mul(self.bytes_per_pixel_plane() * self.planes_per_pixel())
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            0 => ColorMode::Mono,
            8 => ColorMode::BayerRGGB,
            9 => ColorMode::BayerGRBG,
            10 => ColorMode::BayerGBRG,
            11 => ColorMode::BayerBGGR,
            100 => ColorMode::RGB,
            101 => ColorMode::BGR,
            _ => ColorMode::Mono,
        }
    }
}

/// Memory-mapped SER video reader.
pub struct SerReader {
    mmap: Mmap,
    frame_bytes: usize,
    pub header: SerHeader,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(HeartcamError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }

        if &mmap[0..14] != SER_MAGIC {
            return Err(HeartcamError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;

        let frame_bytes = header.frame_byte_size().ok_or_else(|| {
            HeartcamError::InvalidSer("Frame size calculation overflow".into())
        })?;
        let expected_data_size = frame_bytes
            .checked_mul(header.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| HeartcamError::InvalidSer("Data size overflow".into()))?;
        if mmap.len() < expected_data_size {
            return Err(HeartcamError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        debug!(
            width = header.width,
            height = header.height,
            frames = header.frame_count,
            color_id = header.color_id,
            "Opened SER file"
        );

        Ok(Self {
            mmap,
            frame_bytes,
            header,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(HeartcamError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.frame_bytes;
        Ok(&self.mmap[offset..offset + self.frame_bytes])
    }

    /// Read a single frame as separate R, G, B planes in [0.0, 1.0].
    ///
    /// Mono data is replicated into all three planes. Bayer mosaics are
    /// rejected: sampling a single photosite colour would alias the ROI mean.
    pub fn read_color_frame(&self, index: usize) -> Result<ColorFrame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let bpp = self.header.bytes_per_pixel_plane();
        let depth = self.header.pixel_depth;
        let le = self.header.little_endian;
        let bit_depth = (bpp * 8) as u8;

        let mut color = match self.header.color_mode() {
            ColorMode::Mono => {
                let plane = decode_plane(raw, h, w, bpp, 1, 0, depth, le);
                ColorFrame::from_mono(Frame::new(plane, bit_depth))
            }
            mode @ (ColorMode::RGB | ColorMode::BGR) => {
                let (r_idx, b_idx) = if mode == ColorMode::RGB { (0, 2) } else { (2, 0) };
                ColorFrame::new(
                    Frame::new(decode_plane(raw, h, w, bpp, 3, r_idx, depth, le), bit_depth),
                    Frame::new(decode_plane(raw, h, w, bpp, 3, 1, depth, le), bit_depth),
                    Frame::new(decode_plane(raw, h, w, bpp, 3, b_idx, depth, le), bit_depth),
                )
            }
            other => {
                return Err(HeartcamError::UnsupportedColorMode(format!("{other:?}")));
            }
        };

        color.metadata = FrameMetadata {
            frame_index: index,
            timestamp_us: self.read_timestamp(index).map(|t| t / 10),
        };
        Ok(color)
    }

    /// Read per-frame timestamp (100 ns ticks) from the optional trailer.
    fn read_timestamp(&self, index: usize) -> Option<u64> {
        let trailer_offset = SER_HEADER_SIZE + self.frame_bytes * self.frame_count();
        let ts_offset = trailer_offset + index * SER_TIMESTAMP_SIZE;
        if ts_offset + SER_TIMESTAMP_SIZE <= self.mmap.len() {
            let bytes = &self.mmap[ts_offset..ts_offset + SER_TIMESTAMP_SIZE];
            Some(u64::from_le_bytes(bytes.try_into().ok()?))
        } else {
            None
        }
    }

    /// Mean capture rate derived from the first and last trailer timestamps.
    pub fn frame_rate(&self) -> Option<f64> {
        let n = self.frame_count();
        if n < 2 {
            return None;
        }
        let first = self.read_timestamp(0)?;
        let last = self.read_timestamp(n - 1)?;
        if last <= first {
            return None;
        }
        let elapsed = (last - first) as f64 / SER_TICKS_PER_SECOND;
        Some((n - 1) as f64 / elapsed)
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: self.header.pixel_depth as u8,
            color_mode: self.header.color_mode(),
            frame_rate: self.frame_rate(),
            observer: non_empty(&self.header.observer),
            instrument: non_empty(&self.header.instrument),
        }
    }
}

impl FrameSource for SerReader {
    fn frame_count(&self) -> usize {
        SerReader::frame_count(self)
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.header.width, self.header.height)
    }

    fn frame_rate(&self) -> Option<f64> {
        SerReader::frame_rate(self)
    }

    fn read_color_frame(&self, index: usize) -> Result<ColorFrame> {
        SerReader::read_color_frame(self, index)
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()? as u32;
    let height = cursor.read_i32::<LittleEndian>()? as u32;
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()? as u32;

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = std::io::Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    if width == 0 || height == 0 {
        return Err(HeartcamError::InvalidDimensions { width, height });
    }

    if !(1..=16).contains(&pixel_depth) {
        return Err(HeartcamError::InvalidSer(format!(
            "Unsupported pixel depth: {pixel_depth}"
        )));
    }

    // SER spec: LittleEndian field = 0 means big-endian pixel data,
    // but most writers use 0 for little-endian. Treat 0 as little-endian.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width,
        height,
        pixel_depth,
        frame_count,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Decode one plane of (possibly interleaved) pixel data, normalized by the
/// nominal bit depth.
#[allow(clippy::too_many_arguments)]
fn decode_plane(
    raw: &[u8],
    height: usize,
    width: usize,
    bytes_per_sample: usize,
    planes: usize,
    plane_index: usize,
    bit_depth: u32,
    little_endian: bool,
) -> Array2<f32> {
    let max_val = ((1u32 << bit_depth) - 1) as f32;
    let mut data = Array2::<f32>::zeros((height, width));

    for row in 0..height {
        for col in 0..width {
            let pixel_offset = (row * width + col) * planes * bytes_per_sample;
            let idx = pixel_offset + plane_index * bytes_per_sample;
            let val = if bytes_per_sample == 1 {
                raw[idx] as f32
            } else {
                let pair = [raw[idx], raw[idx + 1]];
                if little_endian {
                    u16::from_le_bytes(pair) as f32
                } else {
                    u16::from_be_bytes(pair) as f32
                }
            };
            data[[row, col]] = (val / max_val).min(1.0);
        }
    }

    data
}
