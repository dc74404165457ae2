/// Sampling rate substituted when the source reports none (or zero).
pub const DEFAULT_SAMPLING_RATE: f64 = 30.0;

/// Lower pass-band edge: 0.75 Hz = 45 BPM.
pub const DEFAULT_LOW_CUT_HZ: f64 = 0.75;

/// Upper pass-band edge: 3.0 Hz = 180 BPM.
pub const DEFAULT_HIGH_CUT_HZ: f64 = 3.0;

/// Butterworth prototype order. The band-pass realisation has twice as many poles.
pub const DEFAULT_FILTER_ORDER: usize = 3;

/// Seconds of signal required before an estimate is attempted.
pub const DEFAULT_MIN_WINDOW_SECS: f64 = 5.0;

/// Relative magnitude difference below which two spectral peaks count as tied.
pub const PEAK_TIE_TOLERANCE: f64 = 1e-9;

/// Tolerance (Hz) applied to the closed band edges when selecting bins.
pub const BAND_EDGE_TOLERANCE_HZ: f64 = 1e-9;

/// Pole imaginary parts below this are treated as real when pairing sections.
pub const POLE_IMAG_TOLERANCE: f64 = 1e-12;

/// SER timestamps count 100 ns ticks.
pub const SER_TICKS_PER_SECOND: f64 = 10_000_000.0;

/// Number of points in a MediaPipe face mesh.
pub const FACE_MESH_LANDMARK_COUNT: usize = 468;

/// Ordered forehead patch of the face mesh: upper edge left to right,
/// then the lower edge back right to left.
pub const FOREHEAD_LANDMARKS: [usize; 6] = [109, 10, 338, 337, 151, 108];

/// Beats per minute per hertz.
pub const SECONDS_PER_MINUTE: f64 = 60.0;
