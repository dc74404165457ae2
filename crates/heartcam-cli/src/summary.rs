use std::path::Path;

use console::Style;
use heartcam_core::consts::DEFAULT_SAMPLING_RATE;
use heartcam_core::pipeline::config::PipelineConfig;
use heartcam_core::pipeline::PulseReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    result: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            result: Style::new().bold().red(),
        }
    }
}

pub fn print_run_summary(
    config: &PipelineConfig,
    input: &Path,
    frame_count: usize,
    source_rate: Option<f64>,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Heartcam"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frame_count)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame rate"),
        s.value.apply_to(frame_rate_label(config, source_rate))
    );
    println!();

    println!("  {}", s.header.apply_to("Region"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Shape"),
        s.method.apply_to(&config.roi.strategy)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Channel"),
        s.method.apply_to(config.roi.channel)
    );
    println!();

    print_estimation_section(&s, config);
}

/// The rate the run will use and where it came from, in the same order
/// `PipelineConfig::resolve_sampling_rate` picks it.
fn frame_rate_label(config: &PipelineConfig, source_rate: Option<f64>) -> String {
    let usable = |r: &f64| r.is_finite() && *r > 0.0;
    if let Some(fps) = config.sampling_rate.filter(usable) {
        format!("{fps} fps (configured)")
    } else if let Some(fps) = source_rate.filter(usable) {
        format!("{fps:.3} fps (from timestamps)")
    } else {
        format!("{DEFAULT_SAMPLING_RATE} fps (default)")
    }
}

fn print_estimation_section(s: &Styles, config: &PipelineConfig) {
    let filter = &config.filter;
    println!("  {}", s.header.apply_to("Band-pass"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Band"),
        s.value.apply_to(format!(
            "{:.2}-{:.2} Hz ({:.0}-{:.0} BPM)",
            filter.low_cut_hz,
            filter.high_cut_hz,
            filter.low_cut_bpm(),
            filter.high_cut_bpm()
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Order"),
        s.value.apply_to(filter.order)
    );
    println!();

    println!("  {}", s.header.apply_to("Estimation"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min window"),
        s.value.apply_to(format!("{} s", config.estimation.min_window_secs))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Gaps"),
        s.method.apply_to(config.estimation.gap_policy)
    );
    match config.sliding_window {
        Some(ref sw) => println!(
            "    {:<12}{}",
            s.label.apply_to("Sliding"),
            s.value
                .apply_to(format!("{} s every {} s", sw.window_secs, sw.hop_secs))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Sliding"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();
}

pub fn print_report(report: &PulseReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(format!(
            "{} of {} frames ({} skipped)",
            report.raw.len(),
            report.frames_seen,
            report.frames_skipped
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rate"),
        s.value.apply_to(format!("{} fps", report.sampling_rate))
    );

    match report.estimate {
        Some(ref est) if report.has_estimate() => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Heart rate"),
                s.result.apply_to(format!("{:.1} BPM", report.bpm))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Peak"),
                s.value.apply_to(format!(
                    "{:.3} Hz (magnitude {:.3})",
                    est.peak_frequency_hz, est.peak_magnitude
                ))
            );
        }
        _ => println!(
            "    {:<12}{}",
            s.label.apply_to("Heart rate"),
            s.disabled.apply_to("no estimate (not enough signal)")
        ),
    }

    if !report.windows.is_empty() {
        println!();
        println!("  {}", s.header.apply_to("Windows"));
        for w in &report.windows {
            let bpm = if w.bpm > 0.0 {
                format!("{:.1} BPM", w.bpm)
            } else {
                "-".to_string()
            };
            println!(
                "    {:<12}{}",
                s.label.apply_to(format!("{:.1} s", w.start_secs)),
                s.value.apply_to(bpm)
            );
        }
    }
    println!();
}
