//! Screenshot-derived hints
//!
//! Decoding the screenshot is the capture side's job. These helpers work on
//! raw RGBA bytes.

/// Sampling stride in pixels on both axes
pub const DEFAULT_SAMPLE_STEP: usize = 24;

const DOMINANT_COLOR_LIMIT: usize = 6;
/// Pixels more transparent than this are skipped
const MIN_ALPHA: u8 = 200;
const QUANTUM: u8 = 16;

/// Most frequent quantized colors in an RGBA8 buffer.
///
/// Every `step`-th pixel on both axes is sampled. Channels are floored to
/// multiples of 16. Equal counts keep first-seen order.
pub fn dominant_colors_from_rgba(pixels: &[u8], width: usize, height: usize, step: usize) -> Vec<String> {
    let step = step.max(1);
    let mut histogram: Vec<(String, usize)> = Vec::new();

    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            let idx = (width * y + x) * 4;
            let Some(pixel) = pixels.get(idx..idx + 4) else {
                continue;
            };
            if pixel[3] < MIN_ALPHA {
                continue;
            }

            let quantize = |channel: u8| channel / QUANTUM * QUANTUM;
            let key = format!(
                "#{:02x}{:02x}{:02x}",
                quantize(pixel[0]),
                quantize(pixel[1]),
                quantize(pixel[2])
            );
            match histogram.iter_mut().find(|(color, _)| *color == key) {
                Some(entry) => entry.1 += 1,
                None => histogram.push((key, 1)),
            }
        }
    }

    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
        .into_iter()
        .take(DOMINANT_COLOR_LIMIT)
        .map(|(color, _)| color)
        .collect()
}

pub fn build_vision_notes(width: f64, height: f64, dominant_colors: &[String]) -> Vec<String> {
    let mut notes = vec![format!("Screenshot analyzed at {width}x{height}.")];

    if !dominant_colors.is_empty() {
        notes.push("Use dominant colors for background layering and accent priority.".to_string());
    }

    if height > width * 2.0 {
        notes.push("Page appears long-scroll; preserve vertical rhythm between sections.".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter().copied().cycle().take(width * height * 4).collect()
    }

    #[test]
    fn test_single_color_quantized() {
        let pixels = solid(48, 48, [37, 99, 235, 255]);
        assert_eq!(dominant_colors_from_rgba(&pixels, 48, 48, 24), vec!["#2060e0"]);
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let pixels = solid(10, 10, [255, 0, 0, 10]);
        assert!(dominant_colors_from_rgba(&pixels, 10, 10, 1).is_empty());
    }

    #[test]
    fn test_ordering_by_count_then_first_seen() {
        // 4x1 strip: white, black, black, red
        let pixels = vec![
            255, 255, 255, 255, //
            0, 0, 0, 255, //
            0, 0, 0, 255, //
            255, 0, 0, 255,
        ];
        assert_eq!(
            dominant_colors_from_rgba(&pixels, 4, 1, 1),
            vec!["#000000", "#f0f0f0", "#f00000"]
        );
    }

    #[test]
    fn test_short_buffer_does_not_panic() {
        assert!(dominant_colors_from_rgba(&[0, 0, 0], 10, 10, 0).is_empty());
    }

    #[test]
    fn test_vision_notes() {
        let notes = build_vision_notes(1440.0, 4000.0, &["#ffffff".to_string()]);
        assert_eq!(notes[0], "Screenshot analyzed at 1440x4000.");
        assert_eq!(notes.len(), 3);

        let plain = build_vision_notes(1440.0, 900.0, &[]);
        assert_eq!(plain, vec!["Screenshot analyzed at 1440x900."]);
    }
}
