//! Coarse text plots for the terminal demos.

const WIDTH: usize = 64;
const HEIGHT: usize = 10;

/// Vertical range of the spectrum plot in dB.
const DB_FLOOR: f64 = -20.0;
const DB_CEIL: f64 = 100.0;

/// Plots the first `window` samples, one min/max stroke per column.
pub fn waveform(samples: &[f64], window: usize) -> Vec<String> {
    let shown = &samples[..samples.len().min(window)];
    let scale = shown.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    let mut grid = vec![vec![' '; WIDTH]; HEIGHT];

    if scale > 0.0 {
        let per_column = shown.len().div_ceil(WIDTH);
        for (col, chunk) in shown.chunks(per_column).enumerate() {
            let (lo, hi) = chunk
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                    (lo.min(s), hi.max(s))
                });
            let (top, bottom) = (row_of(hi / scale), row_of(lo / scale));
            for row in &mut grid[top..=bottom] {
                row[col] = '*';
            }
        }
    }

    let mut lines = vec![format!(
        "Filtered waveform, samples 0..{} (peak {:.3})",
        shown.len(),
        scale
    )];
    lines.extend(frame(grid));
    lines
}

/// Bar plot of `(frequency, dB)` pairs from 0 to `max_hz`, with a `|`
/// marking `marker_hz`.
pub fn spectrum(band: &[(f64, f64)], max_hz: f64, marker_hz: f64) -> Vec<String> {
    let column = |f: f64| {
        (f / max_hz * (WIDTH - 1) as f64)
            .round()
            .clamp(0.0, (WIDTH - 1) as f64) as usize
    };

    let mut levels = vec![f64::NEG_INFINITY; WIDTH];
    for &(f, db) in band {
        let col = column(f);
        levels[col] = levels[col].max(db);
    }

    let mut grid = vec![vec![' '; WIDTH]; HEIGHT];
    for (col, level) in levels.iter().enumerate() {
        let filled = ((level - DB_FLOOR) / (DB_CEIL - DB_FLOOR) * HEIGHT as f64)
            .round()
            .clamp(0.0, HEIGHT as f64) as usize;
        for row in grid.iter_mut().skip(HEIGHT - filled) {
            row[col] = '#';
        }
    }
    if (0.0..=max_hz).contains(&marker_hz) {
        let marker = column(marker_hz);
        for row in grid.iter_mut() {
            if row[marker] == ' ' {
                row[marker] = '|';
            }
        }
    }

    let mut lines = vec![format!(
        "Power spectrum 0..{max_hz:.0} Hz, {DB_FLOOR:.0}..{DB_CEIL:.0} dB  (| center {marker_hz:.1} Hz)"
    )];
    lines.extend(frame(grid));
    lines
}

/// Row index for a value in `-1.0..=1.0`; row 0 is the top.
fn row_of(value: f64) -> usize {
    let y = (1.0 - value) / 2.0 * (HEIGHT - 1) as f64;
    (y.round().max(0.0) as usize).min(HEIGHT - 1)
}

fn frame(grid: Vec<Vec<char>>) -> Vec<String> {
    let mut lines: Vec<String> = grid
        .into_iter()
        .map(|row| format!("|{}", row.into_iter().collect::<String>()))
        .collect();
    lines.push(format!("+{}", "-".repeat(WIDTH)));
    lines
}
