use std::cmp::max;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_BAR_WIDTH};
use crate::metrics::Metrics;
use crate::sorter::Algorithm;
use crate::tags::Tag;

/// Everything a sink needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub algorithm: Algorithm,
    pub values: &'a [u32],
    pub tags: &'a [Tag],
    pub metrics: Metrics,
    /// Upper bound of the values, used to scale bar heights.
    pub max_value: u32,
}

pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);

    /// Called when the counters change outside of a frame, i.e. on reset.
    fn update_metrics(&mut self, _metrics: &Metrics) {}
}

/// Width of one bar so that `n` bars fill the canvas, but never below the minimum.
pub fn bar_width(n: usize, canvas_width: usize, min_width: usize) -> usize {
    if n == 0 {
        return canvas_width;
    }
    max(canvas_width / n, min_width)
}

/// Rows a bar of `value` occupies on a canvas of `rows`, at least one.
pub fn bar_height(value: u32, max_value: u32, rows: usize) -> usize {
    let max_value = max_value.max(1) as u64;
    let scaled = (value as u64 * rows as u64 + max_value - 1) / max_value;
    (scaled as usize).clamp(1, rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Shared light/dark switch. Flipping it only changes colours.
#[derive(Debug, Clone, Default)]
pub struct ThemeSwitch {
    dark: Arc<AtomicBool>,
}

impl ThemeSwitch {
    pub fn toggle(&self) -> Theme {
        let was_dark = self.dark.fetch_xor(true, Ordering::Relaxed);
        if was_dark { Theme::Light } else { Theme::Dark }
    }

    pub fn theme(&self) -> Theme {
        if self.dark.load(Ordering::Relaxed) { Theme::Dark } else { Theme::Light }
    }
}

impl Theme {
    fn bar_color(&self, tag: Tag) -> &'static str {
        match (self, tag) {
            (Theme::Light, Tag::Default) => "\x1b[34m",
            (Theme::Dark, Tag::Default) => "\x1b[37m",
            (_, Tag::Compare) => "\x1b[33m",
            (_, Tag::Swap) => "\x1b[31m",
            (_, Tag::Pivot) => "\x1b[35m",
            (_, Tag::Sorted) => "\x1b[32m",
        }
    }

    fn background(&self) -> &'static str {
        match self {
            Theme::Light => "\x1b[47m",
            Theme::Dark => "\x1b[40m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// ANSI bar chart drawn from the bottom up, redrawn in place on every frame.
pub struct TerminalSink<W: Write> {
    out: W,
    theme: ThemeSwitch,
    canvas_width: usize,
    min_bar_width: usize,
    rows: usize,
    failed: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(theme: ThemeSwitch) -> Self {
        TerminalSink::new(io::stdout(), theme)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, theme: ThemeSwitch) -> Self {
        TerminalSink {
            out,
            theme,
            canvas_width: CANVAS_WIDTH,
            min_bar_width: MIN_BAR_WIDTH,
            rows: CANVAS_HEIGHT,
            failed: false,
        }
    }

    pub fn with_canvas(mut self, width: usize, rows: usize) -> Self {
        self.canvas_width = width;
        self.rows = rows.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let theme = self.theme.theme();
        let width = bar_width(frame.values.len(), self.canvas_width, self.min_bar_width);
        // one column of gap between bars once there is room for it
        let fill = if width > 1 { width - 1 } else { width };
        let heights: Vec<usize> = frame
            .values
            .iter()
            .map(|v| bar_height(*v, frame.max_value, self.rows))
            .collect();

        let mut buf = String::new();
        buf.push_str("\x1b[2J\x1b[H");
        buf.push_str(&format!(
            "{} | n = {} | comparisons: {} | swaps: {}\n",
            frame.algorithm, frame.values.len(), frame.metrics.comparisons, frame.metrics.swaps
        ));
        let complexity = frame.algorithm.complexity();
        buf.push_str(&format!("time: {} | space: {}\n\n", complexity.time(), complexity.space));

        for row in (1..=self.rows).rev() {
            buf.push_str(theme.background());
            for (i, height) in heights.iter().enumerate() {
                if *height >= row {
                    buf.push_str(theme.bar_color(frame.tags[i]));
                    buf.push_str(&"█".repeat(fill));
                } else {
                    buf.push_str(&" ".repeat(fill));
                }
                buf.push_str(&" ".repeat(width - fill));
            }
            buf.push_str(RESET);
            buf.push('\n');
        }

        for value in frame.values {
            let label = value.to_string();
            if label.len() <= fill {
                buf.push_str(&format!("{:^w$}", label, w = fill));
            } else {
                buf.push_str(&" ".repeat(fill));
            }
            buf.push_str(&" ".repeat(width - fill));
        }
        buf.push('\n');
        buf.push_str("[p]ause [r]esume [s]top [t]heme [n]ew run [q]uit\n");

        self.out.write_all(buf.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, frame: &Frame<'_>) {
        if let Err(err) = self.draw(frame) {
            // warn once, a closed terminal fails every frame after this
            if !self.failed {
                warn!("Rendering failed: {}", err);
                self.failed = true;
            }
        }
    }

    fn update_metrics(&mut self, metrics: &Metrics) {
        let line = format!("comparisons: {} | swaps: {}\n", metrics.comparisons, metrics.swaps);
        if let Err(err) = self.out.write_all(line.as_bytes()).and_then(|_| self.out.flush()) {
            if !self.failed {
                warn!("Rendering failed: {}", err);
                self.failed = true;
            }
        }
    }
}

/// Owned copy of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub values: Vec<u32>,
    pub tags: Vec<Tag>,
    pub metrics: Metrics,
}

/// Keeps every frame and every out-of-frame metrics update.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<RecordedFrame>,
    pub metric_updates: Vec<Metrics>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// The metrics the display would show right now.
    pub fn displayed_metrics(&self) -> Option<Metrics> {
        self.metric_updates
            .last()
            .copied()
            .or_else(|| self.frames.last().map(|f| f.metrics))
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.push(RecordedFrame {
            values: frame.values.to_vec(),
            tags: frame.tags.to_vec(),
            metrics: frame.metrics,
        });
    }

    fn update_metrics(&mut self, metrics: &Metrics) {
        self.metric_updates.push(*metrics);
    }
}

/// Draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &Frame<'_>) {}
}
