//! Terminal chart backend: renders the temperature trend as a ratatui line
//! chart into an off-screen buffer.

use std::{cell::RefCell, rc::Rc, str::FromStr};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};
use weather_dash_core::{AxisColors, ChartFactory, ChartInstance, ChartSpec};

pub const CHART_WIDTH: u16 = 60;
pub const CHART_HEIGHT: u16 = 12;

/// What is currently drawn. Shared between the chart backend and the page.
#[derive(Debug, Default)]
pub struct Canvas {
    pub spec: Option<ChartSpec>,
    pub frame: Option<Buffer>,
}

pub type SharedCanvas = Rc<RefCell<Canvas>>;

#[derive(Debug)]
pub struct TerminalChartFactory {
    canvas: SharedCanvas,
}

impl TerminalChartFactory {
    pub fn new(canvas: SharedCanvas) -> Self {
        Self { canvas }
    }
}

impl ChartFactory for TerminalChartFactory {
    fn create(&mut self, spec: &ChartSpec) -> Box<dyn ChartInstance> {
        {
            let mut canvas = self.canvas.borrow_mut();
            canvas.frame = Some(draw(spec));
            canvas.spec = Some(spec.clone());
        }
        Box::new(TerminalChart { canvas: Rc::clone(&self.canvas) })
    }
}

struct TerminalChart {
    canvas: SharedCanvas,
}

impl ChartInstance for TerminalChart {
    fn set_axis_colors(&mut self, colors: AxisColors) {
        if let Some(spec) = self.canvas.borrow_mut().spec.as_mut() {
            spec.axes = colors;
        }
    }

    fn redraw(&mut self) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.frame = canvas.spec.as_ref().map(draw);
    }
}

impl Drop for TerminalChart {
    fn drop(&mut self) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.spec = None;
        canvas.frame = None;
    }
}

/// CSS hex (`#rgb`, `#rrggbb`, `#rrggbbaa`) to a terminal color. Alpha is
/// dropped; anything else falls back to the terminal default.
pub fn css_color(hex: &str) -> Color {
    let Some(digits) = hex.strip_prefix('#').filter(|d| d.is_ascii()) else {
        return Color::Reset;
    };
    let rgb = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 | 8 => digits[..6].to_string(),
        _ => return Color::Reset,
    };
    Color::from_str(&format!("#{rgb}")).unwrap_or(Color::Reset)
}

/// Render the spec as a line chart: x ticks are the day labels, y bounds
/// pad the value range by one degree on each side.
pub fn draw(spec: &ChartSpec) -> Buffer {
    let text = Style::default().fg(css_color(spec.axes.text));
    let grid = Style::default().fg(css_color(spec.axes.grid));
    let line = Style::default().fg(css_color(spec.series.border_color));

    let points: Vec<(f64, f64)> =
        spec.values.iter().enumerate().map(|(i, v)| (i as f64, *v as f64)).collect();

    let min = spec.values.iter().copied().min().unwrap_or(0) - 1;
    let max = spec.values.iter().copied().max().unwrap_or(0) + 1;
    let last_x = spec.values.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = spec.labels.iter().map(|l| Span::styled(l.clone(), text)).collect();
    let y_labels = vec![
        Span::styled(format!("{min}°"), text),
        Span::styled(format!("{max}°"), text),
    ];

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(line)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().style(grid).bounds([0.0, last_x]).labels(x_labels))
        .y_axis(Axis::default().style(grid).bounds([min as f64, max as f64]).labels(y_labels));

    let mut buffer = Buffer::empty(Rect::new(0, 0, CHART_WIDTH, CHART_HEIGHT));
    chart.render(buffer.area, &mut buffer);
    buffer
}

/// The buffer as text, one line per row. With `colored`, each run of cells
/// carries its foreground color as a truecolor escape.
pub fn frame_text(buffer: &Buffer, colored: bool) -> String {
    let width = usize::from(buffer.area.width.max(1));
    let mut out = String::new();

    for row in buffer.content.chunks(width) {
        let mut current = Color::Reset;
        let mut line = String::new();
        for cell in row {
            if colored && cell.fg != current {
                current = cell.fg;
                line.push_str(&foreground(current));
            }
            line.push_str(cell.symbol());
        }
        if colored && current != Color::Reset {
            line.push_str("\x1b[0m");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn foreground(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("\x1b[38;2;{r};{g};{b}m"),
        _ => "\x1b[39m".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_dash_core::{ChartHandle, Theme, chart::SeriesStyle};

    fn spec(values: Vec<i64>) -> ChartSpec {
        ChartSpec {
            labels: ["Mon", "Tue", "Wed"].iter().map(|s| s.to_string()).collect(),
            values,
            series: SeriesStyle::default(),
            axes: Theme::Dark.axis_colors(),
        }
    }

    fn symbol_fg(buffer: &Buffer, symbol: &str) -> Option<Color> {
        buffer.content.iter().find(|c| c.symbol() == symbol).map(|c| c.fg)
    }

    fn has_plotted_point(buffer: &Buffer, color: Color) -> bool {
        buffer.content.iter().any(|c| {
            c.fg == color && c.symbol().chars().any(|ch| ('\u{2801}'..='\u{28FF}').contains(&ch))
        })
    }

    #[test]
    fn css_colors() {
        assert_eq!(css_color("#666"), Color::Rgb(0x66, 0x66, 0x66));
        assert_eq!(css_color("#ff7b54"), Color::Rgb(0xff, 0x7b, 0x54));
        assert_eq!(css_color("#000000ff"), Color::Rgb(0, 0, 0));
        assert_eq!(css_color("rgba(1, 2, 3, 0.1)"), Color::Reset);
        assert_eq!(css_color("#12"), Color::Reset);
        assert_eq!(css_color("#zzzzzz"), Color::Reset);
    }

    #[test]
    fn draws_labels_axes_and_line() {
        let buffer = draw(&spec(vec![0, 5, 10]));
        let text = frame_text(&buffer, false);

        assert_eq!(text.lines().count(), usize::from(CHART_HEIGHT));
        assert!(text.contains("Mon"));
        assert!(text.contains("Wed"));
        assert!(text.contains("11°"));
        assert!(text.contains("-1°"));

        assert_eq!(symbol_fg(&buffer, "└"), Some(Color::Rgb(0x3a, 0x3a, 0x3a)));
        assert!(has_plotted_point(&buffer, Color::Rgb(0xff, 0x7b, 0x54)));
    }

    #[test]
    fn flat_and_empty_series_render() {
        let flat = frame_text(&draw(&spec(vec![4, 4, 4])), false);
        assert!(flat.contains("3°"));
        assert!(flat.contains("5°"));

        let empty = draw(&spec(Vec::new()));
        assert_eq!(empty.area.height, CHART_HEIGHT);
    }

    #[test]
    fn colored_text_carries_escapes() {
        let buffer = draw(&spec(vec![1, 2, 3]));
        assert!(!frame_text(&buffer, false).contains('\x1b'));
        assert!(frame_text(&buffer, true).contains("\x1b[38;2;255;123;84m"));
    }

    #[test]
    fn canvas_tracks_chart_lifecycle() {
        let canvas = SharedCanvas::default();
        let mut handle = ChartHandle::new(Box::new(TerminalChartFactory::new(Rc::clone(&canvas))));

        handle.replace(&spec(vec![1, 2, 3]));
        assert!(canvas.borrow().frame.is_some());

        handle.restyle(Theme::Light.axis_colors());
        let axes = canvas.borrow().spec.as_ref().map(|s| s.axes);
        assert_eq!(axes, Some(Theme::Light.axis_colors()));
        let corner = canvas.borrow().frame.as_ref().and_then(|f| symbol_fg(f, "└"));
        assert_eq!(corner, Some(Color::Rgb(0xe0, 0xe0, 0xe0)));

        drop(handle);
        assert!(canvas.borrow().spec.is_none());
        assert!(canvas.borrow().frame.is_none());
    }

    #[test]
    fn replacing_keeps_new_frame() {
        let canvas = SharedCanvas::default();
        let mut handle = ChartHandle::new(Box::new(TerminalChartFactory::new(Rc::clone(&canvas))));

        handle.replace(&spec(vec![1, 2, 3]));
        handle.replace(&spec(vec![7, 8, 9]));

        let values = canvas.borrow().spec.as_ref().map(|s| s.values.clone());
        assert_eq!(values, Some(vec![7, 8, 9]));
        let text = canvas.borrow().frame.as_ref().map(|f| frame_text(f, false));
        assert!(text.is_some_and(|t| t.contains("10°")));
    }
}
