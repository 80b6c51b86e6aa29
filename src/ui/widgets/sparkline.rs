//! Temperature sparkline widget for the hourly strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different levels (8 steps)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline showing hourly temperatures over time.
///
/// The series is normalized against its own min and max, so the shape shows
/// relative change rather than absolute values.
pub struct TemperatureSparkline<'a> {
    /// Temperatures for each hour, in display order
    temperatures: &'a [f64],
    /// Marker position (index into temperatures)
    marker: Option<usize>,
    style: Style,
    marker_style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(temperatures: &'a [f64]) -> Self {
        Self {
            temperatures,
            marker: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn marker(mut self, position: usize) -> Self {
        self.marker = Some(position);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn bounds(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &t in self.temperatures {
            min = min.min(t);
            max = max.max(t);
        }
        (min, max)
    }

    fn temperature_to_block(&self, temperature: f64, min: f64, max: f64) -> char {
        // A flat series renders at mid height
        if (max - min).abs() < f64::EPSILON {
            return BLOCKS[3];
        }
        let normalized = ((temperature - min) / (max - min)).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.temperatures.is_empty() {
            return;
        }

        let width = area.width as usize;
        let (min, max) = self.bounds();

        for (i, &temperature) in self.temperatures.iter().take(width).enumerate() {
            let block = self.temperature_to_block(temperature, min, max);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if self.marker == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coldest_hour_is_lowest_block() {
        let temps = vec![10.0, 20.0];
        let sparkline = TemperatureSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        assert_eq!(sparkline.temperature_to_block(10.0, min, max), '▁');
        assert_eq!(sparkline.temperature_to_block(20.0, min, max), '█');
    }

    #[test]
    fn test_flat_series_renders_mid_height() {
        let temps = vec![15.0, 15.0, 15.0];
        let sparkline = TemperatureSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        assert_eq!(sparkline.temperature_to_block(15.0, min, max), '▄');
    }

    #[test]
    fn test_builder_sets_marker() {
        let temps = vec![1.0, 2.0, 3.0];
        let sparkline = TemperatureSparkline::new(&temps).marker(1);
        assert_eq!(sparkline.marker, Some(1));
    }

    #[test]
    fn test_renders_into_buffer() {
        let temps = vec![10.0, 15.0, 20.0, 25.0];
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);

        TemperatureSparkline::new(&temps).render(area, &mut buf);

        let rendered: String = (0..4)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert_eq!(rendered.chars().next(), Some('▁'));
        assert_eq!(rendered.chars().last(), Some('█'));
    }

    #[test]
    fn test_truncates_to_area_width() {
        let temps = vec![10.0; 40];
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        // Must not panic writing past the buffer
        TemperatureSparkline::new(&temps).render(area, &mut buf);
    }
}
