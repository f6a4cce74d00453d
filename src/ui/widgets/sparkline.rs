//! Temperature sparkline widget for the hourly trend card

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline showing the hourly temperature curve
pub struct TempSparkline<'a> {
    /// Temperatures for each hourly slot
    temps: &'a [i32],
    /// Style for the sparkline
    style: Style,
    /// Style for the leading (current-hour) slot
    marker_style: Style,
}

impl<'a> TempSparkline<'a> {
    pub fn new(temps: &'a [i32]) -> Self {
        Self {
            temps,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    #[allow(dead_code)]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Normalizes a temperature within the series range to a block character
    ///
    /// A flat series renders as the middle block.
    fn temp_to_block(&self, temp: i32) -> char {
        let min = self.temps.iter().copied().min().unwrap_or(0);
        let max = self.temps.iter().copied().max().unwrap_or(0);
        if max == min {
            return BLOCKS[3];
        }

        let normalized = f64::from(temp - min) / f64::from(max - min);
        let index = ((normalized.clamp(0.0, 1.0) * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TempSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;

        for (i, temp) in self.temps.iter().take(width).enumerate() {
            let block = self.temp_to_block(*temp);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if i == 0 { self.marker_style } else { self.style };

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
    fn test_temp_to_block_minimum() {
        let temps = vec![10, 15, 20];
        let sparkline = TempSparkline::new(&temps);
        assert_eq!(sparkline.temp_to_block(10), '▁');
    }

    #[test]
    fn test_temp_to_block_maximum() {
        let temps = vec![10, 15, 20];
        let sparkline = TempSparkline::new(&temps);
        assert_eq!(sparkline.temp_to_block(20), '█');
    }

    #[test]
    fn test_temp_to_block_mid() {
        let temps = vec![10, 15, 20];
        let sparkline = TempSparkline::new(&temps);
        let block = sparkline.temp_to_block(15);
        assert!(BLOCKS.contains(&block));
    }

    #[test]
    fn test_flat_series_renders_middle_block() {
        let temps = vec![12, 12, 12];
        let sparkline = TempSparkline::new(&temps);
        assert_eq!(sparkline.temp_to_block(12), '▄');
    }

    #[test]
    fn test_negative_temperatures_normalize() {
        let temps = vec![-10, 0, 10];
        let sparkline = TempSparkline::new(&temps);
        assert_eq!(sparkline.temp_to_block(-10), '▁');
        assert_eq!(sparkline.temp_to_block(10), '█');
    }

    #[test]
    fn test_render_writes_blocks() {
        let temps = vec![1, 2, 3, 4];
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        TempSparkline::new(&temps).render(Rect::new(0, 0, 10, 1), &mut buf);

        let rendered: String = buf.content()[..4].iter().map(|c| c.symbol()).collect();
        assert_eq!(rendered.chars().count(), 4);
        assert!(rendered.chars().all(|c| BLOCKS.contains(&c)));
    }
}
