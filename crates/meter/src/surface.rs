use rung_meter_core::meter::RungPaint;
use rung_meter_core::view::RenderSurface;

const FILLED: char = '#';
const EMPTY: char = '.';

/// Draws each rung as one line of text, scaled to `columns` characters for
/// the full container width.
pub struct TextSurface {
    columns: usize,
    container_width: f32,
    frame: String,
}

impl TextSurface {
    pub fn new(columns: usize, container_width: f32) -> TextSurface {
        TextSurface {
            columns,
            container_width,
            frame: String::new(),
        }
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    fn column(&self, x: f32) -> usize {
        let ratio = (x / self.container_width).clamp(0.0, 1.0);
        (ratio * self.columns as f32).round() as usize
    }
}

impl RenderSurface for TextSurface {
    fn paint(&mut self, rungs: &[RungPaint], _corner_radius: f32) {
        self.frame.clear();
        for rung in rungs {
            let start = self.column(rung.bounds.min.x);
            let end = self.column(rung.bounds.max.x).max(start + 1);
            let fill = if rung.filled { FILLED } else { EMPTY };

            self.frame.push_str(&format!("{:>2} ", rung.level_index));
            self.frame.extend(std::iter::repeat(' ').take(start));
            self.frame.extend(std::iter::repeat(fill).take(end - start));
            self.frame.push('\n');
        }
    }
}
