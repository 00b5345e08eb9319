use super::{INDICATOR_MARGIN, INDICATOR_SIZE, LEGEND_TEXT_SIZE, NO_DATA_TEXT};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::{Srgb, Srgba};
use spinpie::{AngleSpan, ChartGeometry, OpenDirection, PieChart, Rect};

struct PieRenderer<'a> {
    chart: &'a PieChart,
    geometry: &'a ChartGeometry,
    reveal: f64,
}

impl<'a> PieRenderer<'a> {
    fn new(chart: &'a PieChart) -> Self {
        Self {
            chart,
            geometry: chart.geometry(),
            reveal: chart.reveal_fraction(),
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.geometry.center();
        let padded = self.chart.config().use_inner_padding;

        cr.save()?;
        // the whole pie turns; the value text and legend stay put
        cr.translate(center.x, center.y);
        cr.rotate(f64::from(self.chart.rotation().degrees()).to_radians());
        cr.translate(-center.x, -center.y);

        for slice in self.chart.slices() {
            let Some(span) = slice.span() else { continue };
            let (start, sweep) = self.arc_angles(span);
            wedge(cr, &self.geometry.bounds, start, sweep, rgb(slice.color))?;
            if padded {
                let highlight = rgb(slice.highlight_color);
                wedge(cr, &self.geometry.inner_bounds, start, sweep, highlight)?;
            }
        }

        if padded {
            let sweep = match self.chart.config().open_direction {
                OpenDirection::Clockwise => 360.0 * self.reveal,
                OpenDirection::CounterClockwise => -360.0 * self.reveal,
            };
            let bounds = &self.geometry.inner_outline_bounds;
            wedge(cr, bounds, 0.0, sweep, colors.inner_circle)?;
        }
        cr.restore()
    }

    /// Start and signed sweep, in degrees, of a slice scaled by the reveal.
    fn arc_angles(&self, span: AngleSpan) -> (f64, f64) {
        let sweep = f64::from(span.sweep()) * self.reveal;
        match self.chart.config().open_direction {
            OpenDirection::Clockwise => (f64::from(span.start) * self.reveal, sweep),
            OpenDirection::CounterClockwise => (360.0 - f64::from(span.end) * self.reveal, sweep),
        }
    }

    fn draw_value(&self, cr: &Context) -> Result<(), cairo::Error> {
        let config = self.chart.config();
        if !config.draw_value_in_pie {
            return Ok(());
        }
        let text = if config.use_custom_inner_value {
            config.inner_value.clone()
        } else {
            match self.chart.current_slice() {
                Some(slice) => slice.value.to_string(),
                None => return Ok(()),
            }
        };

        let (r, g, b) = config.value_text_color.rgb().into_format::<f64>().into_components();
        cr.set_source_rgb(r, g, b);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(config.value_text_size);
        let center = self.geometry.inner_bounds.center();
        let ext = cr.text_extents(&text)?;
        cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y + ext.height() / 2.0,
        );
        cr.show_text(&text)
    }
}

fn rgb(color: Srgb<u8>) -> Srgba<f64> {
    let (r, g, b) = color.into_format::<f64>().into_components();
    Srgba::new(r, g, b, 1.0)
}

/// Fills a pie wedge of the circle inscribed in `bounds`. Angles are in
/// degrees, clockwise from three o'clock; a negative sweep runs backwards.
fn wedge(
    cr: &Context,
    bounds: &Rect,
    start: f64,
    sweep: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if sweep == 0.0 {
        return Ok(());
    }
    let center = bounds.center();
    let radius = bounds.width() / 2.0;
    let (from, to) = (start.to_radians(), (start + sweep).to_radians());

    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.move_to(center.x, center.y);
    if sweep > 0.0 {
        cr.arc(center.x, center.y, radius, from, to);
    } else {
        cr.arc_negative(center.x, center.y, radius, from, to);
    }
    cr.close_path();
    cr.fill()
}

fn draw_legend(cr: &Context, chart: &PieChart, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let legend = &chart.geometry().legend;
    let mid = legend.center().x;
    let (r, g, b, a) = colors.legend.into_components();
    cr.set_source_rgba(r, g, b, a);

    // indicator triangle pointing up at the bottom of the pie
    let base = legend.top + INDICATOR_SIZE * 2.0;
    cr.move_to(mid, legend.top);
    cr.line_to(mid + INDICATOR_SIZE, base);
    cr.line_to(mid - INDICATOR_SIZE, base);
    cr.close_path();
    cr.fill()?;

    let text = match chart.current_slice() {
        Some(slice) => slice.label.to_string(),
        None => NO_DATA_TEXT.to_string(),
    };
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(LEGEND_TEXT_SIZE);
    let line_height = cr.font_extents()?.height();
    let ext = cr.text_extents(&text)?;
    cr.move_to(
        mid - ext.width() / 2.0 - ext.x_bearing(),
        base + INDICATOR_MARGIN + line_height,
    );
    cr.show_text(&text)
}

pub fn draw(cr: &Context, chart: &PieChart, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if chart.slices().iter().any(|s| s.span().is_some()) {
        let renderer = PieRenderer::new(chart);
        renderer.draw(cr, colors)?;
        renderer.draw_value(cr)?;
    }
    draw_legend(cr, chart, colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};
    use spinpie::ChartConfig;

    const COLORS: [(u8, u8, u8); 4] = [(200, 40, 40), (40, 200, 40), (40, 40, 200), (200, 200, 40)];

    fn chart(direction: OpenDirection) -> PieChart {
        let config = ChartConfig {
            open_direction: direction,
            auto_center_in_slice: false,
            ..ChartConfig::default()
        };
        let mut chart = PieChart::new(config);
        for (value, (r, g, b)) in [15.0, 25.0, 35.0, 25.0].into_iter().zip(COLORS) {
            chart.append_slice(value, Srgb::new(r, g, b), "s").unwrap();
        }
        let _ = chart.resize(200.0, 258.0);
        chart
    }

    fn render(chart: &PieChart) -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, 200, 258).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, chart, &ThemeColors::default()).unwrap();
        }
        surface.flush();
        surface
    }

    /// Color at `radius` from the pie center, `degrees` clockwise from three o'clock.
    fn sample(surface: &mut ImageSurface, radius: f64, degrees: f64) -> (u8, u8, u8) {
        let angle = degrees.to_radians();
        let x = (100.0 + radius * angle.cos()).round() as usize;
        let y = (100.0 + radius * angle.sin()).round() as usize;
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y * stride + x * 4;
        let pixel = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        ((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
    }

    #[test]
    fn test_slices_drawn_clockwise() {
        let mut surface = render(&chart(OpenDirection::Clockwise));
        assert_eq!(sample(&mut surface, 85.0, 20.0), COLORS[0]);
        assert_eq!(sample(&mut surface, 85.0, 100.0), COLORS[1]);
        assert_eq!(sample(&mut surface, 85.0, 200.0), COLORS[2]);
        assert_eq!(sample(&mut surface, 85.0, 320.0), COLORS[3]);
    }

    #[test]
    fn test_slices_drawn_counter_clockwise() {
        let mut surface = render(&chart(OpenDirection::CounterClockwise));
        assert_eq!(sample(&mut surface, 85.0, 340.0), COLORS[0]);
        assert_eq!(sample(&mut surface, 85.0, 260.0), COLORS[1]);
    }

    #[test]
    fn test_rotation_turns_the_pie() {
        let mut chart = chart(OpenDirection::Clockwise);
        let _ = chart.set_rotation(90);
        let mut surface = render(&chart);
        assert_eq!(sample(&mut surface, 85.0, 110.0), COLORS[0]);
    }

    #[test]
    fn test_inner_ring_and_hole() {
        let mut surface = render(&chart(OpenDirection::Clockwise));
        let (r, g, b) = COLORS[0];
        let ring = spinpie::color::highlight(Srgb::new(r, g, b), 1.15);
        assert_eq!(sample(&mut surface, 67.5, 20.0), (ring.red, ring.green, ring.blue));
        assert_eq!(sample(&mut surface, 40.0, 200.0), (255, 255, 255));
    }
}
