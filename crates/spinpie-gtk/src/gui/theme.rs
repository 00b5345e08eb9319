use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors the chart takes from the desktop theme rather than the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub legend: Srgba<f64>,
    pub inner_circle: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            legend: Srgba::new(0.29, 0.29, 0.29, 1.0),
            inner_circle: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            legend: Self::lookup_color(context, "theme_fg_color", fallback.legend, None),
            inner_circle: Self::lookup_color(
                context,
                "theme_base_color",
                fallback.inner_circle,
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spinpie-chart {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
