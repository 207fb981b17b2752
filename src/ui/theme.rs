use ratatui::style::Color;

use crate::system::snapshot::ScalarMetric;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub tab_active_fg: Color,
    pub tab_active_bg: Color,
    pub table_header: Color,
    pub row_alt_bg: Color,
    pub statusbar_bg: Color,
    pub status_ok: Color,
    pub status_warn: Color,
    pub series_cpu: Color,
    pub series_memory: Color,
    pub series_gpu: Color,
    pub series_network: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            name: "dark",
            border: Color::Rgb(88, 91, 112),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(147, 153, 178),
            tab_active_fg: Color::Rgb(30, 30, 46),
            tab_active_bg: Color::Rgb(137, 180, 250),
            table_header: Color::Rgb(249, 226, 175),
            row_alt_bg: Color::Rgb(36, 39, 58),
            statusbar_bg: Color::Rgb(24, 24, 37),
            status_ok: Color::Rgb(166, 227, 161),
            status_warn: Color::Rgb(243, 139, 168),
            series_cpu: Color::Rgb(137, 180, 250),
            series_memory: Color::Rgb(166, 227, 161),
            series_gpu: Color::Rgb(203, 166, 247),
            series_network: Color::Rgb(250, 179, 135),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            border: Color::Rgb(156, 160, 176),
            text_primary: Color::Rgb(76, 79, 105),
            text_secondary: Color::Rgb(108, 111, 133),
            tab_active_fg: Color::Rgb(239, 241, 245),
            tab_active_bg: Color::Rgb(30, 102, 245),
            table_header: Color::Rgb(223, 142, 29),
            row_alt_bg: Color::Rgb(230, 233, 239),
            statusbar_bg: Color::Rgb(220, 224, 232),
            status_ok: Color::Rgb(64, 160, 43),
            status_warn: Color::Rgb(210, 15, 57),
            series_cpu: Color::Rgb(30, 102, 245),
            series_memory: Color::Rgb(64, 160, 43),
            series_gpu: Color::Rgb(136, 57, 239),
            series_network: Color::Rgb(254, 100, 11),
        }
    }

    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Theme::light(),
            _ => Theme::dark(),
        }
    }

    pub fn series_color(&self, metric: ScalarMetric) -> Color {
        match metric {
            ScalarMetric::Cpu => self.series_cpu,
            ScalarMetric::Memory => self.series_memory,
            ScalarMetric::Gpu => self.series_gpu,
            ScalarMetric::Network => self.series_network,
        }
    }
}
