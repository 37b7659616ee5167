pub use colored::Colorize;

use colored::{Color, ColoredString};

pub(crate) const LOG_TARGET_VISIT: &str = "cfg_ingest::visit";
pub(crate) const LOG_TARGET_CFG: &str = "cfg_ingest::cfg";

// Color scheme constants (Tokyo Night inspired)
const COLOR_HEADER: Color = Color::TrueColor {
    r: 122,
    g: 162,
    b: 247,
}; // Soft blue
const COLOR_NAME: Color = Color::TrueColor {
    r: 255,
    g: 202,
    b: 158,
}; // Peach
const COLOR_GUARD: Color = Color::TrueColor {
    r: 187,
    g: 154,
    b: 247,
}; // Light purple
const COLOR_ERROR: Color = Color::TrueColor {
    r: 247,
    g: 118,
    b: 142,
}; // Soft red

// Logging trait for consistent styling
pub(crate) trait LogStyle: AsRef<str> {
    fn log_header(&self) -> ColoredString {
        self.as_ref().color(COLOR_HEADER).bold()
    }

    fn log_name(&self) -> ColoredString {
        self.as_ref().color(COLOR_NAME)
    }

    fn log_guard(&self) -> ColoredString {
        self.as_ref().color(COLOR_GUARD)
    }

    fn log_error(&self) -> ColoredString {
        self.as_ref().color(COLOR_ERROR).bold()
    }
}

impl LogStyle for String {}
impl LogStyle for &str {}
impl LogStyle for str {}
