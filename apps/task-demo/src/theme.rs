use tactile_ui_graphics::Color;

/// Static styling for one theme. Only the flag is state; colors are fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub page: Color,
    pub container: Color,
    pub text: Color,
    pub button: Color,
    pub item: Color,
    pub delete: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        page: Color::from_rgb_u8(0xF5, 0xF5, 0xF5),
        container: Color::WHITE,
        text: Color::BLACK,
        button: Color::from_rgb_u8(0x62, 0x00, 0xEE),
        item: Color::from_rgb_u8(0xF0, 0xF0, 0xF0),
        delete: Color::from_rgb_u8(0xFF, 0x00, 0x00),
    };

    pub const DARK: Theme = Theme {
        page: Color::from_rgb_u8(0x12, 0x12, 0x12),
        container: Color::from_rgb_u8(0x1E, 0x1E, 0x1E),
        text: Color::WHITE,
        button: Color::from_rgb_u8(0x62, 0x00, 0xEE),
        item: Color::from_rgb_u8(0x33, 0x33, 0x33),
        delete: Color::from_rgb_u8(0xFF, 0x00, 0x00),
    };

    pub fn for_mode(dark_mode: bool) -> Theme {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Label shown on the theme toggle button.
    pub fn toggle_label(dark_mode: bool) -> &'static str {
        if dark_mode {
            "Toggle Light Mode"
        } else {
            "Toggle Dark Mode"
        }
    }
}
