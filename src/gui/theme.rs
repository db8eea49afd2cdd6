//! Custom theme definitions for the application - Light Theme

use iced::widget::container;
use iced::{Background, Border, Color, Theme};

// --- Light Color Palette ---

pub const TOOLBAR_BG: Color = Color::from_rgb(0.945, 0.953, 0.957); // #f1f3f4
pub const SURFACE_BG: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const CARD_BORDER: Color = Color::from_rgb(0.898, 0.906, 0.922);

// Gray scale for text
pub const TEXT_PRIMARY: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.294, 0.333, 0.388);
pub const TEXT_MUTED: Color = Color::from_rgb(0.420, 0.447, 0.502);

// Status colors
pub const SUCCESS: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const DANGER: Color = Color::from_rgb(0.937, 0.267, 0.267);

// --- Container Styles ---

/// Flat toolbar strip at the top of the shell
pub struct ToolbarContainer;

impl container::StyleSheet for ToolbarContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(TOOLBAR_BG)),
            ..Default::default()
        }
    }
}

/// Bordered card used for the page preview pane and the dialog body
pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(SURFACE_BG)),
            border: Border {
                color: CARD_BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}
