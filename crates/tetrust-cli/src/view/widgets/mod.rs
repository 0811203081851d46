use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{
    block_display::*, board_display::*, key_binding_display::*, score_table_display::*,
    stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod score_table_display;
mod stats_display;

pub(crate) mod color {
    use ratatui::style::Color;
    use tetrust_engine::Rgb;

    pub const BACKGROUND: Color = Color::Rgb(60, 70, 80);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);

    pub const fn from_rgb(rgb: Rgb) -> Color {
        Color::Rgb(rgb.red(), rgb.green(), rgb.blue())
    }
}

pub(crate) mod style {
    use ratatui::style::{Color, Modifier, Style};
    use tetrust_engine::Rgb;

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const MENU: Style = fg_bg(color::WHITE, color::BACKGROUND);
    pub const TITLE: Style = fg_bg(color::BLACK, color::BACKGROUND).add_modifier(Modifier::BOLD);
    pub const SELECTED: Style = fg_bg(color::YELLOW, color::BACKGROUND);
    pub const BORDER: Style = Style::new().fg(color::GREEN);

    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const DEBUG_BLOCK: Style = bg_only(color::RED);

    pub const fn block(rgb: Rgb) -> Style {
        bg_only(color::from_rgb(rgb))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
