pub use self::playfield_display::*;

mod playfield_display;

mod color {
    use ratatui::style::Color;

    pub const SKY: Color = Color::Rgb(78, 192, 202);
    pub const PIPE: Color = Color::Rgb(84, 201, 54);
    pub const GROUND: Color = Color::Rgb(222, 216, 149);
    pub const BIRD: Color = Color::Rgb(250, 200, 40);
    pub const GUIDE: Color = Color::Rgb(255, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const TITLE: Style = fg_bg(color::BIRD, color::BLACK);
}
