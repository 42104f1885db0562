use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(224, 222, 214),
            dim: Color::Rgb(130, 126, 118),
            accent: Color::Rgb(214, 134, 62),
            positive: Color::Rgb(110, 180, 110),
            negative: Color::Rgb(200, 90, 80),
            error: Color::Rgb(210, 80, 70),
            border: Color::Rgb(70, 66, 60),
        }
    }
}
