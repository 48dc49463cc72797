use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const PANEL_GRAY: Rgb = Rgb(200, 200, 200);
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// A small fixed set of single-character color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [(char, Rgb)],
    default_code: char,
}

pub const RECT_PALETTE: Palette = Palette {
    entries: &[
        ('r', Rgb(255, 17, 0)),
        ('g', Rgb(0, 255, 0)),
        ('b', Rgb(0, 0, 255)),
        ('k', Rgb::BLACK),
    ],
    default_code: 'k',
};

pub const BACKGROUND_PALETTE: Palette = Palette {
    entries: &[
        ('w', Rgb::WHITE),
        ('l', Rgb(211, 211, 211)),
        ('d', Rgb(169, 169, 169)),
    ],
    default_code: 'w',
};

impl Palette {
    pub fn default_code(&self) -> char {
        self.default_code
    }

    pub fn default_color(&self) -> Rgb {
        self.get(self.default_code).unwrap_or(Rgb::BLACK)
    }

    /// Case-insensitive lookup of a color code.
    pub fn get(&self, code: char) -> Option<Rgb> {
        let code = code.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, rgb)| *rgb)
    }

    pub fn accepts(&self, code: char) -> bool {
        self.get(code).is_some()
    }

    /// Codes joined for display in prompts, e.g. "r, g, b, k".
    pub fn codes(&self) -> String {
        self.entries
            .iter()
            .map(|(c, _)| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
