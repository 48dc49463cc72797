use rand::Rng;
use ratatui::layout::Rect;

pub const CANVAS_WIDTH: u32 = 900;
pub const CANVAS_HEIGHT: u32 = 600;
pub const SIDE_PANEL_WIDTH: u32 = 200;
pub const PLAYFIELD_WIDTH: u32 = CANVAS_WIDTH - SIDE_PANEL_WIDTH;

/// A point on the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// Clamps the dimensions so the rectangle always fits the playfield.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width.clamp(1, PLAYFIELD_WIDTH),
            height: height.clamp(1, CANVAS_HEIGHT),
        }
    }

    /// Edges are not part of the target.
    pub fn contains(&self, p: Point) -> bool {
        self.x < p.x
            && p.x < self.x + self.width as i32
            && self.y < p.y
            && p.y < self.y + self.height as i32
    }

    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = rng.gen_range(0..=(PLAYFIELD_WIDTH - self.width) as i32);
        self.y = rng.gen_range(0..=(CANVAS_HEIGHT - self.height) as i32);
    }
}

/// Maps terminal cells onto the logical canvas.
///
/// A cell stands for the logical point at its centre, so a cell painted
/// because its centre is inside the rectangle is also a hit when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn to_logical(&self, column: u16, row: u16) -> Option<Point> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        if column < self.area.x
            || row < self.area.y
            || column >= self.area.right()
            || row >= self.area.bottom()
        {
            return None;
        }
        let cx = (column - self.area.x) as f64 + 0.5;
        let cy = (row - self.area.y) as f64 + 0.5;
        Some(Point::new(
            (cx * CANVAS_WIDTH as f64 / self.area.width as f64) as i32,
            (cy * CANVAS_HEIGHT as f64 / self.area.height as f64) as i32,
        ))
    }

    /// First column whose centre lies at or beyond logical `x`.
    pub fn column_at(&self, x: u32) -> u16 {
        let scaled = x as f64 * self.area.width as f64 / CANVAS_WIDTH as f64 - 0.5;
        let offset = scaled.ceil().max(0.0) as u16;
        self.area.x + offset.min(self.area.width)
    }

    /// Cells reserved for the counter panel.
    pub fn side_panel(&self) -> Rect {
        let left = self.column_at(PLAYFIELD_WIDTH);
        Rect::new(left, self.area.y, self.area.right() - left, self.area.height)
    }
}
