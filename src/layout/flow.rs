/// The shared write position. Renderers read it to place their first
/// primitive and leave it below whatever they drew.
///
/// No bounds checking happens here; pagination is decided by the assembler
/// between blocks so a block is never split across pages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    x: f32,
    y: f32,
}

impl Cursor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn move_down(&mut self, amount: f32) {
        self.y += amount;
    }

    /// Absolute jump, used to place several segments on one line.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn current_y(&self) -> f32 {
        self.y
    }

    pub fn x(&self) -> f32 {
        self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_position_keeps_y_for_same_line_segments() {
        let mut cursor = Cursor::new(13.0, 40.0);
        let line_y = cursor.current_y();
        cursor.set_position(120.0, line_y);
        cursor.set_position(300.0, line_y);
        assert_eq!(cursor.current_y(), 40.0);
        assert_eq!(cursor.x(), 300.0);
    }
}
