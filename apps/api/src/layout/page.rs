use serde::{Deserialize, Serialize};

/// Section headings start a new page when the cursor is already below this offset.
pub const SECTION_BREAK_Y: f32 = 650.0;
/// Individual work/education/course entries start a new page below this offset.
pub const ITEM_BREAK_Y: f32 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Page box and margins, in points, y measured downward from the page top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub size: PageSize,
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn new(size: PageSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            size,
            width,
            height,
            margin_top: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
            margin_right: 45.0,
        }
    }

    /// Lowest y a line may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.margin_top
    }

    /// Right edge of the text area.
    pub fn right_edge(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Thresholds are tuned for A4; shorter pages scale them proportionally.
    pub fn scaled_threshold(&self, a4_value: f32) -> f32 {
        let (_, a4_height) = PageSize::A4.dimensions();
        a4_value * self.height / a4_height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}

/// Running vertical offset on the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    pub y: f32,
    pub page_index: usize,
    geometry: PageGeometry,
}

impl PageCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            y: geometry.margin_top,
            page_index: 0,
            geometry,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Moves to the top of a fresh page.
    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.y = self.geometry.margin_top;
    }

    /// Starts a new page when the cursor sits below `threshold`. Returns whether it did.
    pub fn break_if_below(&mut self, threshold: f32) -> bool {
        if self.y > self.geometry.scaled_threshold(threshold) {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Starts a new page when a line of `line_height` would cross the bottom margin.
    /// A line at the very top of a page is always accepted.
    pub fn ensure_room(&mut self, line_height: f32) -> bool {
        let at_top = (self.y - self.geometry.margin_top).abs() < f32::EPSILON;
        if !at_top && self.y + line_height > self.geometry.bottom_limit() {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_parse() {
        assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
        assert_eq!(" letter ".parse::<PageSize>(), Ok(PageSize::Letter));
        assert!("tabloid".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_a4_geometry() {
        let g = PageGeometry::new(PageSize::A4);
        assert_eq!(g.bottom_limit(), 792.0);
        assert_eq!(g.right_edge(), 550.0);
        assert_eq!(g.usable_height(), 742.0);
        assert_eq!(g.scaled_threshold(SECTION_BREAK_Y), SECTION_BREAK_Y);
    }

    #[test]
    fn test_letter_thresholds_scale_down() {
        let g = PageGeometry::new(PageSize::Letter);
        assert!(g.scaled_threshold(ITEM_BREAK_Y) < ITEM_BREAK_Y);
    }

    #[test]
    fn test_break_if_below_threshold() {
        let mut cursor = PageCursor::new(PageGeometry::default());
        cursor.advance(600.0); // y = 650, not strictly below
        assert!(!cursor.break_if_below(SECTION_BREAK_Y));
        cursor.advance(1.0);
        assert!(cursor.break_if_below(SECTION_BREAK_Y));
        assert_eq!(cursor.page_index, 1);
        assert_eq!(cursor.y, 50.0);
    }

    #[test]
    fn test_ensure_room_breaks_before_bottom_margin() {
        let mut cursor = PageCursor::new(PageGeometry::default());
        cursor.advance(730.0); // y = 780
        assert!(!cursor.ensure_room(12.0)); // 792 fits exactly
        assert!(cursor.ensure_room(13.0));
        assert_eq!(cursor.page_index, 1);
    }

    #[test]
    fn test_ensure_room_never_breaks_at_page_top() {
        let mut cursor = PageCursor::new(PageGeometry::default());
        assert!(!cursor.ensure_room(10_000.0));
        assert_eq!(cursor.page_index, 0);
    }
}
