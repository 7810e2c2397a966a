use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // area inside the outer border
    pub tabs_area: Rect,
    pub sidebar_area: Rect,
    pub main_area: Rect,
    pub filters_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application.
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 12;

    /// Split the frame into tabs, sidebar + main content, the filters box and
    /// the status line. Tabs where the whole width goes to the main pane
    /// (kanban, dashboard) pass `sidebar_visible = false`.
    pub fn calculate(size: Rect, sidebar_width_percent: u16, sidebar_visible: bool) -> Self {
        let min_width = Self::MIN_WIDTH + 2;
        let min_height = Self::MIN_HEIGHT + 2;
        let size = Rect::new(
            size.x,
            size.y,
            size.width.max(min_width),
            size.height.max(min_height),
        );

        // Inner area accounts for the outer border, one cell on each side
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let sidebar_width = if sidebar_visible {
            let requested = (inner_area.width * sidebar_width_percent) / 100;
            // Sidebar stays readable but leaves the main pane at least 12 cells
            requested
                .max(22)
                .min((inner_area.width * 45) / 100)
                .min(inner_area.width.saturating_sub(12))
        } else {
            0
        };

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // tabs
                Constraint::Min(1),    // content
                Constraint::Length(3), // filters box
                Constraint::Length(1), // status line
            ])
            .split(inner_area);

        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(vertical[1]);

        Self {
            inner_area,
            tabs_area: vertical[0],
            sidebar_area: horizontal[0],
            main_area: horizontal[1],
            filters_area: vertical[2],
            status_area: vertical[3],
        }
    }
}
