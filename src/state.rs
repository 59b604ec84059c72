use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Figures queued for display, independent of rendering.
///
/// The window shows one figure at a time. Closing it (or pressing
/// "Next figure") moves to the next queued figure; the window really
/// closes only after the last one.
pub struct ViewerState {
    figures: Vec<Figure>,
    current: usize,
}

impl ViewerState {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            current: 0,
        }
    }

    /// Figure currently on screen, `None` when nothing was queued.
    pub fn current(&self) -> Option<&Figure> {
        self.figures.get(self.current)
    }

    /// Zero-based index of the figure on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Figures still waiting after the current one.
    pub fn remaining(&self) -> usize {
        self.figures.len().saturating_sub(self.current + 1)
    }

    /// Move to the next figure. Returns `false` when already on the last.
    pub fn advance(&mut self) -> bool {
        if self.remaining() == 0 {
            return false;
        }
        self.current += 1;
        log::debug!("Showing figure {} of {}", self.current + 1, self.len());
        true
    }

    /// "Figure i of n" for the top bar.
    pub fn progress_label(&self) -> String {
        if self.figures.is_empty() {
            return "No figures".to_string();
        }
        format!("Figure {} of {}", self.current + 1, self.figures.len())
    }

    /// Window title for the current figure.
    pub fn window_title(&self, app_name: &str) -> String {
        match self.current() {
            Some(fig) => format!("{app_name} – {}", fig.title),
            None => app_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(n: usize) -> ViewerState {
        ViewerState::new(
            (1..=n)
                .map(|i| Figure::grid(format!("fig {i}"), 1, 1))
                .collect(),
        )
    }

    #[test]
    fn advances_until_last_figure() {
        let mut state = queue(2);
        assert_eq!(state.current().map(|f| f.title.as_str()), Some("fig 1"));
        assert_eq!(state.remaining(), 1);
        assert_eq!(state.progress_label(), "Figure 1 of 2");

        assert!(state.advance());
        assert_eq!(state.current().map(|f| f.title.as_str()), Some("fig 2"));
        assert_eq!(state.remaining(), 0);

        assert!(!state.advance());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn empty_queue() {
        let mut state = queue(0);
        assert!(state.is_empty());
        assert!(state.current().is_none());
        assert_eq!(state.remaining(), 0);
        assert!(!state.advance());
        assert_eq!(state.progress_label(), "No figures");
        assert_eq!(state.window_title("Iris Lens"), "Iris Lens");
    }

    #[test]
    fn title_names_current_figure() {
        let state = queue(1);
        assert_eq!(state.window_title("Iris Lens"), "Iris Lens – fig 1");
    }
}
