use eframe::egui::{self, Ui, Vec2};

use crate::color::Colormap;
use crate::figure::{Figure, Panel};
use crate::state::ViewerState;
use crate::ui::{confusion, plot};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: figure title, position in the queue and the
/// "Next figure" button.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if let Some(fig) = state.current() {
            ui.strong(&fig.title);
            ui.separator();
        }

        ui.label(state.progress_label());

        if state.remaining() > 0 {
            ui.separator();
            if ui
                .button("Next figure")
                .on_hover_text("Closing the window also moves to the next figure")
                .clicked()
            {
                state.advance();
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Figure grid (central panel)
// ---------------------------------------------------------------------------

/// Lay the figure's panels out in its rows x cols grid, each cell the
/// same size.
pub fn figure_view(ui: &mut Ui, figure: &Figure, colormap: &Colormap) {
    if figure.rows() == 0 || figure.cols() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Empty figure");
        });
        return;
    }

    let spacing = ui.spacing().item_spacing;
    let cell = cell_size(ui.available_size(), spacing, figure.rows(), figure.cols());

    for row in 0..figure.rows() {
        ui.horizontal(|ui: &mut Ui| {
            for col in 0..figure.cols() {
                ui.allocate_ui(cell, |ui: &mut Ui| {
                    ui.set_min_size(cell);
                    ui.vertical(|ui: &mut Ui| match figure.cell(row, col) {
                        Some(Panel::Scatter(panel)) => {
                            plot::scatter_plot(ui, (&figure.title, row, col), panel, colormap);
                        }
                        Some(Panel::Confusion(panel)) => {
                            confusion::confusion_matrix(ui, panel, colormap);
                        }
                        None => {}
                    });
                });
            }
        });
    }
}

fn cell_size(available: Vec2, spacing: Vec2, rows: usize, cols: usize) -> Vec2 {
    let width = (available.x - spacing.x * (cols as f32 - 1.0)) / cols as f32;
    let height = (available.y - spacing.y * (rows as f32 - 1.0)) / rows as f32;
    Vec2::new(width.max(0.0), height.max(0.0))
}
