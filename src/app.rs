use eframe::egui;

use crate::color::Colormap;
use crate::figure::Figure;
use crate::state::ViewerState;
use crate::ui::panels;

pub const APP_NAME: &str = "Iris Lens";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IrisLensApp {
    pub state: ViewerState,
    colormap: Colormap,
    /// Figure index the window title was last set for.
    titled: Option<usize>,
}

impl IrisLensApp {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            state: ViewerState::new(figures),
            colormap: Colormap::default(),
            titled: None,
        }
    }
}

impl eframe::App for IrisLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Closing dismisses the current figure; only the last one ends the app.
        if ctx.input(|i| i.viewport().close_requested()) && self.state.remaining() > 0 {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.state.advance();
        }

        // ---- Top panel: figure navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: current figure ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.current() {
            Some(figure) => panels::figure_view(ui, figure, &self.colormap),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("Nothing to show");
                });
            }
        });

        let index = self.state.current_index();
        if self.titled != Some(index) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(
                self.state.window_title(APP_NAME),
            ));
            self.titled = Some(index);
        }
    }
}
