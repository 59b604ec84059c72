use std::f32::consts::FRAC_PI_2;

use eframe::egui::{self, epaint::TextShape, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::color::{contrast_text, Colormap};
use crate::figure::ConfusionPanel;

/// Room left of the grid for the axis title and class names.
const LEFT_MARGIN: f32 = 110.0;
/// Room below the grid for class names and the axis title.
const BOTTOM_MARGIN: f32 = 56.0;
/// Room right of the grid for the colour bar and its tick labels.
const RIGHT_MARGIN: f32 = 64.0;
const COLORBAR_GAP: f32 = 12.0;
const COLORBAR_WIDTH: f32 = 14.0;
/// Horizontal slices used to paint the colour bar gradient.
const COLORBAR_STEPS: usize = 48;
const PADDING: f32 = 8.0;

// ---------------------------------------------------------------------------
// Confusion matrix heat map
// ---------------------------------------------------------------------------

/// Paint a confusion panel: one square cell per (true, predicted) pair,
/// filled by `count / max_count` and labelled with the count, plus a
/// colour bar from 0 to `max_count`.
pub fn confusion_matrix(ui: &mut Ui, panel: &ConfusionPanel, colormap: &Colormap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&panel.title);
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let n = panel.matrix.n_classes();
    if n == 0 {
        return;
    }

    let grid = grid_rect(response.rect, n);
    let text_color = ui.visuals().text_color();
    let max = panel.matrix.max_count();
    let label_font = FontId::proportional(13.0);

    for row in 0..n {
        for col in 0..n {
            let count = panel.matrix.count(row, col);
            let t = if max == 0 { 0.0 } else { count as f32 / max as f32 };
            let fill = colormap.sample(t);
            let cell = cell_rect(grid, n, row, col);

            painter.rect_filled(cell, 0.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                count.to_string(),
                FontId::proportional(16.0),
                contrast_text(fill),
            );
        }
    }

    let grid_stroke = Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color);
    for i in 0..=n {
        let offset = grid.width() * i as f32 / n as f32;
        painter.line_segment(
            [grid.left_top() + Vec2::new(offset, 0.0), grid.left_bottom() + Vec2::new(offset, 0.0)],
            grid_stroke,
        );
        painter.line_segment(
            [grid.left_top() + Vec2::new(0.0, offset), grid.right_top() + Vec2::new(0.0, offset)],
            grid_stroke,
        );
    }

    // Class names: true labels down the left, predicted labels along the bottom.
    for (i, name) in panel.class_names.iter().enumerate().take(n) {
        let row_center = cell_rect(grid, n, i, 0).center().y;
        painter.text(
            Pos2::new(grid.left() - 6.0, row_center),
            Align2::RIGHT_CENTER,
            name,
            label_font.clone(),
            text_color,
        );

        let col_center = cell_rect(grid, n, 0, i).center().x;
        painter.text(
            Pos2::new(col_center, grid.bottom() + 6.0),
            Align2::CENTER_TOP,
            name,
            label_font.clone(),
            text_color,
        );
    }

    painter.text(
        Pos2::new(grid.center().x, grid.bottom() + BOTTOM_MARGIN - 4.0),
        Align2::CENTER_BOTTOM,
        "Predicted label",
        FontId::proportional(14.0),
        text_color,
    );

    paint_colorbar(&painter, grid, max, colormap, text_color, grid_stroke);

    // Rotated axis title, reading bottom to top.
    let galley = painter.layout_no_wrap("True label".to_string(), FontId::proportional(14.0), text_color);
    let anchor = Pos2::new(
        response.rect.left() + PADDING,
        grid.center().y + galley.size().x / 2.0,
    );
    painter.add(egui::Shape::Text(
        TextShape::new(anchor, galley, Color32::PLACEHOLDER).with_angle(-FRAC_PI_2),
    ));
}

/// Vertical gradient strip right of the grid, `max_count` at the top.
fn paint_colorbar(
    painter: &egui::Painter,
    grid: Rect,
    max: usize,
    colormap: &Colormap,
    text_color: Color32,
    stroke: Stroke,
) {
    let bar = colorbar_rect(grid);
    if bar.height() <= 0.0 {
        return;
    }

    for (slice, t) in colorbar_slices(bar) {
        painter.rect_filled(slice, 0.0, colormap.sample(t));
    }
    for edge in [
        [bar.left_top(), bar.right_top()],
        [bar.right_top(), bar.right_bottom()],
        [bar.right_bottom(), bar.left_bottom()],
        [bar.left_bottom(), bar.left_top()],
    ] {
        painter.line_segment(edge, stroke);
    }

    let ticks = FontId::proportional(12.0);
    painter.text(
        bar.right_top() + Vec2::new(4.0, 0.0),
        Align2::LEFT_TOP,
        max.to_string(),
        ticks.clone(),
        text_color,
    );
    painter.text(
        bar.right_bottom() + Vec2::new(4.0, 0.0),
        Align2::LEFT_BOTTOM,
        "0",
        ticks,
        text_color,
    );
}

fn colorbar_rect(grid: Rect) -> Rect {
    Rect::from_min_size(
        Pos2::new(grid.right() + COLORBAR_GAP, grid.top()),
        Vec2::new(COLORBAR_WIDTH, grid.height()),
    )
}

/// Slices of `bar` top to bottom, each with its position on the scale.
fn colorbar_slices(bar: Rect) -> Vec<(Rect, f32)> {
    let step = bar.height() / COLORBAR_STEPS as f32;
    (0..COLORBAR_STEPS)
        .map(|i| {
            let slice = Rect::from_min_size(
                bar.min + Vec2::new(0.0, i as f32 * step),
                Vec2::new(bar.width(), step),
            );
            let t = 1.0 - (i as f32 + 0.5) / COLORBAR_STEPS as f32;
            (slice, t)
        })
        .collect()
}

/// Largest square grid that fits `area` after the axis and colour bar margins.
fn grid_rect(area: Rect, n: usize) -> Rect {
    let avail_w = (area.width() - LEFT_MARGIN - RIGHT_MARGIN - PADDING).max(0.0);
    let avail_h = (area.height() - BOTTOM_MARGIN - PADDING).max(0.0);
    // whole pixels per cell keeps the grid lines crisp
    let cell = (avail_w.min(avail_h) / n as f32).floor();
    let side = cell * n as f32;

    let left = area.left() + LEFT_MARGIN + (avail_w - side) / 2.0;
    let top = area.top() + PADDING + (avail_h - side) / 2.0;
    Rect::from_min_size(Pos2::new(left, top), Vec2::splat(side))
}

fn cell_rect(grid: Rect, n: usize, row: usize, col: usize) -> Rect {
    let side = grid.width() / n as f32;
    Rect::from_min_size(
        grid.min + Vec2::new(col as f32 * side, row as f32 * side),
        Vec2::splat(side),
    )
}
