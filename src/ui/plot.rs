use std::collections::BTreeMap;
use std::hash::Hash;

use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::Colormap;
use crate::figure::{Marker, ScatterLayer, ScatterPanel};

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Render a scatter panel, one series per (layer, class).
pub fn scatter_plot(ui: &mut Ui, id: impl Hash, panel: &ScatterPanel, colormap: &Colormap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&panel.title);
    });

    let n_classes = panel.class_names.len();

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(panel.x_label.as_str())
        .y_axis_label(panel.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &panel.layers {
                for (class, points) in group_by_class(layer) {
                    let series = Points::new(PlotPoints::new(points))
                        .name(series_name(&panel.class_names, class, layer))
                        .shape(marker_shape(layer.marker))
                        .radius(layer.radius)
                        .color(colormap.class_color(class, n_classes))
                        .filled(true);

                    plot_ui.points(series);
                }
            }
        });
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Diamond => MarkerShape::Diamond,
    }
}

/// Legend entry such as "setosa (predicted)".
fn series_name(class_names: &[String], class: usize, layer: &ScatterLayer) -> String {
    match class_names.get(class) {
        Some(name) => format!("{name} ({})", layer.name),
        None => format!("class {class} ({})", layer.name),
    }
}

/// Points of `layer` split by class, in class order.
fn group_by_class(layer: &ScatterLayer) -> BTreeMap<usize, Vec<[f64; 2]>> {
    let mut groups: BTreeMap<usize, Vec<[f64; 2]>> = BTreeMap::new();
    for (&point, &class) in layer.points.iter().zip(&layer.classes) {
        groups.entry(class).or_default().push(point);
    }
    groups
}
