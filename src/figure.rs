//! Figure model: what to draw, independent of the window that draws it.
//!
//! A [`Figure`] is an explicit grid of panels. Plotting helpers build
//! panels from feature matrices and place them with 1-based subplot
//! positions, row-major.

use ndarray::Array2;

use crate::classifier::MlpClassifier;
use crate::error::{ensure_rows, Error, Result};
use crate::metrics::ConfusionMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Diamond,
}

/// One scatter series: every point carries the class that picks its colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub classes: Vec<usize>,
    pub marker: Marker,
    /// Marker radius in points.
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Drawn in order, later layers on top.
    pub layers: Vec<ScatterLayer>,
    pub class_names: Vec<String>,
}

impl ScatterPanel {
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionPanel {
    pub title: String,
    pub matrix: ConfusionMatrix,
    pub class_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Scatter(ScatterPanel),
    Confusion(ConfusionPanel),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Scatter(p) => &p.title,
            Panel::Confusion(p) => &p.title,
        }
    }
}

/// A titled `rows` x `cols` grid of optional panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    rows: usize,
    cols: usize,
    cells: Vec<Option<Panel>>,
}

impl Figure {
    pub fn grid(title: impl Into<String>, rows: usize, cols: usize) -> Self {
        Figure {
            title: title.into(),
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Place `panel` at 1-based `position`, replacing whatever was there.
    pub fn subplot(&mut self, position: usize, panel: Panel) -> Result<()> {
        let cell = position
            .checked_sub(1)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(Error::GridPosition {
                position,
                rows: self.rows,
                cols: self.cols,
            })?;
        *cell = Some(panel);
        Ok(())
    }

    /// Panel at 1-based `position`, if any.
    pub fn panel(&self, position: usize) -> Option<&Panel> {
        position
            .checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .and_then(Option::as_ref)
    }

    /// Panel at zero-based `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Panel> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_ref()
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.cells.iter().flatten()
    }

    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }
}

// ---------------------------------------------------------------------------
// Panel builders
// ---------------------------------------------------------------------------

fn first_two_columns(features: &Array2<f64>) -> Result<Vec<[f64; 2]>> {
    if features.ncols() < 2 {
        return Err(Error::NotEnoughColumns {
            required: 2,
            actual: features.ncols(),
        });
    }
    Ok(features.rows().into_iter().map(|r| [r[0], r[1]]).collect())
}

/// Columns 0 and 1 of `features`, small circles coloured by true label.
pub fn scatter_labels(
    features: &Array2<f64>,
    labels: &[usize],
    class_names: &[String],
    title: &str,
) -> Result<ScatterPanel> {
    ensure_rows(features.nrows(), labels.len())?;
    let points = first_two_columns(features)?;

    Ok(ScatterPanel {
        title: title.to_string(),
        x_label: String::new(),
        y_label: String::new(),
        layers: vec![ScatterLayer {
            name: "true".to_string(),
            points,
            classes: labels.to_vec(),
            marker: Marker::Circle,
            radius: 3.0,
        }],
        class_names: class_names.to_vec(),
    })
}

/// Predictions as large diamonds with the true labels as small circles on top.
pub fn scatter_predictions(
    features: &Array2<f64>,
    labels: &[usize],
    predictions: &[usize],
    class_names: &[String],
    title: &str,
) -> Result<ScatterPanel> {
    ensure_rows(features.nrows(), labels.len())?;
    ensure_rows(features.nrows(), predictions.len())?;
    let points = first_two_columns(features)?;

    Ok(ScatterPanel {
        title: title.to_string(),
        x_label: String::new(),
        y_label: String::new(),
        layers: vec![
            ScatterLayer {
                name: "predicted".to_string(),
                points: points.clone(),
                classes: predictions.to_vec(),
                marker: Marker::Diamond,
                radius: 6.0,
            },
            ScatterLayer {
                name: "true".to_string(),
                points,
                classes: labels.to_vec(),
                marker: Marker::Circle,
                radius: 2.0,
            },
        ],
        class_names: class_names.to_vec(),
    })
}

/// A trained classifier and the features it should be scored on.
pub struct ClassifierRun<'a> {
    pub title: &'a str,
    pub classifier: &'a MlpClassifier,
    pub features: &'a Array2<f64>,
}

/// One confusion panel per run, side by side on a single row.
pub fn confusion_figure(
    title: &str,
    targets: &[usize],
    class_names: &[String],
    runs: &[ClassifierRun<'_>],
) -> Result<Figure> {
    let mut figure = Figure::grid(title, 1, runs.len());
    for (i, run) in runs.iter().enumerate() {
        let predictions = run.classifier.predict(run.features)?;
        let matrix = ConfusionMatrix::from_predictions(targets, &predictions, class_names.len())?;
        log::info!(
            "{}: {}/{} correct ({:.1}%)",
            run.title,
            matrix.correct(),
            matrix.total(),
            matrix.accuracy() * 100.0
        );
        figure.subplot(
            i + 1,
            Panel::Confusion(ConfusionPanel {
                title: run.title.to_string(),
                matrix,
                class_names: class_names.to_vec(),
            }),
        )?;
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::config::ClassifierConfig;

    fn names() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn subplot_positions_are_one_based() {
        let mut fig = Figure::grid("f", 2, 2);
        let panel = scatter_labels(&array![[1.0, 2.0]], &[0], &names(), "p").unwrap();
        fig.subplot(1, Panel::Scatter(panel.clone())).unwrap();
        fig.subplot(4, Panel::Scatter(panel)).unwrap();

        assert_eq!(fig.panel_count(), 2);
        assert!(fig.cell(0, 0).is_some());
        assert!(fig.cell(0, 1).is_none());
        assert!(fig.cell(1, 1).is_some());
        assert!(fig.cell(2, 0).is_none());
        assert_eq!(fig.panel(4).map(Panel::title), Some("p"));
    }

    #[test]
    fn subplot_rejects_out_of_grid() {
        let mut fig = Figure::grid("f", 2, 2);
        let panel = || {
            Panel::Scatter(scatter_labels(&array![[1.0, 2.0]], &[0], &names(), "p").unwrap())
        };
        assert!(matches!(
            fig.subplot(0, panel()),
            Err(Error::GridPosition { position: 0, .. })
        ));
        assert!(matches!(
            fig.subplot(5, panel()),
            Err(Error::GridPosition { position: 5, rows: 2, cols: 2 })
        ));
    }

    #[test]
    fn prediction_overlay_layers() {
        let x = array![[1.0, 2.0, 9.0], [3.0, 4.0, 9.0]];
        let panel = scatter_predictions(&x, &[0, 1], &[1, 1], &names(), "p")
            .unwrap()
            .with_axis_labels("x", "y");
        assert_eq!((panel.x_label.as_str(), panel.y_label.as_str()), ("x", "y"));
        assert_eq!(panel.layers.len(), 2);

        let predicted = &panel.layers[0];
        assert_eq!(predicted.marker, Marker::Diamond);
        assert_eq!(predicted.classes, vec![1, 1]);
        let truth = &panel.layers[1];
        assert_eq!(truth.marker, Marker::Circle);
        assert_eq!(truth.classes, vec![0, 1]);
        assert!(predicted.radius > truth.radius);
        assert_eq!(truth.points, vec![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn scatter_needs_two_columns_and_aligned_rows() {
        assert!(matches!(
            scatter_labels(&array![[1.0], [2.0]], &[0, 1], &names(), "p"),
            Err(Error::NotEnoughColumns { required: 2, actual: 1 })
        ));
        assert!(matches!(
            scatter_predictions(&array![[1.0, 2.0]], &[0], &[0, 1], &names(), "p"),
            Err(Error::RowMismatch { .. })
        ));
    }

    #[test]
    fn one_confusion_panel_per_run() {
        let x = array![[0.0, 0.0], [0.0, 1.0], [5.0, 5.0], [5.0, 6.0]];
        let y = [0, 0, 1, 1];
        let config = ClassifierConfig::default()
            .with_hidden_layers(&[4])
            .with_max_iter(10)
            .with_seed(2);
        let mut clf = MlpClassifier::new(config).unwrap();
        clf.fit(&x, &y).unwrap();

        let runs = [
            ClassifierRun {
                title: "first",
                classifier: &clf,
                features: &x,
            },
            ClassifierRun {
                title: "second",
                classifier: &clf,
                features: &x,
            },
            ClassifierRun {
                title: "third",
                classifier: &clf,
                features: &x,
            },
        ];
        let fig = confusion_figure("cm", &y, &names(), &runs).unwrap();
        assert_eq!(fig.panel_count(), 3);
        assert_eq!((fig.rows(), fig.cols()), (1, 3));
        for panel in fig.panels() {
            match panel {
                Panel::Confusion(cm) => assert_eq!(cm.matrix.total(), 4),
                Panel::Scatter(_) => panic!("unexpected scatter panel"),
            }
        }
        assert_eq!(fig.panel(2).map(Panel::title), Some("second"));
    }
}
