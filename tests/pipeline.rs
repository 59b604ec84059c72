use iris_lens::config::{ClassifierConfig, PipelineConfig};
use iris_lens::data::loader::load_iris;
use iris_lens::figure::Panel;
use iris_lens::pipeline::{self, WITHOUT_PCA, WITH_PCA};
use iris_lens::state::ViewerState;

/// Same flow as the binary, with networks small enough for a test run.
fn quick_config() -> PipelineConfig {
    PipelineConfig {
        original: ClassifierConfig::default()
            .with_hidden_layers(&[16])
            .with_max_iter(60)
            .with_seed(7),
        reduced: ClassifierConfig::default()
            .with_hidden_layers(&[16])
            .with_max_iter(60)
            .with_seed(11),
        ..PipelineConfig::default()
    }
}

#[test]
fn full_pipeline_shapes() {
    let output = pipeline::run(&quick_config()).unwrap();

    assert_eq!(output.dataset.features.dim(), (150, 4));
    assert_eq!(output.dataset.label_names.len(), 3);
    assert_eq!(output.reduction.features.dim(), (150, 2));
    let pct = output.reduction.retained_percent();
    assert!((0.0..=100.0).contains(&pct));

    let titles: Vec<_> = output.runs.iter().map(|r| r.title).collect();
    assert_eq!(titles, vec![WITHOUT_PCA, WITH_PCA]);
    for run in &output.runs {
        assert_eq!(run.predictions.len(), 150);
        assert!(run.predictions.iter().all(|&p| p < 3));
        assert!(run.report.iterations >= 1 && run.report.iterations <= 60);
    }
}

#[test]
fn figures_match_the_walkthrough() {
    let output = pipeline::run(&quick_config()).unwrap();
    assert_eq!(output.figures.len(), 2);

    let scatter = &output.figures[0];
    assert_eq!((scatter.rows(), scatter.cols()), (2, 2));
    assert_eq!(scatter.panel_count(), 4);
    assert!(scatter.panels().all(|p| matches!(p, Panel::Scatter(_))));
    assert_eq!(scatter.panel(2).map(Panel::title), Some(WITHOUT_PCA));
    assert_eq!(scatter.panel(4).map(Panel::title), Some(WITH_PCA));

    let confusion = &output.figures[1];
    assert_eq!((confusion.rows(), confusion.cols()), (1, 2));
    assert_eq!(confusion.panel_count(), 2);
    for (panel, run) in confusion.panels().zip(&output.runs) {
        let Panel::Confusion(cm) = panel else {
            panic!("expected a confusion panel, got {}", panel.title());
        };
        assert_eq!(cm.title, run.title);
        assert_eq!(cm.matrix.total(), 150);
        assert_eq!(cm.class_names, output.dataset.label_names);
        let correct = run
            .predictions
            .iter()
            .zip(&output.dataset.labels)
            .filter(|(p, t)| p == t)
            .count();
        assert_eq!(cm.matrix.correct(), correct);
    }
}

#[test]
fn seeded_pipeline_is_reproducible() {
    let a = pipeline::run(&quick_config()).unwrap();
    let b = pipeline::run(&quick_config()).unwrap();
    for (ra, rb) in a.runs.iter().zip(&b.runs) {
        assert_eq!(ra.predictions, rb.predictions);
    }
    assert_eq!(a.figures, b.figures);
}

#[test]
fn viewer_walks_the_figure_queue() {
    let output = pipeline::run(&quick_config()).unwrap();
    let mut state = ViewerState::new(output.figures);
    let mut advanced = 0;
    while state.advance() {
        advanced += 1;
    }
    assert_eq!(advanced, 1);
    assert_eq!(state.current().map(|f| f.title.as_str()), Some("Confusion matrices"));
}

#[test]
fn loader_is_idempotent() {
    let a = load_iris().unwrap();
    let b = load_iris().unwrap();
    assert_eq!(a, b);
}
