use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use iris_lens::classifier::MlpClassifier;
use iris_lens::config::ClassifierConfig;
use iris_lens::data::loader::load_iris;
use iris_lens::pca::Pca;

criterion_group!(benches, pca, classifier);
criterion_main!(benches);

fn pca(c: &mut Criterion) {
    let mut group = c.benchmark_group("pca");
    group.throughput(criterion::Throughput::Elements(150));
    group.bench_function("fit and transform", pca_fit_transform);
}

fn classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("mlp");
    group.sample_size(10);
    group.throughput(criterion::Throughput::Elements(150));
    group.bench_function("fit 50 epochs", mlp_fit);
    group.bench_function("predict", mlp_predict);
}

fn pca_fit_transform(b: &mut Bencher) {
    let ds = load_iris().unwrap();
    b.iter(|| {
        let model = Pca::new(2).fit(black_box(&ds.features)).unwrap();
        model.transform(&ds.features).unwrap()
    });
}

fn small_config() -> ClassifierConfig {
    ClassifierConfig::default()
        .with_hidden_layers(&[100, 50])
        .with_max_iter(50)
        .with_seed(3)
}

fn mlp_fit(b: &mut Bencher) {
    let ds = load_iris().unwrap();
    b.iter(|| {
        let mut clf = MlpClassifier::new(small_config()).unwrap();
        clf.fit(black_box(&ds.features), &ds.labels).unwrap()
    });
}

fn mlp_predict(b: &mut Bencher) {
    let ds = load_iris().unwrap();
    let mut clf = MlpClassifier::new(small_config()).unwrap();
    clf.fit(&ds.features, &ds.labels).unwrap();
    b.iter(|| clf.predict(black_box(&ds.features)).unwrap());
}
