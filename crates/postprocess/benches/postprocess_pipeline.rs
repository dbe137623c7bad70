use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::{Array3, ArrayD};
use postprocess::decoder::decode_scale;
use postprocess::nms::non_max_suppression;
use postprocess::{
    AnchorSet, BoundingBox, Detection, PostProcessConfig, PostProcessor, Scale, ScaleOutput,
};

/// Mock output head with `hot_cells` confident slots scattered over the grid.
fn mock_head(grid: usize, hot_cells: usize) -> ArrayD<f32> {
    let mut head = Array3::zeros((27, grid, grid)).into_dyn();
    for i in 0..hot_cells {
        let x = (i * 7 + 3) % grid;
        let y = (i * 11 + 5) % grid;
        let base = (i % 3) * 9;
        head[[base + 4, y, x]] = 3.0;
        head[[base + 5 + (i % 4), y, x]] = 5.0;
    }
    head
}

/// Mock candidate list with overlapping clusters across the four classes.
fn mock_candidates(count: usize) -> Vec<Detection> {
    (0..count)
        .map(|i| Detection {
            class_id: i % 4,
            score: 0.7 + 0.3 * ((i % 10) as f32 / 10.0),
            bbox: BoundingBox::new(
                ((i * 37) % 480) as f32,
                ((i * 53) % 480) as f32,
                48.0,
                48.0,
            ),
        })
        .collect()
}

fn benchmark_decode_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_scale");
    let config = PostProcessConfig::default();
    let anchors = AnchorSet::default();

    for (scale, grid) in [
        (Scale::Coarse, 13usize),
        (Scale::Medium, 26),
        (Scale::Fine, 52),
    ] {
        let head = mock_head(grid, 8);
        group.bench_with_input(BenchmarkId::new("grid", grid), &head, |b, head| {
            b.iter(|| decode_scale(black_box(&head.view()), scale, &anchors, &config).unwrap())
        });
    }
    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let heads = [
        (Scale::Coarse, mock_head(13, 4)),
        (Scale::Medium, mock_head(26, 8)),
        (Scale::Fine, mock_head(52, 16)),
    ];
    let processor = PostProcessor::default();

    c.bench_function("process_frame_three_scales", |b| {
        b.iter(|| {
            let outputs: Vec<ScaleOutput> = heads
                .iter()
                .map(|(scale, head)| ScaleOutput {
                    scale: *scale,
                    tensor: head.view(),
                })
                .collect();
            black_box(processor.process_frame(&outputs))
        })
    });
}

fn benchmark_nms(c: &mut Criterion) {
    let mut group = c.benchmark_group("nms");

    for count in [16usize, 64, 256] {
        let candidates = mock_candidates(count);
        group.bench_with_input(
            BenchmarkId::new("candidates", count),
            &candidates,
            |b, candidates| b.iter(|| non_max_suppression(black_box(candidates.clone()), 0.4)),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_scale,
    benchmark_full_frame,
    benchmark_nms
);
criterion_main!(benches);
