// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use tempfile::TempDir;
use ultimate_gui::media::frame_export::ExportableFrame;
use ultimate_gui::media::gallery::{self, GalleryList};

const IMAGE_COUNT: usize = 200;

/// Folder with `IMAGE_COUNT` small PNGs mixed with text files.
fn populated_folder() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let frame = ExportableFrame::new(Arc::new(vec![128; 64 * 48 * 4]), 64, 48);
    for i in 0..IMAGE_COUNT {
        frame
            .save_png(&dir.path().join(format!("captured_{i:04}.png")))
            .expect("write png");
        std::fs::write(dir.path().join(format!("note_{i:04}.txt")), "x").expect("write note");
    }
    dir
}

fn gallery_benchmark(c: &mut Criterion) {
    let folder = populated_folder();
    let first = folder.path().join("captured_0000.png");

    let mut group = c.benchmark_group("gallery");

    group.bench_function("scan_folder", |b| {
        b.iter(|| black_box(GalleryList::scan(folder.path()).expect("scan")));
    });

    group.bench_function("load_fitted", |b| {
        b.iter(|| black_box(gallery::load_fitted(&first).expect("decode")));
    });

    group.bench_function("wrap_around_navigation", |b| {
        let mut list = GalleryList::scan(folder.path()).expect("scan");
        b.iter(|| {
            for _ in 0..IMAGE_COUNT {
                black_box(list.next());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, gallery_benchmark);
criterion_main!(benches);
