use criterion::{Criterion, criterion_group, criterion_main};
use mandelbrot_engine::core::data::control_colours::ControlColours;
use mandelbrot_engine::{DisplayGeometry, Fixed, MemoryFramebuffer, RasterEngine, RenderRequest, render_frame};
use std::hint::black_box;

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(10);

    for (name, width, height) in [("qvga", 320u32, 240u32), ("vga", 640, 480)] {
        let request = RenderRequest::new(Fixed::from_f64(-0.5), Fixed::ZERO, 1, 256, ControlColours::default());

        group.bench_function(name, |b| {
            let mut engine = RasterEngine::new();
            let mut framebuffer = MemoryFramebuffer::new(DisplayGeometry::new(width, height, 0));

            b.iter(|| {
                let summary = render_frame(&mut engine, &mut framebuffer, black_box(request), u64::MAX);
                black_box(summary)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_frame);
criterion_main!(benches);
