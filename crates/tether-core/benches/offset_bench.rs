//! Benchmarks for the pure positioning path.
//!
//! A popup is repositioned on every scroll and resize event, so the whole
//! offset → transform → overflow → tail chain should stay well under a
//! microsecond per call.
//!
//! Run with: cargo bench -p tether-core --bench offset_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tether_core::{
    OverflowCorrection, Placement, PopupBox, PositioningContext, Rect, Spacing, TailGeometry,
    box_left, correct_overflow, get_offset, get_transforms,
};

fn context(placement: Placement, is_rtl: bool) -> PositioningContext {
    PositioningContext::new(
        placement,
        Rect::new(200.0, 100.0, 50.0, 20.0),
        Rect::from_size(1280.0, 800.0),
    )
    .spacing(Spacing::new(4.0, 8.0))
    .popup(Some(PopupBox::new(Rect::new(0.0, 0.0, 240.0, 120.0))))
    .rtl(is_rtl)
}

fn bench_get_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset/get_offset");

    for placement in [Placement::Bottom, Placement::TopEnd, Placement::LeftStart] {
        for is_rtl in [false, true] {
            let ctx = context(placement, is_rtl);
            let id = format!("{placement}/{}", if is_rtl { "rtl" } else { "ltr" });
            group.bench_with_input(BenchmarkId::from_parameter(id), &ctx, |b, ctx| {
                b.iter(|| black_box(get_offset(black_box(ctx))))
            });
        }
    }

    group.finish();
}

fn bench_full_pass(c: &mut Criterion) {
    let ctx = context(Placement::BottomEnd, false);
    let popup = Rect::new(0.0, 0.0, 240.0, 120.0);
    let anchor = Rect::new(200.0, 100.0, 50.0, 20.0);

    c.bench_function("offset/full_pass", |b| {
        b.iter(|| {
            let offset = get_offset(black_box(&ctx));
            let transform = get_transforms(ctx.placement, ctx.is_rtl);
            let correction: OverflowCorrection =
                correct_overflow(ctx.placement, ctx.is_rtl, &offset, Some(popup.width), 0.0);
            let left = box_left(ctx.placement, ctx.is_rtl, correction.x, popup.width);
            let placed = Rect::new(left, offset.y, popup.width, popup.height);
            let tail = TailGeometry::resolve(
                ctx.placement,
                ctx.is_rtl,
                Some(&anchor),
                Some(&placed),
                &correction,
            );
            black_box((transform, tail))
        })
    });
}

criterion_group!(benches, bench_get_offset, bench_full_pass);
criterion_main!(benches);
