use std::hint::black_box;

use cadence::{Key, ManualClock, TypingAnalytics};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Replays `count` keystrokes with a 10% error rate, each error followed by a correction
fn replay(count: usize) -> TypingAnalytics<ManualClock> {
    let mut analytics = TypingAnalytics::with_clock(ManualClock::new(0));
    let mut now = 0;

    for i in 0..count {
        now += if i % 97 == 0 { 1_200 } else { 140 + (i % 7) as u64 * 10 }; // occasional pause
        if i % 10 == 0 {
            analytics.record_keystroke('x', Some('e'), false, Some(now), i);
            analytics.record_keystroke(Key::BACKSPACE, None, true, Some(now + 90), i + 1);
        } else {
            analytics.record_keystroke('e', Some('e'), true, Some(now), i);
        }
    }

    analytics
}

fn benchmark_record_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_keystroke");

    for keystrokes in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("replay", keystrokes),
            &keystrokes,
            |b, &keystrokes| b.iter(|| black_box(replay(black_box(keystrokes)))),
        );
    }

    group.finish();
}

fn benchmark_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for keystrokes in [100, 1000, 10000] {
        let analytics = replay(keystrokes);
        group.bench_with_input(
            BenchmarkId::new("full_summary", keystrokes),
            &analytics,
            |b, analytics| b.iter(|| black_box(analytics.summary())),
        );
        group.bench_with_input(
            BenchmarkId::new("tips_only", keystrokes),
            &analytics,
            |b, analytics| b.iter(|| black_box(analytics.generate_tips())),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_record_keystroke, benchmark_summary);
criterion_main!(benches);
