//! Benchmarks for view derivation and full-frame rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use serde_json::json;
use taskdeck::analysis::AnalyzeResponse;
use taskdeck::app::{Model, Panel};
use taskdeck::render::ResultView;
use taskdeck::tasks::{LiveList, TaskRecord, encode_tasks, read_tasks};

fn large_buffer() -> String {
    let tasks: Vec<TaskRecord> = (0..500)
        .map(|i| TaskRecord::new(format!("t{i}"), format!("Task {i}")))
        .collect();
    encode_tasks(&tasks).unwrap()
}

fn large_response() -> AnalyzeResponse {
    let tasks: Vec<_> = (0..200)
        .map(|i| {
            json!({
                "id": format!("t{i}"),
                "title": format!("Task {i}"),
                "score": f64::from(i % 100) / 100.0,
                "components": {"urgency": 0.5, "importance": 0.25, "effort": 1.0},
                "explanation": "scored",
                "raw": {"due_date": "2025-12-01", "importance": 5, "estimated_hours": 2}
            })
        })
        .collect();
    serde_json::from_value(json!({"strategy": "smart", "tasks": tasks})).unwrap()
}

fn bench_live_list(c: &mut Criterion) {
    let parsed = read_tasks(&large_buffer());
    c.bench_function("live_list_500", |b| {
        b.iter(|| LiveList::derive(black_box(&parsed)))
    });
}

fn bench_result_view(c: &mut Criterion) {
    let response = large_response();
    c.bench_function("result_view_200", |b| {
        b.iter(|| ResultView::from_response(black_box(&response)))
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let mut model = Model::new(&large_buffer());
    model.results = Panel::Ready(ResultView::from_response(&large_response()));
    let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
    c.bench_function("render_frame", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| taskdeck::ui::render(&mut model, frame))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_live_list, bench_result_view, bench_full_frame);
criterion_main!(benches);
