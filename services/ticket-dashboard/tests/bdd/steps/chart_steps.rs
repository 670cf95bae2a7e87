//! BDD step definitions for the ticket chart

use std::sync::Arc;

use cucumber::{then, when};

use ticket_dashboard::poller::Poller;
use ticket_dashboard::stats::StatsChartRenderer;

use crate::world::DashboardWorld;

fn renderer(world: &mut DashboardWorld) -> Arc<StatsChartRenderer> {
    if world.renderer.is_none() {
        let diagnostics = world.diagnostics();
        world.renderer = Some(Arc::new(StatsChartRenderer::new(
            &world.config,
            world.client.clone(),
            world.page(),
            world.charts.clone(),
            diagnostics,
        )));
    }
    Arc::clone(world.renderer.as_ref().expect("renderer just created"))
}

#[when("the chart renderer runs")]
async fn chart_renderer_runs(world: &mut DashboardWorld) {
    renderer(world).poll().await;
}

#[when("the chart renderer runs twice")]
async fn chart_renderer_runs_twice(world: &mut DashboardWorld) {
    let renderer = renderer(world);
    renderer.poll().await;
    renderer.poll().await;
}

#[then(expr = "the chart labels should be {string}")]
fn chart_labels(world: &mut DashboardWorld, labels: String) {
    let config = world.charts.last_config().expect("no chart created");
    let expected: Vec<String> = labels.split(',').map(str::to_string).collect();
    assert_eq!(config.data.labels, expected);
}

#[then(expr = "the chart values should be {string}")]
fn chart_values(world: &mut DashboardWorld, values: String) {
    let config = world.charts.last_config().expect("no chart created");
    let expected: Vec<f64> = values
        .split(',')
        .map(|v| v.parse().expect("numeric chart value"))
        .collect();
    assert_eq!(config.data.datasets[0].data, expected);
}

#[then(expr = "{int} chart(s) should be live")]
fn charts_live(world: &mut DashboardWorld, expected: usize) {
    assert_eq!(world.charts.live(), expected);
}

#[then("each chart should be destroyed before the next is created")]
fn destroyed_before_created(world: &mut DashboardWorld) {
    let events = world.charts.events.lock().unwrap().clone();
    let mut live = 0;
    for event in &events {
        match event.as_str() {
            "create" => {
                assert_eq!(live, 0, "chart created while another was live: {:?}", events);
                live += 1;
            }
            "destroy" => live -= 1,
            other => panic!("unexpected chart event {}", other),
        }
    }
}

#[then("no chart should have been created")]
fn no_chart_created(world: &mut DashboardWorld) {
    assert!(world.charts.events.lock().unwrap().is_empty());
}
