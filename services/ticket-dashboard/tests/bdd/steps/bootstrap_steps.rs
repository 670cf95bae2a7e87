//! BDD step definitions for page bootstrap

use std::time::Duration;

use cucumber::{then, when};

use ticket_dashboard::Dashboard;

use crate::world::DashboardWorld;

#[when("the dashboard is bootstrapped")]
async fn dashboard_bootstrapped(world: &mut DashboardWorld) {
    let mut dashboard = Dashboard::bootstrap(
        &world.config,
        world.page(),
        world.client.clone(),
        world.charts.clone(),
    );
    dashboard.ready().await;
    world.dashboard = Some(dashboard);
}

#[when("the refresh control is activated")]
async fn refresh_activated(world: &mut DashboardWorld) {
    let id = world.config.logs.refresh_control_id.clone();
    let before = world.client.requests_to("/api/logs");
    world.page().activate(&id).unwrap();

    let client = world.client.clone();
    tokio::time::timeout(Duration::from_secs(5), async {
        while client.requests_to("/api/logs") == before {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("log refresh did not happen");
}

#[when("the dashboard is stopped")]
async fn dashboard_stopped(world: &mut DashboardWorld) {
    let dashboard = world.dashboard.take().expect("dashboard not bootstrapped");
    dashboard.stop().await;
}

#[then("log refresh should be bound")]
fn log_refresh_bound(world: &mut DashboardWorld) {
    let dashboard = world.dashboard.as_ref().expect("dashboard not bootstrapped");
    assert!(dashboard.is_log_refresh_bound());
}

#[then("log refresh should not be bound")]
fn log_refresh_not_bound(world: &mut DashboardWorld) {
    let dashboard = world.dashboard.as_ref().expect("dashboard not bootstrapped");
    assert!(!dashboard.is_log_refresh_bound());
}

#[then("the chart should not be active")]
fn chart_not_active(world: &mut DashboardWorld) {
    let dashboard = world.dashboard.as_ref().expect("dashboard not bootstrapped");
    assert!(!dashboard.is_chart_active());
}
