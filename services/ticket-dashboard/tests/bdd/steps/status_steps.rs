//! BDD step definitions for the status panel

use cucumber::{given, then, when};

use ticket_dashboard::poller::Poller;
use ticket_dashboard::status::StatusPoller;

use crate::world::DashboardWorld;

#[given(expr = "the status error label is {string}")]
fn status_error_label(world: &mut DashboardWorld, label: String) {
    world.config.status.error_label = label;
}

#[when("the status poller runs")]
async fn status_poller_runs(world: &mut DashboardWorld) {
    let diagnostics = world.diagnostics();
    let poller = StatusPoller::new(
        &world.config,
        world.client.clone(),
        world.page(),
        diagnostics,
    );
    poller.poll().await;
}

#[then(expr = "the {word} poller should have {int} consecutive error(s)")]
async fn consecutive_errors(world: &mut DashboardWorld, name: String, expected: u32) {
    let diagnostics = world.diagnostics();
    let diagnostics = diagnostics.read().await;
    let status = diagnostics
        .get(&name)
        .unwrap_or_else(|| panic!("no diagnostics for '{}'", name));
    assert_eq!(status.consecutive_errors, expected);
}
