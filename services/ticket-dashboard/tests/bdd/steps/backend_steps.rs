//! BDD step definitions for scripting the backend

use cucumber::{given, then, when};

use ticket_dashboard::api::{LOGS_ENDPOINT, STATS_ENDPOINT, STATUS_ENDPOINT};

use crate::world::{DashboardWorld, Scripted};

fn endpoint(name: &str) -> &'static str {
    match name {
        "status" => STATUS_ENDPOINT,
        "logs" => LOGS_ENDPOINT,
        "stats" => STATS_ENDPOINT,
        other => panic!("Unknown endpoint: {}", other),
    }
}

#[given(expr = "the backend reports status {string}")]
fn backend_reports_status(world: &mut DashboardWorld, status: String) {
    let body = serde_json::json!({ "status": status }).to_string();
    world.client.script(STATUS_ENDPOINT, Scripted::Body(body));
}

#[given(expr = "the backend reports log lines {string}")]
fn backend_reports_log_lines(world: &mut DashboardWorld, lines: String) {
    let lines: Vec<&str> = lines.split(',').collect();
    let body = serde_json::json!({ "lines": lines }).to_string();
    world.client.script(LOGS_ENDPOINT, Scripted::Body(body));
}

#[given(expr = "the backend reports {int} tickets on {string}")]
fn backend_reports_tickets(world: &mut DashboardWorld, count: u32, date: String) {
    world.stats_points.push((date, f64::from(count)));
    let points: Vec<serde_json::Value> = world
        .stats_points
        .iter()
        .map(|(date, count)| serde_json::json!({ "date": date, "count": count }))
        .collect();
    let body = serde_json::Value::Array(points).to_string();
    world.client.script(STATS_ENDPOINT, Scripted::Body(body));
}

#[given(expr = "the {word} endpoint answers {string}")]
fn endpoint_answers(world: &mut DashboardWorld, name: String, body: String) {
    world.client.script(endpoint(&name), Scripted::Body(body));
}

#[given(expr = "the {word} endpoint refuses connections")]
fn endpoint_refuses(world: &mut DashboardWorld, name: String) {
    world.client.script(endpoint(&name), Scripted::Refused);
}

#[when(expr = "the {word} endpoint starts refusing connections")]
fn endpoint_starts_refusing(world: &mut DashboardWorld, name: String) {
    world.client.script(endpoint(&name), Scripted::Refused);
}

#[then(expr = "the {word} endpoint was requested {int} time(s)")]
fn endpoint_requested(world: &mut DashboardWorld, name: String, times: usize) {
    assert_eq!(world.client.requests_to(endpoint(&name)), times);
}

#[then(expr = "the {word} endpoint was not requested")]
fn endpoint_not_requested(world: &mut DashboardWorld, name: String) {
    assert_eq!(world.client.requests_to(endpoint(&name)), 0);
}
