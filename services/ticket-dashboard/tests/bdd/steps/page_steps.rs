//! BDD step definitions for page setup

use std::sync::Arc;

use cucumber::{given, then};

use ticket_dashboard::page::{MemoryPage, Page};

use crate::world::DashboardWorld;

#[given("a page with every dashboard element")]
fn full_page(world: &mut DashboardWorld) {
    world.page = Some(Arc::new(MemoryPage::for_config(&world.config)));
}

#[given("a page with a status display")]
fn status_page(world: &mut DashboardWorld) {
    let page = MemoryPage::new().with_text(&world.config.status.element_id);
    world.page = Some(Arc::new(page));
}

#[given("a page with a log display")]
fn log_page(world: &mut DashboardWorld) {
    let page = MemoryPage::new().with_text(&world.config.logs.element_id);
    world.page = Some(Arc::new(page));
}

#[given("a page with a chart canvas")]
fn chart_page(world: &mut DashboardWorld) {
    let page = MemoryPage::new().with_canvas(&world.config.stats.canvas_id);
    world.page = Some(Arc::new(page));
}

#[given("a page without a chart canvas")]
fn page_without_canvas(world: &mut DashboardWorld) {
    let config = &world.config;
    let page = MemoryPage::new()
        .with_text(&config.status.element_id)
        .with_text(&config.logs.element_id);
    world.page = Some(Arc::new(page));
}

#[given("a page with status and log displays but no refresh control")]
fn page_without_refresh_control(world: &mut DashboardWorld) {
    let config = &world.config;
    let page = MemoryPage::new()
        .with_text(&config.status.element_id)
        .with_text(&config.logs.element_id)
        .with_canvas(&config.stats.canvas_id);
    world.page = Some(Arc::new(page));
}

#[given(expr = "the status display shows {string}")]
fn status_display_preset(world: &mut DashboardWorld, text: String) {
    let id = world.config.status.element_id.clone();
    world.page().set_text(&id, &text).unwrap();
}

#[given(expr = "the log display shows {string}")]
fn log_display_preset(world: &mut DashboardWorld, text: String) {
    let id = world.config.logs.element_id.clone();
    world.page().set_text(&id, &text).unwrap();
}

#[then(expr = "the status display should show {string}")]
fn status_display_shows(world: &mut DashboardWorld, expected: String) {
    let text = world.page().text(&world.config.status.element_id);
    assert_eq!(text.as_deref(), Some(expected.as_str()));
}

#[then(expr = "the log display should show {string}")]
fn log_display_shows(world: &mut DashboardWorld, expected: String) {
    let text = world.page().text(&world.config.logs.element_id);
    assert_eq!(text.as_deref(), Some(expected.as_str()));
}

#[then(expr = "the log display should show the lines {string} one per line")]
fn log_display_shows_lines(world: &mut DashboardWorld, lines: String) {
    let expected = lines.split(',').collect::<Vec<_>>().join("\n");
    let text = world.page().text(&world.config.logs.element_id);
    assert_eq!(text, Some(expected));
}
