//! Render tests using RenderHarness

use counter_demo::action::{update_counter, CounterAction};
use counter_demo::components::{Counter, HelpBar, Step};
use counter_demo::reducer::reducer;
use counter_demo::state::CounterState;
use slomux::testing::RenderHarness;
use slomux::{Host, Provider, Rect, Store};

fn mount_all(state: CounterState) -> (Host, Store<CounterState, CounterAction>) {
    let store = Store::new(state, reducer);
    let mut host = Host::new();
    let root = host.provide(None, Provider::new(store.clone())).unwrap();
    host.mount(Some(root), Step::default(), Rect::new(0, 0, 60, 5)).unwrap();
    host.mount(Some(root), Counter::default(), Rect::new(0, 5, 60, 3)).unwrap();
    host.mount(Some(root), HelpBar, Rect::new(0, 8, 60, 1)).unwrap();
    (host, store)
}

#[test]
fn test_render_initial_state() {
    let mut render = RenderHarness::new(60, 9);
    let (mut host, _store) = mount_all(CounterState::default());

    let output = render.render_host(&mut host).unwrap();

    assert!(output.contains("Step"), "Should show step title");
    assert!(output.contains("Step size: 1"), "Should show step size");
    assert!(output.contains("[-]  1  [+]"), "Should show counter");
    assert!(output.contains("quit"), "Should show help");
}

#[test]
fn test_render_after_dispatch() {
    let mut render = RenderHarness::new(60, 9);
    let (mut host, store) = mount_all(CounterState::new(10, 4));
    render.render_host(&mut host).unwrap();

    store.dispatch(update_counter(2));
    let output = render.render_host(&mut host).unwrap();

    assert!(output.contains("[-]  18  [+]"), "Counter moves by step");
    assert!(output.contains("Step size: 4"), "Reused step output stays painted");
}

#[test]
fn test_render_slider_position() {
    let mut render = RenderHarness::new(60, 9);
    let (mut host, _store) = mount_all(CounterState::new(0, 3));

    let output = render.render_host(&mut host).unwrap();

    assert!(output.contains("1 ──────●────── 5"), "Slider marks step 3");
}
