use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::error::SearchError;
use crate::testing::ScriptedEndpoint;

fn controller(endpoint: ScriptedEndpoint) -> (SearchController<ScriptedEndpoint>, Arc<ScriptedEndpoint>) {
    let endpoint = Arc::new(endpoint);
    let controller = SearchController::new(Arc::clone(&endpoint), SearchOptions::default());
    (controller, endpoint)
}

fn record_selections(controller: &mut SearchController<ScriptedEndpoint>) -> Arc<Mutex<Vec<String>>> {
    let selections = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&selections);
    controller.on_select(move |value| sink.lock().unwrap().push(value.to_string()));
    selections
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn only_the_final_keystroke_of_a_burst_is_searched() {
    let (mut controller, endpoint) =
        controller(ScriptedEndpoint::new().respond("app", ["apple", "apricot"]));

    controller.input("a");
    controller.run_for(ms(100)).await;
    controller.input("ap");
    controller.run_for(ms(100)).await;
    controller.input("app");
    assert!(controller.has_pending_input());
    controller.run_for(ms(1000)).await;

    assert_eq!(endpoint.calls(), ["app"]);
    assert_eq!(controller.state().results(), ["apple", "apricot"]);
    assert_eq!(controller.state().request_count(), 1);
    assert!(!controller.has_pending_input());
}

#[tokio::test(start_paused = true)]
async fn repeated_settled_value_is_not_searched_again() {
    let (mut controller, endpoint) = controller(ScriptedEndpoint::new().respond("kiwi", ["kiwi"]));

    controller.input("kiwi");
    controller.run_for(ms(1000)).await;
    controller.input("kiwis");
    controller.run_for(ms(100)).await;
    controller.input("kiwi");
    controller.run_for(ms(1000)).await;

    assert_eq!(endpoint.calls(), ["kiwi"]);
    assert_eq!(controller.state().request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_query_updates_results() {
    let (mut controller, endpoint) = controller(
        ScriptedEndpoint::new()
            .respond_after("slow", ms(2000), ["stale"])
            .respond_after("fast", ms(100), ["fresh"]),
    );

    controller.input("slow");
    controller.run_for(ms(400)).await;
    assert!(controller.state().is_loading());

    controller.input("fast");
    controller.run_for(ms(3000)).await;

    assert_eq!(endpoint.calls(), ["slow", "fast"]);
    assert_eq!(controller.state().results(), ["fresh"]);
    assert!(!controller.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn queued_response_from_superseded_generation_is_ignored() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond_after("melon", ms(500), ["melon"]));

    controller.input("melon");
    controller.run_for(ms(400)).await;
    let stale = controller.generation.wrapping_sub(1);
    controller.resolve(
        stale,
        Outcome::Found {
            results: vec!["stale".to_string()],
            latency: ms(1),
        },
    );
    assert!(!controller.state().has_searched());
    assert!(controller.state().is_loading());

    controller.run_for(ms(1000)).await;
    assert_eq!(controller.state().results(), ["melon"]);
}

#[tokio::test(start_paused = true)]
async fn cleared_query_empties_results_without_a_request() {
    let (mut controller, endpoint) = controller(
        ScriptedEndpoint::new().fallback_error(SearchError::ServerFault { status: 500 }),
    );

    controller.input("zzz");
    controller.run_for(ms(5000)).await;
    assert!(controller.state().has_error());
    assert_eq!(endpoint.calls().len(), 3);

    controller.input("");
    controller.run_for(ms(1000)).await;

    assert_eq!(endpoint.calls().len(), 3);
    assert!(controller.state().has_searched());
    assert!(controller.state().results().is_empty());
    assert!(!controller.state().has_error());
    assert_eq!(controller.state().error().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn whitespace_query_counts_as_clear() {
    let (mut controller, endpoint) = controller(ScriptedEndpoint::new());

    controller.input("   ");
    controller.run_for(ms(1000)).await;

    assert!(endpoint.calls().is_empty());
    assert!(controller.state().has_searched());
    assert!(!controller.state().is_open());
}

#[tokio::test(start_paused = true)]
async fn single_result_auto_commits_on_enter() {
    let (mut controller, endpoint) = controller(ScriptedEndpoint::new().respond("appl", ["apple"]));
    let selections = record_selections(&mut controller);

    controller.input("appl");
    controller.run_for(ms(1000)).await;
    assert!(controller.state().is_open());
    assert_eq!(controller.state().cursor(), None);

    assert_eq!(controller.key(NavKey::Enter).as_deref(), Some("apple"));
    assert_eq!(*selections.lock().unwrap(), ["apple"]);
    assert!(!controller.state().is_open());
    assert_eq!(controller.state().query(), "apple");
    assert_eq!(controller.state().selection(), Some("apple"));

    controller.run_for(ms(1000)).await;
    assert_eq!(endpoint.calls(), ["appl"]);
}

#[tokio::test(start_paused = true)]
async fn navigation_wraps_and_commits_highlighted_row() {
    let (mut controller, _endpoint) = controller(
        ScriptedEndpoint::new().respond("berry", ["blackberry", "blueberry", "raspberry"]),
    );
    let selections = record_selections(&mut controller);

    controller.input("berry");
    controller.run_for(ms(1000)).await;

    controller.key(NavKey::Down);
    assert_eq!(controller.state().cursor(), Some(0));
    controller.key(NavKey::Down);
    controller.key(NavKey::Down);
    assert_eq!(controller.state().highlighted(), Some("raspberry"));
    controller.key(NavKey::Down);
    assert_eq!(controller.state().cursor(), None);
    controller.key(NavKey::Up);
    assert_eq!(controller.state().cursor(), Some(2));
    controller.key(NavKey::Up);

    assert_eq!(controller.key(NavKey::Enter).as_deref(), Some("blueberry"));
    assert_eq!(*selections.lock().unwrap(), ["blueberry"]);
    assert!(!controller.state().is_open());
}

#[tokio::test(start_paused = true)]
async fn enter_with_many_results_and_no_cursor_does_not_commit() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond("pe", ["peach", "pear"]));
    let selections = record_selections(&mut controller);

    controller.input("pe");
    controller.run_for(ms(1000)).await;

    assert_eq!(controller.key(NavKey::Enter), None);
    assert!(selections.lock().unwrap().is_empty());
    assert!(controller.state().is_open());
}

#[tokio::test(start_paused = true)]
async fn click_commits_exactly_once() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond("pea", ["peach", "pear"]));
    let selections = record_selections(&mut controller);

    controller.input("pea");
    controller.run_for(ms(1000)).await;

    assert_eq!(controller.select_index(9), None);
    assert_eq!(controller.select_index(1).as_deref(), Some("pear"));
    assert_eq!(*selections.lock().unwrap(), ["pear"]);
    assert!(!controller.state().is_open());
}

#[tokio::test(start_paused = true)]
async fn blur_closes_after_grace_unless_focus_returns() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond("pea", ["peach", "pear"]));

    controller.input("pea");
    controller.run_for(ms(1000)).await;
    controller.key(NavKey::Down);

    controller.blur();
    controller.run_for(ms(100)).await;
    assert!(controller.state().is_open());
    controller.focus();
    controller.run_for(ms(1000)).await;
    assert!(controller.state().is_open());
    assert_eq!(controller.state().cursor(), Some(0));

    controller.blur();
    controller.run_for(ms(300)).await;
    assert!(!controller.state().is_open());
    assert_eq!(controller.state().cursor(), None);
    assert!(!controller.state().is_focused());
}

#[tokio::test(start_paused = true)]
async fn escape_closes_and_drops_focus_then_typing_reopens() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond("pea", ["peach", "pear"]));

    controller.input("pea");
    controller.run_for(ms(1000)).await;
    controller.key(NavKey::Down);
    controller.key(NavKey::Escape);

    assert!(!controller.state().is_open());
    assert_eq!(controller.state().cursor(), None);
    assert!(!controller.state().is_focused());

    controller.input("pear");
    assert!(controller.state().is_open());
    assert!(controller.state().is_focused());
}

#[tokio::test(start_paused = true)]
async fn three_failures_raise_the_toast_until_dismissed() {
    let (mut controller, _endpoint) = controller(
        ScriptedEndpoint::new().fallback_error(SearchError::ServerFault { status: 500 }),
    );

    for (round, query) in ["a", "b", "c"].into_iter().enumerate() {
        assert!(!controller.state().toast_visible(), "round {round}");
        controller.input(query);
        controller.run_for(ms(5000)).await;
    }

    let state = controller.state();
    assert_eq!(state.error().count(), 3);
    assert!(state.toast_visible());
    assert_eq!(
        state.error().message(),
        Some("server error, please try again later")
    );
    assert!(state.results().is_empty());

    controller.dismiss_toast();
    assert!(!controller.state().toast_visible());
}

#[tokio::test(start_paused = true)]
async fn toast_dismisses_itself() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().fallback_error(SearchError::ConnectionRefused));

    for query in ["a", "b", "c"] {
        controller.input(query);
        controller.run_for(ms(5000)).await;
    }
    assert!(controller.state().toast_visible());

    controller.run_for(ms(5000)).await;
    assert!(!controller.state().toast_visible());
    assert_eq!(controller.state().error().count(), 3);
    assert!(controller.state().has_error());
}

#[tokio::test(start_paused = true)]
async fn retry_clears_error_and_reissues_last_query() {
    let failure = SearchError::ServerFault { status: 503 };
    let (mut controller, endpoint) = controller(
        ScriptedEndpoint::new()
            .fail("kiwi", failure.clone())
            .fail("kiwi", failure.clone())
            .fail("kiwi", failure)
            .respond("kiwi", ["kiwi"]),
    );

    controller.input("kiwi");
    controller.run_for(ms(5000)).await;
    assert!(controller.state().has_error());

    controller.retry();
    assert!(!controller.state().has_error());
    assert!(controller.state().is_loading());

    controller.run_for(ms(1000)).await;
    assert_eq!(controller.state().results(), ["kiwi"]);
    assert_eq!(endpoint.calls().len(), 4);
    assert_eq!(controller.state().error().count(), 1);
    assert_eq!(controller.state().request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_endpoint_reports_timeout() {
    let (mut controller, endpoint) =
        controller(ScriptedEndpoint::new().respond_after("date", ms(10_000), ["date"]));

    controller.input("date");
    controller.run_for(ms(20_000)).await;

    assert_eq!(endpoint.calls().len(), 3);
    assert_eq!(controller.state().error().message(), Some("request timed out"));
    assert!(!controller.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn successful_leg_latency_is_recorded() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond_after("fig", ms(250), ["fig"]));

    controller.input("fig");
    controller.run_for(ms(1000)).await;

    let latency = controller.state().last_latency().unwrap();
    assert!(latency >= ms(250) && latency <= ms(260), "{latency:?}");
}

#[tokio::test(start_paused = true)]
async fn clear_supersedes_the_pipeline_in_flight() {
    let (mut controller, _endpoint) = controller(
        ScriptedEndpoint::new()
            .respond("lim", ["lime"])
            .respond_after("lemo", ms(2000), ["lemon"]),
    );

    controller.input("lim");
    controller.run_for(ms(1000)).await;
    controller.select_index(0);
    assert_eq!(controller.state().selection(), Some("lime"));

    controller.input("lemo");
    controller.run_for(ms(500)).await;
    assert!(controller.state().is_loading());

    controller.clear();
    controller.run_for(ms(3000)).await;

    let state = controller.state();
    assert_eq!(state.query(), "");
    assert_eq!(state.selection(), None);
    assert!(state.results().is_empty());
    assert!(!state.is_open());
    assert!(!state.is_loading());
}

#[tokio::test(start_paused = true)]
async fn remove_selection_keeps_query() {
    let (mut controller, _endpoint) = controller(ScriptedEndpoint::new().respond("lim", ["lime"]));

    controller.input("lim");
    controller.run_for(ms(1000)).await;
    controller.key(NavKey::Enter);
    controller.remove_selection();

    assert_eq!(controller.state().selection(), None);
    assert_eq!(controller.state().query(), "lime");
}

#[tokio::test(start_paused = true)]
async fn reopening_after_tab_starts_unselected() {
    let (mut controller, _endpoint) =
        controller(ScriptedEndpoint::new().respond("pe", ["peach", "pear", "persimmon"]));
    let selections = record_selections(&mut controller);

    controller.input("pe");
    controller.run_for(ms(1000)).await;
    controller.key(NavKey::Down);
    controller.key(NavKey::Down);
    assert_eq!(controller.state().highlighted(), Some("pear"));

    controller.key(NavKey::Tab);
    assert!(!controller.state().is_open());
    controller.key(NavKey::Down);
    assert!(controller.state().is_open());
    assert_eq!(controller.state().cursor(), None);
    assert_eq!(controller.key(NavKey::Enter), None);

    controller.key(NavKey::Down);
    controller.key(NavKey::Tab);
    controller.input("pea");
    assert!(controller.state().is_open());
    assert_eq!(controller.state().cursor(), None);
    assert!(selections.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn commit_supersedes_the_pipeline_in_flight() {
    let (mut controller, endpoint) = controller(
        ScriptedEndpoint::new()
            .respond("ap", ["apple", "apricot"])
            .respond_after("apr", ms(2000), ["apricot"]),
    );

    controller.input("ap");
    controller.run_for(ms(1000)).await;
    controller.input("apr");
    controller.run_for(ms(500)).await;
    assert!(controller.state().is_loading());

    controller.key(NavKey::Down);
    assert_eq!(controller.key(NavKey::Enter).as_deref(), Some("apple"));
    assert!(!controller.state().is_loading());

    controller.run_for(ms(3000)).await;

    let state = controller.state();
    assert_eq!(endpoint.calls(), ["ap", "apr"]);
    assert_eq!(state.query(), "apple");
    assert_eq!(state.selection(), Some("apple"));
    assert_eq!(state.results(), ["apple", "apricot"]);
    assert!(!state.is_loading());
    assert!(!state.has_error());
}
