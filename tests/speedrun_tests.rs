mod common;

use std::collections::HashMap;

use common::{Reply, StubServer, temp_path};
use record_stats_collector::CollectError;
use record_stats_collector::config::SubcategoryTarget;
use record_stats_collector::model::Envelope;
use record_stats_collector::model::game::{Category, Game, Variable};
use record_stats_collector::model::run::RunsPage;
use record_stats_collector::progression::{record_progression, sort_runs_by_date};
use record_stats_collector::speedrun::{SpeedrunApi, collect, collect_pages, select_category, select_game, select_variable_value};

const FIRST_PAGE: &str = "https://www.speedrun.com/api/v1/runs?game=nd28z0ed&category=w20p1vzd";
const SECOND_PAGE: &str = "https://www.speedrun.com/api/v1/runs?offset=2";

fn load_categories() -> Vec<Category> {
    let doc: Envelope<Vec<Category>> = serde_json::from_str(include_str!("fixtures/categories.json")).unwrap();
    doc.data
}

fn load_variables() -> Vec<Variable> {
    let doc: Envelope<Vec<Variable>> = serde_json::from_str(include_str!("fixtures/variables.json")).unwrap();
    doc.data
}

fn page_fixtures() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (FIRST_PAGE, include_str!("fixtures/runs_page_1.json")),
        (SECOND_PAGE, include_str!("fixtures/runs_page_2.json")),
    ])
}

#[test]
fn category_match_is_exact_and_case_insensitive() {
    let categories = load_categories();
    let any = select_category(&categories, "ANY%").expect("Any% category");
    assert_eq!(any.id, "w20p1vzd");
    // A prefix of a longer name is not a match
    assert!(select_category(&categories, "Any% Glitch").is_none());
    assert!(select_category(&categories, "Low%").is_none());
}

#[test]
fn variable_value_resolves_ids_and_label() {
    let variables = load_variables();
    let (var_id, val_id, label) =
        select_variable_value(&variables, "any% - subcategories", "GLITCHLESS").expect("sub-category");
    assert_eq!(var_id, "wl33kewl");
    assert_eq!(val_id, "4qyxop2l");
    assert_eq!(label, "Glitchless");

    assert!(select_variable_value(&variables, "Any% - Subcategories", "No Major Glitches").is_none());
    assert!(select_variable_value(&variables, "Region", "Glitchless").is_none());
}

#[test]
fn game_lookup_takes_first_search_hit() {
    let games: Envelope<Vec<Game>> = serde_json::from_value(serde_json::json!({
        "data": [
            { "id": "nd28z0ed", "names": { "international": "Elden Ring" } },
            { "id": "k6qg0xdg", "names": { "international": "Elden Ring Category Extensions" } }
        ]
    }))
    .unwrap();
    assert_eq!(select_game(&games.data).map(|g| g.id.as_str()), Some("nd28z0ed"));
    assert!(select_game(&[]).is_none());
}

#[test]
fn follows_next_links_until_exhausted() {
    let fixtures = page_fixtures();
    let mut requested: Vec<String> = Vec::new();
    let runs = collect_pages(FIRST_PAGE.to_string(), |url| {
        requested.push(url.to_string());
        let body = fixtures.get(url).expect("unexpected url");
        Ok(serde_json::from_str::<RunsPage>(body).expect("page fixture"))
    })
    .expect("pagination");

    assert_eq!(requested, vec![FIRST_PAGE.to_string(), SECOND_PAGE.to_string()]);
    let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["run1", "run2", "run3", "run4"]);
}

#[test]
fn failed_page_aborts_the_walk() {
    let fixtures = page_fixtures();
    let result = collect_pages(FIRST_PAGE.to_string(), |url| {
        if url == SECOND_PAGE {
            return Err(CollectError::Status { url: url.to_string(), status: 503 });
        }
        Ok(serde_json::from_str::<RunsPage>(fixtures[url]).unwrap())
    });
    match result {
        Err(CollectError::Status { url, status }) => {
            assert_eq!(url, SECOND_PAGE);
            assert_eq!(status, 503);
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn fixture_pages_produce_record_history() {
    let fixtures = page_fixtures();
    let runs = collect_pages(FIRST_PAGE.to_string(), |url| {
        Ok(serde_json::from_str::<RunsPage>(fixtures[url]).unwrap())
    })
    .unwrap();

    let sorted = sort_runs_by_date(runs);
    assert_eq!(sorted.len(), 3, "undated run4 is dropped");

    let history = record_progression(&sorted, "wl33kewl", "4qyxop2l");
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].player, "Distortion2");
    assert_eq!(history[0].time_formatted, "1:30:00");
    assert_eq!(history[0].video_link, "https://www.youtube.com/watch?v=abc123_-X");

    assert_eq!(history[1].player, "LilAggy");
    assert_eq!(history[1].date, "2022-03-10");
    assert_eq!(history[1].time_seconds, 4980.25);
    assert_eq!(history[1].video_link, "N/A");
}

const TARGET: SubcategoryTarget = SubcategoryTarget {
    game: "Elden Ring",
    category: "Any%",
    variable: "Any% - Subcategories",
    value: "Glitchless",
};

/// One page of runs, dated one day apart, all set to `value_id` for the sub-category variable.
fn runs_body(times: &[f64], value_id: &str) -> String {
    let runs: Vec<serde_json::Value> = times
        .iter()
        .enumerate()
        .map(|(i, t)| {
            serde_json::json!({
                "id": format!("r{}", i),
                "weblink": format!("https://www.speedrun.com/er/run/r{}", i),
                "date": format!("2022-03-{:02}", i + 1),
                "times": { "primary_t": t },
                "players": { "data": [ { "rel": "guest", "name": format!("Runner{}", i) } ] },
                "values": { "wl33kewl": value_id }
            })
        })
        .collect();
    serde_json::json!({ "data": runs, "pagination": { "links": [] } }).to_string()
}

fn speedrun_stub(runs: String) -> StubServer {
    StubServer::start(move |line| {
        if line.starts_with("GET /games?name=") {
            Reply::ok(r#"{ "data": [ { "id": "nd28z0ed", "names": { "international": "Elden Ring" } } ] }"#)
        } else if line.starts_with("GET /games/nd28z0ed/categories ") {
            Reply::ok(include_str!("fixtures/categories.json"))
        } else if line.starts_with("GET /categories/w20p1vzd/variables ") {
            Reply::ok(include_str!("fixtures/variables.json"))
        } else if line.starts_with("GET /runs?") {
            Reply::ok(runs.clone())
        } else {
            Reply { status: 404, body: r#"{ "status": 404 }"#.to_string() }
        }
    })
}

#[test]
fn collect_queries_api_and_writes_record_csv() {
    let server = speedrun_stub(runs_body(&[120.0, 130.0, 110.0, 110.0, 90.0], "4qyxop2l"));
    let out_path = temp_path("speedrun-records.csv");
    let _ = std::fs::remove_file(&out_path);

    let summary = collect(&SpeedrunApi::new(server.base_url.clone()), &TARGET, &out_path).expect("collect");
    assert!(summary.contains("3 records"), "summary was: {}", summary);

    assert_eq!(
        server.request_lines(),
        vec![
            "GET /games?name=Elden%20Ring HTTP/1.1",
            "GET /games/nd28z0ed/categories HTTP/1.1",
            "GET /categories/w20p1vzd/variables HTTP/1.1",
            "GET /runs?game=nd28z0ed&category=w20p1vzd&status=verified&obsoleted=true&orderby=date&direction=asc&embed=players HTTP/1.1",
        ]
    );

    let csv = std::fs::read_to_string(&out_path).expect("csv written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "date,player,time_seconds,time_formatted,run_link,video_link",
            "2022-03-01,Runner0,120.0,0:02:00,https://www.speedrun.com/er/run/r0,N/A",
            "2022-03-03,Runner2,110.0,0:01:50,https://www.speedrun.com/er/run/r2,N/A",
            "2022-03-05,Runner4,90.0,0:01:30,https://www.speedrun.com/er/run/r4,N/A",
        ]
    );
    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn collect_writes_nothing_when_no_run_matches_subcategory() {
    // Every run is in the Glitched sub-category
    let server = speedrun_stub(runs_body(&[120.0, 90.0], "mln68v0q"));
    let out_path = temp_path("speedrun-empty.csv");
    let _ = std::fs::remove_file(&out_path);

    let summary = collect(&SpeedrunApi::new(server.base_url.clone()), &TARGET, &out_path).expect("clean exit");
    assert_eq!(summary, "Speedrun: no record history (skipped)");
    assert!(!out_path.exists(), "no CSV should be written");
}

#[test]
fn collect_reports_unknown_category() {
    let server = speedrun_stub(runs_body(&[], "4qyxop2l"));
    let target = SubcategoryTarget { category: "Low%", ..TARGET };
    let err = collect(&SpeedrunApi::new(server.base_url.clone()), &target, &temp_path("unused.csv")).unwrap_err();
    assert!(matches!(err, CollectError::NotFound(ref what) if what.contains("Low%")), "error was: {}", err);
    // Resolution stops before any run is requested
    assert!(server.request_lines().iter().all(|l| !l.starts_with("GET /runs")));
}
