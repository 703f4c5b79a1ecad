//! End-to-end adapter tests: JSON lines in, JSON lines out.

use std::io::Cursor;

use serde_json::Value;
use tui_2048::adapter::{run, Session};
use tui_2048::core::EngineConfig;

fn serve(input: &str) -> (usize, Vec<Value>) {
    serve_bytes(input.as_bytes())
}

fn serve_bytes(input: &[u8]) -> (usize, Vec<Value>) {
    let mut session = Session::new(EngineConfig::default(), 42).unwrap();
    let mut out = Vec::new();
    let handled = run(&mut session, Cursor::new(input), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let replies = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (handled, replies)
}

fn tile_count(reply: &Value) -> usize {
    reply["grid"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|v| v.as_u64().unwrap() != 0)
        .count()
}

#[test]
fn adapter_writes_initial_state_before_any_request() {
    let (handled, replies) = serve("");
    assert_eq!(handled, 0);
    assert_eq!(replies.len(), 1);

    let first = &replies[0];
    assert_eq!(first["type"], "state");
    assert_eq!(first["seq"], 0);
    assert_eq!(first["changed"], false);
    assert_eq!(first["score"], 0);
    assert_eq!(first["grid"].as_array().unwrap().len(), 4);
    assert_eq!(tile_count(first), 2);
}

#[test]
fn adapter_answers_each_request_once_and_skips_blank_lines() {
    let input = concat!(
        r#"{"type":"observe","seq":1}"#,
        "\n\n   \n",
        r#"{"type":"move","seq":2,"direction":"left"}"#,
        "\n",
        r#"{"type":"move","seq":3,"direction":"sideways"}"#,
        "\n",
        r#"{"type":"observe","seq":4}"#,
        "\n",
    );
    let (handled, replies) = serve(input);
    assert_eq!(handled, 4);
    assert_eq!(replies.len(), 5);

    let seqs: Vec<u64> = replies.iter().map(|r| r["seq"].as_u64().unwrap()).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3, 4]);

    assert_eq!(replies[1]["type"], "state");
    assert_eq!(replies[2]["type"], "state");

    assert_eq!(replies[3]["type"], "error");
    assert_eq!(replies[3]["code"], "invalid_argument");

    // The rejected move left the game alone.
    assert_eq!(replies[4]["grid"], replies[2]["grid"]);
    assert_eq!(replies[4]["moves"], replies[2]["moves"]);
}

#[test]
fn adapter_move_reply_matches_engine_rules() {
    let input = concat!(
        r#"{"type":"new","seq":1,"seed":7}"#,
        "\n",
        r#"{"type":"move","seq":2,"direction":"up"}"#,
        "\n",
        r#"{"type":"move","seq":3,"direction":"down"}"#,
        "\n",
    );
    let (_, replies) = serve(input);

    for pair in replies[1..].windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        let gained = after["score_gained"].as_u64().unwrap();
        assert_eq!(
            after["score"].as_u64().unwrap(),
            before["score"].as_u64().unwrap() + gained
        );
        if after["changed"].as_bool().unwrap() {
            assert_eq!(after["moves"].as_u64().unwrap(), before["moves"].as_u64().unwrap() + 1);
        } else {
            assert_eq!(after["grid"], before["grid"]);
            assert_eq!(gained, 0);
        }
    }
}

#[test]
fn adapter_new_game_is_reproducible_from_seed() {
    let input = concat!(
        r#"{"type":"new","seq":1,"seed":123}"#,
        "\n",
        r#"{"type":"move","seq":2,"direction":"right"}"#,
        "\n",
    );
    let (_, a) = serve(input);
    let (_, b) = serve(input);
    assert_eq!(a, b);
}

#[test]
fn adapter_new_game_with_config_changes_grid_size() {
    let input = concat!(
        r#"{"type":"new","seq":1,"seed":5,"config":{"grid_size":6}}"#,
        "\n"
    );
    let (_, replies) = serve(input);
    let grid = replies[1]["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 6);
    assert!(grid.iter().all(|row| row.as_array().unwrap().len() == 6));
    assert_eq!(tile_count(&replies[1]), 2);
}

#[test]
fn adapter_rejects_bad_config_and_keeps_current_game() {
    let input = concat!(
        r#"{"type":"new","seq":1,"config":{"grid_size":1}}"#,
        "\n",
        r#"{"type":"observe","seq":2}"#,
        "\n",
    );
    let (_, replies) = serve(input);
    assert_eq!(replies[1]["type"], "error");
    assert_eq!(replies[1]["code"], "invalid_config");
    assert_eq!(replies[2]["grid"], replies[0]["grid"]);
}

#[test]
fn adapter_reports_parse_and_type_errors() {
    let input = concat!(
        "not json\n",
        r#"{"type":"move","seq":5}"#,
        "\n",
        r#"{"type":"undo","seq":6}"#,
        "\n",
    );
    let (handled, replies) = serve(input);
    assert_eq!(handled, 3);

    assert_eq!(replies[1]["code"], "parse_error");
    assert_eq!(replies[1]["seq"], 0);

    // Missing direction: the seq is still recovered.
    assert_eq!(replies[2]["code"], "parse_error");
    assert_eq!(replies[2]["seq"], 5);

    assert_eq!(replies[3]["code"], "unknown_type");
    assert_eq!(replies[3]["seq"], 6);
}

#[test]
fn adapter_survives_non_utf8_line() {
    let mut input = Vec::new();
    input.extend_from_slice(br#"{"type":"observe","seq":1}"#);
    input.extend_from_slice(b"\n\xff\xfe\n");
    input.extend_from_slice(br#"{"type":"observe","seq":3}"#);
    input.extend_from_slice(b"\n");

    let (handled, replies) = serve_bytes(&input);
    assert_eq!(handled, 3);
    assert_eq!(replies.len(), 4);

    assert_eq!(replies[2]["type"], "error");
    assert_eq!(replies[2]["code"], "parse_error");
    assert_eq!(replies[2]["seq"], 0);

    assert_eq!(replies[3]["type"], "state");
    assert_eq!(replies[3]["seq"], 3);
    assert_eq!(replies[3]["grid"], replies[1]["grid"]);
}

#[test]
fn adapter_rejects_configs_past_the_tile_ceiling() {
    let input = concat!(
        r#"{"type":"new","seq":1,"config":{"grid_size":2,"win_value":9223372036854775808,"tile_weights":[{"value":4611686018427387904,"probability":1.0}]}}"#,
        "\n",
        r#"{"type":"move","seq":2,"direction":"left"}"#,
        "\n",
    );
    let (handled, replies) = serve(input);
    assert_eq!(handled, 2);
    assert_eq!(replies[1]["code"], "invalid_config");
    assert_eq!(replies[2]["type"], "state");
    assert_eq!(replies[2]["grid"].as_array().unwrap().len(), 4);
}
