#![allow(clippy::float_cmp)]

use canvas::engine::{EngineConfig, NoticeLevel};

use super::*;

// =============================================================
// Helpers
// =============================================================

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("floorplan-{tag}-{}", canvas::doc::new_id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn session(out_dir: PathBuf) -> Session {
    let base = out_dir.clone();
    Session::new(EngineCore::new(EngineConfig::default()), out_dir, base)
}

fn messages(session: &Session) -> Vec<String> {
    session.notices().iter().map(|n| n.message.clone()).collect()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_tagged_steps() {
    let text = r#"
# set up
{"op": "create_floor", "name": "VIP", "width": 1000, "height": 800}
{"op": "place", "kind": "slot-machine", "x": 100, "y": 120}

{"op": "drag_cancel"}
"#;
    let steps = parse_script(text).unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], (3, ScriptStep::CreateFloor { name: "VIP".into(), width: 1000.0, height: 800.0 }));
    assert_eq!(steps[1].1, ScriptStep::Place { kind: ObjectKind::SlotMachine, x: 100.0, y: 120.0 });
    assert_eq!(steps[2], (6, ScriptStep::DragCancel));
}

#[test]
fn optional_fields_default() {
    let steps = parse_script(r#"{"op": "drag_end", "x": 5, "y": 6}"#).unwrap();
    assert_eq!(steps[0].1, ScriptStep::DragEnd { x: 5.0, y: 6.0, dx: 0.0, dy: 0.0, outside: false });
    let steps = parse_script(r#"{"op": "export"}"#).unwrap();
    assert_eq!(steps[0].1, ScriptStep::Export { floor: None });
}

#[test]
fn parse_error_reports_line() {
    let err = parse_script("{\"op\": \"drag_cancel\"}\n{\"op\": \"teleport\"}").unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    assert_eq!(err.error_code(), "E_SCRIPT_PARSE");
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let err = parse_script(r#"{"op": "place", "kind": "craps", "x": 1, "y": 1}"#).unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
}

// =============================================================
// Replay
// =============================================================

#[tokio::test]
async fn replay_places_edits_and_exports() {
    let dir = temp_dir("replay");
    let mut s = session(dir.clone());
    let text = r#"
{"op": "place", "kind": "roulette", "x": 300, "y": 200}
{"op": "edit", "object": "ROULETTE 1", "name": "Wheel A", "x": "10"}
{"op": "rotate", "object": "Wheel A"}
{"op": "export"}
"#;
    let steps = replay(&mut s, text).await.unwrap();
    assert_eq!(steps, 4);
    assert_eq!(
        messages(&s),
        vec![
            "ROULETTE 1 added to floor",
            "Object properties updated",
            "Object rotated",
            "Floor plan exported successfully!",
        ]
    );

    let path = dir.join("Main_Floor_floor_plan.json");
    assert_eq!(s.exports(), &[path.clone()]);
    let written = std::fs::read_to_string(&path).unwrap();
    let doc = canvas::export::import(&written).unwrap();
    let obj = &doc.floor.objects[0];
    assert_eq!(obj.name, "Wheel A");
    assert_eq!((obj.x, obj.y), (10.0, 150.0));
    assert_eq!(obj.rotation, 90.0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn rejected_steps_become_error_notices() {
    let dir = temp_dir("reject");
    let mut s = session(dir.clone());
    let text = r#"
{"op": "create_floor", "name": "Tiny", "width": 100, "height": 100}
{"op": "place", "kind": "table", "x": 100, "y": 100}
{"op": "edit", "object": "TABLE 1", "name": "   "}
"#;
    replay(&mut s, text).await.unwrap();
    let levels: Vec<NoticeLevel> = s.notices().iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![NoticeLevel::Error, NoticeLevel::Success, NoticeLevel::Error]);
    assert_eq!(s.core().store.floor_count(), 1);
    assert_eq!(s.core().active_floor().unwrap().objects[0].name, "TABLE 1");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn floors_are_addressed_by_name() {
    let dir = temp_dir("floors");
    let mut s = session(dir.clone());
    let text = r#"
{"op": "create_floor", "name": "VIP", "width": 1000, "height": 800}
{"op": "place", "kind": "poker-table", "x": 500, "y": 400}
{"op": "select_floor", "floor": "Main Floor"}
{"op": "place", "kind": "table", "x": 50, "y": 50}
{"op": "update_floor", "floor": "VIP", "width": 400}
{"op": "delete_floor", "floor": "Main Floor"}
"#;
    replay(&mut s, text).await.unwrap();
    let core = s.core();
    assert_eq!(core.store.floor_count(), 1);
    let vip = core.active_floor().unwrap();
    assert_eq!(vip.name, "VIP");
    assert_eq!(vip.width, 400.0);
    assert_eq!(vip.objects.len(), 1);
    assert_eq!(vip.objects[0].x, 280.0);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn drag_steps_drive_gesture() {
    let dir = temp_dir("drag");
    let mut s = session(dir.clone());
    let text = r#"
{"op": "place", "kind": "blackjack", "x": 100, "y": 100}
{"op": "drag_object", "object": "BLACKJACK 1"}
{"op": "drag_move", "dx": 15, "dy": 5}
{"op": "drag_end", "x": 0, "y": 0, "dx": 30, "dy": 10}
{"op": "drag_palette", "kind": "table"}
{"op": "drag_end", "x": 200, "y": 200, "outside": true}
"#;
    replay(&mut s, text).await.unwrap();
    let floor = s.core().active_floor().unwrap();
    assert_eq!(floor.objects.len(), 1);
    assert_eq!((floor.objects[0].x, floor.objects[0].y), (90.0, 80.0));
    assert!(!s.core().is_dragging());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn select_and_remove_clear_selection() {
    let dir = temp_dir("select");
    let mut s = session(dir.clone());
    let text = r#"
{"op": "place", "kind": "table", "x": 100, "y": 100}
{"op": "select", "object": "TABLE 1"}
{"op": "remove", "object": "TABLE 1"}
"#;
    replay(&mut s, text).await.unwrap();
    assert!(s.core().selection().is_none());
    assert!(s.core().active_floor().unwrap().objects.is_empty());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn background_resolves_against_base_dir() {
    let dir = temp_dir("background");
    std::fs::write(dir.join("plan.png"), b"hello").unwrap();
    let mut s = session(dir.clone());
    replay(&mut s, r#"{"op": "background", "path": "plan.png"}"#).await.unwrap();
    assert_eq!(
        s.core().active_floor().unwrap().background_image.as_deref(),
        Some("data:image/png;base64,aGVsbG8=")
    );
    replay(&mut s, r#"{"op": "update_floor", "clear_background": true}"#).await.unwrap();
    assert!(s.core().active_floor().unwrap().background_image.is_none());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn unknown_references_stop_replay() {
    let dir = temp_dir("unknown");
    let mut s = session(dir.clone());
    let err = replay(&mut s, r#"{"op": "rotate", "object": "Ghost"}"#).await.unwrap_err();
    assert!(matches!(err, ScriptError::UnknownObject { ref object, .. } if object == "Ghost"));
    let err = replay(&mut s, r#"{"op": "select_floor", "floor": "Attic"}"#).await.unwrap_err();
    assert_eq!(err.error_code(), "E_SCRIPT_UNKNOWN_FLOOR");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn export_stays_inside_out_dir() {
    let dir = temp_dir("escape");
    let out = dir.join("out");
    let mut s = session(out.clone());
    let text = r#"
{"op": "create_floor", "name": "../escaped", "width": 800, "height": 600}
{"op": "export"}
{"op": "create_floor", "name": "/tmp/rooted", "width": 800, "height": 600}
{"op": "export"}
"#;
    replay(&mut s, text).await.unwrap();
    assert_eq!(
        s.exports(),
        &[out.join(".._escaped_floor_plan.json"), out.join("_tmp_rooted_floor_plan.json")]
    );
    assert!(s.exports().iter().all(|p| p.parent() == Some(out.as_path()) && p.exists()));
    assert!(!dir.join("escaped_floor_plan.json").exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn export_path_refuses_anything_but_a_plain_name() {
    let s = session(PathBuf::from("out"));
    assert_eq!(s.export_path("plan.json").unwrap(), PathBuf::from("out/plan.json"));
    for name in ["../plan.json", "/plan.json", "a/plan.json", "..", ""] {
        let err = s.export_path(name).unwrap_err();
        assert_eq!(err.error_code(), "E_SCRIPT_EXPORT_NAME", "{name}");
    }
}

#[test]
fn script_dir_of_bare_file_is_current_dir() {
    assert_eq!(script_dir(Path::new("/data/session.jsonl")), PathBuf::from("/data"));
    assert_eq!(script_dir(Path::new("session.jsonl")), PathBuf::from(""));
}
