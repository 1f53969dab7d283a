//! HTTP round trips against a temporary SQLite database.

use std::collections::HashSet;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use leitner_words::config::StudyConfig;
use leitner_words::db;
use leitner_words::handlers;
use leitner_words::state::AppState;
use leitner_words::store::SqliteStore;
use leitner_words::trainer::Trainer;

struct TestApp {
    server: TestServer,
    _temp: TempDir,
}

/// `count` words per level 1..=levels, seeded from a JSON file
fn setup(levels: i64, count: usize) -> TestApp {
    let temp = TempDir::new().unwrap();
    let words: Vec<Value> = (1..=levels)
        .flat_map(|level| {
            (0..count).map(move |i| {
                json!({
                    "prompt": format!("prompt-{level}-{i}"),
                    "answer": format!("answer-{level}-{i}"),
                    "level": level,
                })
            })
        })
        .collect();
    let seed_path = temp.path().join("words.json");
    std::fs::write(&seed_path, serde_json::to_string(&words).unwrap()).unwrap();

    let pool = db::init_db(&temp.path().join("leitner.db")).unwrap();
    {
        let conn = db::try_lock(&pool).unwrap();
        db::seed_words(&conn, &seed_path).unwrap();
    }

    let trainer = Trainer::with_sqlite(SqliteStore::new(pool), StudyConfig::default());
    let server = TestServer::new(handlers::router(AppState::new(trainer))).unwrap();
    TestApp {
        server,
        _temp: temp,
    }
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_new_learner_gets_session_with_wrong_answers() {
    let app = setup(3, 20);

    let response = app.server.get("/username/Test1/level/2").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let words = body.as_array().unwrap();
    assert_eq!(words.len(), 10);

    let mut distractors = HashSet::new();
    for word in words {
        assert!(word["level"].as_i64().unwrap() <= 2);
        let wrong = word["wrong_answers"].as_array().unwrap();
        assert_eq!(wrong.len(), 4);
        for answer in wrong {
            assert_ne!(answer, &word["answer"]);
            assert!(distractors.insert(answer.as_str().unwrap().to_string()));
        }
    }
}

#[tokio::test]
async fn test_session_without_wrong_answers() {
    let app = setup(1, 15);

    let response = app
        .server
        .get("/username/Test1/level/1/without_wrong_answers")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let session = ids(&body);
    assert_eq!(session.len(), 10);
    assert_eq!(session.iter().collect::<HashSet<_>>().len(), 10);
    assert!(body[0].get("wrong_answers").is_none());
}

#[tokio::test]
async fn test_answers_move_words_through_boxes() {
    let app = setup(1, 15);
    let body: Value = app
        .server
        .get("/username/Test1/level/1/without_wrong_answers")
        .await
        .json();
    let word = ids(&body)[0];

    let first: Value = app
        .server
        .put(&format!("/username/Test1/wordId/{word}/result/true"))
        .await
        .json();
    assert_eq!(first["from"], json!({ "state": "unseen" }));
    assert_eq!(first["to"], "B");
    assert!(first["learner_stats"].is_null());

    let second: Value = app
        .server
        .put(&format!("/username/Test1/wordId/{word}/result/false"))
        .await
        .json();
    assert_eq!(second["to"], "A");
    assert_eq!(second["learner_stats"]["times_appeared"], 1);
    assert_eq!(second["learner_stats"]["correct_answered"], 0);
    assert_eq!(second["word_hit_rate"], 0.5);
}

#[tokio::test]
async fn test_answer_for_unknown_learner_is_not_found() {
    let app = setup(1, 5);

    let response = app.server.put("/username/ghost/wordId/1/result/true").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("ghost"));

    // The learner was not created as a side effect
    let again = app.server.put("/username/ghost/wordId/1/result/true").await;
    again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_answer_for_unknown_word_is_not_found() {
    let app = setup(1, 5);
    app.server.get("/username/Test1/level/1/without_wrong_answers").await;

    let response = app.server.put("/username/Test1/wordId/999/result/true").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_parameters_are_rejected() {
    let app = setup(1, 5);
    app.server.get("/username/Test1/level/1/without_wrong_answers").await;

    let response = app.server.put("/username/Test1/wordId/1/result/maybe").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app.server.get("/username/Test1/level/two").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_small_catalog_cannot_fill_distractors() {
    // 8 words: a session of 8 leaves no one to borrow wrong answers from
    let app = setup(1, 8);

    let response = app.server.get("/username/Test1/level/1").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // Words-only sessions are merely short
    let response = app
        .server
        .get("/username/Test2/level/1/without_wrong_answers")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body).len(), 8);
}

#[tokio::test]
async fn test_dashboard_reports() {
    let app = setup(2, 6);

    let empty: Value = app.server.get("/dashboard/avgLeitnersHitrate").await.json();
    assert!(empty["average_hit_rate"].is_null());
    let none: Value = app.server.get("/dashboard/globaldifficultwords").await.json();
    assert!(none.as_array().unwrap().is_empty());

    let body: Value = app
        .server
        .get("/username/Test1/level/2/without_wrong_answers")
        .await
        .json();
    let session = ids(&body);
    let (hard, easy) = (session[0], session[1]);

    for (word, result) in [(hard, "false"), (hard, "false"), (easy, "true"), (easy, "true")] {
        app.server
            .put(&format!("/username/Test1/wordId/{word}/result/{result}"))
            .await
            .assert_status_ok();
    }

    let hardest: Value = app.server.get("/dashboard/globaldifficultwords").await.json();
    assert_eq!(ids(&hardest), vec![hard, easy]);
    let easiest: Value = app.server.get("/dashboard/globaleasywords").await.json();
    assert_eq!(ids(&easiest), vec![easy, hard]);

    let hard_level = body[0]["level"].as_i64().unwrap();
    let by_lesson: Value = app
        .server
        .get(&format!("/dashboard/difficultwords/lesson/{hard_level}"))
        .await
        .json();
    assert_eq!(ids(&by_lesson)[0], hard);
    let easy_by_lesson: Value = app.server.get("/dashboard/easywords/lesson/9").await.json();
    assert!(easy_by_lesson.as_array().unwrap().is_empty());

    // First encounters do not count: 1 of 2 counted answers was right
    let avg: Value = app.server.get("/dashboard/avgLeitnersHitrate").await.json();
    assert_eq!(avg["average_hit_rate"], 0.5);
}
