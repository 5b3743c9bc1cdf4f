//! Integration tests for the comment endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_dapp, get, post_json, test_store};
use dappdir::schema::Kind;
use serde_json::json;

#[tokio::test]
async fn comment_on_existing_dapp_is_created() {
    let app = build_test_app(test_store());
    let dapp_id = create_dapp(&app, json!({ "name": "Foo", "tagline": "Bar" })).await;

    let response = post_json(
        app.clone(),
        "/comments",
        json!({ "dapp_id": dapp_id, "author_name": "alice", "content": "Great dapp" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let comment_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let json = body_json(get(app, &format!("/comments?dapp_id={dapp_id}")).await).await;
    let comments = json.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["id"], comment_id.as_str());
    assert_eq!(comments[0]["content"], "Great dapp");
    assert_eq!(comments[0]["author_name"], "alice");
}

#[tokio::test]
async fn comment_on_unknown_dapp_is_not_found_and_not_stored() {
    let store = test_store();
    let app = build_test_app(store.clone());

    for dapp_id in ["65f0c0ffee0000000000beef", "not-an-id"] {
        let response = post_json(
            app.clone(),
            "/comments",
            json!({ "dapp_id": dapp_id, "content": "Hello" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Dapp not found");
    }

    assert!(store.get_documents(Kind::Comment, None, 200).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_content_is_validated() {
    let app = build_test_app(test_store());
    let dapp_id = create_dapp(&app, json!({ "name": "Foo", "tagline": "Bar" })).await;

    let empty = post_json(app.clone(), "/comments", json!({ "dapp_id": dapp_id, "content": "" })).await;
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(empty).await["details"][0]["field"], "content");

    let too_long = post_json(
        app.clone(),
        "/comments",
        json!({ "dapp_id": dapp_id, "content": "x".repeat(1001) }),
    )
    .await;
    assert_eq!(too_long.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let missing = post_json(app, "/comments", json!({ "content": "Hello" })).await;
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(missing).await["details"][0]["field"], "dapp_id");
}

#[tokio::test]
async fn listing_returns_only_comments_of_the_requested_dapp() {
    let app = build_test_app(test_store());
    let first = create_dapp(&app, json!({ "name": "A", "tagline": "a" })).await;
    let second = create_dapp(&app, json!({ "name": "B", "tagline": "b" })).await;

    for (dapp_id, count) in [(&first, 3), (&second, 2)] {
        for i in 0..count {
            let response = post_json(
                app.clone(),
                "/comments",
                json!({ "dapp_id": dapp_id, "content": format!("comment {i}") }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    let json = body_json(get(app, &format!("/comments?dapp_id={first}")).await).await;
    let comments = json.as_array().unwrap();

    assert_eq!(comments.len(), 3);
    assert!(comments.iter().all(|comment| comment["dapp_id"] == first.as_str()));
}

#[tokio::test]
async fn listing_is_capped_at_two_hundred() {
    let store = test_store();
    let app = build_test_app(store.clone());
    let dapp_id = create_dapp(&app, json!({ "name": "A", "tagline": "a" })).await;

    for i in 0..205 {
        let comment = dappdir::record::Comment {
            dapp_id: dapp_id.clone(),
            author_name: None,
            author_wallet: None,
            content: format!("comment {i}"),
        };
        store.create_document(&comment).await.unwrap();
    }

    let json = body_json(get(app, &format!("/comments?dapp_id={dapp_id}")).await).await;

    assert_eq!(json.as_array().unwrap().len(), 200);
}

#[tokio::test]
async fn listing_without_dapp_id_is_a_validation_error() {
    let app = build_test_app(test_store());

    for uri in ["/comments", "/comments?dapp_id="] {
        let response = get(app.clone(), uri).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"][0]["field"], "dapp_id");
    }
}
