//! HTTP tests for the Kanban API
//!
//! These drive the full router (auth middleware, extractors, error mapping)
//! over an in-memory store. No database is required.

mod common;

use axum::http::{header, Method, Request, StatusCode};
use common::TestContext;
use kanban_shared::auth::jwt::{create_token, Claims, TokenType};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new().await;

    let res = ctx.send_anonymous(Method::GET, "/health").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["status"], "healthy");
    assert_eq!(res.body["data"]["storage"], "memory");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new().await;

    let res = ctx.send_anonymous(Method::GET, "/api/boards").await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["error"], "unauthorized");
}

#[tokio::test]
async fn test_token_cookie_is_accepted() {
    let ctx = TestContext::new().await;

    let builder = Request::builder()
        .method(Method::GET)
        .uri("/api/boards")
        .header(header::COOKIE, format!("token={}", ctx.owner.token));
    let res = ctx.call(builder, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["count"], 0);
}

#[tokio::test]
async fn test_bad_tokens_are_rejected() {
    let ctx = TestContext::new().await;

    let refresh = create_token(
        &Claims::new(ctx.owner.user.id, TokenType::Refresh),
        common::JWT_SECRET,
    )
    .unwrap();
    let forged = create_token(
        &Claims::new(ctx.owner.user.id, TokenType::Access),
        "some-other-secret-that-is-long-enough",
    )
    .unwrap();

    for token in [refresh, forged, "not-a-jwt".to_string()] {
        let builder = Request::builder()
            .method(Method::GET)
            .uri("/api/boards")
            .header(header::AUTHORIZATION, format!("Bearer {}", token));
        let res = ctx.call(builder, None).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_create_and_list_boards() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;

    let res = ctx.send(Method::GET, "/api/boards", &ctx.member, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["id"], board_id);
    assert_eq!(res.body["data"][0]["owner"], ctx.owner.id());
    assert_eq!(res.body["data"][0]["members"][0], ctx.member.id());

    let res = ctx.send(Method::GET, "/api/boards", &ctx.outsider, None).await;
    assert_eq!(res.body["count"], 0);
}

#[tokio::test]
async fn test_board_access_errors() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;

    let res = ctx
        .send(Method::GET, &format!("/api/boards/{}", board_id), &ctx.outsider, None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = ctx
        .send(
            Method::GET,
            &format!("/api/boards/{}", uuid::Uuid::new_v4()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "not_found");

    let res = ctx
        .send(Method::DELETE, &format!("/api/boards/{}", board_id), &ctx.member, None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let ctx = TestContext::new().await;

    let res = ctx
        .send(Method::POST, "/api/boards", &ctx.owner, Some(json!({ "name": "x" })))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["error"], "bad_request");
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_envelope() {
    let ctx = TestContext::new().await;

    let res = ctx
        .send(Method::GET, "/api/boards/not-a-uuid", &ctx.owner, None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["error"], "bad_request");

    let res = ctx
        .send(
            Method::PUT,
            "/api/cards/42/move",
            &ctx.owner,
            Some(json!({ "listId": uuid::Uuid::new_v4(), "order": 0 })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "bad_request");
}

#[tokio::test]
async fn test_validation_errors_carry_details() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;

    let res = ctx
        .send(
            Method::POST,
            &format!("/api/lists/{}/cards", list_id),
            &ctx.member,
            Some(json!({ "title": "x".repeat(101) })),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "validation_error");
    assert_eq!(res.body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_unknown_label_color_is_rejected() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;

    let res = ctx
        .send(
            Method::POST,
            &format!("/api/lists/{}/cards", list_id),
            &ctx.owner,
            Some(json!({ "title": "Paint", "labels": [{ "color": "magenta", "text": "x" }] })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = ctx
        .send(
            Method::POST,
            &format!("/api/lists/{}/cards", list_id),
            &ctx.owner,
            Some(json!({ "title": "Paint", "labels": [{ "text": "default" }] })),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["labels"][0]["color"], "blue");
}

#[tokio::test]
async fn test_card_move_scenario() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let l1 = ctx.list(&board_id, "Todo").await;
    let l2 = ctx.list(&board_id, "Done").await;

    let t1 = ctx.card(&l1, "T1").await;
    let t2 = ctx.card(&l1, "T2").await;
    assert_eq!(t1["order"], 0);
    assert_eq!(t2["order"], 1);
    assert_eq!(t1["board"], board_id);

    let t1_id = t1["id"].as_str().unwrap();
    let res = ctx
        .send(
            Method::PUT,
            &format!("/api/cards/{}/move", t1_id),
            &ctx.member,
            Some(json!({ "destinationListId": l2, "order": 0 })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["list"], l2);
    assert_eq!(res.body["data"]["order"], 0);

    let res = ctx
        .send(Method::GET, &format!("/api/lists/{}/cards", l2), &ctx.member, None)
        .await;
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["id"], t1_id);

    let res = ctx
        .send(
            Method::GET,
            &format!("/api/boards/{}/activities?limit=1", board_id),
            &ctx.member,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["actionType"], "move");
    assert_eq!(res.body["data"][0]["type"], "card");
    assert_eq!(res.body["data"][0]["task"], t1_id);
    assert_eq!(
        res.body["data"][0]["text"],
        "moved task \"T1\" from list \"Todo\" to \"Done\""
    );
}

#[tokio::test]
async fn test_cross_board_move_is_bad_request() {
    let ctx = TestContext::new().await;
    let board_a = ctx.board_with_member().await;
    let board_b = ctx.board_with_member().await;
    let list_a = ctx.list(&board_a, "A").await;
    let list_b = ctx.list(&board_b, "B").await;
    let card = ctx.card(&list_a, "Stay").await;

    let res = ctx
        .send(
            Method::PUT,
            &format!("/api/cards/{}/move", card["id"].as_str().unwrap()),
            &ctx.owner,
            Some(json!({ "listId": list_b, "order": 0 })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = ctx
        .send(
            Method::GET,
            &format!("/api/cards/{}", card["id"].as_str().unwrap()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.body["data"]["list"], list_a);
}

#[tokio::test]
async fn test_assignment_endpoints() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;
    let card = ctx.card(&list_id, "Pair").await;
    let card_id = card["id"].as_str().unwrap();
    let assign_uri = format!("/api/cards/{}/assign", card_id);

    let body = json!({ "userId": ctx.member.id() });
    let res = ctx
        .send(Method::POST, &assign_uri, &ctx.owner, Some(body.clone()))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["assignedTo"][0], ctx.member.id());

    let res = ctx.send(Method::POST, &assign_uri, &ctx.owner, Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = ctx
        .send(
            Method::POST,
            &assign_uri,
            &ctx.owner,
            Some(json!({ "userId": ctx.outsider.id() })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = ctx
        .send(
            Method::DELETE,
            &format!("{}/{}", assign_uri, ctx.outsider.id()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["assignedTo"][0], ctx.member.id());

    let res = ctx
        .send(
            Method::DELETE,
            &format!("{}/{}", assign_uri, ctx.member.id()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["assignedTo"], json!([]));
}

#[tokio::test]
async fn test_update_card_and_clear_due_date() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;
    let card = ctx.card(&list_id, "Plan").await;
    let uri = format!("/api/cards/{}", card["id"].as_str().unwrap());

    let res = ctx
        .send(
            Method::PUT,
            &uri,
            &ctx.member,
            Some(json!({ "dueDate": "2030-01-01T00:00:00Z", "completed": true })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["completed"], true);
    assert!(res.body["data"]["dueDate"].is_string());

    let res = ctx
        .send(Method::PUT, &uri, &ctx.member, Some(json!({ "dueDate": null })))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["data"]["dueDate"].is_null());
    assert_eq!(res.body["data"]["completed"], true);
}

#[tokio::test]
async fn test_plain_date_due_date_is_accepted() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;

    let res = ctx
        .send(
            Method::POST,
            &format!("/api/lists/{}/cards", list_id),
            &ctx.member,
            Some(json!({ "title": "Launch", "dueDate": "2025-05-20" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["dueDate"], "2025-05-20T00:00:00Z");
}

#[tokio::test]
async fn test_reorder_lists_endpoint() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let todo = ctx.list(&board_id, "Todo").await;
    let done = ctx.list(&board_id, "Done").await;
    let uri = format!("/api/boards/{}/lists/reorder", board_id);

    let res = ctx
        .send(
            Method::PUT,
            &uri,
            &ctx.member,
            Some(json!({ "lists": [{ "id": todo, "order": 5 }, { "id": done, "order": 2 }] })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["count"], 2);
    assert_eq!(res.body["data"][0]["id"], done);
    assert_eq!(res.body["data"][1]["id"], todo);

    let res = ctx
        .send(Method::PUT, &uri, &ctx.member, Some(json!({ "lists": [] })))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = ctx.send(Method::PUT, &uri, &ctx.member, Some(json!({}))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_feed_default_limit() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    for title in ["A", "B", "C", "D"] {
        ctx.list(&board_id, title).await;
    }

    // ACTIVITY_FEED_LIMIT is 3 in the test config.
    let res = ctx
        .send(
            Method::GET,
            &format!("/api/boards/{}/activities", board_id),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.body["count"], 3);
    assert_eq!(res.body["data"][0]["text"], "added D to this board");

    let res = ctx
        .send(
            Method::GET,
            &format!("/api/boards/{}/activities?limit=abc", board_id),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_board_cascades_over_http() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;
    let card = ctx.card(&list_id, "Gone").await;

    let res = ctx
        .send(Method::DELETE, &format!("/api/boards/{}", board_id), &ctx.owner, None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], json!({}));

    let res = ctx
        .send(
            Method::GET,
            &format!("/api/cards/{}", card["id"].as_str().unwrap()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = ctx
        .send(Method::GET, &format!("/api/lists/{}/cards", list_id), &ctx.owner, None)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tasks_alias_routes() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let list_id = ctx.list(&board_id, "Todo").await;

    let res = ctx
        .send(
            Method::POST,
            &format!("/api/lists/{}/tasks", list_id),
            &ctx.member,
            Some(json!({ "title": "Via alias" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let task_id = res.body["data"]["id"].as_str().unwrap().to_string();

    let res = ctx
        .send(Method::GET, &format!("/api/tasks/{}", task_id), &ctx.member, None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["title"], "Via alias");
    assert_eq!(res.body["data"]["createdBy"], ctx.member.id());
}

#[tokio::test]
async fn test_member_management_over_http() {
    let ctx = TestContext::new().await;
    let board_id = ctx.board_with_member().await;
    let members_uri = format!("/api/boards/{}/members", board_id);

    let res = ctx
        .send(Method::PUT, &members_uri, &ctx.owner, Some(json!({})))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["details"][0]["field"], "email");

    let res = ctx
        .send(
            Method::PUT,
            &members_uri,
            &ctx.owner,
            Some(json!({ "email": "ghost@example.com" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = ctx
        .send(
            Method::DELETE,
            &format!("{}/{}", members_uri, ctx.member.id()),
            &ctx.owner,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["members"], json!([]));

    let res = ctx
        .send(Method::GET, &format!("/api/boards/{}", board_id), &ctx.member, None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}
