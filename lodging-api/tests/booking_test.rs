mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use lodging_shared::{Room, TicketStatus};
use serde_json::json;

async fn hotel_with_rooms(app: &TestApp, count: usize) -> Vec<Room> {
    let hotel = app.store.insert_hotel("Fasano", "fasano.png").await;
    let mut rooms = Vec::new();
    for i in 0..count {
        rooms.push(app.store.insert_room(hotel.id, &format!("Room {}", i + 1), 2).await);
    }
    rooms
}

#[tokio::test]
async fn test_get_booking_without_booking_is_not_found() {
    let app = TestApp::new();
    let token = app.sign_in(1).await;

    let (status, _) = app.send(Method::GET, "/booking", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_then_get_booking() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 1).await;
    let token = app.eligible_user(1).await;

    let (status, body) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[0].id })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = body["bookingId"].as_i64().unwrap();

    let (status, body) = app.send(Method::GET, "/booking", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64().unwrap(), booking_id);
    assert_eq!(body["Room"]["id"], rooms[0].id);
    assert_eq!(body["Room"]["name"], rooms[0].name);
    assert_eq!(body["Room"]["hotelId"], rooms[0].hotel_id);
}

#[tokio::test]
async fn test_create_booking_rejects_bad_bodies() {
    let app = TestApp::new();
    let token = app.eligible_user(1).await;

    let (status, _) = app.send(Method::POST, "/booking", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for body in [json!({}), json!({ "roomId": "one" }), json!({ "roomId": 1, "extra": true })] {
        let (status, _) = app
            .send(Method::POST, "/booking", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn test_create_booking_unknown_room_is_not_found() {
    let app = TestApp::new();
    let token = app.eligible_user(1).await;

    let (status, body) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Room not found");
}

#[tokio::test]
async fn test_create_booking_on_booked_room_is_forbidden() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 1).await;
    let first = app.eligible_user(1).await;
    let second = app.eligible_user(2).await;
    let body = json!({ "roomId": rooms[0].id });

    let (status, _) = app.send(Method::POST, "/booking", Some(&first), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::POST, "/booking", Some(&second), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Booking already exists");
}

#[tokio::test]
async fn test_create_booking_with_ineligible_ticket_is_forbidden() {
    for (ticket_status, is_remote, includes_hotel) in [
        (TicketStatus::Reserved, false, true),
        (TicketStatus::Paid, true, true),
        (TicketStatus::Paid, false, false),
    ] {
        let app = TestApp::new();
        let rooms = hotel_with_rooms(&app, 1).await;
        app.with_ticket(1, ticket_status, is_remote, includes_hotel).await;
        let token = app.sign_in(1).await;

        let (status, body) = app
            .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[0].id })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "ForbiddenBookingError");
    }
}

#[tokio::test]
async fn test_second_booking_for_same_user_is_forbidden() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 2).await;
    let token = app.eligible_user(1).await;

    let (status, _) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[0].id })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[1].id })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_booking_moves_room_and_keeps_id() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 2).await;
    let token = app.eligible_user(1).await;

    let (_, body) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[0].id })))
        .await;
    let booking_id = body["bookingId"].as_i64().unwrap();

    let uri = format!("/booking/{}", booking_id);
    let (status, body) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "roomId": rooms[1].id })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingId"].as_i64().unwrap(), booking_id);

    let (_, body) = app.send(Method::GET, "/booking", Some(&token), None).await;
    assert_eq!(body["id"].as_i64().unwrap(), booking_id);
    assert_eq!(body["Room"]["id"], rooms[1].id);
}

#[tokio::test]
async fn test_update_booking_rejections() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 3).await;
    let mine = app.eligible_user(1).await;
    let theirs = app.eligible_user(2).await;
    let outsider = app.sign_in(3).await;

    let (_, body) = app
        .send(Method::POST, "/booking", Some(&mine), Some(json!({ "roomId": rooms[0].id })))
        .await;
    let my_booking = body["bookingId"].as_i64().unwrap();
    let (_, body) = app
        .send(Method::POST, "/booking", Some(&theirs), Some(json!({ "roomId": rooms[1].id })))
        .await;
    let their_booking = body["bookingId"].as_i64().unwrap();

    let mine_uri = format!("/booking/{}", my_booking);
    let theirs_uri = format!("/booking/{}", their_booking);

    // target room already booked
    let (status, _) = app
        .send(Method::PUT, &mine_uri, Some(&mine), Some(json!({ "roomId": rooms[1].id })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // someone else's booking
    let (status, _) = app
        .send(Method::PUT, &theirs_uri, Some(&mine), Some(json!({ "roomId": rooms[2].id })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // caller has no booking
    let (status, _) = app
        .send(Method::PUT, &mine_uri, Some(&outsider), Some(json!({ "roomId": rooms[2].id })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // room does not exist
    let (status, _) = app
        .send(Method::PUT, &mine_uri, Some(&mine), Some(json!({ "roomId": 424242 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // non numeric booking id
    let (status, _) = app
        .send(Method::PUT, "/booking/abc", Some(&mine), Some(json!({ "roomId": rooms[2].id })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_without_room_id_returns_same_booking() {
    let app = TestApp::new();
    let rooms = hotel_with_rooms(&app, 1).await;
    let token = app.eligible_user(1).await;
    let other = app.sign_in(2).await;

    let (_, body) = app
        .send(Method::POST, "/booking", Some(&token), Some(json!({ "roomId": rooms[0].id })))
        .await;
    let booking_id = body["bookingId"].as_i64().unwrap();
    let uri = format!("/booking/{}", booking_id);

    let (status, body) = app.send(Method::PUT, &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingId"].as_i64().unwrap(), booking_id);

    let (status, _) = app.send(Method::PUT, &uri, Some(&other), Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
