//! End-to-end tests for the server-rendered pages.

mod common;

use axum::http::{header, StatusCode};
use common::*;

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
}

#[tokio::test]
async fn home_lists_students_with_action_links() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let first = create_student(&app, "R1", "Ada").await;
    create_student(&app, "R2", "Grace").await;

    let (status, page) = send(app, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("R1"));
    assert!(page.contains("R2"));
    assert!(page.contains(&format!("href=\"/student/{first}/update\"")));
    assert!(page.contains(&format!("href=\"/student/{first}/delete\"")));
}

#[tokio::test]
async fn create_form_offers_every_course() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let first = create_course(&app, "CS101", "Programming 1").await;
    let second = create_course(&app, "CS201", "Data Structures").await;

    let (status, page) = send(app, "GET", "/student/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(&format!("value=\"course_{first}\"")));
    assert!(page.contains(&format!("value=\"course_{second}\"")));
    assert!(page.contains("CS101"));
    assert!(page.contains("CS201"));
}

#[tokio::test]
async fn creating_a_student_via_the_form_redirects_and_enrolls() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let first = create_course(&app, "CS101", "Programming 1").await;
    let second = create_course(&app, "CS201", "Data Structures").await;

    let form = format!(
        "roll=R1&f_name=Ada&l_name=Lovelace&courses=course_{first}&courses=course_{second}"
    );
    let response = send_form(app.clone(), "/student/create", &form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert_eq!(count(&pool, "student").await, 1);
    assert_eq!(count(&pool, "enrollment").await, 2);

    let (_, page) = send(app, "GET", "/").await;
    assert!(page.contains("R1"));
    assert!(page.contains("Ada"));
}

#[tokio::test]
async fn creating_with_a_taken_roll_number_shows_the_exists_page() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    create_student(&app, "R1", "Ada").await;

    let response = send_form(app, "/student/create", "roll=R1&f_name=Grace&l_name=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("Student already exists"));
    assert_eq!(count(&pool, "student").await, 1);
}

#[tokio::test]
async fn update_form_prefills_the_record() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let enrolled_course = create_course(&app, "CS101", "Programming 1").await;
    let other_course = create_course(&app, "CS201", "Data Structures").await;
    let student_id = create_student(&app, "R1", "Ada").await;
    enroll(&app, student_id, enrolled_course).await;

    let (status, page) = send(app, "GET", &format!("/student/{student_id}/update")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("value=\"Ada\""));
    assert!(page.contains("R1"));
    assert!(page.contains(&format!("value=\"course_{enrolled_course}\" checked")));
    assert!(!page.contains(&format!("value=\"course_{other_course}\" checked")));
}

#[tokio::test]
async fn updating_via_the_form_replaces_the_course_set() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let old_course = create_course(&app, "CS101", "Programming 1").await;
    let new_course = create_course(&app, "CS201", "Data Structures").await;
    let student_id = create_student(&app, "R1", "Ada").await;
    enroll(&app, student_id, old_course).await;

    let form = format!("f_name=Adeline&l_name=Lovelace&courses=course_{new_course}");
    let response = send_form(app.clone(), &format!("/student/{student_id}/update"), &form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let (_, body) = send(app.clone(), "GET", &format!("/api/student/{student_id}")).await;
    let updated = json_body(&body);
    assert_eq!(updated["first_name"], "Adeline");
    assert_eq!(updated["roll_number"], "R1");

    let (_, body) = send(app, "GET", &format!("/api/student/{student_id}/course")).await;
    let rows = json_body(&body);
    let rows = rows.as_array().expect("enrollment list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["course_id"], new_course);
}

#[tokio::test]
async fn updating_an_unknown_student_shows_the_update_error_page() {
    let pool = test_pool().await;
    let response = send_form(test_app(&pool), "/student/99/update", "f_name=Ada&l_name=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("There was an error updating the student record."));
}

#[tokio::test]
async fn update_form_for_an_unknown_student_shows_the_find_error_page() {
    let pool = test_pool().await;
    let (status, page) = send(test_app(&pool), "GET", "/student/99/update").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("There was an error finding the student record."));
}

#[tokio::test]
async fn deleting_via_the_link_removes_the_student() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let course_id = create_course(&app, "CS101", "Programming 1").await;
    let student_id = create_student(&app, "R1", "Ada").await;
    enroll(&app, student_id, course_id).await;

    let (status, page) = send(app.clone(), "GET", &format!("/student/{student_id}/delete")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(page.is_empty());

    assert_eq!(count(&pool, "student").await, 0);
    assert_eq!(count(&pool, "enrollment").await, 0);

    let (status, page) = send(app, "GET", "/student/99/delete").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("There was an error deleting the student record."));
}

#[tokio::test]
async fn detail_page_shows_enrolled_courses() {
    let pool = test_pool().await;
    let app = test_app(&pool);
    let course_id = create_course(&app, "CS101", "Programming 1").await;
    let student_id = create_student(&app, "R1", "Ada").await;
    enroll(&app, student_id, course_id).await;

    let (status, page) = send(app.clone(), "GET", &format!("/student/{student_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Ada"));
    assert!(page.contains("CS101"));

    let (status, page) = send(app, "GET", "/student/99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("There was an error finding the student."));
}
