use common::{InterestArea, UserRole};

use crate::common::TestApp;

fn ids(materials: Vec<mentoria_server::models::material::Material>) -> Vec<i32> {
    materials.into_iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn unions_profile_areas_in_first_matched_order() {
    use InterestArea::{Cybersecurity, DataScienceAndAi, SoftwareDevelopment};

    let app = TestApp::spawn().await;
    let mentor = app.create_user("joao", UserRole::Mentor, &[]).await;
    let m1 = app.create_tagged(mentor, "m1", &[SoftwareDevelopment]).await;
    let _m2 = app.create_tagged(mentor, "m2", &[Cybersecurity]).await;
    let m3 = app
        .create_tagged(mentor, "m3", &[DataScienceAndAi, SoftwareDevelopment])
        .await;
    let m4 = app.create_tagged(mentor, "m4", &[DataScienceAndAi]).await;

    let mentee = app
        .create_user("kika", UserRole::Mentored, &[SoftwareDevelopment, DataScienceAndAi])
        .await;

    let suggested = ids(app.state.materials.suggest(mentee, None).await.unwrap());
    assert_eq!(suggested, vec![m1, m3, m4]);
}

#[tokio::test]
async fn caps_suggestions_at_twenty() {
    let app = TestApp::spawn().await;
    let mentor = app.create_user("leo", UserRole::Mentor, &[InterestArea::FinanceAndAccounting]).await;
    for i in 0..23 {
        app.create_tagged(mentor, &format!("f{i}"), &[InterestArea::FinanceAndAccounting])
            .await;
    }

    assert_eq!(app.state.materials.suggest(mentor, None).await.unwrap().len(), 20);
}

#[tokio::test]
async fn user_without_areas_gets_ten_most_recent() {
    let app = TestApp::spawn().await;
    let mentor = app.create_user("mia", UserRole::Mentor, &[]).await;
    let mut created = Vec::new();
    for i in 0..13 {
        created.push(app.create_tagged(mentor, &format!("r{i}"), &[]).await);
    }

    let suggested = ids(app.state.materials.suggest(mentor, None).await.unwrap());
    let expected: Vec<i32> = created.iter().rev().take(10).copied().collect();
    assert_eq!(suggested, expected);
    assert_eq!(app.state.materials.suggest(mentor, Some(3)).await.unwrap().len(), 10);
}

#[tokio::test]
async fn only_the_profile_matching_the_role_counts() {
    let app = TestApp::spawn().await;
    let mentor = app.create_user("nina", UserRole::Mentor, &[]).await;
    let law = app.create_tagged(mentor, "law", &[InterestArea::Law]).await;
    let _art = app.create_tagged(mentor, "art", &[InterestArea::UxUiDesign]).await;

    let user = app.create_user("otto", UserRole::Mentored, &[InterestArea::Law]).await;
    app.state
        .users
        .set_profile_areas(user, UserRole::Mentor, &[InterestArea::UxUiDesign])
        .await
        .unwrap();

    let suggested = ids(app.state.materials.suggest(user, None).await.unwrap());
    assert_eq!(suggested, vec![law]);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::spawn().await;
    let err = app.state.materials.suggest(999, None).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn list_by_areas_has_no_limit() {
    let app = TestApp::spawn().await;
    let mentor = app.create_user("pia", UserRole::Mentor, &[]).await;
    for i in 0..25 {
        app.create_tagged(mentor, &format!("h{i}"), &[InterestArea::Medicine])
            .await;
    }
    app.create_tagged(mentor, "other", &[]).await;

    let tagged = app
        .state
        .materials
        .list_by_areas(&[InterestArea::Medicine])
        .await
        .unwrap();
    assert_eq!(tagged.len(), 25);
    assert_eq!(app.state.materials.list_by_areas(&[]).await.unwrap().len(), 26);
}
