use reqwest::StatusCode;
use serde_json::Value;
use shelfwise::domain::author::AUTHOR_SERVICE;
use shelfwise::domain::author_book::{
    AUTHOR_BOOK_REPOSITORY_FACTORY, AUTHOR_BOOK_SERVICE, AuthorBookFilter,
};
use shelfwise::domain::book::BOOK_SERVICE;
use shelfwise::domain::user::UserRole;
use shelfwise::error::ShelfwiseError;
use shelfwise_testing::generators::{book_body, create_author_dto, create_book_dto};
use shelfwise_testing::{AuthHelper, TestEnvironment};
use uuid::Uuid;

#[tokio::test]
async fn test_duplicate_link_is_rejected_and_leaves_one_row() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let author = ctx
            .resolve(&AUTHOR_SERVICE)
            .unwrap()
            .create_author(ctx.uow(), create_author_dto())
            .await
            .unwrap();
        let book = ctx
            .resolve(&BOOK_SERVICE)
            .unwrap()
            .create_book(ctx.uow(), create_book_dto(vec![]))
            .await
            .unwrap();
        let links = ctx.resolve(&AUTHOR_BOOK_SERVICE).unwrap();

        links
            .create_author_book(ctx.uow(), author.id, book.id)
            .await
            .unwrap();
        let err = links
            .create_author_book(ctx.uow(), author.id, book.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "authorBook", .. }));

        let rows = ctx
            .resolve(&AUTHOR_BOOK_REPOSITORY_FACTORY)
            .unwrap()
            .create(ctx.uow())
            .find_many(&AuthorBookFilter::pair(author.id, book.id), None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_book_created_over_http_lists_its_authors() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let author = ctx
            .resolve(&AUTHOR_SERVICE)
            .unwrap()
            .create_author(ctx.uow(), create_author_dto())
            .await
            .unwrap();
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(Uuid::new_v4(), UserRole::Admin)
            .unwrap();

        let created = ctx
            .client()
            .post(ctx.url("/books"))
            .header("Authorization", &token)
            .json(&book_body(&[author.id]))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let book: Value = created.json().await.unwrap();
        let book_id = book["data"]["id"].as_str().unwrap().to_string();

        let authors = ctx
            .client()
            .get(ctx.url(&format!("/books/{book_id}/authors")))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(authors.status(), StatusCode::OK);
        let body: Value = authors.json().await.unwrap();
        let listed = body["data"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], author.id.to_string());

        let duplicate = ctx
            .client()
            .post(ctx.url(&format!("/authors/{}/books/{book_id}", author.id)))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_book_with_unknown_author_is_not_found_over_http() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(Uuid::new_v4(), UserRole::Admin)
            .unwrap();

        let response = ctx
            .client()
            .post(ctx.url("/books"))
            .header("Authorization", &token)
            .json(&book_body(&[Uuid::new_v4()]))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    })
    .await
    .unwrap();
}
