use reqwest::StatusCode;
use serde_json::{Value, json};
use shelfwise::common::Pagination;
use shelfwise::domain::author::AUTHOR_SERVICE;
use shelfwise::domain::author::dto::{CreateAuthorDto, UpdateAuthorDto};
use shelfwise::domain::book::BOOK_SERVICE;
use shelfwise::domain::book_category::BOOK_CATEGORY_SERVICE;
use shelfwise::domain::category::{CATEGORY_SERVICE, CategoryFilter};
use shelfwise::domain::user::UserRole;
use shelfwise::error::ShelfwiseError;
use shelfwise_testing::generators::{create_author_dto, create_book_dto, unique_name};
use shelfwise_testing::{AuthHelper, TestEnvironment};
use uuid::Uuid;

#[tokio::test]
async fn test_category_names_are_unique() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let categories = ctx.resolve(&CATEGORY_SERVICE).unwrap();
        let name = unique_name("Fantasy");

        let created = categories.create_category(ctx.uow(), name.clone()).await.unwrap();
        assert_eq!(created.name, name);

        let err = categories.create_category(ctx.uow(), name.clone()).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "category", .. }));

        let other = categories
            .create_category(ctx.uow(), unique_name("Horror"))
            .await
            .unwrap();
        let err = categories
            .update_category(ctx.uow(), other.id, name)
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "category", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_category_is_not_found_on_update_and_remove() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let categories = ctx.resolve(&CATEGORY_SERVICE).unwrap();
        let missing = Uuid::new_v4();

        let err = categories
            .update_category(ctx.uow(), missing, unique_name("Poetry"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "category", .. }));

        let err = categories.remove_category(ctx.uow(), missing).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "category", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_category_rename_and_removal() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let categories = ctx.resolve(&CATEGORY_SERVICE).unwrap();
        let created = categories
            .create_category(ctx.uow(), unique_name("Drama"))
            .await
            .unwrap();

        let renamed = unique_name("Tragedy");
        let updated = categories
            .update_category(ctx.uow(), created.id, renamed.clone())
            .await
            .unwrap();
        assert_eq!(updated.name, renamed);

        let found = categories
            .find_categories(ctx.uow(), &CategoryFilter::by_name(&renamed), Pagination::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);

        categories.remove_category(ctx.uow(), created.id).await.unwrap();
        let err = categories.find_category(ctx.uow(), created.id).await.unwrap_err();
        assert!(err.is_not_found());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_author_names_are_unique() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let authors = ctx.resolve(&AUTHOR_SERVICE).unwrap();
        let first = create_author_dto();
        let duplicate = CreateAuthorDto {
            first_name: first.first_name.clone(),
            last_name: first.last_name.clone(),
            about: Some("Same name, different bio".to_string()),
        };

        authors.create_author(ctx.uow(), first).await.unwrap();
        let err = authors.create_author(ctx.uow(), duplicate).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "author", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_author_is_not_found_on_update_and_remove() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let authors = ctx.resolve(&AUTHOR_SERVICE).unwrap();
        let missing = Uuid::new_v4();
        let data = UpdateAuthorDto {
            about: Some("Wrote nothing".to_string()),
        };

        let err = authors.update_author(ctx.uow(), missing, data).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "author", .. }));

        let err = authors.remove_author(ctx.uow(), missing).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "author", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_book_category_links_are_unique_and_listed_both_ways() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let book = ctx
            .resolve(&BOOK_SERVICE)
            .unwrap()
            .create_book(ctx.uow(), create_book_dto(vec![]))
            .await
            .unwrap();
        let category = ctx
            .resolve(&CATEGORY_SERVICE)
            .unwrap()
            .create_category(ctx.uow(), unique_name("Classics"))
            .await
            .unwrap();
        let links = ctx.resolve(&BOOK_CATEGORY_SERVICE).unwrap();

        links
            .create_book_category(ctx.uow(), book.id, category.id)
            .await
            .unwrap();
        let err = links
            .create_book_category(ctx.uow(), book.id, category.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "bookCategory", .. }));

        let book_categories = links
            .find_book_categories(ctx.uow(), book.id, CategoryFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(book_categories.len(), 1);
        assert_eq!(book_categories[0].id, category.id);

        let category_books = links
            .find_category_books(ctx.uow(), category.id, Default::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(category_books.len(), 1);
        assert_eq!(category_books[0].id, book.id);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_book_category_link_to_missing_rows_is_not_found() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let book = ctx
            .resolve(&BOOK_SERVICE)
            .unwrap()
            .create_book(ctx.uow(), create_book_dto(vec![]))
            .await
            .unwrap();
        let links = ctx.resolve(&BOOK_CATEGORY_SERVICE).unwrap();

        let err = links
            .create_book_category(ctx.uow(), book.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "category", .. }));

        let err = links
            .remove_book_category(ctx.uow(), book.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "bookCategory", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_categories_over_http() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(Uuid::new_v4(), UserRole::Admin)
            .unwrap();
        let name = unique_name("Mystery");

        let created = ctx
            .client()
            .post(ctx.url("/categories"))
            .header("Authorization", &token)
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = created.json().await.unwrap();
        assert_eq!(body["data"]["name"], name);

        let duplicate = ctx
            .client()
            .post(ctx.url("/categories"))
            .header("Authorization", &token)
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = duplicate.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UnprocessableEntity");

        let malformed_id = ctx
            .client()
            .get(ctx.url("/categories/not-a-uuid"))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(malformed_id.status(), StatusCode::BAD_REQUEST);
        let body: Value = malformed_id.json().await.unwrap();
        assert_eq!(body["error"]["code"], "BadRequest");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_author_over_http_is_not_found() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(Uuid::new_v4(), UserRole::Admin)
            .unwrap();
        let missing = Uuid::new_v4();

        let updated = ctx
            .client()
            .patch(ctx.url(&format!("/authors/{missing}")))
            .header("Authorization", &token)
            .json(&json!({ "about": "Never existed" }))
            .send()
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::NOT_FOUND);

        let removed = ctx
            .client()
            .delete(ctx.url(&format!("/authors/{missing}")))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(removed.status(), StatusCode::NOT_FOUND);
        let body: Value = removed.json().await.unwrap();
        assert_eq!(body["error"]["code"], "NotFound");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_book_category_links_over_http() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let book = ctx
            .resolve(&BOOK_SERVICE)
            .unwrap()
            .create_book(ctx.uow(), create_book_dto(vec![]))
            .await
            .unwrap();
        let category = ctx
            .resolve(&CATEGORY_SERVICE)
            .unwrap()
            .create_category(ctx.uow(), unique_name("Satire"))
            .await
            .unwrap();
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(Uuid::new_v4(), UserRole::Admin)
            .unwrap();
        let link_url = ctx.url(&format!("/books/{}/categories/{}", book.id, category.id));

        let linked = ctx
            .client()
            .post(&link_url)
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(linked.status(), StatusCode::CREATED);

        let duplicate = ctx
            .client()
            .post(&link_url)
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let listed = ctx
            .client()
            .get(ctx.url(&format!("/categories/{}/books", category.id)))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
        let body: Value = listed.json().await.unwrap();
        let books = body["data"].as_array().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0]["id"], book.id.to_string());

        let unlinked = ctx
            .client()
            .delete(&link_url)
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(unlinked.status(), StatusCode::NO_CONTENT);

        let malformed = ctx
            .client()
            .post(ctx.url(&format!("/books/{}/categories/not-a-uuid", book.id)))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    })
    .await
    .unwrap();
}
