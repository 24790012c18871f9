use reqwest::StatusCode;
use serde_json::{Value, json};
use shelfwise::domain::address::ADDRESS_SERVICE;
use shelfwise::domain::address::dto::UpdateAddressDto;
use shelfwise::domain::customer::CUSTOMER_SERVICE;
use shelfwise::domain::user::{USER_SERVICE, UserRole};
use shelfwise::error::ShelfwiseError;
use shelfwise_testing::generators::{create_address_dto, register_user_data};
use shelfwise_testing::{AuthHelper, TestEnvironment};
use uuid::Uuid;

#[tokio::test]
async fn test_one_customer_per_user() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let user = ctx
            .resolve(&USER_SERVICE)
            .unwrap()
            .register_user(ctx.uow(), register_user_data())
            .await
            .unwrap();
        let customers = ctx.resolve(&CUSTOMER_SERVICE).unwrap();

        let customer = customers.create_customer(ctx.uow(), user.id).await.unwrap();
        assert_eq!(customer.user_id, user.id);

        let err = customers.create_customer(ctx.uow(), user.id).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::AlreadyExists { entity: "customer", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_customer_requires_an_existing_user() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let err = ctx
            .resolve(&CUSTOMER_SERVICE)
            .unwrap()
            .create_customer(ctx.uow(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "user", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_customer_is_not_found_on_remove() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let err = ctx
            .resolve(&CUSTOMER_SERVICE)
            .unwrap()
            .remove_customer(ctx.uow(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "customer", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_address_lifecycle() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let user = ctx
            .resolve(&USER_SERVICE)
            .unwrap()
            .register_user(ctx.uow(), register_user_data())
            .await
            .unwrap();
        let customer = ctx
            .resolve(&CUSTOMER_SERVICE)
            .unwrap()
            .create_customer(ctx.uow(), user.id)
            .await
            .unwrap();
        let addresses = ctx.resolve(&ADDRESS_SERVICE).unwrap();

        let address = addresses
            .create_address(ctx.uow(), create_address_dto(customer.id))
            .await
            .unwrap();
        assert_eq!(address.customer_id, customer.id);
        assert_eq!(address.delivery_instructions, None);

        let update = UpdateAddressDto {
            city: Some("Krakow".to_string()),
            delivery_instructions: Some("Leave at the door".to_string()),
            ..UpdateAddressDto::default()
        };
        let updated = addresses
            .update_address(ctx.uow(), address.id, update)
            .await
            .unwrap();
        assert_eq!(updated.city, "Krakow");
        assert_eq!(updated.country, address.country);
        assert_eq!(updated.delivery_instructions.as_deref(), Some("Leave at the door"));

        addresses.remove_address(ctx.uow(), address.id).await.unwrap();
        let err = addresses.find_address(ctx.uow(), address.id).await.unwrap_err();
        assert!(err.is_not_found());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_address_is_not_found_on_update_and_remove() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let addresses = ctx.resolve(&ADDRESS_SERVICE).unwrap();
        let missing = Uuid::new_v4();
        let update = UpdateAddressDto {
            city: Some("Gdansk".to_string()),
            ..UpdateAddressDto::default()
        };

        let err = addresses.update_address(ctx.uow(), missing, update).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "address", .. }));

        let err = addresses.remove_address(ctx.uow(), missing).await.unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "address", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_address_requires_an_existing_customer() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_transaction(|ctx| async move {
        let err = ctx
            .resolve(&ADDRESS_SERVICE)
            .unwrap()
            .create_address(ctx.uow(), create_address_dto(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::NotFound { entity: "customer", .. }));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_customer_is_created_only_for_the_caller_over_http() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let users = ctx.resolve(&USER_SERVICE).unwrap();
        let caller = users.register_user(ctx.uow(), register_user_data()).await.unwrap();
        let other = users.register_user(ctx.uow(), register_user_data()).await.unwrap();
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(caller.id, UserRole::User)
            .unwrap();

        let forbidden = ctx
            .client()
            .post(ctx.url("/customers"))
            .header("Authorization", &token)
            .json(&json!({ "userId": other.id }))
            .send()
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        let body: Value = forbidden.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "Forbidden");

        let created = ctx
            .client()
            .post(ctx.url("/customers"))
            .header("Authorization", &token)
            .json(&json!({ "userId": caller.id }))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = created.json().await.unwrap();
        assert_eq!(body["data"]["userId"], caller.id.to_string());

        let duplicate = ctx
            .client()
            .post(ctx.url("/customers"))
            .header("Authorization", &token)
            .json(&json!({ "userId": caller.id }))
            .send()
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let malformed_id = ctx
            .client()
            .get(ctx.url("/customers/not-a-uuid"))
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
async fn test_addresses_over_http() {
    let env = TestEnvironment::new().await.unwrap();

    env.run_in_test_server_transaction(|ctx| async move {
        let user = ctx
            .resolve(&USER_SERVICE)
            .unwrap()
            .register_user(ctx.uow(), register_user_data())
            .await
            .unwrap();
        let customer = ctx
            .resolve(&CUSTOMER_SERVICE)
            .unwrap()
            .create_customer(ctx.uow(), user.id)
            .await
            .unwrap();
        let token = AuthHelper::new(ctx.registry())
            .unwrap()
            .bearer(user.id, UserRole::User)
            .unwrap();

        let created = ctx
            .client()
            .post(ctx.url("/addresses"))
            .header("Authorization", &token)
            .json(&json!({
                "fullName": "Ada Reader",
                "phoneNumber": "+48123456789",
                "country": "Poland",
                "state": "Mazovia",
                "city": "Warsaw",
                "zipCode": "00-001",
                "streetAddress": "Marszalkowska 1",
                "customerId": customer.id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = created.json().await.unwrap();
        let address_id = body["data"]["id"].as_str().unwrap().to_string();

        let updated = ctx
            .client()
            .patch(ctx.url(&format!("/addresses/{address_id}")))
            .header("Authorization", &token)
            .json(&json!({ "city": "Poznan" }))
            .send()
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let body: Value = updated.json().await.unwrap();
        assert_eq!(body["data"]["city"], "Poznan");
        assert_eq!(body["data"]["streetAddress"], "Marszalkowska 1");

        let missing = ctx
            .client()
            .patch(ctx.url(&format!("/addresses/{}", Uuid::new_v4())))
            .header("Authorization", &token)
            .json(&json!({ "city": "Lodz" }))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let malformed_id = ctx
            .client()
            .delete(ctx.url("/addresses/12345"))
            .header("Authorization", &token)
            .send()
            .await
            .unwrap();
        assert_eq!(malformed_id.status(), StatusCode::BAD_REQUEST);
    })
    .await
    .unwrap();
}
