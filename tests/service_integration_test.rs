use bank_crud::core::service::build_client;
use bank_crud::modules::bank_accounts::{BankAccount, BankAccountFormData, BankAccountStatus, BankAccountType};
use bank_crud::modules::user_management::{User, UserFormData};
use bank_crud::modules::user_views::{UserView, UserViewFormData};
use bank_crud::{BankError, CrudService, HttpCrudService};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

fn account_json(id: &str, number: &str) -> serde_json::Value {
    json!({
        "id": id,
        "accountNumber": number,
        "accountType": "savings",
        "balance": 1500.0,
        "currency": "USD",
        "ownerId": "u-1",
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-15T10:00:00Z",
        "status": "active"
    })
}

fn user_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "username": "jdoe",
        "firstName": "Jane",
        "lastName": "Doe",
        "phone": "5551234567",
        "address": "1 Main St",
        "email": "jane@example.com",
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-02-01T08:30:00Z"
    })
}

fn account_form() -> BankAccountFormData {
    BankAccountFormData {
        account_number: "ACC-200".to_string(),
        account_type: Some(BankAccountType::Savings),
        balance: Some(1500.0),
        currency: "USD".to_string(),
        owner_id: "u-1".to_string(),
        status: None,
        overdraft_limit: None,
        interest_rate: None,
    }
}

#[tokio::test]
async fn test_get_all_reads_collection() {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/bank-accounts");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([account_json("a-1", "ACC-100"), account_json("a-2", "ACC-200")]));
        })
        .await;

    let service =
        HttpCrudService::<BankAccount>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let accounts = service.get_all().await.unwrap();

    list_mock.assert_async().await;
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].account_number, "ACC-200");
    assert_eq!(accounts[0].status, BankAccountStatus::Active);
}

#[tokio::test]
async fn test_get_by_id_maps_404_to_not_found() {
    let server = MockServer::start_async().await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/users/99");
            then.status(404);
        })
        .await;

    let service = HttpCrudService::<User>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let result = service.get_by_id(&99).await;

    missing.assert_async().await;
    match result {
        Err(BankError::NotFoundError { resource, id }) => {
            assert_eq!(resource, "user");
            assert_eq!(id, "99");
        }
        other => panic!("expected NotFoundError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_http_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/bank-accounts");
            then.status(500);
        })
        .await;

    let service =
        HttpCrudService::<BankAccount>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let err = service.get_all().await.unwrap_err();

    assert!(matches!(err, BankError::HttpStatusError { status: 500, .. }));
}

#[tokio::test]
async fn test_bank_account_update_uses_patch() {
    let server = MockServer::start_async().await;
    let patch_mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/bank-accounts/a-2")
                .json_body_partial(r#"{"accountNumber":"ACC-200","accountType":"savings"}"#);
            then.status(200).json_body(account_json("a-2", "ACC-200"));
        })
        .await;

    let service =
        HttpCrudService::<BankAccount>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let updated = service.update(&"a-2".to_string(), &account_form()).await.unwrap();

    patch_mock.assert_async().await;
    assert_eq!(updated.id, "a-2");
}

#[tokio::test]
async fn test_user_update_uses_put_without_password() {
    let server = MockServer::start_async().await;
    let put_mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/users/7").json_body(json!({
                "username": "jdoe",
                "firstName": "Jane",
                "lastName": "Doe",
                "phone": "5551234567",
                "address": "1 Main St",
                "email": "jane@example.com"
            }));
            then.status(200).json_body(user_json(7));
        })
        .await;

    let form = UserFormData {
        username: "jdoe".to_string(),
        password: String::new(),
        confirm_password: String::new(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone: "5551234567".to_string(),
        address: "1 Main St".to_string(),
        email: "jane@example.com".to_string(),
    };

    let service = HttpCrudService::<User>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let updated = service.update(&7, &form).await.unwrap();

    put_mock.assert_async().await;
    assert_eq!(updated.id, 7);
}

#[tokio::test]
async fn test_create_never_sends_confirm_password() {
    let server = MockServer::start_async().await;
    let post_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/user-views").json_body(json!({
                "username": "jdoe",
                "password": "Secret1!x",
                "firstName": "Jane",
                "lastName": "Doe",
                "phoneNumber": "(555) 123-4567",
                "address": "1 Main St",
                "email": "jane@example.com"
            }));
            then.status(201).json_body(json!({
                "id": "uv-1",
                "username": "jdoe",
                "firstName": "Jane",
                "lastName": "Doe",
                "phoneNumber": "(555) 123-4567",
                "address": "1 Main St",
                "email": "jane@example.com"
            }));
        })
        .await;

    let form = UserViewFormData {
        username: "jdoe".to_string(),
        password: "Secret1!x".to_string(),
        confirm_password: "Secret1!x".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone_number: "(555) 123-4567".to_string(),
        address: "1 Main St".to_string(),
        email: "jane@example.com".to_string(),
    };

    let service =
        HttpCrudService::<UserView>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    let created = service.create(&form).await.unwrap();

    post_mock.assert_async().await;
    assert_eq!(created.id, "uv-1");
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start_async().await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/bank-accounts/a-1");
            then.status(204);
        })
        .await;

    let service =
        HttpCrudService::<BankAccount>::new(build_client(5).unwrap(), &server.url("/api")).unwrap();
    tokio_test::assert_ok!(service.delete(&"a-1".to_string()).await);
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn test_custom_path_below_base() {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/users");
            then.status(200).json_body(json!([user_json(1)]));
        })
        .await;

    let service =
        HttpCrudService::<User>::with_path(build_client(5).unwrap(), &server.url("/api/"), "v2/users")
            .unwrap();
    assert_eq!(service.collection_url().path(), "/api/v2/users");

    let users = service.get_all().await.unwrap();
    list_mock.assert_async().await;
    assert_eq!(users[0].username, "jdoe");
}
