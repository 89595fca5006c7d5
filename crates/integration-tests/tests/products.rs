//! Adding and deleting products through the admin panel.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use vitrine_integration_tests::{TestApp, location, png_bytes, product_fields};
use vitrine_server::db::UserRepository;

#[tokio::test]
async fn first_boot_has_one_admin_and_no_products() {
    let app = TestApp::spawn().await;

    assert_eq!(UserRepository::new(&app.pool).count().await.unwrap(), 1);
    assert!(app.products().await.is_empty());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn add_then_delete_product() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    assert!(!app.get_text("/").await.contains("Running shoe"));

    let response = app.add_product("Running shoe", "shoe.png", png_bytes(800, 400)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let products = app.products().await;
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.name, "Running shoe");
    assert_eq!(product.price.as_str(), "120,000 Toman");
    let image = product.image.clone().unwrap();
    assert!(image.as_str().ends_with("_shoe.png"));

    let path = app.upload_dir.join(image.as_str());
    assert_eq!(image::image_dimensions(&path).unwrap(), (600, 600));

    let listing = app.get_text("/").await;
    assert!(listing.contains("Running shoe"));
    assert!(listing.contains(&format!("/uploads/{image}")));
    assert_eq!(
        app.get(&format!("/uploads/{image}")).await.status(),
        StatusCode::OK
    );

    let admin_page = app.get_text("/admin").await;
    assert!(admin_page.contains("Product added"));

    let response = app.get(&format!("/admin/delete/{}", product.id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    assert!(app.products().await.is_empty());
    assert!(!path.exists());
    assert!(!app.get_text("/").await.contains("Running shoe"));
}

#[tokio::test]
async fn deleting_absent_product_is_a_no_op() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app.get("/admin/delete/999").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    assert_eq!(app.get("/admin").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_removes_row_when_image_file_is_gone() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    app.add_product("Sandal", "sandal.png", png_bytes(300, 300)).await;
    let products = app.products().await;
    assert_eq!(products.len(), 1);
    let product = &products[0];

    let image = product.image.clone().unwrap();
    std::fs::remove_file(app.upload_dir.join(image.as_str())).unwrap();
    assert!(app.uploaded_files().is_empty());

    let response = app.get(&format!("/admin/delete/{}", product.id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    assert!(app.products().await.is_empty());
    assert!(app.get_text("/admin").await.contains("Product deleted"));
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app.get("/admin/delete/shoe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn same_filename_twice_keeps_both_files() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    app.add_product("First", "shoe.png", png_bytes(300, 200)).await;
    app.add_product("Second", "shoe.png", png_bytes(200, 300)).await;

    let products = app.products().await;
    assert_eq!(products.len(), 2);
    assert_ne!(products[0].image, products[1].image);
    assert_eq!(app.uploaded_files().len(), 2);
}

#[tokio::test]
async fn concurrent_adds_with_same_filename() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let (a, b, c) = tokio::join!(
        app.add_product("A", "shoe.png", png_bytes(120, 80)),
        app.add_product("B", "shoe.png", png_bytes(80, 120)),
        app.add_product("C", "shoe.png", png_bytes(100, 100)),
    );
    for response in [a, b, c] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    assert_eq!(app.products().await.len(), 3);
    assert_eq!(app.uploaded_files().len(), 3);
}

#[tokio::test]
async fn add_without_image_is_rejected() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .post_multipart("/admin/add", product_fields("No picture"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    assert!(app.products().await.is_empty());
    assert!(app.uploaded_files().is_empty());
    assert!(
        app.get_text("/admin")
            .await
            .contains("Please choose an image for the product")
    );
}

#[tokio::test]
async fn empty_file_input_is_treated_as_missing() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let form = product_fields("Blank").part("image", Part::bytes(Vec::new()).file_name(""));
    let response = app.post_multipart("/admin/add", form).await;

    assert_eq!(location(&response), "/admin");
    assert!(app.products().await.is_empty());
}

#[tokio::test]
async fn undecodable_upload_is_rejected_and_removed() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .add_product("Broken", "fake.png", b"definitely not an image".to_vec())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.products().await.is_empty());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn missing_text_field_is_bad_request() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let image = Part::bytes(png_bytes(10, 10)).file_name("shoe.png");
    let form = Form::new().text("name", "Only a name").part("image", image);
    let response = app.post_multipart("/admin/add", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.products().await.is_empty());
}

#[tokio::test]
async fn text_fields_are_stored_verbatim() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let form = Form::new()
        .text("name", "  کفش  ")
        .text("description", "")
        .text("price", "call us")
        .part(
            "image",
            Part::bytes(png_bytes(50, 50)).file_name("shoe.png"),
        );
    let response = app.post_multipart("/admin/add", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let products = app.products().await;
    assert_eq!(products[0].name, "  کفش  ");
    assert_eq!(products[0].description.as_deref(), Some(""));
    assert_eq!(products[0].price.as_str(), "call us");
    assert!(
        products[0]
            .image
            .as_ref()
            .unwrap()
            .as_str()
            .ends_with("_shoe.png")
    );
}
