use placeholder_image::core::color::ColorValue;
use placeholder_image::core::descriptor::ImageFormat;
use placeholder_image::core::placeholder::{PlaceholderService, PlaceholderSettings};
use placeholder_image::settings::Config;
use placeholder_image::{AppState, init_openapi_route};
use poem::{http::StatusCode, test::TestClient};
use serde_json::Value;
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        env: "server".to_string(),
        host: "127.0.0.1".to_string(),
        port: 8000,
        prefix: None,
    }
}

fn test_settings() -> PlaceholderSettings {
    PlaceholderSettings {
        default_width: 640,
        default_height: 480,
        max_side_size: 2000,
        max_text_length: 50,
        default_format: ImageFormat::Jpeg,
        default_background_color: ColorValue::resolve("lightgray").unwrap(),
        default_text_color: ColorValue::resolve("black").unwrap(),
    }
}

fn client() -> TestClient<impl poem::Endpoint> {
    let app_state = Arc::new(AppState {
        service: Arc::new(PlaceholderService::new(test_settings())),
    });
    TestClient::new(init_openapi_route(app_state, &test_config()))
}

async fn body_bytes(resp: poem::test::TestResponse) -> Vec<u8> {
    resp.0.into_body().into_vec().await.unwrap()
}

async fn body_json(resp: poem::test::TestResponse) -> Value {
    let body = resp.0.into_body().into_string().await.unwrap();
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn square_jpeg_from_single_side() {
    let cli = client();

    let resp = cli.get("/300").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("image/jpeg");

    let bytes = body_bytes(resp).await;
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (300, 300));
}

#[tokio::test]
async fn png_with_text_query() {
    let cli = client();

    let resp = cli.get("/400x200.png").query("text", &"Hello").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("image/png");

    let decoded = image::load_from_memory(&body_bytes(resp).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 200));
}

#[tokio::test]
async fn gif_round_trip() {
    let cli = client();

    let resp = cli.get("/120X60.GIF").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("image/gif");

    let bytes = body_bytes(resp).await;
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Gif);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 60));
}

#[tokio::test]
async fn oversized_request_is_rejected() {
    let cli = client();

    let resp = cli.get("/3000").query("text", &"x").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(
        body["message"].as_str().unwrap(),
        "The width/height can't be greater than 2000."
    );
}

#[tokio::test]
async fn boundary_sizes() {
    let cli = client();

    cli.get("/2000x1.png").send().await.assert_status_is_ok();

    let resp = cli.get("/2001x1").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The width/height can't be greater than 2000."
    );

    let resp = cli.get("/0x10").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The width/height must be at least 1px."
    );
}

#[tokio::test]
async fn malformed_descriptors_are_rejected() {
    let cli = client();

    let resp = cli.get("/1x2x3").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The provided format is not valid."
    );

    let resp = cli.get("/64A").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The width/height size must be made of numbers only."
    );
}

#[tokio::test]
async fn long_text_is_rejected() {
    let cli = client();

    let resp = cli.get("/100").query("text", &"a".repeat(51)).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The text can't be longer than 50 letters."
    );
}

#[tokio::test]
async fn custom_background() {
    let cli = client();

    let resp = cli.get("/400x200.png/blue").send().await;
    resp.assert_status_is_ok();
    let decoded = image::load_from_memory(&body_bytes(resp).await)
        .unwrap()
        .to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255]);

    let resp = cli.get("/400x200/notacolor").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The provided background color does not have a valid format."
    );
}

#[tokio::test]
async fn custom_background_and_text_colors() {
    let cli = client();

    let resp = cli
        .get("/60x40.png/000/FF0000")
        .query("text", &"Hi")
        .send()
        .await;
    resp.assert_status_is_ok();
    let decoded = image::load_from_memory(&body_bytes(resp).await)
        .unwrap()
        .to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
    assert!(decoded.pixels().any(|p| p.0 == [255, 0, 0]));

    let resp = cli.get("/60x40/black/notacolor").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"].as_str().unwrap(),
        "The provided text color does not have a valid format."
    );
}

#[tokio::test]
async fn default_placeholder() {
    let cli = client();

    let resp = cli.get("/").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("image/jpeg");
    let decoded = image::load_from_memory(&body_bytes(resp).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));
}

#[tokio::test]
async fn identical_requests_return_identical_bytes() {
    let cli = client();

    let first = body_bytes(cli.get("/80x40.png").query("text", &"same").send().await).await;
    let second = body_bytes(cli.get("/80x40.png").query("text", &"same").send().await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn health_reports_limits() {
    let cli = client();

    let resp = cli.get("/health").send().await;
    resp.assert_status(StatusCode::OK);

    let health = body_json(resp).await;
    assert_eq!(health["status"].as_str().unwrap(), "healthy");
    assert_eq!(health["max_side_size"].as_u64().unwrap(), 2000);
    assert_eq!(health["max_text_length"].as_u64().unwrap(), 50);
    assert_eq!(health["default_image_type"].as_str().unwrap(), "jpg");
}

#[tokio::test]
async fn concurrent_requests_do_not_share_dimensions() {
    let app_state = Arc::new(AppState {
        service: Arc::new(PlaceholderService::new(test_settings())),
    });
    let config = test_config();

    let mut handles = vec![];
    for i in 1..=8u32 {
        let app_state_clone = app_state.clone();
        let config_clone = config.clone();
        handles.push(tokio::spawn(async move {
            let client = TestClient::new(init_openapi_route(app_state_clone, &config_clone));
            let resp = client.get(format!("/{}x{}.png", i * 10, i * 5)).send().await;
            resp.assert_status_is_ok();
            let bytes = resp.0.into_body().into_vec().await.unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            ((i * 10, i * 5), (decoded.width(), decoded.height()))
        }));
    }

    for handle in handles {
        let (expected, actual) = handle.await.unwrap();
        assert_eq!(expected, actual);
    }
}
