//! Runs in a real browser: `wasm-pack test --headless --firefox webclient`.

use wasm_bindgen_test::*;

use webclient::avatar::{check_square, decode_dimensions, AvatarError, Dimensions};

wasm_bindgen_test_configure!(run_in_browser);

fn svg(width: u32, height: u32) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'%3E%3C/svg%3E",
        width, height
    )
}

#[wasm_bindgen_test]
async fn decodes_square_image() {
    let dimensions = decode_dimensions(&svg(48, 48)).await.unwrap();

    assert_eq!(dimensions, Dimensions { width: 48, height: 48 });
    assert_eq!(check_square(dimensions), Ok(()));
}

#[wasm_bindgen_test]
async fn reports_actual_dimensions_of_non_square_image() {
    let dimensions = decode_dimensions(&svg(40, 20)).await.unwrap();

    assert_eq!(
        check_square(dimensions),
        Err(AvatarError::NotSquare { width: 40, height: 20 })
    );
}

#[wasm_bindgen_test]
async fn fails_on_undecodable_data() {
    let result = decode_dimensions("data:image/png;base64,bm90IGFuIGltYWdl").await;

    assert!(matches!(result, Err(AvatarError::Decode(_))));
}
