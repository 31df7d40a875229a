// Browser smoke tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use pet_studio_core::PetStudio;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn loads_from_js_array() {
    let mut studio = PetStudio::new("{}").expect("default config is valid");
    studio.attach_viewer();

    let animations = js_sys::Array::new();
    animations.push(&"Dance".into());
    animations.push(&"walk".into());
    animations.push(&wasm_bindgen::JsValue::from_f64(3.0));
    studio.model_loaded_with(&animations, 0.0);

    let commands = studio.drain_commands().expect("commands serialize");
    assert!(commands.starts_with(r#"[{"type":"SetAnimation","name":"walk"}"#));
}

#[wasm_bindgen_test]
fn invalid_config_is_a_js_error() {
    let err = PetStudio::new(r#"{"initial_subject":"ferret"}"#)
        .err()
        .expect("unknown subject rejected");
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("ferret"));
}
