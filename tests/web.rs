#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Promise, Reflect};
use mario_controls::input::{Haptics, TouchInputController, TouchInputSink};
use mario_controls::mobile::{MobileControls, ROOT_ID};
use mario_controls::model::{Control, TouchSnapshot};
use mario_controls::util::{is_touch_device, NavigatorHaptics};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, EventTarget, Touch, TouchEvent, TouchEventInit, TouchInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn root_present() -> bool {
    document().get_element_by_id(ROOT_ID).is_some()
}

fn button(control: Control) -> Element {
    let selector = format!("#{} [data-control=\"{}\"]", ROOT_ID, control.name());
    document().query_selector(&selector).unwrap().unwrap()
}

fn has_active_class(control: Control) -> bool {
    button(control).class_list().contains("active")
}

// Lets yew run its scheduled render and effects.
async fn next_tick() {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 10)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn touch(id: i32, target: &EventTarget) -> Touch {
    let init = Object::new();
    Reflect::set(&init, &JsValue::from_str("identifier"), &JsValue::from(id)).unwrap();
    Reflect::set(&init, &JsValue::from_str("target"), target).unwrap();
    Touch::new(init.unchecked_ref::<TouchInit>()).unwrap()
}

fn fire(target: &EventTarget, kind: &str, changed: &[Touch], touching: &[Touch]) {
    let init = Object::new();
    let set = |key: &str, value: &JsValue| {
        Reflect::set(&init, &JsValue::from_str(key), value).unwrap();
    };
    set("bubbles", &JsValue::TRUE);
    set("cancelable", &JsValue::TRUE);
    set("changedTouches", &changed.iter().collect::<Array>());
    set("touches", &touching.iter().collect::<Array>());
    let event = TouchEvent::new_with_event_init_dict(kind, init.unchecked_ref::<TouchEventInit>())
        .unwrap();
    target.dispatch_event(&event).unwrap();
}

async fn mounted() -> MobileControls {
    let mut mobile = MobileControls::with_controller(TouchInputController::without_haptics(), true);
    mobile.init().unwrap();
    next_tick().await;
    mobile
}

#[wasm_bindgen_test]
fn detection_does_not_throw() {
    let _ = is_touch_device();
}

#[wasm_bindgen_test]
fn vibration_is_best_effort() {
    assert!(NavigatorHaptics.pulse(10).is_ok());
}

#[wasm_bindgen_test]
fn forced_overlay_mounts_and_unmounts() {
    let mut mobile = MobileControls::with_controller(TouchInputController::without_haptics(), true);
    mobile.init().unwrap();
    assert!(mobile.is_initialized());
    assert!(root_present());

    // second init is a no-op
    mobile.init().unwrap();

    mobile.controller().0.borrow_mut().on_touch_start(Control::Left, 1);
    assert!(mobile.is_control_active(Control::Left));

    mobile.destroy();
    assert!(!mobile.is_initialized());
    assert!(!root_present());
    assert_eq!(mobile.get_state(), TouchSnapshot::default());
}

#[wasm_bindgen_test]
async fn overlay_renders_the_three_buttons() {
    let mut mobile = mounted().await;
    let selector = format!("#{} .mobile-controls", ROOT_ID);
    assert!(document().query_selector(&selector).unwrap().is_some());
    for control in Control::ALL {
        let _ = button(control);
    }
    assert_eq!(button(Control::Jump).text_content().unwrap().trim(), "A");
    mobile.destroy();
}

#[wasm_bindgen_test]
async fn button_touch_drives_state_and_class() {
    let mut mobile = mounted().await;
    let left: EventTarget = button(Control::Left).into();
    let finger = touch(1, &left);

    fire(&left, "touchstart", &[finger.clone()], &[finger.clone()]);
    assert!(mobile.is_control_active(Control::Left));
    assert!(has_active_class(Control::Left));
    assert!(!has_active_class(Control::Right));

    fire(&left, "touchend", &[finger], &[]);
    assert!(!mobile.is_control_active(Control::Left));
    assert!(!has_active_class(Control::Left));
    mobile.destroy();
}

#[wasm_bindgen_test]
async fn two_fingers_lifting_together_release_jump() {
    let mut mobile = mounted().await;
    let jump: EventTarget = button(Control::Jump).into();
    let first = touch(1, &jump);
    let second = touch(2, &jump);

    fire(&jump, "touchstart", &[first.clone()], &[first.clone()]);
    fire(&jump, "touchstart", &[second.clone()], &[first.clone(), second.clone()]);
    assert!(mobile.is_control_active(Control::Jump));

    fire(&jump, "touchend", &[first, second], &[]);
    assert!(!mobile.is_control_active(Control::Jump));
    assert!(!has_active_class(Control::Jump));
    mobile.destroy();
}

#[wasm_bindgen_test]
async fn reset_clears_the_active_class() {
    let mut mobile = mounted().await;
    let right: EventTarget = button(Control::Right).into();
    let finger = touch(4, &right);
    fire(&right, "touchstart", &[finger.clone()], &[finger]);
    assert!(has_active_class(Control::Right));

    mobile.reset();
    assert!(!has_active_class(Control::Right));
    assert_eq!(mobile.get_state(), TouchSnapshot::default());
    assert!(mobile.is_initialized());
    mobile.destroy();
}

#[wasm_bindgen_test]
async fn document_touchcancel_releases_controls() {
    let mut mobile = mounted().await;
    let left: EventTarget = button(Control::Left).into();
    let finger = touch(7, &left);
    fire(&left, "touchstart", &[finger.clone()], &[finger.clone()]);
    assert!(mobile.is_control_active(Control::Left));

    let doc: EventTarget = document().into();
    fire(&doc, "touchcancel", &[finger], &[]);
    assert!(!mobile.is_control_active(Control::Left));
    assert!(!has_active_class(Control::Left));
    mobile.destroy();
}
