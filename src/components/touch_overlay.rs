use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, TouchEvent, TouchList};
use yew::prelude::*;

use crate::input::{TouchInputController, TouchInputSink};
use crate::model::{Control, TouchSnapshot};

/// Shared controller; props compare by pointer.
#[derive(Clone)]
pub struct ControllerHandle(pub Rc<RefCell<TouchInputController>>);

impl ControllerHandle {
    pub fn new(controller: TouchInputController) -> Self {
        Self(Rc::new(RefCell::new(controller)))
    }
}

impl PartialEq for ControllerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TouchOverlayProps {
    pub controller: ControllerHandle,
}

// Listener removed from its target on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Self {
        // non-passive so preventDefault sticks on touch events
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &opts,
        );
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn set_active_class(el: &Element, on: bool) {
    let _ = el.class_list().toggle_with_force("active", on);
}

fn sync_buttons(buttons: &[(Control, HtmlElement)], snap: TouchSnapshot) {
    for (control, el) in buttons {
        set_active_class(el, snap.get(*control));
    }
}

/// Re-applies the `active` class to every button under `root`.
pub fn sync_overlay_classes(root: &Element, snap: TouchSnapshot) {
    for control in Control::ALL {
        let selector = format!("[data-control=\"{}\"]", control.name());
        if let Ok(Some(el)) = root.query_selector(&selector) {
            set_active_class(&el, snap.get(control));
        }
    }
}

fn touch_ids(list: &TouchList) -> Vec<i32> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| t.identifier())
        .collect()
}

fn touching_ids(list: &TouchList) -> HashSet<i32> {
    touch_ids(list).into_iter().collect()
}

/// Button-level release. Every lifted id is offered to the control, then the
/// controls held by touches no longer on screen are swept, since the document
/// listener never sees an event stopped at the button.
pub(crate) fn release_touches<S: TouchInputSink + ?Sized>(
    sink: &mut S,
    control: Control,
    lifted: &[i32],
    touching: &HashSet<i32>,
) {
    for &id in lifted {
        sink.on_touch_end(control, id);
    }
    sink.on_global_touch_end(touching);
}

fn button_listener(
    controller: &ControllerHandle,
    buttons: &Rc<Vec<(Control, HtmlElement)>>,
    control: Control,
    press: bool,
) -> Closure<dyn FnMut(Event)> {
    let controller = controller.clone();
    let buttons = buttons.clone();
    Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        e.stop_propagation();
        let Some(te) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        let changed = touch_ids(&te.changed_touches());
        let mut ctl = controller.0.borrow_mut();
        if press {
            let Some(&id) = changed.first() else {
                return;
            };
            ctl.on_touch_start(control, id);
        } else {
            release_touches(&mut *ctl, control, &changed, &touching_ids(&te.touches()));
        }
        sync_buttons(&buttons, ctl.state().snapshot());
    }) as Box<dyn FnMut(_)>)
}

fn prevent_default() -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(|e: Event| e.prevent_default()) as Box<dyn FnMut(_)>)
}

#[function_component(TouchOverlay)]
pub fn touch_overlay(props: &TouchOverlayProps) -> Html {
    let left_ref = use_node_ref();
    let right_ref = use_node_ref();
    let jump_ref = use_node_ref();

    {
        let controller = props.controller.clone();
        let refs = [
            (Control::Left, left_ref.clone()),
            (Control::Right, right_ref.clone()),
            (Control::Jump, jump_ref.clone()),
        ];
        use_effect_with((), move |_| {
            let buttons: Rc<Vec<(Control, HtmlElement)>> = Rc::new(
                refs.iter()
                    .filter_map(|(c, r)| r.cast::<HtmlElement>().map(|el| (*c, el)))
                    .collect(),
            );
            let mut listeners = Vec::new();
            for (control, el) in buttons.iter() {
                let target: &EventTarget = el.as_ref();
                listeners.push(Listener::attach(target, "contextmenu", prevent_default()));
                listeners.push(Listener::attach(target, "touchmove", prevent_default()));
                listeners.push(Listener::attach(
                    target,
                    "touchstart",
                    button_listener(&controller, &buttons, *control, true),
                ));
                listeners.push(Listener::attach(
                    target,
                    "touchend",
                    button_listener(&controller, &buttons, *control, false),
                ));
            }

            // Touches ending off the buttons never reach them; sweep on the document.
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let target: &EventTarget = document.as_ref();
                for event in ["touchend", "touchcancel"] {
                    let controller = controller.clone();
                    let buttons = buttons.clone();
                    let sweep = Closure::wrap(Box::new(move |e: Event| {
                        let Some(te) = e.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let mut ctl = controller.0.borrow_mut();
                        ctl.on_global_touch_end(&touching_ids(&te.touches()));
                        sync_buttons(&buttons, ctl.state().snapshot());
                    }) as Box<dyn FnMut(_)>);
                    listeners.push(Listener::attach(target, event, sweep));
                }
            }

            move || drop(listeners)
        });
    }

    html! {
        <div class="mobile-controls">
            <div class="dpad-container">
                <div class="dpad-grid">
                    <div></div>
                    <div></div>
                    <div></div>

                    <div class="dpad-button dpad-left" data-control="left" ref={left_ref}>
                        <div class="dpad-icon"></div>
                    </div>
                    <div></div>
                    <div class="dpad-button dpad-right" data-control="right" ref={right_ref}>
                        <div class="dpad-icon"></div>
                    </div>

                    <div></div>
                    <div></div>
                    <div></div>
                </div>
            </div>
            <div class="action-buttons">
                <button class="action-button jump-button" data-control="jump" ref={jump_ref}>
                    {"A"}
                </button>
            </div>
        </div>
    }
}
