use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use super::zoom_hint::ZoomHint;
use crate::model::{ViewState, ViewerAction};
use crate::state::{Point, TapTracker, ViewerConfig, Viewport};
use crate::util::{clog, cwarn, touch_points, viewport_of};

#[derive(Properties, PartialEq, Clone)]
pub struct AvatarModalProps {
    pub image_url: AttrValue,
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub config: ViewerConfig,
}

fn measure(node: &NodeRef) -> Viewport {
    node.cast::<Element>()
        .map(|el| viewport_of(&el))
        .unwrap_or_default()
}

fn mouse_pos(e: &MouseEvent, viewport: &Viewport) -> Point {
    viewport.to_local(e.client_x() as f64, e.client_y() as f64)
}

#[function_component(AvatarModal)]
pub fn avatar_modal(props: &AvatarModalProps) -> Html {
    let container_ref = use_node_ref();
    let view = {
        let config = props.config.clone();
        use_reducer(move || {
            if let Err(e) = config.clone().validated() {
                cwarn(&format!("{}; using default viewer config", e));
            }
            ViewState::new(config)
        })
    };
    let taps = use_mut_ref(TapTracker::default);
    let debug = view.config.debug_log;

    // Every close discards the session, however it was left.
    {
        let view = view.clone();
        let taps = taps.clone();
        use_effect_with(props.is_open, move |open| {
            if !*open {
                view.dispatch(ViewerAction::Close);
                *taps.borrow_mut() = TapTracker::default();
            }
            if debug {
                clog(if *open { "avatar viewer opened" } else { "avatar viewer closed" });
            }
            || ()
        });
    }

    // Wheel and touch go through non-passive listeners so preventDefault
    // stops page scroll and browser pinch-zoom.
    {
        let container_ref = container_ref.clone();
        let view = view.clone();
        let taps = taps.clone();
        use_effect_with(props.is_open, move |_| {
            let cleanup: Box<dyn FnOnce()> = match container_ref.cast::<Element>() {
                None => Box::new(|| ()),
                Some(el) => {
                    let wheel_cb = {
                        let el = el.clone();
                        let view = view.clone();
                        Closure::wrap(Box::new(move |e: WheelEvent| {
                            e.prevent_default();
                            let viewport = viewport_of(&el);
                            let cursor = viewport.to_local(e.client_x() as f64, e.client_y() as f64);
                            view.dispatch(ViewerAction::Wheel { delta_y: e.delta_y(), cursor, viewport });
                        }) as Box<dyn FnMut(_)>)
                    };

                    let touch_start_cb = {
                        let el = el.clone();
                        let view = view.clone();
                        let taps = taps.clone();
                        Closure::wrap(Box::new(move |e: TouchEvent| {
                            e.prevent_default();
                            let viewport = viewport_of(&el);
                            let touches = touch_points(&e.touches(), &viewport);
                            taps.borrow_mut().touch_start(&touches, js_sys::Date::now());
                            view.dispatch(ViewerAction::TouchStart { touches });
                        }) as Box<dyn FnMut(_)>)
                    };

                    let touch_move_cb = {
                        let el = el.clone();
                        let view = view.clone();
                        let taps = taps.clone();
                        Closure::wrap(Box::new(move |e: TouchEvent| {
                            e.prevent_default();
                            let viewport = viewport_of(&el);
                            let touches = touch_points(&e.touches(), &viewport);
                            taps.borrow_mut().touch_move(&touches);
                            view.dispatch(ViewerAction::TouchMove { touches, viewport });
                        }) as Box<dyn FnMut(_)>)
                    };

                    let touch_end_cb = {
                        let view = view.clone();
                        Closure::wrap(Box::new(move |_e: TouchEvent| {
                            view.dispatch(ViewerAction::TouchEnd);
                            if taps.borrow_mut().touch_end(js_sys::Date::now()) {
                                view.dispatch(ViewerAction::Reset);
                                if debug { clog("avatar viewer reset (double tap)"); }
                            }
                        }) as Box<dyn FnMut(_)>)
                    };

                    let opts = AddEventListenerOptions::new();
                    opts.set_passive(false);
                    let listeners: [(&'static str, &js_sys::Function); 5] = [
                        ("wheel", wheel_cb.as_ref().unchecked_ref()),
                        ("touchstart", touch_start_cb.as_ref().unchecked_ref()),
                        ("touchmove", touch_move_cb.as_ref().unchecked_ref()),
                        ("touchend", touch_end_cb.as_ref().unchecked_ref()),
                        ("touchcancel", touch_end_cb.as_ref().unchecked_ref()),
                    ];
                    for (name, cb) in listeners {
                        let _ = el.add_event_listener_with_callback_and_add_event_listener_options(name, cb, &opts);
                    }

                    Box::new(move || {
                        let listeners: [(&'static str, &js_sys::Function); 5] = [
                            ("wheel", wheel_cb.as_ref().unchecked_ref()),
                            ("touchstart", touch_start_cb.as_ref().unchecked_ref()),
                            ("touchmove", touch_move_cb.as_ref().unchecked_ref()),
                            ("touchend", touch_end_cb.as_ref().unchecked_ref()),
                            ("touchcancel", touch_end_cb.as_ref().unchecked_ref()),
                        ];
                        for (name, cb) in listeners {
                            let _ = el.remove_event_listener_with_callback(name, cb);
                        }
                        // closures must outlive their registration
                        drop((wheel_cb, touch_start_cb, touch_move_cb, touch_end_cb));
                    })
                }
            };
            cleanup
        });
    }

    if !props.is_open {
        return html! {};
    }

    let on_background = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_mouse_down = {
        let view = view.clone();
        let node = container_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let pos = mouse_pos(&e, &measure(&node));
            view.dispatch(ViewerAction::PointerDown { pos });
        })
    };
    let on_mouse_move = {
        let view = view.clone();
        let node = container_ref.clone();
        Callback::from(move |e: MouseEvent| {
            if !view.is_interacting() {
                return;
            }
            let viewport = measure(&node);
            let pos = mouse_pos(&e, &viewport);
            view.dispatch(ViewerAction::PointerMove { pos, viewport });
        })
    };
    let on_mouse_up = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.dispatch(ViewerAction::PointerUp))
    };
    let on_mouse_leave = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.dispatch(ViewerAction::PointerLeave))
    };
    let on_double_click = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            view.dispatch(ViewerAction::Reset);
            if debug { clog("avatar viewer reset (double click)"); }
        })
    };
    let on_image_error = {
        let url = props.image_url.clone();
        Callback::from(move |_: Event| cwarn(&format!("failed to load avatar: {}", url)))
    };

    let transition = if view.is_interacting() { "none" } else { view.config.transition.as_str() };
    let image_style = format!(
        "max-width:100%; max-height:100%; object-fit:contain; user-select:none; transform:{}; transition:{}; cursor:{};",
        view.transform_css(),
        transition,
        view.cursor().as_css(),
    );

    html! {
        <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; z-index:100;">
            <div onclick={on_background} style="position:absolute; inset:0; background:rgba(0,0,0,0.85);"></div>
            <div
                ref={container_ref}
                onmousedown={on_mouse_down}
                onmousemove={on_mouse_move}
                onmouseup={on_mouse_up}
                onmouseleave={on_mouse_leave}
                style="position:relative; width:min(90vw, 800px); height:80vh; overflow:hidden; display:flex; align-items:center; justify-content:center; touch-action:none;"
            >
                <ZoomHint />
                <img
                    src={props.image_url.clone()}
                    alt="Full size avatar"
                    draggable="false"
                    style={image_style}
                    ondblclick={on_double_click}
                    onerror={on_image_error}
                />
            </div>
        </div>
    }
}
