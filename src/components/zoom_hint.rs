use yew::prelude::*;

#[function_component(ZoomHint)]
pub fn zoom_hint() -> Html {
    html! {
        <div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.6); color:#e6edf3; border:1px solid #30363d; border-radius:8px; padding:6px 12px; font-size:12px; line-height:1.4; text-align:center; pointer-events:none; z-index:1;">
            {"Scroll or pinch to zoom. Drag to move when zoomed. Double-tap to reset."}
        </div>
    }
}
