use super::{avatar_card::AvatarCard, avatar_modal::AvatarModal};
use crate::state::ViewerConfig;
use crate::util::cache_busted;
use web_sys::UrlSearchParams;
use yew::prelude::*;

/// Student shown by the host page; the `name` and `avatar` query parameters override it.
#[derive(Clone, PartialEq)]
struct Student {
    name: String,
    avatar_url: Option<String>,
}

fn student_from_location() -> Student {
    let params = web_sys::window()
        .and_then(|win| win.location().search().ok())
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok());
    let get = |key: &str| {
        params
            .as_ref()
            .and_then(|p| p.get(key))
            .filter(|v| !v.trim().is_empty())
    };
    Student {
        name: get("name").unwrap_or_else(|| "Student".to_string()),
        avatar_url: get("avatar").map(|url| cache_busted(&url)),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(ViewerConfig::load);
    let student = use_state(student_from_location);
    let avatar_open = use_state(|| false);

    let open = {
        let avatar_open = avatar_open.clone();
        Callback::from(move |_| avatar_open.set(true))
    };
    let close = {
        let avatar_open = avatar_open.clone();
        Callback::from(move |_| avatar_open.set(false))
    };

    html! {
        <div id="root" style="min-height:100vh; display:flex; align-items:center; justify-content:center; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <AvatarCard
                name={student.name.clone()}
                avatar_url={student.avatar_url.clone().map(AttrValue::from)}
                on_open={open}
            />
            if let Some(url) = student.avatar_url.clone() {
                <AvatarModal
                    image_url={url}
                    is_open={*avatar_open}
                    on_close={close}
                    config={(*config).clone()}
                />
            }
        </div>
    }
}
