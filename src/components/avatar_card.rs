use yew::prelude::*;

use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct AvatarCardProps {
    pub name: AttrValue,
    /// None renders the default avatar, which cannot be opened.
    pub avatar_url: Option<AttrValue>,
    pub on_open: Callback<()>,
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[function_component(AvatarCard)]
pub fn avatar_card(props: &AvatarCardProps) -> Html {
    let avatar = match &props.avatar_url {
        Some(url) => {
            let open_cb = {
                let cb = props.on_open.clone();
                Callback::from(move |_: MouseEvent| cb.emit(()))
            };
            let error_cb = {
                let url = url.clone();
                Callback::from(move |_: Event| cwarn(&format!("failed to load avatar: {}", url)))
            };
            html! {
                <img
                    src={url.clone()}
                    alt="Student Avatar"
                    onclick={open_cb}
                    onerror={error_cb}
                    style="width:160px; height:160px; border-radius:50%; object-fit:cover; border:2px solid #30363d; cursor:pointer;"
                />
            }
        }
        None => html! {
            <div title="Default Avatar" style="width:160px; height:160px; border-radius:50%; background:#1d2430; border:2px solid #30363d; display:flex; align-items:center; justify-content:center; font-size:48px; color:#8b949e;">
                { initials(&props.name) }
            </div>
        },
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:12px; background:#161b22; border:1px solid #30363d; border-radius:12px; padding:20px 28px;">
            { avatar }
            <h3 style="margin:0; font-size:18px;">{ props.name.clone() }</h3>
        </div>
    }
}
