pub mod app;
pub mod avatar_card;
pub mod avatar_modal;
pub mod zoom_hint;
