pub mod canvas_toolbar;
pub mod chat_panel;
pub mod session_list;
pub mod status_bar;
pub mod tutor_panel;
