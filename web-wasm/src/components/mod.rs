pub mod analyze_button;
pub mod error_banner;
pub mod header;
pub mod preview_panel;
pub mod result_card;
pub mod upload_area;
