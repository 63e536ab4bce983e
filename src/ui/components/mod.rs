pub mod chart;
pub mod history_list;
pub mod hud;
pub mod result_summary;
pub mod typing_area;
