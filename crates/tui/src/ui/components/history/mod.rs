pub mod history_component;

pub use history_component::HistoryComponent;
