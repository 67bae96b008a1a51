pub mod scoreboard_component;

pub use scoreboard_component::ScoreboardComponent;
