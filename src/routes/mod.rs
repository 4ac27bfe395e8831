pub mod analyze_route;
pub mod ask_route;
pub mod default_route;
