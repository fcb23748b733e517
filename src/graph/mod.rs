pub mod aggregate;
pub mod exec;
pub mod layout;
pub mod output;

pub use aggregate::{add_commits, aggregate};
pub use exec::exec;
pub use layout::{Column, Grid, GridBounds};
pub use output::{output_graph, output_json, render, CellContent, RenderOptions, WeekdayLabels};
