pub mod chart;
pub mod process_list;
pub mod status;

pub use chart::{ChartWidget, Metric};
pub use process_list::{ProcessListWidget, Ranking};
pub use status::StatusWidget;
