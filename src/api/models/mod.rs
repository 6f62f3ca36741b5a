pub mod faults;
pub mod maintenance;
pub mod monitoring;
pub mod plants;

pub use faults::FaultFinding;
pub use maintenance::MaintenanceSchedule;
pub use monitoring::{ChartDataset, ChartSeries, DashboardChart, HistoryChart};
pub use plants::MessageResponse;
