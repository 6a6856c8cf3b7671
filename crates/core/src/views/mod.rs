pub mod gantt;
pub mod utilization;
