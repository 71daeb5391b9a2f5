// Infrastructure: instance files, batch directories, report and LP files

pub mod batch;
pub mod instance_loader;
pub mod lp_export;
pub mod report;

pub use batch::{discover_instances, InstanceFile};
pub use instance_loader::{load_instance, parse_instance};
pub use lp_export::{export_lp, write_lp};
pub use report::{timestamped_report_path, ComparisonRecord, ReportWriter};
