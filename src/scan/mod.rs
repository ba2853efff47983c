mod load;
mod model;

pub use load::{load_scan_results, parse_scan_results};
pub use model::{Host, HostState, ScanResults};
