//! Pure-logic testing: deterministic drivers, policies, and scenario runs.

pub mod driver;
pub mod policy;
pub mod reports;
pub mod scenarios;
pub mod simulation;
pub mod storage;

pub use driver::FrameClock;
pub use policy::{PurchasePolicy, Strategy};
pub use reports::{TestReport, generate_console_report, generate_json_report};
pub use scenarios::{ScenarioOptions, ScenarioResult, list_scenarios, run_scenario};
pub use simulation::{RunRecord, SimulationConfig, SimulationOutcome, run_simulation};
pub use storage::{FileStorage, StorageError};
