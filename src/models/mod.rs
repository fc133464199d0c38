//! Data models
//!
//! Report records and switch/interface state types.

mod interface;
mod report;

pub use interface::{
    AdminState, InterfaceChange, InterfaceSettings, InterfaceState, OperState, VlanId, VlanInfo,
};
pub use report::{
    Outcome, TestCaseReport, TestInfo, TestReport, TestSystemInfo, DURATION_NOT_MEASURED,
};
