pub mod common;
pub mod ir;
pub mod op;
pub mod report;
pub(crate) mod utility;
