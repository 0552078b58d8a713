pub mod azure;
pub mod remote;
