pub mod a001_request;
pub mod diagnostics;
