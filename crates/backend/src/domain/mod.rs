pub mod a001_request;
