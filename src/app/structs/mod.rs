pub mod json_from_request;
