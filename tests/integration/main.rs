//! Integration tests for subseek

mod helpers;

mod http_test;
mod seek_flow_test;
