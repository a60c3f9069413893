pub mod cookie_utils;
pub mod redirect_validator;
pub mod responses;
