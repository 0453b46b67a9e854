pub mod enums;
pub mod fib_error;
pub mod utils;
