pub mod fib_config;
