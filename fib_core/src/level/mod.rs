pub mod fib_level;
