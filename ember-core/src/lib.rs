pub mod lexer;
pub mod parser;
pub mod environment;
pub mod interpreter;
pub mod utils;
