mod lexer_tests;
mod property_tests;
mod utils;
