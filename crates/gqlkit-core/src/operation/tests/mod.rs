mod request_interpreter_tests;
