mod builtin_scalars_tests;
