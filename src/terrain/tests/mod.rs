mod generator_tests;
mod structure_tests;
