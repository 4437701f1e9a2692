mod stack_tests;
mod repository_tests;
