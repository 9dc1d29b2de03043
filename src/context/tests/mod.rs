mod propagation_tests;
mod payload_tests;
