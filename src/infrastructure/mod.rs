pub mod in_memory;
pub mod simulated_gateway;
