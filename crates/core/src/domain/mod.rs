pub mod call;
pub mod carrier;
pub mod filter;
pub mod load;
