pub mod emitters;
pub mod generator;
pub mod naming;
pub mod printer;

pub use generator::AxumServerGenerator;
