pub mod draft;
pub mod filter;
pub mod promotion;
#[cfg(test)]
pub mod test_utils;

pub use draft::Draft;
pub use filter::Filters;
pub use promotion::Promotion;
