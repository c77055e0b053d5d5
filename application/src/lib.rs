pub mod service;
pub mod transfer;

#[cfg(test)]
mod test_support;
