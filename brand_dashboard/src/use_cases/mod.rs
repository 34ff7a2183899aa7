pub mod load_dashboard;
pub mod login;
pub mod logout;

#[cfg(test)]
pub(crate) mod test_support;
