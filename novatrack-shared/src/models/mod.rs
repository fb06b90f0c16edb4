/// Database models and data structures
///
/// - `ticket`: Submitted incident/request records (novedades)
/// - `account`: Operator accounts authenticating against the admin surface

pub mod account;
pub mod ticket;
