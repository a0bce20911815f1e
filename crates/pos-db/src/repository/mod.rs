//! # Repository Module
//!
//! Database repository implementations.
//!
//! Each repository wraps the shared pool behind a focused API; SQL lives
//! here and nowhere else. The one multi-statement unit of work in the
//! system - the checkout transaction - is
//! [`sale::SaleRepository::checkout`].
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD (inventory)
//! - [`category::CategoryRepository`] - Category CRUD and find-or-create
//! - [`customer::CustomerRepository`] - Customer lookup/creation by phone
//! - [`user::UserRepository`] - Cashier/manager lookup and login check
//! - [`sale::SaleRepository`] - Checkout transaction and sale history

pub mod category;
pub mod customer;
pub mod product;
pub mod sale;
pub mod user;
