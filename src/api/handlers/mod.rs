pub mod appointment;
pub mod artist;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod favorite;
pub mod health;
pub mod payment;
pub mod review;
pub mod saved_ar;
pub mod tattoo;
pub mod user;
