//! HTTP handlers for the JSON resources and the HTML workflow pages.

pub mod course;
pub mod enrollment;
pub mod pages;
pub mod student;
