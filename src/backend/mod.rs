//! Backend: Python source generation

pub mod python;
