//! Reference games built on the kernel.

pub mod kittens;
