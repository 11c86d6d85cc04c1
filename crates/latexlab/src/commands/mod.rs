pub mod build;
pub mod kpsewhich;
pub mod lang;
pub mod paths;
pub mod tmpdir;
