//! wjview - Wabbajack Modlist Viewer
//!
//! Reads the manifest out of a `.wabbajack` file and shows what the list
//! would install: every mod, where to download it, and which files it puts
//! where. Nothing is downloaded or installed.

pub mod catalogue;
pub mod config;
pub mod games;
pub mod modlist;
pub mod session;
