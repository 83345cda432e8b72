//! Filesystem locations derived from the XDG base directory spec.

pub mod xdg_root;
