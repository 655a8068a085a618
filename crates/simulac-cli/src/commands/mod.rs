pub mod activity;
pub mod common;
pub mod compare_fate;
pub mod fate;
pub mod fig3;
pub mod gensims;
pub mod integrate;
pub mod loading;
pub mod stats;
pub mod summary;
