//! Database repositories module

pub mod faq;

pub use faq::FaqRepository;
