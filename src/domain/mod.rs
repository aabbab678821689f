pub mod company;
pub mod extraction;
