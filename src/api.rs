pub mod porssisahko;
pub mod webhook;
