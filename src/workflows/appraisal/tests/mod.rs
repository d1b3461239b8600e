mod common;

mod resolve;
