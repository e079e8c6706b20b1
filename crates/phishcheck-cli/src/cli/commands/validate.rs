//! `phishcheck validate <url>` – run only the input validator.

use phishcheck_core::validate::validate;

use crate::cli::{EXIT_ERROR, EXIT_SAFE};

pub fn run_validate(url: &str) -> i32 {
    match validate(url) {
        Ok(valid) => {
            println!("valid: {}", valid);
            println!("host:  {}", valid.host());
            println!("parsed: {}", valid.url());
            EXIT_SAFE
        }
        Err(err) => {
            println!("{err}");
            EXIT_ERROR
        }
    }
}
